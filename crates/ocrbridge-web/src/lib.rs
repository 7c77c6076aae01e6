//! # ocrbridge-web
//!
//! OCR 프록시 웹 서버.
//! Axum 기반 프록시 엔드포인트 + 업로드 페이지 임베드.
//!
//! ## 기능
//! - `POST /api/v1/ocr` — 업스트림 OCR 서비스로 중계
//! - `OPTIONS /api/v1/ocr` — CORS preflight
//! - 정적 파일 서빙 (업로드 페이지)

pub mod embedded;
pub mod error;
pub mod handlers;
pub mod routes;

use axum::Router;
use ocrbridge_core::config::WebConfig;
use ocrbridge_core::ports::ocr_provider::OcrProvider;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// 포트 바인드 최대 시도 횟수
const MAX_PORT_ATTEMPTS: u16 = 10;

/// 웹 서버 애플리케이션 상태
///
/// 요청 간 공유되는 가변 상태가 없으므로 프록시는 무상태이며,
/// 인스턴스를 여러 개 띄워도 안전하다.
#[derive(Clone)]
pub struct AppState {
    /// OCR 제공자 (업스트림 클라이언트 또는 테스트용 가짜)
    pub provider: Arc<dyn OcrProvider>,
}

/// OCR 프록시 웹 서버
pub struct WebServer {
    config: WebConfig,
    state: AppState,
}

impl WebServer {
    /// 새 웹 서버 생성
    pub fn new(provider: Arc<dyn OcrProvider>, config: WebConfig) -> Self {
        Self {
            config,
            state: AppState { provider },
        }
    }

    /// 라우터 구성
    fn router(&self) -> Router {
        Router::new()
            .nest("/api/v1", routes::api_routes())
            .fallback(embedded::serve_static)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// 서버 실행
    ///
    /// 기본 포트에서 시작하여, 포트가 이미 사용 중이면 다음 포트를 시도합니다.
    /// 최대 10개 포트를 시도한 후 실패하면 에러를 반환합니다.
    ///
    /// # Arguments
    /// * `shutdown_rx` - 종료 신호 수신 채널
    pub async fn run(self, mut shutdown_rx: watch::Receiver<bool>) -> Result<(), std::io::Error> {
        let host = if self.config.allow_external {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        };

        let app = self.router();

        let base_port = self.config.port;
        let mut last_error = None;

        for attempt in 0..MAX_PORT_ATTEMPTS {
            let port = base_port.saturating_add(attempt);

            // 포트 오버플로우 체크
            if port < base_port && attempt > 0 {
                break;
            }

            let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
                Ok(a) => a,
                Err(e) => {
                    error!("잘못된 주소 {}:{} — {}", host, port, e);
                    continue;
                }
            };

            match TcpListener::bind(addr).await {
                Ok(listener) => {
                    if attempt > 0 {
                        warn!("포트 {} 사용 불가, 대체 포트 {} 사용", base_port, port);
                    }
                    info!("OCR 프록시 서버 시작: http://{}", addr);

                    let app = app.clone();
                    axum::serve(listener, app)
                        .with_graceful_shutdown(async move {
                            loop {
                                if *shutdown_rx.borrow() {
                                    info!("웹 서버 종료 신호 수신");
                                    break;
                                }
                                if shutdown_rx.changed().await.is_err() {
                                    break;
                                }
                            }
                        })
                        .await?;

                    info!("OCR 프록시 서버 종료");
                    return Ok(());
                }
                Err(e) => {
                    // AddrInUse 에러인 경우 다음 포트 시도
                    if e.kind() == std::io::ErrorKind::AddrInUse {
                        warn!("포트 {} 이미 사용 중, 다음 포트 시도...", port);
                        last_error = Some(e);
                        continue;
                    }
                    return Err(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::AddrInUse,
                format!(
                    "포트 {}-{} 모두 사용 불가",
                    base_port,
                    base_port.saturating_add(MAX_PORT_ATTEMPTS - 1)
                ),
            )
        }))
    }

    /// 서버 URL 반환
    pub fn url(&self) -> String {
        format!("http://localhost:{}", self.config.port)
    }
}
