//! # ocrbridge-app
//!
//! OCRBRIDGE 바이너리 진입점.
//! 설정 로드, 업스트림 클라이언트 조립, 웹 서버 라이프사이클 관리.
//! `recognize` 서브커맨드로 클라이언트 파이프라인을 직접 구동할 수도 있다.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ocrbridge_client::render::NO_TEXT_PLACEHOLDER;
use ocrbridge_client::{OcrPipeline, OcrStatus, RenderModel};
use ocrbridge_core::config_manager::ConfigManager;
use ocrbridge_network::{ProxyApiClient, UpstreamOcrClient};
use ocrbridge_web::WebServer;

/// OCRBRIDGE
///
/// 업로드된 이미지를 외부 OCR 서비스로 중계하는 프록시 + 업로드 페이지
#[derive(Parser, Debug)]
#[command(name = "ocrbridge")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 수신 포트 (기본: 설정 파일 값)
    #[arg(long, short = 'p')]
    port: Option<u16>,

    /// 업스트림 OCR 서비스 URL (기본: 설정 파일 값)
    #[arg(long, short = 'u')]
    upstream: Option<String>,

    /// 외부 접근 허용 (0.0.0.0 바인드)
    #[arg(long)]
    allow_external: bool,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,

    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 프록시 서버 실행 (기본)
    Serve,
    /// 이미지 파일을 프록시로 보내 인식 결과를 출력
    Recognize {
        /// 이미지 파일 경로
        file: PathBuf,

        /// 프록시 서버 URL
        #[arg(long, short = 's', default_value = "http://localhost:8080")]
        server: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 로깅 초기화 — RUST_LOG가 있으면 그쪽이 우선
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match args.command {
        Some(Command::Recognize { ref file, ref server }) => recognize(file, server).await,
        Some(Command::Serve) | None => serve(&args).await,
    }
}

/// 프록시 서버 실행
async fn serve(args: &Args) -> Result<()> {
    // 설정 로드 + CLI 오버라이드
    let config_manager = match &args.config {
        Some(path) => ConfigManager::with_path(path.clone())?,
        None => ConfigManager::new()?,
    };
    let mut config = config_manager.get();
    if let Some(port) = args.port {
        config.web.port = port;
    }
    if let Some(upstream) = &args.upstream {
        config.upstream.endpoint = upstream.clone();
    }
    if args.allow_external {
        config.web.allow_external = true;
        warn!("외부 접근 허용 — 0.0.0.0 바인드");
    }

    info!(
        upstream = %config.upstream.endpoint,
        port = config.web.port,
        "ocrbridge 시작"
    );

    let provider = Arc::new(UpstreamOcrClient::new(&config.upstream.endpoint)?);
    let server = WebServer::new(provider, config.web);

    // Ctrl-C → 종료 신호
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("종료 신호 수신 (Ctrl-C)");
            let _ = shutdown_tx.send(true);
        }
    });

    server.run(shutdown_rx).await?;
    Ok(())
}

/// 클라이언트 파이프라인으로 파일 하나 인식
async fn recognize(file: &PathBuf, server: &str) -> Result<()> {
    let provider = Arc::new(ProxyApiClient::new(server)?);
    let mut pipeline = OcrPipeline::new(provider);

    let status = pipeline.process(file).await;
    pipeline.release_preview();

    match (status, pipeline.result()) {
        (OcrStatus::Success, Some(envelope)) => {
            match RenderModel::from_envelope(envelope) {
                RenderModel::Empty => println!("{}", NO_TEXT_PLACEHOLDER),
                RenderModel::Fragments { joined, rows } => {
                    println!("{}", joined);
                    println!();
                    for row in rows {
                        println!(
                            "{}  L{} T{} R{} B{}  {}",
                            row.text, row.left, row.top, row.right, row.bottom, row.confidence
                        );
                    }
                }
            }
            Ok(())
        }
        _ => {
            let message = pipeline
                .error_message()
                .unwrap_or("OCR request failed")
                .to_string();
            anyhow::bail!(message)
        }
    }
}
