//! 애플리케이션 설정 구조체.
//!
//! 업스트림 OCR 엔드포인트와 웹 서버 설정을 정의한다.
//! `config_manager`를 통해 플랫폼 설정 디렉토리의 JSON 파일에서 로드.

use serde::{Deserialize, Serialize};

/// 기본 업스트림 OCR 서비스 엔드포인트
pub const DEFAULT_UPSTREAM_ENDPOINT: &str = "http://124.222.244.200:5000/ocr";

/// 기본 웹 서버 포트
const DEFAULT_WEB_PORT: u16 = 8080;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 업스트림 OCR 서비스 설정
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// 웹 서버 설정
    #[serde(default)]
    pub web: WebConfig,
}

/// 업스트림 OCR 서비스 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// 외부 OCR 서비스 URL (`POST /ocr`)
    #[serde(default = "default_upstream_endpoint")]
    pub endpoint: String,
}

/// 웹 서버 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// 수신 포트
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// 외부 접근 허용 (true면 0.0.0.0 바인드)
    #[serde(default)]
    pub allow_external: bool,
}

fn default_upstream_endpoint() -> String {
    DEFAULT_UPSTREAM_ENDPOINT.to_string()
}

fn default_web_port() -> u16 {
    DEFAULT_WEB_PORT
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            endpoint: default_upstream_endpoint(),
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_WEB_PORT,
            allow_external: false,
        }
    }
}

impl AppConfig {
    /// 기본 설정 생성
    pub fn default_config() -> Self {
        Self {
            upstream: UpstreamConfig::default(),
            web: WebConfig::default(),
        }
    }
}
