//! # ocrbridge-network
//!
//! `OcrProvider` 포트의 HTTP 어댑터.
//! 업스트림 OCR 서비스 직접 호출(`UpstreamOcrClient`)과
//! 자체 프록시 API 호출(`ProxyApiClient`)을 담당한다.

pub mod proxy_api;
pub mod upstream;

pub use proxy_api::ProxyApiClient;
pub use upstream::UpstreamOcrClient;
