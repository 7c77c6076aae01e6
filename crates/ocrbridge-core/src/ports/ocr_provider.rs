//! OCR 제공자 포트.
//!
//! 업스트림 OCR 서비스 또는 프록시 API를 추상화하는 인터페이스를 정의한다.
//! 웹 핸들러와 클라이언트 파이프라인 모두 이 포트를 통해서만 네트워크에
//! 접근하므로, 테스트에서는 가짜 구현으로 대체할 수 있다.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::ocr::OcrEnvelope;

/// OCR 제공자 — 업스트림 서비스 또는 자체 프록시 API
///
/// 구현체: `UpstreamOcrClient` (외부 OCR 서비스 직접 호출),
/// `ProxyApiClient` (자체 `/api/v1/ocr` 호출)
#[async_trait]
pub trait OcrProvider: Send + Sync {
    /// base64 이미지에서 텍스트 + 바운딩 박스 추출
    ///
    /// 단일 시도. 재시도/타임아웃 없이 업스트림 지연과 실패가
    /// 호출자에게 그대로 전파된다.
    async fn recognize(&self, image_base64: &str) -> Result<OcrEnvelope, CoreError>;

    /// 제공자 이름 (예: "upstream-ocr", "proxy-api")
    fn provider_name(&self) -> &str;
}
