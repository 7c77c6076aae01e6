//! 프록시 API 클라이언트.
//!
//! 자체 프록시 엔드포인트(`POST /api/v1/ocr`)를 호출하는 `OcrProvider`
//! 구현. 클라이언트 파이프라인이 브라우저의 `fetch` 대신 사용한다.

use async_trait::async_trait;
use tracing::{debug, warn};

use ocrbridge_core::error::CoreError;
use ocrbridge_core::models::ocr::{OcrEnvelope, OcrRequest};
use ocrbridge_core::ports::ocr_provider::OcrProvider;

/// 프록시 API 경로
const OCR_API_PATH: &str = "/api/v1/ocr";

/// 프록시 API 클라이언트 — `OcrProvider` 포트 구현
#[derive(Debug, Clone)]
pub struct ProxyApiClient {
    /// HTTP 클라이언트
    client: reqwest::Client,
    /// 프록시 서버 베이스 URL
    base_url: String,
}

impl ProxyApiClient {
    /// 새 프록시 API 클라이언트 생성
    pub fn new(base_url: &str) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl OcrProvider for ProxyApiClient {
    async fn recognize(&self, image_base64: &str) -> Result<OcrEnvelope, CoreError> {
        let url = format!("{}{}", self.base_url, OCR_API_PATH);
        let request = OcrRequest {
            image: image_base64.to_string(),
        };

        debug!(url = %url, payload_len = image_base64.len(), "프록시 OCR 요청");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("프록시 OCR 요청 실패: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CoreError::Network(format!("프록시 응답 읽기 실패: {}", e)))?;

        if !status.is_success() {
            warn!(status = %status, "프록시 OCR 오류 응답");
            return Err(CoreError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: OcrEnvelope = serde_json::from_str(&body)
            .map_err(|e| CoreError::Internal(format!("프록시 응답 파싱 실패: {}", e)))?;

        Ok(envelope)
    }

    fn provider_name(&self) -> &str {
        "proxy-api"
    }
}
