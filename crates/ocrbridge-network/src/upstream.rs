//! 업스트림 OCR 서비스 클라이언트.
//!
//! 외부 OCR HTTP 서비스(`POST /ocr`)에 `{ image }` JSON을 전달하고
//! 응답 envelope을 파싱한다. 단일 시도 — 재시도와 타임아웃이 없으므로
//! 업스트림의 지연과 실패는 호출자에게 그대로 전파된다.

use async_trait::async_trait;
use tracing::{debug, warn};

use ocrbridge_core::error::CoreError;
use ocrbridge_core::models::ocr::{OcrEnvelope, OcrRequest};
use ocrbridge_core::ports::ocr_provider::OcrProvider;

/// 업스트림 OCR 서비스 클라이언트 — `OcrProvider` 포트 구현
#[derive(Debug, Clone)]
pub struct UpstreamOcrClient {
    /// HTTP 클라이언트
    client: reqwest::Client,
    /// 업스트림 OCR 엔드포인트 URL
    endpoint: String,
}

impl UpstreamOcrClient {
    /// 새 업스트림 클라이언트 생성
    pub fn new(endpoint: &str) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {}", e)))?;

        debug!(endpoint = %endpoint, "UpstreamOcrClient 초기화");

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    /// 엔드포인트 URL 반환
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl OcrProvider for UpstreamOcrClient {
    async fn recognize(&self, image_base64: &str) -> Result<OcrEnvelope, CoreError> {
        let request = OcrRequest {
            image: image_base64.to_string(),
        };

        debug!(
            endpoint = %self.endpoint,
            payload_len = image_base64.len(),
            "업스트림 OCR 요청"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("업스트림 OCR 요청 실패: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CoreError::Network(format!("업스트림 응답 읽기 실패: {}", e)))?;

        if !status.is_success() {
            warn!(status = %status, "업스트림 OCR 오류 응답");
            return Err(CoreError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: OcrEnvelope = serde_json::from_str(&body)
            .map_err(|e| CoreError::Internal(format!("업스트림 응답 파싱 실패: {}", e)))?;

        debug!(
            regions = envelope.result.ocr_response.len(),
            "업스트림 OCR 결과 수신"
        );
        Ok(envelope)
    }

    fn provider_name(&self) -> &str {
        "upstream-ocr"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const SAMPLE_ENVELOPE: &str = r#"{
        "result": {
            "errcode": 0,
            "width": 640,
            "height": 400,
            "imgpath": "/data/upload_001.jpg",
            "ocr_response": [
                {"text": "hello", "left": 10.0, "top": 20.0, "right": 110.0, "bottom": 44.0, "rate": 0.98}
            ]
        }
    }"#;

    #[test]
    fn client_creation() {
        let client = UpstreamOcrClient::new("http://localhost:5000/ocr").unwrap();
        assert_eq!(client.endpoint(), "http://localhost:5000/ocr");
        assert_eq!(client.provider_name(), "upstream-ocr");
    }

    #[tokio::test]
    async fn recognize_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/ocr")
            .match_header("content-type", "application/json")
            .match_body(mockito::Matcher::Json(
                serde_json::json!({ "image": "aGVsbG8=" }),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(SAMPLE_ENVELOPE)
            .create_async()
            .await;

        let client = UpstreamOcrClient::new(&format!("{}/ocr", server.url())).unwrap();
        let envelope = client.recognize("aGVsbG8=").await.unwrap();

        assert_eq!(envelope.result.ocr_response.len(), 1);
        assert_eq!(envelope.result.ocr_response[0].text, "hello");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn recognize_upstream_error_carries_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/ocr")
            .with_status(503)
            .with_body("ocr engine overloaded")
            .create_async()
            .await;

        let client = UpstreamOcrClient::new(&format!("{}/ocr", server.url())).unwrap();
        let err = client.recognize("aGVsbG8=").await.unwrap_err();

        assert_matches!(
            err,
            CoreError::Upstream { status: 503, ref body } if body == "ocr engine overloaded"
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn recognize_malformed_json_is_internal_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/ocr")
            .with_status(200)
            .with_body("not json at all")
            .create_async()
            .await;

        let client = UpstreamOcrClient::new(&format!("{}/ocr", server.url())).unwrap();
        let err = client.recognize("aGVsbG8=").await.unwrap_err();

        assert_matches!(err, CoreError::Internal(_));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn recognize_connection_refused_is_network_error() {
        // 닫힌 포트로 요청 — 연결 실패는 Network 에러
        let client = UpstreamOcrClient::new("http://127.0.0.1:1/ocr").unwrap();
        let err = client.recognize("aGVsbG8=").await.unwrap_err();
        assert_matches!(err, CoreError::Network(_));
    }
}
