//! API 에러 처리.
//!
//! 모든 에러는 `{ "error": "<message>" }` JSON envelope과 계약에 명시된
//! HTTP 상태 코드로 호출자에게 반환된다.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use ocrbridge_core::error::CoreError;
use ocrbridge_core::models::ocr::ErrorBody;

/// API 에러
#[derive(Debug, Error)]
pub enum ApiError {
    /// Content-Type이 application/json이 아님 → 415
    #[error("request must use JSON format")]
    UnsupportedMediaType,

    /// image 필드 누락 또는 string이 아님 → 400
    #[error("missing required parameter: image (string)")]
    MissingImage,

    /// 업스트림 OCR 서비스의 비 2xx 응답 — 상태 코드 그대로 중계
    #[error("OCR service request failed: {body}")]
    Upstream {
        /// 업스트림이 반환한 상태 코드
        status: u16,
        /// 업스트림 응답 본문
        body: String,
    },

    /// 내부 서버 오류 (네트워크 실패, 업스트림 JSON 파싱 실패 등) → 500
    #[error("internal server error")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::UnsupportedMediaType => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "request must use JSON format".to_string(),
            ),
            ApiError::MissingImage => (
                StatusCode::BAD_REQUEST,
                "missing required parameter: image (string)".to_string(),
            ),
            ApiError::Upstream { status, body } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                format!("OCR service request failed: {}", body),
            ),
            ApiError::Internal(cause) => {
                // 운영자 가시성을 위해 원인은 로그로만 남긴다
                error!(cause = %cause, "OCR 프록시 내부 오류");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = ErrorBody { error: message };
        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Upstream { status, body } => ApiError::Upstream { status, body },
            other => ApiError::Internal(other.to_string()),
        }
    }
}
