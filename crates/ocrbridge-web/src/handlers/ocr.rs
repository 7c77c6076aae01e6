//! OCR 프록시 핸들러.
//!
//! `POST /api/v1/ocr` — JSON `{ image }` 검증 후 업스트림 OCR 서비스로
//! 중계하고 응답을 그대로 반환한다. `OPTIONS`는 CORS preflight 전용.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use tracing::debug;

use crate::error::ApiError;
use crate::AppState;

/// `POST /api/v1/ocr` — OCR 프록시
///
/// 검증 순서는 계약 고정이다:
/// 1. Content-Type에 `application/json` 포함 (아니면 415)
/// 2. 본문이 JSON이고 `image`가 string (아니면 400)
/// 3. 업스트림 중계 — 비 2xx는 상태 코드 그대로, 그 외 실패는 500
pub async fn recognize(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false);
    if !is_json {
        return Err(ApiError::UnsupportedMediaType);
    }

    // 파싱 불가능한 본문에는 string image 파라미터가 있을 수 없다
    let value: serde_json::Value =
        serde_json::from_slice(&body).map_err(|_| ApiError::MissingImage)?;
    let image = value
        .get("image")
        .and_then(serde_json::Value::as_str)
        .ok_or(ApiError::MissingImage)?;

    debug!(payload_len = image.len(), "OCR 프록시 요청 수신");

    let envelope = state.provider.recognize(image).await?;

    debug!(
        regions = envelope.result.ocr_response.len(),
        "OCR 결과 중계"
    );

    Ok((
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "POST"),
        ],
        Json(envelope),
    ))
}

/// `OPTIONS /api/v1/ocr` — CORS preflight
pub async fn preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
    )
}
