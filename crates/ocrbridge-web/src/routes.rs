//! API 라우트 정의.

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::AppState;

/// API 라우트 생성
///
/// `/api/v1` 아래에 중첩된다.
pub fn api_routes() -> Router<AppState> {
    Router::new().route(
        "/ocr",
        post(handlers::ocr::recognize).options(handlers::ocr::preflight),
    )
}
