//! 정적 파일 임베드 및 서빙.
//!
//! rust-embed를 사용하여 업로드 페이지를 바이너리에 임베드.

use axum::http::{header, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use rust_embed::Embed;

/// 업로드 페이지 임베드
///
/// `frontend/dist` 디렉토리의 파일들을 바이너리에 포함
#[derive(Embed)]
#[folder = "frontend/dist"]
#[include = "*.html"]
#[include = "*.js"]
#[include = "*.css"]
#[include = "*.svg"]
#[include = "*.ico"]
struct Assets;

/// 정적 파일 서빙을 위한 fallback 핸들러
pub async fn serve_static(uri: Uri) -> Response {
    serve_static_impl(uri)
}

/// 정적 파일 서빙 구현
fn serve_static_impl(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    // 빈 경로는 index.html로
    let path = if path.is_empty() { "index.html" } else { path };

    match Assets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();

            // Cache-Control 설정
            let cache_control = if path.ends_with(".html") {
                "no-cache"
            } else {
                "public, max-age=3600"
            };

            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, mime.as_ref()),
                    (header::CACHE_CONTROL, cache_control),
                ],
                content.data.into_owned(),
            )
                .into_response()
        }
        None => {
            // 알 수 없는 경로는 업로드 페이지로
            if let Some(index) = Assets::get("index.html") {
                Html(String::from_utf8_lossy(&index.data).to_string()).into_response()
            } else {
                (StatusCode::OK, Html(DEV_PLACEHOLDER.to_string())).into_response()
            }
        }
    }
}

/// 업로드 페이지 미임베드 시 표시할 API 안내
const DEV_PLACEHOLDER: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>ocrbridge</title>
</head>
<body>
    <h1>ocrbridge</h1>
    <p>OCR proxy API is running.</p>
    <ul>
        <li><code>POST /api/v1/ocr</code> - forward a base64 image to the OCR service</li>
        <li><code>OPTIONS /api/v1/ocr</code> - CORS preflight</li>
    </ul>
</body>
</html>"#;
