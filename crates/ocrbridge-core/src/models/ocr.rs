//! OCR 와이어 타입.
//!
//! 프록시 엔드포인트와 업스트림 OCR 서비스가 주고받는 JSON 구조를 정의한다.
//! 업스트림 응답 envelope은 의미 변경 없이 호출자에게 그대로 중계된다.

use serde::{Deserialize, Serialize};

/// OCR 요청 본문 — `{ "image": "<base64>" }`
///
/// 서버 측에서는 base64 내용의 크기/형식 검증을 하지 않는다.
/// (타입이 string인지 여부만 확인)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrRequest {
    /// base64 인코딩된 이미지 (data URI 접두사 없음)
    pub image: String,
}

/// 인식된 텍스트 조각 하나 — 픽셀 좌표 바운딩 박스 + 신뢰도
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextRegion {
    /// 인식된 텍스트
    pub text: String,
    /// 바운딩 박스 왼쪽 좌표
    pub left: f64,
    /// 바운딩 박스 위쪽 좌표
    pub top: f64,
    /// 바운딩 박스 오른쪽 좌표
    pub right: f64,
    /// 바운딩 박스 아래쪽 좌표
    pub bottom: f64,
    /// 인식 신뢰도 (0.0 ~ 1.0)
    pub rate: f64,
    /// 문서화되지 않은 업스트림 필드 — 버리지 않고 그대로 중계
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// 업스트림 응답의 `result` 내부 구조
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrResponseBody {
    /// 업스트림 에러 코드 (0 = 정상)
    pub errcode: i64,
    /// 원본 이미지 너비 (픽셀)
    pub width: i64,
    /// 원본 이미지 높이 (픽셀)
    pub height: i64,
    /// 업스트림 서버 내 이미지 경로
    pub imgpath: String,
    /// 인식된 텍스트 조각 목록
    pub ocr_response: Vec<TextRegion>,
    /// 문서화되지 않은 업스트림 필드 — 버리지 않고 그대로 중계
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// 업스트림 OCR 서비스의 최상위 응답 envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrEnvelope {
    /// 응답 본문
    pub result: OcrResponseBody,
    /// `result` 옆에 붙는 문서화되지 않은 업스트림 필드
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// 에러 응답 본문 — 모든 비 2xx 프록시 응답에 사용
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// 사람이 읽을 수 있는 에러 메시지
    pub error: String,
}

impl OcrEnvelope {
    /// 인식된 조각이 하나도 없는지 여부
    pub fn is_empty(&self) -> bool {
        self.result.ocr_response.is_empty()
    }
}
