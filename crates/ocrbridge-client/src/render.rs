//! 인식 결과 렌더 모델.
//!
//! UI와 무관하게 표시 내용을 계산한다 — 합쳐진 텍스트 블록,
//! 조각별 행(반올림 좌표 + 퍼센트 신뢰도), 빈 결과 플레이스홀더.

use ocrbridge_core::models::ocr::{OcrEnvelope, TextRegion};

/// 빈 결과 플레이스홀더 문구
pub const NO_TEXT_PLACEHOLDER: &str = "no text recognized";

/// 조각 하나의 표시 행
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRow {
    /// 조각 텍스트 (개별 복사 대상)
    pub text: String,
    /// 반올림된 왼쪽 좌표
    pub left: i64,
    /// 반올림된 위쪽 좌표
    pub top: i64,
    /// 반올림된 오른쪽 좌표
    pub right: i64,
    /// 반올림된 아래쪽 좌표
    pub bottom: i64,
    /// 신뢰도 — 소수점 한 자리 퍼센트 (예: "97.5%")
    pub confidence: String,
}

/// 인식 결과 렌더 모델
#[derive(Debug, Clone, PartialEq)]
pub enum RenderModel {
    /// 인식된 텍스트 없음 — 플레이스홀더 표시
    Empty,
    /// 조각 목록 + 합쳐진 텍스트 블록
    Fragments {
        /// 모든 조각을 공백으로 이은 텍스트 (한 번에 복사 가능)
        joined: String,
        /// 조각별 행
        rows: Vec<RenderRow>,
    },
}

impl RenderModel {
    /// 응답 envelope에서 렌더 모델 계산
    pub fn from_envelope(envelope: &OcrEnvelope) -> Self {
        let regions = &envelope.result.ocr_response;
        if regions.is_empty() {
            return RenderModel::Empty;
        }

        let joined = regions
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let rows = regions.iter().map(RenderRow::from_region).collect();

        RenderModel::Fragments { joined, rows }
    }
}

impl RenderRow {
    /// 조각 하나에서 표시 행 계산
    fn from_region(region: &TextRegion) -> Self {
        Self {
            text: region.text.clone(),
            left: region.left.round() as i64,
            top: region.top.round() as i64,
            right: region.right.round() as i64,
            bottom: region.bottom.round() as i64,
            confidence: format!("{:.1}%", region.rate * 100.0),
        }
    }
}
