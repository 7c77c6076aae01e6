//! 파이프라인 UI 상태.
//!
//! 상태는 단일 tagged enum으로 표현한다 — 불린 여러 개를 병렬로 두면
//! `loading`과 `error`가 동시에 참이 되는 불가능한 조합이 생길 수 있다.

/// 파이프라인 상태 — `Idle → Loading → {Success, Error}`
///
/// 새 파일 선택은 항상 `Idle`로 리셋한 뒤 다시 시작한다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OcrStatus {
    /// 대기 — 선택된 요청 없음
    #[default]
    Idle,
    /// 요청 진행 중
    Loading,
    /// 인식 완료, 결과 보유
    Success,
    /// 요청 또는 파일 읽기 실패
    Error,
}

impl OcrStatus {
    /// 진행 중인 요청이 있는지 여부
    pub fn is_loading(&self) -> bool {
        matches!(self, OcrStatus::Loading)
    }

    /// 종료 상태(성공/실패)인지 여부
    pub fn is_settled(&self) -> bool {
        matches!(self, OcrStatus::Success | OcrStatus::Error)
    }
}
