//! OCRBRIDGE 핵심 에러 타입.
//!
//! 모든 어댑터 crate는 자체 에러 타입에서 `#[from] CoreError`로 래핑한다.

use thiserror::Error;

/// 코어 레이어 에러.
/// 직렬화, 설정, 네트워크, 업스트림 중계 등 도메인 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 네트워크 에러 (연결 실패, 응답 본문 읽기 실패)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 업스트림 OCR 서비스가 2xx 외 상태를 반환함.
    /// 상태 코드는 호출자에게 그대로 중계된다.
    #[error("업스트림 에러 ({status}): {body}")]
    Upstream {
        /// 업스트림이 반환한 HTTP 상태 코드
        status: u16,
        /// 업스트림 응답 본문
        body: String,
    },

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}
