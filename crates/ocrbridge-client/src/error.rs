//! 클라이언트 파이프라인 에러 타입.
//!
//! 모든 에러는 인라인 메시지로 표시되며 자동 재시도는 없다 —
//! 사용자가 파일을 다시 선택해야 한다.

use thiserror::Error;

use ocrbridge_core::error::CoreError;

/// 클라이언트 파이프라인 에러
#[derive(Debug, Error)]
pub enum PipelineError {
    /// MIME 타입이 `image/`로 시작하지 않음
    #[error("only image file formats are supported")]
    InvalidFileType,

    /// 파일 크기가 2 MiB 상한 초과
    #[error("file size must not exceed 2MB")]
    FileTooLarge {
        /// 실제 파일 크기 (bytes)
        size: u64,
    },

    /// 파일 읽기 실패
    #[error("file read failed")]
    FileRead(#[source] std::io::Error),

    /// 프록시 요청 실패 (비 2xx 응답 포함)
    #[error("OCR processing failed")]
    Request(#[source] CoreError),
}
