//! # ocrbridge-client
//!
//! 클라이언트 파이프라인 라이브러리.
//! 파일 선택 → 검증 → base64 인코딩 → 프록시 요청 → 렌더링 흐름을
//! `OcrProvider` 포트 위에서 구동한다.
//!
//! ## 구조
//!
//! - [`status`] — `idle | loading | success | error` 상태 머신
//! - [`error`] — 클라이언트 측 에러 타입
//! - [`preview`] — 미리보기 리소스 해제 가드
//! - [`pipeline`] — 선택/검증/인코딩/요청 파이프라인
//! - [`render`] — 인식 결과 렌더 모델

pub mod error;
pub mod pipeline;
pub mod preview;
pub mod render;
pub mod status;

pub use error::PipelineError;
pub use pipeline::OcrPipeline;
pub use render::RenderModel;
pub use status::OcrStatus;
