//! 와이어 데이터 구조체 모듈.

pub mod ocr;
