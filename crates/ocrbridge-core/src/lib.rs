//! # ocrbridge-core
//!
//! OCRBRIDGE 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 모든 크레이트가 공유하는 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`] — 와이어 데이터 구조체 (serde Serialize/Deserialize)
//! - [`ports`] — Hexagonal Architecture 포트 인터페이스 (async_trait)
//! - [`error`] — 핵심 에러 타입 (thiserror)
//! - [`config`] — 애플리케이션 설정 구조체
//! - [`config_manager`] — 설정 파일 관리 (로드/저장)

pub mod config;
pub mod config_manager;
pub mod error;
pub mod models;
pub mod ports;

#[cfg(test)]
mod tests {
    use crate::models::ocr::{OcrEnvelope, TextRegion};

    #[test]
    fn envelope_serde_roundtrip() {
        let json = r#"{
            "result": {
                "errcode": 0,
                "width": 640,
                "height": 400,
                "imgpath": "/tmp/upload_001.jpg",
                "ocr_response": [
                    {"text": "invoice", "left": 12.0, "top": 8.0, "right": 96.0, "bottom": 30.0, "rate": 0.97}
                ]
            }
        }"#;
        let envelope: OcrEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.result.errcode, 0);
        assert_eq!(envelope.result.ocr_response.len(), 1);
        assert_eq!(envelope.result.ocr_response[0].text, "invoice");

        let back = serde_json::to_value(&envelope).unwrap();
        let original: serde_json::Value = serde_json::from_str(json).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn region_rate_in_unit_interval() {
        let region = TextRegion {
            text: "total".to_string(),
            left: 0.0,
            top: 0.0,
            right: 40.0,
            bottom: 16.0,
            rate: 0.88,
            extra: Default::default(),
        };
        assert!((0.0..=1.0).contains(&region.rate));
    }

    #[test]
    fn config_defaults() {
        let config = crate::config::AppConfig::default_config();
        assert_eq!(config.web.port, 8080);
        assert!(!config.web.allow_external);
        assert!(config.upstream.endpoint.ends_with("/ocr"));
    }
}
