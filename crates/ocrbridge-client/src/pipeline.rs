//! 선택 → 검증 → 인코딩 → 요청 파이프라인.
//!
//! 한 번에 하나의 파일만 다루며, 새 선택은 항상 상태를 리셋하고
//! 진행 중이던 요청을 세대 번호로 무효화한다.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use base64::Engine;
use tracing::{debug, warn};

use ocrbridge_core::error::CoreError;
use ocrbridge_core::models::ocr::OcrEnvelope;
use ocrbridge_core::ports::ocr_provider::OcrProvider;

use crate::error::PipelineError;
use crate::preview::PreviewHandle;
use crate::status::OcrStatus;

/// 파일 크기 상한 — 2 MiB
pub const MAX_FILE_SIZE: u64 = 2 * 1024 * 1024;

/// 인코딩이 끝나 전송 대기 중인 요청
///
/// 세대 번호를 함께 들고 다니므로, 전송 중에 새 파일이 선택되면
/// 완료 시점에 폐기된다.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    /// 요청이 속한 선택 세대
    generation: u64,
    /// base64 인코딩된 이미지 (data URI 접두사 없음)
    image_base64: String,
}

impl PendingRequest {
    /// 전송될 base64 페이로드
    pub fn image_base64(&self) -> &str {
        &self.image_base64
    }
}

/// 클라이언트 OCR 파이프라인
///
/// 상태 머신: `Idle → Loading → {Success, Error}`.
/// 검증 실패(형식/크기)는 상태를 바꾸지 않고 에러 메시지만 남긴다.
pub struct OcrPipeline {
    /// OCR 제공자 (보통 `ProxyApiClient`)
    provider: Arc<dyn OcrProvider>,
    /// 미리보기 사본 디렉토리
    preview_dir: PathBuf,
    /// 현재 상태
    status: OcrStatus,
    /// 마지막 에러 메시지
    error: Option<String>,
    /// 마지막 인식 결과
    result: Option<OcrEnvelope>,
    /// 현재 미리보기 핸들
    preview: Option<PreviewHandle>,
    /// 선택 세대 — select_file마다 증가
    generation: u64,
}

impl OcrPipeline {
    /// 새 파이프라인 생성 (미리보기는 시스템 임시 디렉토리에)
    pub fn new(provider: Arc<dyn OcrProvider>) -> Self {
        Self::with_preview_dir(provider, std::env::temp_dir())
    }

    /// 미리보기 디렉토리를 지정하여 생성
    pub fn with_preview_dir(provider: Arc<dyn OcrProvider>, preview_dir: PathBuf) -> Self {
        Self {
            provider,
            preview_dir,
            status: OcrStatus::Idle,
            error: None,
            result: None,
            preview: None,
            generation: 0,
        }
    }

    /// 현재 상태
    pub fn status(&self) -> OcrStatus {
        self.status
    }

    /// 마지막 에러 메시지
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// 마지막 인식 결과
    pub fn result(&self) -> Option<&OcrEnvelope> {
        self.result.as_ref()
    }

    /// 현재 미리보기 경로
    pub fn preview_path(&self) -> Option<&Path> {
        self.preview.as_ref().and_then(PreviewHandle::path)
    }

    /// 파일 선택 — 검증, 미리보기 교체, 인코딩까지 수행
    ///
    /// 성공 시 상태는 `Loading`이 되고, [`submit`](Self::submit)으로 넘길
    /// `PendingRequest`를 반환한다. 검증 실패는 네트워크 요청 없이 에러
    /// 메시지만 남긴다.
    pub fn select_file(&mut self, path: &Path) -> Result<PendingRequest, PipelineError> {
        // 새 선택은 항상 이전 에러/결과를 지우고 Idle에서 시작
        self.generation += 1;
        self.status = OcrStatus::Idle;
        self.error = None;
        self.result = None;

        if let Err(e) = self.validate(path) {
            return Err(match e {
                // 읽기 실패는 Error 상태로 정규화, 검증 거절은 Idle 유지
                PipelineError::FileRead(_) => self.fail_read(e),
                other => {
                    self.error = Some(other.to_string());
                    other
                }
            });
        }

        // 이전 미리보기 해제 후 새로 생성
        if let Some(mut previous) = self.preview.take() {
            previous.release();
        }
        match PreviewHandle::create(path, &self.preview_dir) {
            Ok(handle) => self.preview = Some(handle),
            Err(e) => return Err(self.fail_read(e)),
        }

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => return Err(self.fail_read(PipelineError::FileRead(e))),
        };
        let image_base64 = base64::engine::general_purpose::STANDARD.encode(&bytes);

        debug!(
            path = %path.display(),
            bytes = bytes.len(),
            generation = self.generation,
            "파일 수락, 인코딩 완료"
        );

        self.status = OcrStatus::Loading;
        Ok(PendingRequest {
            generation: self.generation,
            image_base64,
        })
    }

    /// 대기 중인 요청 전송 후 결과 적용
    pub async fn submit(&mut self, pending: PendingRequest) {
        let outcome = self.provider.recognize(&pending.image_base64).await;
        self.complete(pending.generation, outcome);
    }

    /// 선택부터 완료까지 한 번에 수행하는 편의 메서드
    pub async fn process(&mut self, path: &Path) -> OcrStatus {
        if let Ok(pending) = self.select_file(path) {
            self.submit(pending).await;
        }
        self.status
    }

    /// 완료 적용 — 세대가 밀린 응답은 폐기
    pub fn complete(&mut self, generation: u64, outcome: Result<OcrEnvelope, CoreError>) {
        if generation != self.generation {
            debug!(
                stale = generation,
                current = self.generation,
                "밀린 세대의 응답 폐기"
            );
            return;
        }

        match outcome {
            Ok(envelope) => {
                self.status = OcrStatus::Success;
                self.result = Some(envelope);
            }
            Err(e) => {
                warn!("OCR 요청 실패: {}", e);
                self.status = OcrStatus::Error;
                self.error = Some(PipelineError::Request(e).to_string());
            }
        }
    }

    /// 미리보기 명시적 해제 (이미지 표시가 끝난 뒤)
    pub fn release_preview(&mut self) {
        if let Some(mut handle) = self.preview.take() {
            handle.release();
        }
    }

    /// MIME 타입과 크기 검증 — 통과 전에는 파일을 읽지 않는다
    fn validate(&self, path: &Path) -> Result<(), PipelineError> {
        let mime = mime_guess::from_path(path)
            .first()
            .ok_or(PipelineError::InvalidFileType)?;
        if mime.type_() != mime_guess::mime::IMAGE {
            return Err(PipelineError::InvalidFileType);
        }

        let size = fs::metadata(path).map_err(PipelineError::FileRead)?.len();
        if size > MAX_FILE_SIZE {
            return Err(PipelineError::FileTooLarge { size });
        }

        Ok(())
    }

    /// 파일 읽기 실패 — 상태를 Error로 정규화
    fn fail_read(&mut self, e: PipelineError) -> PipelineError {
        self.status = OcrStatus::Error;
        self.error = Some(e.to_string());
        e
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use ocrbridge_core::models::ocr::{OcrResponseBody, TextRegion};

    /// 호출 기록을 남기는 가짜 제공자
    struct RecordingProvider {
        payloads: Mutex<Vec<String>>,
        fail: bool,
    }

    impl RecordingProvider {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                payloads: Mutex::new(Vec::new()),
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                payloads: Mutex::new(Vec::new()),
                fail: true,
            })
        }

        fn call_count(&self) -> usize {
            self.payloads.lock().unwrap().len()
        }

        fn last_payload(&self) -> Option<String> {
            self.payloads.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl OcrProvider for RecordingProvider {
        async fn recognize(&self, image_base64: &str) -> Result<OcrEnvelope, CoreError> {
            self.payloads
                .lock()
                .unwrap()
                .push(image_base64.to_string());
            if self.fail {
                return Err(CoreError::Upstream {
                    status: 500,
                    body: "boom".to_string(),
                });
            }
            Ok(OcrEnvelope {
                result: OcrResponseBody {
                    errcode: 0,
                    width: 64,
                    height: 64,
                    imgpath: String::new(),
                    ocr_response: vec![TextRegion {
                        text: "hi".to_string(),
                        left: 1.0,
                        top: 2.0,
                        right: 3.0,
                        bottom: 4.0,
                        rate: 0.9,
                        extra: Default::default(),
                    }],
                    extra: Default::default(),
                },
                extra: Default::default(),
            })
        }

        fn provider_name(&self) -> &str {
            "recording"
        }
    }

    fn write_file(dir: &Path, name: &str, size: usize) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, vec![0xAB; size]).unwrap();
        path
    }

    #[tokio::test]
    async fn valid_image_transitions_idle_loading_success() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_file(dir.path(), "scan.jpg", 10 * 1024);
        let provider = RecordingProvider::ok();
        let mut pipeline =
            OcrPipeline::with_preview_dir(provider.clone(), dir.path().to_path_buf());

        assert_eq!(pipeline.status(), OcrStatus::Idle);
        let pending = pipeline.select_file(&image).unwrap();
        assert_eq!(pipeline.status(), OcrStatus::Loading);

        pipeline.submit(pending).await;
        assert_eq!(pipeline.status(), OcrStatus::Success);
        assert_eq!(
            pipeline.result().unwrap().result.ocr_response[0].text,
            "hi"
        );
        assert!(pipeline.error_message().is_none());
    }

    #[tokio::test]
    async fn payload_is_bare_base64() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_file(dir.path(), "scan.jpg", 10 * 1024);
        let provider = RecordingProvider::ok();
        let mut pipeline =
            OcrPipeline::with_preview_dir(provider.clone(), dir.path().to_path_buf());

        pipeline.process(&image).await;

        let payload = provider.last_payload().unwrap();
        assert!(!payload.starts_with("data:"));
        assert!(!payload.contains(','));
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(&payload)
            .unwrap();
        assert_eq!(decoded.len(), 10 * 1024);
    }

    #[tokio::test]
    async fn non_image_file_is_rejected_without_network() {
        let dir = tempfile::tempdir().unwrap();
        let text = write_file(dir.path(), "notes.txt", 128);
        let provider = RecordingProvider::ok();
        let mut pipeline =
            OcrPipeline::with_preview_dir(provider.clone(), dir.path().to_path_buf());

        let result = pipeline.select_file(&text);
        assert_matches!(result, Err(PipelineError::InvalidFileType));
        assert_eq!(pipeline.status(), OcrStatus::Idle);
        assert_eq!(
            pipeline.error_message(),
            Some("only image file formats are supported")
        );
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn oversized_image_is_rejected_without_network() {
        let dir = tempfile::tempdir().unwrap();
        let big = write_file(dir.path(), "big.jpg", 3 * 1024 * 1024);
        let provider = RecordingProvider::ok();
        let mut pipeline =
            OcrPipeline::with_preview_dir(provider.clone(), dir.path().to_path_buf());

        let result = pipeline.select_file(&big);
        assert_matches!(result, Err(PipelineError::FileTooLarge { .. }));
        assert_eq!(
            pipeline.error_message(),
            Some("file size must not exceed 2MB")
        );
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn exactly_2mib_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_file(dir.path(), "edge.png", MAX_FILE_SIZE as usize);
        let provider = RecordingProvider::ok();
        let mut pipeline =
            OcrPipeline::with_preview_dir(provider.clone(), dir.path().to_path_buf());

        assert!(pipeline.select_file(&image).is_ok());
    }

    #[tokio::test]
    async fn missing_file_is_read_error_state() {
        let dir = tempfile::tempdir().unwrap();
        let provider = RecordingProvider::ok();
        let mut pipeline =
            OcrPipeline::with_preview_dir(provider.clone(), dir.path().to_path_buf());

        let result = pipeline.select_file(&dir.path().join("gone.jpg"));
        assert_matches!(result, Err(PipelineError::FileRead(_)));
        // 파일 읽기 실패는 Error 상태로 정규화된다
        assert_eq!(pipeline.status(), OcrStatus::Error);
        assert_eq!(pipeline.error_message(), Some("file read failed"));
    }

    #[tokio::test]
    async fn request_failure_sets_error_status() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_file(dir.path(), "scan.jpg", 1024);
        let provider = RecordingProvider::failing();
        let mut pipeline =
            OcrPipeline::with_preview_dir(provider.clone(), dir.path().to_path_buf());

        pipeline.process(&image).await;
        assert_eq!(pipeline.status(), OcrStatus::Error);
        assert_eq!(pipeline.error_message(), Some("OCR processing failed"));
        assert!(pipeline.result().is_none());
    }

    #[tokio::test]
    async fn stale_completion_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_file(dir.path(), "first.jpg", 1024);
        let second = write_file(dir.path(), "second.jpg", 1024);
        let provider = RecordingProvider::ok();
        let mut pipeline =
            OcrPipeline::with_preview_dir(provider.clone(), dir.path().to_path_buf());

        let stale = pipeline.select_file(&first).unwrap();
        let current = pipeline.select_file(&second).unwrap();

        // 먼저 보낸 요청의 응답이 늦게 도착한 상황
        pipeline.complete(
            stale.generation,
            Err(CoreError::Network("slow death".to_string())),
        );
        assert_eq!(pipeline.status(), OcrStatus::Loading);
        assert!(pipeline.error_message().is_none());

        pipeline.submit(current).await;
        assert_eq!(pipeline.status(), OcrStatus::Success);
    }

    #[tokio::test]
    async fn new_selection_resets_error_and_result() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_file(dir.path(), "scan.jpg", 1024);
        let provider = RecordingProvider::failing();
        let mut pipeline =
            OcrPipeline::with_preview_dir(provider.clone(), dir.path().to_path_buf());

        pipeline.process(&image).await;
        assert_eq!(pipeline.status(), OcrStatus::Error);

        let _ = pipeline.select_file(&image);
        assert_eq!(pipeline.status(), OcrStatus::Loading);
        assert!(pipeline.error_message().is_none());
        assert!(pipeline.result().is_none());
    }

    #[tokio::test]
    async fn preview_replaced_on_new_selection() {
        let dir = tempfile::tempdir().unwrap();
        let preview_dir = tempfile::tempdir().unwrap();
        let first = write_file(dir.path(), "first.jpg", 256);
        let second = write_file(dir.path(), "second.jpg", 256);
        let provider = RecordingProvider::ok();
        let mut pipeline =
            OcrPipeline::with_preview_dir(provider.clone(), preview_dir.path().to_path_buf());

        let _ = pipeline.select_file(&first).unwrap();
        let first_preview = pipeline.preview_path().unwrap().to_path_buf();
        assert!(first_preview.exists());

        let _ = pipeline.select_file(&second).unwrap();
        let second_preview = pipeline.preview_path().unwrap().to_path_buf();
        assert!(!first_preview.exists());
        assert!(second_preview.exists());

        pipeline.release_preview();
        assert!(!second_preview.exists());
        assert!(pipeline.preview_path().is_none());
    }
}
