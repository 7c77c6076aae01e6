//! 미리보기 리소스 가드.
//!
//! 브라우저의 object URL에 해당하는 스코프 리소스. 수락된 파일마다
//! 미리보기 사본이 하나 만들어지며, 교체/명시적 해제/드롭 어느 경로로든
//! 정확히 한 번 제거되어야 한다.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

use crate::error::PipelineError;

/// 미리보기 파일 이름 일련번호
static PREVIEW_SEQ: AtomicU64 = AtomicU64::new(0);

/// 미리보기 파일 핸들 — 해제 시 파일 제거
///
/// `release()`는 멱등이며, 호출하지 않고 드롭해도 Drop에서 해제된다.
#[derive(Debug)]
pub struct PreviewHandle {
    /// 미리보기 사본 경로 — 해제되면 None
    path: Option<PathBuf>,
}

impl PreviewHandle {
    /// 원본 파일의 미리보기 사본 생성
    pub fn create(source: &Path, preview_dir: &Path) -> Result<Self, PipelineError> {
        let seq = PREVIEW_SEQ.fetch_add(1, Ordering::Relaxed);
        let extension = source
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("img");
        let path = preview_dir.join(format!("preview_{}.{}", seq, extension));

        fs::copy(source, &path).map_err(PipelineError::FileRead)?;
        debug!(path = %path.display(), "미리보기 생성");

        Ok(Self { path: Some(path) })
    }

    /// 미리보기 경로 — 이미 해제되었으면 None
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// 미리보기 해제 (멱등)
    pub fn release(&mut self) {
        if let Some(path) = self.path.take() {
            if let Err(e) = fs::remove_file(&path) {
                warn!(path = %path.display(), "미리보기 제거 실패: {}", e);
            } else {
                debug!(path = %path.display(), "미리보기 해제");
            }
        }
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.release();
    }
}
