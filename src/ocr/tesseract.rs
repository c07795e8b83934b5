//! Tesseract OCR backend implementation.
//!
//! Uses Tesseract OCR via command-line for text extraction. Each worker gets a
//! private scratch directory for the image it is asked to read; terminating the
//! worker removes it.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::process::Command;
use tracing::{debug, warn};

use super::backend::{OcrBackend, OcrBackendType, OcrError, OcrWorker};
use super::model_utils::{check_binary, is_not_found};
use super::raster::RasterSource;

/// Recognition language. Only English is supported.
pub const OCR_LANGUAGE: &str = "eng";

/// Tesseract OCR backend.
pub struct TesseractBackend {
    binary: String,
}

impl TesseractBackend {
    /// Create a new Tesseract backend using `tesseract` from PATH.
    pub fn new() -> Self {
        Self::with_binary("tesseract")
    }

    /// Create a Tesseract backend using a specific binary.
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }
}

impl Default for TesseractBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OcrBackend for TesseractBackend {
    fn backend_type(&self) -> OcrBackendType {
        OcrBackendType::Tesseract
    }

    fn is_available(&self) -> bool {
        check_binary(&self.binary)
    }

    fn availability_hint(&self) -> String {
        if self.is_available() {
            "Tesseract is available".to_string()
        } else {
            "Tesseract not installed. Install with: apt install tesseract-ocr".to_string()
        }
    }

    async fn start_worker(&self) -> Result<Box<dyn OcrWorker>, OcrError> {
        let workspace = tempfile::Builder::new()
            .prefix("postlens-ocr-")
            .tempdir()?;
        debug!("Started tesseract worker in {}", workspace.path().display());
        Ok(Box::new(TesseractWorker {
            binary: self.binary.clone(),
            workspace: Some(workspace),
        }))
    }
}

/// One Tesseract invocation's worth of state.
struct TesseractWorker {
    binary: String,
    workspace: Option<TempDir>,
}

impl TesseractWorker {
    fn input_path(&self, raster: &RasterSource) -> Result<PathBuf, OcrError> {
        let workspace = self
            .workspace
            .as_ref()
            .ok_or_else(|| OcrError::OcrFailed("worker already terminated".to_string()))?;
        Ok(workspace
            .path()
            .join(format!("input.{}", raster.extension())))
    }
}

#[async_trait]
impl OcrWorker for TesseractWorker {
    async fn recognize(&mut self, raster: &RasterSource) -> Result<String, OcrError> {
        if raster.is_empty() {
            return Err(OcrError::OcrFailed("empty image".to_string()));
        }

        let image_path = self.input_path(raster)?;
        tokio::fs::write(&image_path, raster.data()).await?;

        let output = Command::new(&self.binary)
            .arg(&image_path)
            .arg("stdout")
            .args(["-l", OCR_LANGUAGE])
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await;

        match output {
            Ok(output) => {
                if output.status.success() {
                    Ok(String::from_utf8_lossy(&output.stdout).to_string())
                } else {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    Err(OcrError::OcrFailed(format!("tesseract failed: {}", stderr.trim())))
                }
            }
            Err(e) if is_not_found(&e) => Err(OcrError::BackendNotAvailable(
                "tesseract not found (install tesseract-ocr)".to_string(),
            )),
            Err(e) => Err(OcrError::Io(e)),
        }
    }

    fn terminate(&mut self) {
        if let Some(workspace) = self.workspace.take() {
            let path = workspace.path().to_path_buf();
            if let Err(e) = workspace.close() {
                warn!("Failed to remove OCR workspace {}: {}", path.display(), e);
            }
        }
    }
}
