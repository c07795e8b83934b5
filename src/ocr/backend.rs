//! OCR backend abstraction.
//!
//! A backend hands out workers. A worker is the expensive, stateful part of an
//! OCR engine (a scratch workspace, a loaded model, a child process) and must
//! be terminated once the recognition it was started for is over.
//! [`OcrEngine`](super::OcrEngine) owns that lifecycle; backends only describe
//! how to start and stop a worker.

use async_trait::async_trait;
use thiserror::Error;

use super::raster::RasterSource;

/// Errors from OCR backends.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Backend not available: {0}")]
    BackendNotAvailable(String),

    #[error("OCR failed: {0}")]
    OcrFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of OCR processing.
#[derive(Debug, Clone)]
pub struct OcrResult {
    /// Extracted text content.
    pub text: String,
    /// Which backend produced this result.
    pub backend: OcrBackendType,
    /// Processing time in milliseconds, including worker startup.
    pub processing_time_ms: u64,
}

/// Available OCR backend types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OcrBackendType {
    /// Tesseract OCR via command-line.
    Tesseract,
    /// Caller-provided engine (embedding applications, tests).
    Custom,
}

impl OcrBackendType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OcrBackendType::Tesseract => "tesseract",
            OcrBackendType::Custom => "custom",
        }
    }
}

impl std::fmt::Display for OcrBackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Trait for OCR backends.
#[async_trait]
pub trait OcrBackend: Send + Sync {
    /// Get the backend type.
    fn backend_type(&self) -> OcrBackendType;

    /// Check if this backend is available (dependencies installed).
    fn is_available(&self) -> bool;

    /// Get a description of what's needed to make this backend available.
    fn availability_hint(&self) -> String;

    /// Acquire a fresh worker for one recognition.
    async fn start_worker(&self) -> Result<Box<dyn OcrWorker>, OcrError>;
}

/// A started OCR worker.
#[async_trait]
pub trait OcrWorker: Send {
    /// Recognize the text in a raster image.
    async fn recognize(&mut self, raster: &RasterSource) -> Result<String, OcrError>;

    /// Release everything the worker holds.
    ///
    /// Called exactly once, from a drop guard, so it cannot be async and must
    /// not panic.
    fn terminate(&mut self);
}
