//! Scoped OCR execution.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use super::backend::{OcrBackend, OcrBackendType, OcrError, OcrResult, OcrWorker};
use super::raster::RasterSource;

/// Runs recognitions on a backend, one worker per call.
///
/// Workers are never shared or pooled. Every call starts a worker and the
/// worker is terminated before the call returns, whether recognition
/// succeeded, failed, panicked or the future was dropped mid-flight.
#[derive(Clone)]
pub struct OcrEngine {
    backend: Arc<dyn OcrBackend>,
}

impl OcrEngine {
    pub fn new(backend: Arc<dyn OcrBackend>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &dyn OcrBackend {
        self.backend.as_ref()
    }

    pub fn backend_type(&self) -> OcrBackendType {
        self.backend.backend_type()
    }

    /// Recognize the text in a raster image.
    pub async fn recognize(&self, raster: &RasterSource) -> Result<OcrResult, OcrError> {
        let start = Instant::now();
        let mut worker = WorkerGuard::new(self.backend.start_worker().await?);
        let text = worker.recognize(raster).await?;
        drop(worker);

        let elapsed = start.elapsed();
        debug!(
            "{} recognized {} chars from {} byte image in {}ms",
            self.backend.backend_type(),
            text.len(),
            raster.len(),
            elapsed.as_millis()
        );

        Ok(OcrResult {
            text,
            backend: self.backend.backend_type(),
            processing_time_ms: elapsed.as_millis() as u64,
        })
    }
}

/// Terminates the wrapped worker when dropped.
struct WorkerGuard {
    worker: Box<dyn OcrWorker>,
}

impl WorkerGuard {
    fn new(worker: Box<dyn OcrWorker>) -> Self {
        Self { worker }
    }
}

impl Deref for WorkerGuard {
    type Target = dyn OcrWorker;

    fn deref(&self) -> &Self::Target {
        self.worker.as_ref()
    }
}

impl DerefMut for WorkerGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.worker.as_mut()
    }
}

impl Drop for WorkerGuard {
    fn drop(&mut self) {
        self.worker.terminate();
    }
}
