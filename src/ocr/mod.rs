//! OCR module.
//!
//! Recognizes text in raster images:
//! - `RasterSource` wraps an uploaded image or a rendered PDF page
//! - `OcrBackend` / `OcrWorker` describe a pluggable recognition engine
//! - `OcrEngine` runs one recognition per worker and always releases it
//! - `TesseractBackend` is the default engine (uses the system binary)

mod backend;
mod engine;
mod model_utils;
mod raster;
mod tesseract;

pub use backend::{OcrBackend, OcrBackendType, OcrError, OcrResult, OcrWorker};
pub use engine::OcrEngine;
pub use model_utils::check_binary;
pub(crate) use model_utils::is_not_found;
pub use raster::RasterSource;
pub use tesseract::{TesseractBackend, OCR_LANGUAGE};
