//! Document rendering capability.
//!
//! The extractor never parses PDFs itself. It asks a renderer to open the
//! bytes, then asks the opened document for each page's text layer and, when
//! that is not enough, for a raster image of the page.

use async_trait::async_trait;

use super::types::ExtractionError;
use crate::ocr::RasterSource;

/// Opens PDF bytes for page-by-page access.
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    /// Check if the renderer can run (tools installed).
    fn is_available(&self) -> bool;

    /// Get a description of what's needed to make this renderer available.
    fn availability_hint(&self) -> String;

    /// Open a document. The returned handle owns any scratch state and
    /// releases it when dropped.
    async fn open(&self, data: &[u8]) -> Result<Box<dyn RenderedDocument>, ExtractionError>;
}

/// An opened document. Pages are 0-based.
#[async_trait]
pub trait RenderedDocument: Send + Sync {
    fn page_count(&self) -> usize;

    /// Text from the page's embedded text layer (may be empty).
    async fn native_text(&self, page: usize) -> Result<String, ExtractionError>;

    /// Render the page to an image at `scale` times its natural size.
    async fn render_page(&self, page: usize, scale: f32) -> Result<RasterSource, ExtractionError>;
}
