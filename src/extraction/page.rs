//! Per-page text extraction with OCR fallback.

use tracing::{debug, warn};

use super::renderer::RenderedDocument;
use super::types::{ExtractionError, ExtractionSource, ExtractionUnit};
use crate::config::ExtractionConfig;
use crate::ocr::{OcrEngine, RasterSource};

/// One page of a document being extracted.
///
/// Borrowed from the document for the duration of the extraction call.
pub struct Page<'a> {
    index: usize,
    content: PageContent<'a>,
}

enum PageContent<'a> {
    /// A standalone image: no text layer, the bytes are the raster.
    Image(RasterSource),
    /// A page of an opened PDF.
    Rendered(&'a dyn RenderedDocument),
}

impl<'a> Page<'a> {
    /// The single implicit page of an image file.
    pub fn image(raster: RasterSource) -> Self {
        Self {
            index: 0,
            content: PageContent::Image(raster),
        }
    }

    /// Page `index` (0-based) of an opened document.
    pub fn rendered(document: &'a dyn RenderedDocument, index: usize) -> Self {
        Self {
            index,
            content: PageContent::Rendered(document),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Text layer of the page. Images have none.
    async fn native_text(&self) -> Result<Option<String>, ExtractionError> {
        match &self.content {
            PageContent::Image(_) => Ok(None),
            PageContent::Rendered(document) => document.native_text(self.index).await.map(Some),
        }
    }

    /// Raster to hand to OCR.
    async fn raster(&self, scale: f32) -> Result<RasterSource, ExtractionError> {
        match &self.content {
            PageContent::Image(raster) => Ok(raster.clone()),
            PageContent::Rendered(document) => document.render_page(self.index, scale).await,
        }
    }
}

/// Extracts a page's text, falling back to OCR when the text layer is thin.
#[derive(Clone)]
pub struct PageTextExtractor {
    ocr: OcrEngine,
    config: ExtractionConfig,
}

impl PageTextExtractor {
    pub fn new(ocr: OcrEngine, config: ExtractionConfig) -> Self {
        Self { ocr, config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract one page. Never fails: problems come back as a failed unit.
    pub async fn extract_page(&self, page: &Page<'_>) -> ExtractionUnit {
        let index = page.index();

        let native = match page.native_text().await {
            Ok(text) => text.unwrap_or_default(),
            Err(e) => {
                let err = ExtractionError::PageExtractionFailed {
                    page: index,
                    reason: e.to_string(),
                };
                warn!("{}", err);
                return ExtractionUnit::failed(index, ExtractionSource::Native, err.to_string());
            }
        };

        if !self.config.is_insufficient(&native) {
            return ExtractionUnit::native(index, native);
        }

        debug!(
            "Page {} has {} chars of native text, falling back to OCR",
            index,
            native.trim().chars().count()
        );

        match self.ocr_page(page).await {
            // Any non-empty OCR output wins, even whitespace
            Ok(text) if !text.is_empty() => ExtractionUnit::ocr(index, text),
            Ok(_) => {
                debug!("OCR returned nothing for page {}, keeping native text", index);
                ExtractionUnit::native(index, native)
            }
            Err(e) if !native.trim().is_empty() => {
                warn!("OCR failed for page {}: {}, keeping native text", index, e);
                ExtractionUnit::native(index, native)
            }
            Err(e) => {
                let err = ExtractionError::PageExtractionFailed {
                    page: index,
                    reason: e.to_string(),
                };
                warn!("{}", err);
                ExtractionUnit::failed(index, ExtractionSource::Ocr, err.to_string())
            }
        }
    }

    async fn ocr_page(&self, page: &Page<'_>) -> Result<String, ExtractionError> {
        let raster = page.raster(self.config.render_scale).await?;
        let result = self.ocr.recognize(&raster).await?;
        Ok(result.text)
    }
}
