//! Whole-document extraction.

use std::sync::Arc;

use tracing::{info, warn};

use super::page::{Page, PageTextExtractor};
use super::renderer::DocumentRenderer;
use super::types::{AggregateText, DocumentKind, ExtractionError, ExtractionUnit};
use crate::ocr::RasterSource;

/// Drives page extraction over a whole file.
///
/// Pages are processed one at a time in document order; a page that fails is
/// recorded and skipped. Only a type mismatch, an unopenable document, or a
/// document with no text at all is reported as an error.
pub struct DocumentExtractor {
    renderer: Arc<dyn DocumentRenderer>,
    pages: PageTextExtractor,
}

impl DocumentExtractor {
    pub fn new(renderer: Arc<dyn DocumentRenderer>, pages: PageTextExtractor) -> Self {
        Self { renderer, pages }
    }

    pub fn renderer(&self) -> &dyn DocumentRenderer {
        self.renderer.as_ref()
    }

    pub fn page_extractor(&self) -> &PageTextExtractor {
        &self.pages
    }

    /// Extract the text of a PDF or image file.
    pub async fn extract(
        &self,
        data: &[u8],
        mime_type: &str,
    ) -> Result<AggregateText, ExtractionError> {
        let kind = DocumentKind::from_mime(mime_type)
            .ok_or_else(|| ExtractionError::FileTypeInvalid(mime_type.to_string()))?;

        let units = match kind {
            DocumentKind::Image => {
                let page = Page::image(RasterSource::from_image_bytes(data.to_vec(), mime_type));
                vec![self.pages.extract_page(&page).await]
            }
            DocumentKind::Pdf => self.extract_pdf_pages(data).await?,
        };

        let aggregate = AggregateText::from_units(kind, units);
        let failed = aggregate.failed_pages();
        if !failed.is_empty() {
            warn!(
                "{} of {} pages could not be extracted: {:?}",
                failed.len(),
                aggregate.page_count(),
                failed
            );
        }

        if aggregate.is_blank() {
            return Err(ExtractionError::NoTextExtracted {
                kind,
                pages: aggregate.page_count(),
            });
        }

        info!(
            "Extracted {} chars from {} {} page(s) ({} via OCR)",
            aggregate.text().len(),
            aggregate.page_count(),
            kind,
            aggregate.ocr_pages().len()
        );

        Ok(aggregate)
    }

    async fn extract_pdf_pages(&self, data: &[u8]) -> Result<Vec<ExtractionUnit>, ExtractionError> {
        let document = self.renderer.open(data).await.map_err(|e| {
            warn!("Could not open PDF: {}", e);
            match e {
                // A missing tool is a setup problem, not a bad document
                ExtractionError::ToolNotFound(_) => e,
                other => ExtractionError::ProcessingFailed {
                    reason: other.to_string(),
                },
            }
        })?;

        let page_count = document.page_count();
        let mut units = Vec::with_capacity(page_count);
        for index in 0..page_count {
            let page = Page::rendered(document.as_ref(), index);
            units.push(self.pages.extract_page(&page).await);
        }

        Ok(units)
    }
}
