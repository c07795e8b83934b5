//! Text extraction from PDFs and images.
//!
//! Each PDF page is read from its text layer first. Pages whose text layer is
//! too thin (fewer than 50 visible characters by default) are rendered at 2x
//! and passed through OCR. Image files are a single page that always goes
//! through OCR.

mod document;
mod page;
mod poppler;
mod renderer;
mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use document::DocumentExtractor;
pub use page::{Page, PageTextExtractor};
pub use poppler::PopplerRenderer;
pub use renderer::{DocumentRenderer, RenderedDocument};
pub use types::{
    AggregateText, DocumentKind, ExtractionError, ExtractionSource, ExtractionUnit,
};
