//! Extraction result types and errors.

use serde::Serialize;
use thiserror::Error;

use crate::ocr::OcrError;
use crate::utils::normalize_mime;

/// Errors that can occur during text extraction.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0} (only PDF and image files are accepted)")]
    FileTypeInvalid(String),

    #[error("{}", .kind.no_text_message())]
    NoTextExtracted { kind: DocumentKind, pages: usize },

    #[error("Failed to process the PDF ({reason}). Please try again with a different file.")]
    ProcessingFailed { reason: String },

    #[error("Page {page} could not be extracted: {reason}")]
    PageExtractionFailed { page: usize, reason: String },

    #[error("External tool not found: {0}")]
    ToolNotFound(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error(transparent)]
    Ocr(#[from] OcrError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The two kinds of input the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Image,
}

impl DocumentKind {
    /// Classify a MIME type. Returns `None` for anything that is neither a PDF
    /// nor an image.
    pub fn from_mime(mime_type: &str) -> Option<Self> {
        let mime = normalize_mime(mime_type);
        if mime == "application/pdf" {
            Some(DocumentKind::Pdf)
        } else if mime.starts_with("image/") {
            Some(DocumentKind::Image)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Image => "image",
        }
    }

    fn no_text_message(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => {
                "Could not extract text from this document. Please ensure the PDF is not secured or damaged."
            }
            DocumentKind::Image => "Failed to extract text from image",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a page's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionSource {
    /// The page's embedded text layer.
    Native,
    /// Optical character recognition of the rendered page.
    Ocr,
}

/// Result of processing one page.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionUnit {
    pub page_index: usize,
    pub text: String,
    pub source: ExtractionSource,
    pub failed: bool,
    /// Why the page failed, when it did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractionUnit {
    pub fn native(page_index: usize, text: String) -> Self {
        Self {
            page_index,
            text,
            source: ExtractionSource::Native,
            failed: false,
            error: None,
        }
    }

    pub fn ocr(page_index: usize, text: String) -> Self {
        Self {
            page_index,
            text,
            source: ExtractionSource::Ocr,
            failed: false,
            error: None,
        }
    }

    pub fn failed(page_index: usize, source: ExtractionSource, error: String) -> Self {
        Self {
            page_index,
            text: String::new(),
            source,
            failed: true,
            error: Some(error),
        }
    }
}

/// Text of a whole document, page by page.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateText {
    kind: DocumentKind,
    text: String,
    units: Vec<ExtractionUnit>,
}

impl AggregateText {
    /// Concatenate the text of every non-failed unit, in page order, each
    /// followed by a blank line.
    pub fn from_units(kind: DocumentKind, mut units: Vec<ExtractionUnit>) -> Self {
        units.sort_by_key(|u| u.page_index);

        let mut text = String::new();
        for unit in units.iter().filter(|u| !u.failed) {
            text.push_str(&unit.text);
            text.push_str("\n\n");
        }

        Self { kind, text, units }
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    pub fn units(&self) -> &[ExtractionUnit] {
        &self.units
    }

    pub fn page_count(&self) -> usize {
        self.units.len()
    }

    /// Indices of pages that could not be extracted.
    pub fn failed_pages(&self) -> Vec<usize> {
        self.units
            .iter()
            .filter(|u| u.failed)
            .map(|u| u.page_index)
            .collect()
    }

    /// Indices of pages whose text came from OCR.
    pub fn ocr_pages(&self) -> Vec<usize> {
        self.units
            .iter()
            .filter(|u| !u.failed && u.source == ExtractionSource::Ocr)
            .map(|u| u.page_index)
            .collect()
    }

    /// True when nothing but whitespace was extracted.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
