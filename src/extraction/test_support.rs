//! In-memory renderer and OCR fakes for extraction tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::renderer::{DocumentRenderer, RenderedDocument};
use super::types::ExtractionError;
use crate::ocr::{OcrBackend, OcrBackendType, OcrEngine, OcrError, OcrWorker, RasterSource};

#[derive(Clone)]
pub struct FakePage {
    /// `None` makes native extraction fail.
    text: Option<String>,
    renderable: bool,
}

impl FakePage {
    pub fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            renderable: true,
        }
    }

    pub fn broken() -> Self {
        Self {
            text: None,
            renderable: true,
        }
    }

    pub fn unrenderable(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            renderable: false,
        }
    }
}

pub struct FakeDocument {
    pages: Vec<FakePage>,
    scales: Mutex<Vec<f32>>,
}

impl FakeDocument {
    pub fn new(pages: Vec<FakePage>) -> Self {
        Self {
            pages,
            scales: Mutex::new(Vec::new()),
        }
    }

    pub fn rendered_scales(&self) -> Vec<f32> {
        self.scales.lock().unwrap().clone()
    }
}

#[async_trait]
impl RenderedDocument for FakeDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    async fn native_text(&self, page: usize) -> Result<String, ExtractionError> {
        self.pages[page]
            .text
            .clone()
            .ok_or_else(|| ExtractionError::ExtractionFailed(format!("page {} is corrupt", page)))
    }

    async fn render_page(&self, page: usize, scale: f32) -> Result<RasterSource, ExtractionError> {
        if !self.pages[page].renderable {
            return Err(ExtractionError::ExtractionFailed("cannot render".to_string()));
        }
        self.scales.lock().unwrap().push(scale);
        Ok(RasterSource::from_png(vec![page as u8; 8]))
    }
}

/// Renderer that opens every input as the same fake document.
pub struct FakeRenderer {
    pages: Option<Vec<FakePage>>,
    missing_tool: Option<String>,
    opened: AtomicUsize,
}

impl FakeRenderer {
    pub fn new(pages: Vec<FakePage>) -> Self {
        Self {
            pages: Some(pages),
            missing_tool: None,
            opened: AtomicUsize::new(0),
        }
    }

    /// A renderer that cannot open anything.
    pub fn unopenable() -> Self {
        Self {
            pages: None,
            missing_tool: None,
            opened: AtomicUsize::new(0),
        }
    }

    /// A renderer whose external tool is not installed.
    pub fn missing_tool(tool: &str) -> Self {
        Self {
            pages: None,
            missing_tool: Some(tool.to_string()),
            opened: AtomicUsize::new(0),
        }
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentRenderer for FakeRenderer {
    fn is_available(&self) -> bool {
        true
    }

    fn availability_hint(&self) -> String {
        String::new()
    }

    async fn open(&self, _data: &[u8]) -> Result<Box<dyn RenderedDocument>, ExtractionError> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        if let Some(tool) = &self.missing_tool {
            return Err(ExtractionError::ToolNotFound(tool.clone()));
        }
        match &self.pages {
            Some(pages) => Ok(Box::new(FakeDocument::new(pages.clone()))),
            None => Err(ExtractionError::ExtractionFailed(
                "Incorrect password".to_string(),
            )),
        }
    }
}

#[derive(Default)]
struct OcrState {
    calls: AtomicUsize,
    released: AtomicUsize,
}

/// OCR backend returning a fixed text (or always failing).
#[derive(Clone)]
pub struct FakeOcr {
    output: Option<String>,
    state: Arc<OcrState>,
}

impl FakeOcr {
    pub fn returning(text: &str) -> Self {
        Self {
            output: Some(text.to_string()),
            state: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            output: None,
            state: Arc::default(),
        }
    }

    pub fn engine(&self) -> OcrEngine {
        OcrEngine::new(Arc::new(self.clone()))
    }

    pub fn calls(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.state.released.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OcrBackend for FakeOcr {
    fn backend_type(&self) -> OcrBackendType {
        OcrBackendType::Custom
    }

    fn is_available(&self) -> bool {
        true
    }

    fn availability_hint(&self) -> String {
        String::new()
    }

    async fn start_worker(&self) -> Result<Box<dyn OcrWorker>, OcrError> {
        Ok(Box::new(FakeOcrWorker {
            output: self.output.clone(),
            state: self.state.clone(),
        }))
    }
}

struct FakeOcrWorker {
    output: Option<String>,
    state: Arc<OcrState>,
}

#[async_trait]
impl OcrWorker for FakeOcrWorker {
    async fn recognize(&mut self, _raster: &RasterSource) -> Result<String, OcrError> {
        self.state.calls.fetch_add(1, Ordering::SeqCst);
        self.output
            .clone()
            .ok_or_else(|| OcrError::OcrFailed("engine crashed".to_string()))
    }

    fn terminate(&mut self) {
        self.state.released.fetch_add(1, Ordering::SeqCst);
    }
}
