//! End-to-end batch processing through the public API with in-memory engines.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use postlens::analysis::{analyze, Suggestion};
use postlens::config::ExtractionConfig;
use postlens::extraction::{
    DocumentExtractor, DocumentRenderer, ExtractionError, PageTextExtractor, RenderedDocument,
};
use postlens::ocr::{OcrBackend, OcrBackendType, OcrEngine, OcrError, OcrWorker, RasterSource};
use postlens::pipeline::{ContentPipeline, FileOutcome, PipelineError, Upload};

const INTRO: &str = "Spring launch is here! Fresh styles, new colors and free shipping all week long.";

/// What a page of the in-memory PDF holds.
#[derive(Clone)]
enum Layer {
    /// A text layer with this content; renders to a scan reading `scan`.
    Text { native: &'static str, scan: &'static str },
    /// Text layer cannot be read.
    Corrupt,
}

struct MemoryDocument {
    pages: Vec<Layer>,
    scales: Arc<Mutex<Vec<f32>>>,
}

#[async_trait]
impl RenderedDocument for MemoryDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    async fn native_text(&self, page: usize) -> Result<String, ExtractionError> {
        match &self.pages[page] {
            Layer::Text { native, .. } => Ok(native.to_string()),
            Layer::Corrupt => Err(ExtractionError::PageExtractionFailed {
                page,
                reason: "bad xref".to_string(),
            }),
        }
    }

    async fn render_page(&self, page: usize, scale: f32) -> Result<RasterSource, ExtractionError> {
        self.scales.lock().unwrap().push(scale);
        match &self.pages[page] {
            Layer::Text { scan, .. } => Ok(RasterSource::from_png(scan.as_bytes().to_vec())),
            Layer::Corrupt => Err(ExtractionError::ExtractionFailed("cannot render".to_string())),
        }
    }
}

struct MemoryRenderer {
    pages: Vec<Layer>,
    scales: Arc<Mutex<Vec<f32>>>,
}

impl MemoryRenderer {
    fn new(pages: Vec<Layer>) -> Self {
        Self {
            pages,
            scales: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl DocumentRenderer for MemoryRenderer {
    fn is_available(&self) -> bool {
        true
    }

    fn availability_hint(&self) -> String {
        "in memory".to_string()
    }

    async fn open(&self, data: &[u8]) -> Result<Box<dyn RenderedDocument>, ExtractionError> {
        if !data.starts_with(b"%PDF") {
            return Err(ExtractionError::ExtractionFailed("not a PDF".to_string()));
        }
        Ok(Box::new(MemoryDocument {
            pages: self.pages.clone(),
            scales: self.scales.clone(),
        }))
    }
}

/// Reads raster bytes back as UTF-8 text; bytes that are not UTF-8 fail.
#[derive(Default)]
struct EchoOcr {
    started: Arc<AtomicUsize>,
    terminated: Arc<AtomicUsize>,
}

#[async_trait]
impl OcrBackend for EchoOcr {
    fn backend_type(&self) -> OcrBackendType {
        OcrBackendType::Custom
    }

    fn is_available(&self) -> bool {
        true
    }

    fn availability_hint(&self) -> String {
        "in memory".to_string()
    }

    async fn start_worker(&self) -> Result<Box<dyn OcrWorker>, OcrError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(EchoWorker {
            terminated: self.terminated.clone(),
        }))
    }
}

struct EchoWorker {
    terminated: Arc<AtomicUsize>,
}

#[async_trait]
impl OcrWorker for EchoWorker {
    async fn recognize(&mut self, raster: &RasterSource) -> Result<String, OcrError> {
        String::from_utf8(raster.data().to_vec())
            .map_err(|_| OcrError::OcrFailed("unreadable image".to_string()))
    }

    fn terminate(&mut self) {
        self.terminated.fetch_add(1, Ordering::SeqCst);
    }
}

struct Harness {
    pipeline: ContentPipeline,
    scales: Arc<Mutex<Vec<f32>>>,
    started: Arc<AtomicUsize>,
    terminated: Arc<AtomicUsize>,
}

fn harness(pages: Vec<Layer>, config: ExtractionConfig) -> Harness {
    let renderer = MemoryRenderer::new(pages);
    let scales = renderer.scales.clone();
    let ocr = EchoOcr::default();
    let started = ocr.started.clone();
    let terminated = ocr.terminated.clone();

    let extractor = DocumentExtractor::new(
        Arc::new(renderer),
        PageTextExtractor::new(OcrEngine::new(Arc::new(ocr)), config),
    );

    Harness {
        pipeline: ContentPipeline::new(extractor),
        scales,
        started,
        terminated,
    }
}

#[tokio::test]
async fn mixed_batch_combines_text_in_order() {
    let h = harness(
        vec![
            Layer::Text {
                native: INTRO,
                scan: "unused",
            },
            Layer::Text {
                native: "  ",
                scan: "Which color is your favorite? @studio",
            },
            Layer::Corrupt,
        ],
        ExtractionConfig::default(),
    );

    let uploads = vec![
        Upload::new("catalog.pdf", b"%PDF-1.7".to_vec(), "application/pdf"),
        Upload::new("notes.txt", b"draft".to_vec(), "text/plain"),
        Upload::new("story.png", "#spring #sale 🌸".as_bytes().to_vec(), "image/png"),
    ];

    let report = h.pipeline.process(&uploads).await.unwrap();

    let expected = format!(
        "{}\n\nWhich color is your favorite? @studio\n\n\n\n#spring #sale 🌸\n\n\n\n",
        INTRO
    );
    assert_eq!(report.combined_text, expected);

    assert_eq!(
        report.files[0].outcome,
        FileOutcome::Extracted {
            pages: 3,
            ocr_pages: 1,
            failed_pages: 1,
            chars: INTRO.chars().count() + 2 + 37 + 2,
        }
    );
    assert_eq!(report.files[1].outcome, FileOutcome::Rejected);
    assert!(matches!(
        report.files[2].outcome,
        FileOutcome::Extracted { pages: 1, ocr_pages: 1, .. }
    ));

    let analysis = report.analysis.unwrap();
    assert_eq!(analysis, analyze(&expected));
    assert_eq!(analysis.metrics.hashtag_count, 2);
    assert_eq!(analysis.metrics.mention_count, 1);
    assert_eq!(analysis.metrics.question_count, 1);
    assert_eq!(analysis.metrics.emoji_count, 1);
    // 50 + 5*2 + 3 + 5 + 2; fewer than 50 words
    assert_eq!(analysis.score, 70);
    assert_eq!(analysis.suggestions, vec![Suggestion::AddMoreContent]);

    // Only the blank page was rendered, at the default 2x scale
    assert_eq!(*h.scales.lock().unwrap(), vec![2.0]);
    assert_eq!(h.started.load(Ordering::SeqCst), 2);
    assert_eq!(h.terminated.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn extraction_settings_are_honored() {
    let h = harness(
        vec![Layer::Text {
            native: "Short caption",
            scan: "OCR wins",
        }],
        ExtractionConfig {
            min_native_chars: 10,
            render_scale: 3.0,
        },
    );

    let uploads = vec![Upload::new("a.pdf", b"%PDF".to_vec(), "application/pdf")];
    let report = h.pipeline.process(&uploads).await.unwrap();

    // 13 visible chars clears a threshold of 10, so no OCR
    assert_eq!(report.combined_text, "Short caption\n\n\n\n");
    assert!(h.scales.lock().unwrap().is_empty());
    assert_eq!(h.started.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unreadable_files_are_reported_not_fatal() {
    let h = harness(Vec::new(), ExtractionConfig::default());

    let uploads = vec![
        Upload::new("broken.pdf", b"garbage".to_vec(), "application/pdf"),
        Upload::new("noise.jpg", vec![0xff, 0xd8, 0xff, 0xfe], "image/jpeg"),
    ];
    let report = h.pipeline.process(&uploads).await.unwrap();

    assert_eq!(report.failed_count(), 2);
    assert!(report.analysis.is_none());
    match &report.files[1].outcome {
        FileOutcome::Failed { message } => {
            assert_eq!(message, "Failed to extract text from image")
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(h.started.load(Ordering::SeqCst), h.terminated.load(Ordering::SeqCst));
}

#[tokio::test]
async fn batch_without_supported_files_is_rejected() {
    let h = harness(Vec::new(), ExtractionConfig::default());
    let uploads = vec![Upload::new("a.docx", b"PK".to_vec(), "application/msword")];

    let err = h.pipeline.process(&uploads).await.unwrap_err();
    assert!(matches!(err, PipelineError::NoValidFiles));
}
