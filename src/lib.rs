//! Text extraction from PDFs and images with OCR fallback, plus engagement
//! scoring of the extracted text.
//!
//! ```no_run
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use postlens::config::Config;
//! use postlens::pipeline::{ContentPipeline, Upload};
//!
//! let config = Config::load().await;
//! let pipeline = ContentPipeline::from_config(&config);
//! let upload = Upload::from_path("flyer.pdf".as_ref(), None).await?;
//! let report = pipeline.process(&[upload]).await?;
//! if let Some(analysis) = report.analysis {
//!     println!("score: {}", analysis.score);
//! }
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod config;
pub mod extraction;
pub mod ocr;
pub mod pipeline;
pub mod utils;

pub use analysis::{analyze, AnalysisResult, ContentMetrics, Suggestion};
pub use config::Config;
pub use extraction::{AggregateText, DocumentExtractor, ExtractionError};
pub use pipeline::{BatchReport, ContentPipeline, PipelineError, Upload};
