//! Batch processing: extract text from several uploads and score the result.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::analysis::{analyze, AnalysisResult};
use crate::config::Config;
use crate::extraction::{DocumentExtractor, PageTextExtractor, PopplerRenderer};
use crate::ocr::{OcrEngine, TesseractBackend};
use crate::utils::{detect_mime_type, is_supported_mime};

/// Errors that stop a whole batch.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Please upload PDF or image files only")]
    NoValidFiles,

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One file handed to the pipeline.
#[derive(Debug, Clone)]
pub struct Upload {
    pub name: String,
    pub data: Vec<u8>,
    pub mime_type: String,
}

impl Upload {
    pub fn new(name: impl Into<String>, data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data,
            mime_type: mime_type.into(),
        }
    }

    /// Read a file from disk, detecting its MIME type unless one is given.
    pub async fn from_path(path: &Path, mime_override: Option<&str>) -> Result<Self, PipelineError> {
        let data = tokio::fs::read(path)
            .await
            .map_err(|source| PipelineError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let mime_type = match mime_override {
            Some(mime) => mime.to_string(),
            None => detect_mime_type(path, &data),
        };
        Ok(Self::new(display_name(path), data, mime_type))
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// A batch slot: either bytes to extract or a file that never got that far.
enum BatchEntry<'a> {
    Ready(&'a Upload),
    Unreadable(FileReport),
}

/// What happened to one upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Extracted {
        pages: usize,
        ocr_pages: usize,
        failed_pages: usize,
        chars: usize,
    },
    /// Not a PDF or image; never processed.
    Rejected,
    Failed { message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

/// Result of processing a batch of uploads.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// One entry per upload, in input order.
    pub files: Vec<FileReport>,
    /// Text of every extracted file, each followed by a blank line.
    pub combined_text: String,
    /// Present when any text was extracted.
    pub analysis: Option<AnalysisResult>,
}

impl BatchReport {
    pub fn extracted_count(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Extracted { .. }))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed { .. }))
    }

    pub fn rejected_count(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Rejected))
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.outcome)).count()
    }
}

/// Extracts every upload in turn, then analyzes the combined text once.
pub struct ContentPipeline {
    extractor: DocumentExtractor,
}

impl ContentPipeline {
    pub fn new(extractor: DocumentExtractor) -> Self {
        Self { extractor }
    }

    /// Build the pipeline on Tesseract and the Poppler tools.
    pub fn from_config(config: &Config) -> Self {
        let ocr = OcrEngine::new(Arc::new(TesseractBackend::with_binary(
            config.tools.tesseract.clone(),
        )));
        let renderer = Arc::new(PopplerRenderer::with_tools(config.tools.clone()));
        let pages = PageTextExtractor::new(ocr, config.extraction.clone());
        Self::new(DocumentExtractor::new(renderer, pages))
    }

    pub fn extractor(&self) -> &DocumentExtractor {
        &self.extractor
    }

    /// Process a batch of uploads.
    ///
    /// Unsupported uploads are skipped and reported as rejected; if none are
    /// supported the batch fails. A file that fails extraction is recorded
    /// and the rest of the batch still runs.
    pub async fn process(&self, uploads: &[Upload]) -> Result<BatchReport, PipelineError> {
        let entries: Vec<BatchEntry<'_>> = uploads.iter().map(BatchEntry::Ready).collect();
        self.run(&entries).await
    }

    /// Read and process files from disk.
    ///
    /// A file that cannot be read is reported as failed; it does not stop
    /// the other files.
    pub async fn process_paths(&self, paths: &[PathBuf]) -> Result<BatchReport, PipelineError> {
        let mut reads = Vec::with_capacity(paths.len());
        for path in paths {
            reads.push(Upload::from_path(path, None).await.map_err(|e| (path, e)));
        }

        let entries: Vec<BatchEntry<'_>> = reads
            .iter()
            .map(|read| match read {
                Ok(upload) => BatchEntry::Ready(upload),
                Err((path, e)) => BatchEntry::Unreadable(FileReport {
                    name: display_name(path),
                    mime_type: detect_mime_type(path, &[]),
                    size: 0,
                    outcome: FileOutcome::Failed {
                        message: e.to_string(),
                    },
                }),
            })
            .collect();

        self.run(&entries).await
    }

    async fn run(&self, entries: &[BatchEntry<'_>]) -> Result<BatchReport, PipelineError> {
        let any_unreadable = entries
            .iter()
            .any(|e| matches!(e, BatchEntry::Unreadable(_)));
        let any_supported = entries
            .iter()
            .any(|e| matches!(e, BatchEntry::Ready(u) if is_supported_mime(&u.mime_type)));
        if !any_supported && !any_unreadable {
            return Err(PipelineError::NoValidFiles);
        }

        let mut files = Vec::with_capacity(entries.len());
        let mut combined_text = String::new();

        for entry in entries {
            let upload = match entry {
                BatchEntry::Ready(upload) => upload,
                BatchEntry::Unreadable(report) => {
                    warn!("Skipping {}: could not be read", report.name);
                    files.push(report.clone());
                    continue;
                }
            };

            let outcome = if !is_supported_mime(&upload.mime_type) {
                warn!("Skipping {}: unsupported type {}", upload.name, upload.mime_type);
                FileOutcome::Rejected
            } else {
                self.extract_one(upload, &mut combined_text).await
            };

            files.push(FileReport {
                name: upload.name.clone(),
                mime_type: upload.mime_type.clone(),
                size: upload.size(),
                outcome,
            });
        }

        let analysis = if combined_text.is_empty() {
            None
        } else {
            Some(analyze(&combined_text))
        };

        Ok(BatchReport {
            files,
            combined_text,
            analysis,
        })
    }

    async fn extract_one(&self, upload: &Upload, combined_text: &mut String) -> FileOutcome {
        match self.extractor.extract(&upload.data, &upload.mime_type).await {
            Ok(aggregate) => {
                let outcome = FileOutcome::Extracted {
                    pages: aggregate.page_count(),
                    ocr_pages: aggregate.ocr_pages().len(),
                    failed_pages: aggregate.failed_pages().len(),
                    chars: aggregate.text().chars().count(),
                };
                combined_text.push_str(aggregate.text());
                combined_text.push_str("\n\n");
                info!("Processed {}", upload.name);
                outcome
            }
            Err(e) => {
                warn!("Failed to process {}: {}", upload.name, e);
                FileOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }
}
