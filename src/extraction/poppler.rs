//! Poppler-backed renderer (`pdfinfo`, `pdftotext`, `pdftoppm`).

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::process::Command;
use tracing::debug;

use super::renderer::{DocumentRenderer, RenderedDocument};
use super::types::ExtractionError;
use crate::config::ToolsConfig;
use crate::ocr::{check_binary, is_not_found, RasterSource};

/// Resolution of an unscaled PDF page, in DPI.
const BASE_DPI: f32 = 72.0;

/// Run a command and return its stdout, mapping failures to extraction errors.
async fn run_tool(cmd: &mut Command, tool_name: &str) -> Result<Vec<u8>, ExtractionError> {
    let output = cmd
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output()
        .await;

    match output {
        Ok(output) => {
            if output.status.success() {
                Ok(output.stdout)
            } else {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(ExtractionError::ExtractionFailed(format!(
                    "{} failed: {}",
                    tool_name,
                    stderr.trim()
                )))
            }
        }
        Err(e) if is_not_found(&e) => Err(ExtractionError::ToolNotFound(format!(
            "{} (install poppler-utils)",
            tool_name
        ))),
        Err(e) => Err(ExtractionError::Io(e)),
    }
}

/// Parse the page count out of `pdfinfo` output.
fn parse_page_count(info: &str) -> Option<usize> {
    info.lines()
        .find(|line| line.starts_with("Pages:"))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse().ok())
}

/// DPI to pass to `pdftoppm` for a scale factor.
fn dpi_for_scale(scale: f32) -> u32 {
    (BASE_DPI * scale).round().max(1.0) as u32
}

/// Renders PDFs with the Poppler command-line tools.
pub struct PopplerRenderer {
    tools: ToolsConfig,
}

impl PopplerRenderer {
    pub fn new() -> Self {
        Self::with_tools(ToolsConfig::default())
    }

    pub fn with_tools(tools: ToolsConfig) -> Self {
        Self { tools }
    }

    /// Check which Poppler tools are installed.
    pub fn check_tools(&self) -> Vec<(String, bool)> {
        [&self.tools.pdfinfo, &self.tools.pdftotext, &self.tools.pdftoppm]
            .iter()
            .map(|tool| (tool.to_string(), check_binary(tool)))
            .collect()
    }
}

impl Default for PopplerRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentRenderer for PopplerRenderer {
    fn is_available(&self) -> bool {
        self.check_tools().iter().all(|(_, found)| *found)
    }

    fn availability_hint(&self) -> String {
        let missing: Vec<String> = self
            .check_tools()
            .into_iter()
            .filter(|(_, found)| !found)
            .map(|(tool, _)| tool)
            .collect();
        if missing.is_empty() {
            "Poppler tools are available".to_string()
        } else {
            format!(
                "Missing {}. Install with: apt install poppler-utils",
                missing.join(", ")
            )
        }
    }

    async fn open(&self, data: &[u8]) -> Result<Box<dyn RenderedDocument>, ExtractionError> {
        // Every page needs all three tools, so fail once here rather than per page
        if let Some((tool, _)) = self.check_tools().into_iter().find(|(_, found)| !found) {
            return Err(ExtractionError::ToolNotFound(format!(
                "{} (install poppler-utils)",
                tool
            )));
        }

        let workspace = tempfile::Builder::new().prefix("postlens-pdf-").tempdir()?;
        let path = workspace.path().join("document.pdf");
        tokio::fs::write(&path, data).await?;

        let info = run_tool(Command::new(&self.tools.pdfinfo).arg(&path), "pdfinfo").await?;
        let info = String::from_utf8_lossy(&info);
        let page_count = parse_page_count(&info).ok_or_else(|| {
            ExtractionError::ExtractionFailed("pdfinfo reported no page count".to_string())
        })?;

        debug!("Opened {} byte PDF with {} pages", data.len(), page_count);

        Ok(Box::new(PopplerDocument {
            tools: self.tools.clone(),
            path,
            page_count,
            workspace,
        }))
    }
}

/// A PDF copied into a scratch directory for the Poppler tools.
struct PopplerDocument {
    tools: ToolsConfig,
    path: PathBuf,
    page_count: usize,
    workspace: TempDir,
}

impl PopplerDocument {
    fn workspace_dir(&self) -> &Path {
        self.workspace.path()
    }

    fn check_page(&self, page: usize) -> Result<String, ExtractionError> {
        if page >= self.page_count {
            return Err(ExtractionError::ExtractionFailed(format!(
                "page {} out of range (document has {} pages)",
                page, self.page_count
            )));
        }
        // Poppler numbers pages from 1
        Ok((page + 1).to_string())
    }
}

#[async_trait]
impl RenderedDocument for PopplerDocument {
    fn page_count(&self) -> usize {
        self.page_count
    }

    async fn native_text(&self, page: usize) -> Result<String, ExtractionError> {
        let page_str = self.check_page(page)?;
        let stdout = run_tool(
            Command::new(&self.tools.pdftotext)
                .args(["-enc", "UTF-8", "-f", &page_str, "-l", &page_str])
                .arg(&self.path)
                .arg("-"),
            "pdftotext",
        )
        .await?;
        Ok(String::from_utf8_lossy(&stdout).to_string())
    }

    async fn render_page(&self, page: usize, scale: f32) -> Result<RasterSource, ExtractionError> {
        let page_str = self.check_page(page)?;
        let dpi = dpi_for_scale(scale).to_string();
        let prefix = self.workspace_dir().join(format!("page-{}", page_str));

        run_tool(
            Command::new(&self.tools.pdftoppm)
                .args(["-png", "-singlefile", "-r", &dpi, "-f", &page_str, "-l", &page_str])
                .arg(&self.path)
                .arg(&prefix),
            "pdftoppm",
        )
        .await?;

        let image_path = prefix.with_extension("png");
        let data = tokio::fs::read(&image_path).await.map_err(|e| {
            ExtractionError::ExtractionFailed(format!(
                "No image generated for page {}: {}",
                page_str, e
            ))
        })?;
        // Rendered pages are consumed once
        if let Err(e) = tokio::fs::remove_file(&image_path).await {
            debug!("Failed to remove rendered page {}: {}", image_path.display(), e);
        }

        Ok(RasterSource::from_png(data))
    }
}
