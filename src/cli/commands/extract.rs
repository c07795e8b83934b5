//! Single-file extraction command.

use std::path::Path;

use console::style;

use postlens::config::Config;
use postlens::pipeline::{ContentPipeline, Upload};

/// Print the text extracted from one file.
pub async fn cmd_extract(config: &Config, file: &Path, mime: Option<&str>) -> anyhow::Result<()> {
    let upload = Upload::from_path(file, mime).await?;
    let pipeline = ContentPipeline::from_config(config);

    let aggregate = pipeline
        .extractor()
        .extract(&upload.data, &upload.mime_type)
        .await?;

    let failed = aggregate.failed_pages();
    if !failed.is_empty() {
        let pages: Vec<String> = failed.iter().map(|p| (p + 1).to_string()).collect();
        eprintln!(
            "{} Skipped unreadable page(s): {}",
            style("!").yellow(),
            pages.join(", ")
        );
    }

    print!("{}", aggregate.text());
    Ok(())
}
