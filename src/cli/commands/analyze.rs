//! Batch analysis command.

use std::path::PathBuf;

use console::style;

use postlens::analysis::AnalysisResult;
use postlens::config::Config;
use postlens::pipeline::{BatchReport, ContentPipeline, FileOutcome};
use postlens::utils::format_size;

/// Extract text from every file and score the combined result.
pub async fn cmd_analyze(
    config: &Config,
    files: &[PathBuf],
    json: bool,
    show_text: bool,
) -> anyhow::Result<()> {
    if !json {
        println!("{} Processing {} file(s)", style("→").cyan(), files.len());
    }

    let pipeline = ContentPipeline::from_config(config);
    let report = pipeline.process_paths(files).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_files(&report);

    if show_text && !report.combined_text.is_empty() {
        println!("\n{}", style("Extracted Text:").cyan());
        println!("{}", report.combined_text.trim_end());
    }

    match &report.analysis {
        Some(analysis) => print_analysis(analysis),
        None => println!(
            "\n{} No text could be extracted from the uploaded files",
            style("!").yellow()
        ),
    }

    Ok(())
}

fn print_files(report: &BatchReport) {
    println!();
    for file in &report.files {
        let size = style(format!("({})", format_size(file.size))).dim();
        match &file.outcome {
            FileOutcome::Extracted {
                pages, ocr_pages, ..
            } => {
                let mut detail = format!("{} page(s)", pages);
                if *ocr_pages > 0 {
                    detail.push_str(&format!(", {} via OCR", ocr_pages));
                }
                println!("  {} {} {} {}", style("✓").green(), file.name, size, detail);
            }
            FileOutcome::Rejected => println!(
                "  {} {} {} {}",
                style("-").dim(),
                file.name,
                size,
                style(format!("skipped: unsupported type {}", file.mime_type)).dim()
            ),
            FileOutcome::Failed { message } => println!(
                "  {} {} {} {}",
                style("✗").red(),
                file.name,
                size,
                style(message).red()
            ),
        }
    }
}

fn print_analysis(analysis: &AnalysisResult) {
    let score = analysis.score;
    let styled_score = if score >= 80 {
        style(format!("{}/100", score)).green().bold()
    } else if score >= 60 {
        style(format!("{}/100", score)).yellow().bold()
    } else {
        style(format!("{}/100", score)).red().bold()
    };

    println!("\n{} {}", style("Engagement Score:").bold(), styled_score);
    println!("{}", "-".repeat(50));

    let m = &analysis.metrics;
    println!("  {:<12} {}", "Words", m.word_count);
    println!("  {:<12} {}", "Hashtags", m.hashtag_count);
    println!("  {:<12} {}", "Mentions", m.mention_count);
    println!("  {:<12} {}", "Questions", m.question_count);
    println!("  {:<12} {}", "Emojis", m.emoji_count);

    if analysis.suggestions.is_empty() {
        println!("\n{} No suggestions, looks good", style("✓").green());
    } else {
        println!("\n{}", style("Suggestions:").cyan());
        for suggestion in &analysis.suggestions {
            println!("  {} {}", style("→").cyan(), suggestion);
        }
    }
}
