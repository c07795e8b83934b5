//! Tool availability check command.

use console::style;

use postlens::config::Config;
use postlens::extraction::{DocumentRenderer, PopplerRenderer};
use postlens::ocr::{OcrBackend, TesseractBackend, OCR_LANGUAGE};

/// Check OCR and PDF tool availability.
pub async fn cmd_check(config: &Config) -> anyhow::Result<()> {
    println!("\n{}", style("Tool Status").bold());
    println!("{}", "-".repeat(50));

    let renderer = PopplerRenderer::with_tools(config.tools.clone());
    println!("\n{}", style("PDF Tools:").cyan());
    for (tool, available) in renderer.check_tools() {
        let status = if available {
            style("✓ found").green()
        } else {
            style("✗ not found").red()
        };
        println!("  {:<15} {}", tool, status);
    }

    let tesseract = TesseractBackend::with_binary(config.tools.tesseract.clone());
    println!("\n{}", style("OCR Backend:").cyan());
    let status = if tesseract.is_available() {
        style("✓ available").green()
    } else {
        style("✗ not available").red()
    };
    println!(
        "  {:<15} {} {}",
        tesseract.backend_type().as_str(),
        status,
        style(format!("(language: {})", OCR_LANGUAGE)).dim()
    );

    if let Some(path) = &config.source_path {
        println!(
            "\n{} {}",
            style("Config:").cyan(),
            style(path.display()).dim()
        );
    }

    println!();

    if renderer.is_available() && tesseract.is_available() {
        println!("{} All tools are available", style("✓").green());
    } else {
        println!(
            "{} Some tools are missing. Install them for full extraction support:",
            style("!").yellow()
        );
        if !renderer.is_available() {
            println!("  - {}", renderer.availability_hint());
        }
        if !tesseract.is_available() {
            println!("  - {}", tesseract.availability_hint());
        }
    }

    Ok(())
}
