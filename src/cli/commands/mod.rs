//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod analyze;
mod check;
mod extract;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use postlens::config::Config;

#[derive(Parser)]
#[command(name = "postlens")]
#[command(about = "Extract text from PDFs and images and score it for social media engagement")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text from PDFs and images, then score it for engagement
    Analyze {
        /// Files to process (PDF or image)
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Also print the combined extracted text
        #[arg(long)]
        show_text: bool,
    },

    /// Print the text extracted from a single file
    Extract {
        /// File to extract (PDF or image)
        file: PathBuf,
        /// MIME type to use instead of detecting one
        #[arg(long)]
        mime: Option<String>,
    },

    /// Check that the external OCR and PDF tools are installed
    Check,
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load_with_override(cli.config.as_deref())
        .await
        .map_err(anyhow::Error::msg)?;

    match cli.command {
        Commands::Analyze {
            files,
            json,
            show_text,
        } => analyze::cmd_analyze(&config, &files, json, show_text).await,
        Commands::Extract { file, mime } => {
            extract::cmd_extract(&config, &file, mime.as_deref()).await
        }
        Commands::Check => check::cmd_check(&config).await,
    }
}
