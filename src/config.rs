//! Configuration management for postlens using the prefer crate.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Pages with fewer visible characters than this are sent to OCR.
pub const DEFAULT_MIN_NATIVE_CHARS: usize = 50;
/// Render scale for OCR rasters (2.0 = 144 DPI).
pub const DEFAULT_RENDER_SCALE: f32 = 2.0;

/// Per-page extraction tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Minimum trimmed character count for a text layer to be trusted.
    #[serde(default = "default_min_native_chars")]
    pub min_native_chars: usize,
    /// Scale factor applied when rasterizing a page for OCR.
    #[serde(default = "default_render_scale")]
    pub render_scale: f32,
}

fn default_min_native_chars() -> usize {
    DEFAULT_MIN_NATIVE_CHARS
}

fn default_render_scale() -> f32 {
    DEFAULT_RENDER_SCALE
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_native_chars: DEFAULT_MIN_NATIVE_CHARS,
            render_scale: DEFAULT_RENDER_SCALE,
        }
    }
}

impl ExtractionConfig {
    /// Whether a page's native text is too thin to use without OCR.
    pub fn is_insufficient(&self, text: &str) -> bool {
        text.trim().chars().count() < self.min_native_chars
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    fn validate(&self) -> Result<(), String> {
        if !(self.render_scale.is_finite() && self.render_scale > 0.0) {
            return Err(format!(
                "extraction.render_scale must be a positive number, got {}",
                self.render_scale
            ));
        }
        Ok(())
    }
}

/// Names or paths of the external programs postlens drives.
///
/// Each defaults to the bare program name, looked up in PATH, unless the
/// matching `POSTLENS_*` environment variable is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_tesseract")]
    pub tesseract: String,
    #[serde(default = "default_pdfinfo")]
    pub pdfinfo: String,
    #[serde(default = "default_pdftotext")]
    pub pdftotext: String,
    #[serde(default = "default_pdftoppm")]
    pub pdftoppm: String,
}

fn env_or(var: &str, fallback: &str) -> String {
    std::env::var(var)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

fn default_tesseract() -> String {
    env_or("POSTLENS_TESSERACT", "tesseract")
}

fn default_pdfinfo() -> String {
    env_or("POSTLENS_PDFINFO", "pdfinfo")
}

fn default_pdftotext() -> String {
    env_or("POSTLENS_PDFTOTEXT", "pdftotext")
}

fn default_pdftoppm() -> String {
    env_or("POSTLENS_PDFTOPPM", "pdftoppm")
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            tesseract: default_tesseract(),
            pdfinfo: default_pdfinfo(),
            pdftotext: default_pdftotext(),
            pdftoppm: default_pdftoppm(),
        }
    }
}

impl ToolsConfig {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Text extraction tuning.
    #[serde(default, skip_serializing_if = "ExtractionConfig::is_default")]
    pub extraction: ExtractionConfig,
    /// External tool locations.
    #[serde(default, skip_serializing_if = "ToolsConfig::is_default")]
    pub tools: ToolsConfig,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Falls back to defaults (with env overrides) when no file is found or
    /// the discovered file cannot be parsed.
    pub async fn load() -> Self {
        match prefer::load("postlens").await {
            Ok(pref_config) => match pref_config.source_path() {
                Some(path) => match Self::load_from_path(path).await {
                    Ok(config) => config,
                    Err(e) => {
                        tracing::warn!("Ignoring config at {}: {}", path.display(), e);
                        Self::default()
                    }
                },
                None => Self::default(),
            },
            Err(_) => Self::default(),
        }
    }

    /// Load from an explicit path if given, otherwise discover one.
    pub async fn load_with_override(path: Option<&Path>) -> Result<Self, String> {
        match path {
            Some(path) => Self::load_from_path(path).await,
            None => Ok(Self::load().await),
        }
    }

    /// Load configuration from a specific file path.
    /// The format is chosen by extension: TOML, YAML, or JSON (the default).
    pub async fn load_from_path(path: &Path) -> Result<Self, String> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

        let mut config: Config = match ext {
            "toml" => toml::from_str(&contents)
                .map_err(|e| format!("Failed to parse TOML config: {}", e))?,
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .map_err(|e| format!("Failed to parse YAML config: {}", e))?,
            _ => serde_json::from_str(&contents)
                .map_err(|e| format!("Failed to parse JSON config: {}", e))?,
        };

        config.extraction.validate()?;
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Serialize to TOML, omitting settings left at their defaults.
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {}", e))
    }
}
