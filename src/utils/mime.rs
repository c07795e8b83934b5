//! MIME type detection for uploads.

use std::path::Path;

const FALLBACK_MIME: &str = "application/octet-stream";

/// Strip parameters (`; charset=...`) and lowercase a MIME type.
pub fn normalize_mime(mime: &str) -> String {
    mime.split(';').next().unwrap_or(mime).trim().to_lowercase()
}

/// Whether uploads of this type can be extracted (PDFs and any image).
pub fn is_supported_mime(mime: &str) -> bool {
    let mime = normalize_mime(mime);
    mime == "application/pdf" || mime.starts_with("image/")
}

/// Work out the MIME type of a file.
///
/// Magic bytes win over the file name; an unrecognized file with no useful
/// extension is `application/octet-stream`.
pub fn detect_mime_type(path: &Path, content: &[u8]) -> String {
    infer::get(content)
        .map(|t| t.mime_type().to_string())
        .or_else(|| mime_guess::from_path(path).first().map(|m| m.to_string()))
        .unwrap_or_else(|| FALLBACK_MIME.to_string())
}
