//! Shared helpers for locating external OCR and PDF tools.

/// Check if a binary is available in PATH (or at the given path).
pub fn check_binary(name: &str) -> bool {
    if name.contains(std::path::MAIN_SEPARATOR) {
        return std::path::Path::new(name).is_file();
    }
    which::which(name).is_ok()
}

/// Map a spawn error to a "not installed" hint when the binary is missing.
pub fn is_not_found(err: &std::io::Error) -> bool {
    err.kind() == std::io::ErrorKind::NotFound
}
