//! Shared utility functions.
//!
//! - `format`: human-readable sizes
//! - `mime`: MIME detection and the supported-upload check

mod format;
mod mime;

pub use format::format_size;
pub use mime::{detect_mime_type, is_supported_mime, normalize_mime};
