//! Raster images handed to OCR backends.

use std::fmt;

use crate::utils::normalize_mime;

/// A single image ready for recognition.
///
/// Wraps either the bytes of an uploaded image file or a page rendered from a
/// PDF. Backends treat it as opaque; the only thing they need besides the
/// bytes is a file extension hint for tools that sniff by name.
#[derive(Clone)]
pub struct RasterSource {
    data: Vec<u8>,
    extension: &'static str,
}

impl RasterSource {
    /// Wrap image bytes with the MIME type they were uploaded with.
    pub fn from_image_bytes(data: Vec<u8>, mime_type: &str) -> Self {
        Self {
            data,
            extension: extension_for_mime(mime_type),
        }
    }

    /// Wrap a PNG produced by page rendering.
    pub fn from_png(data: Vec<u8>) -> Self {
        Self {
            data,
            extension: "png",
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn extension(&self) -> &'static str {
        self.extension
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Debug for RasterSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterSource")
            .field("extension", &self.extension)
            .field("bytes", &self.data.len())
            .finish()
    }
}

fn extension_for_mime(mime_type: &str) -> &'static str {
    match normalize_mime(mime_type).as_str() {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" | "image/pjpeg" => "jpg",
        "image/gif" => "gif",
        "image/tiff" => "tif",
        "image/bmp" | "image/x-ms-bmp" => "bmp",
        "image/webp" => "webp",
        _ => "img",
    }
}
