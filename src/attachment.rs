//! Image attachment loading
//!
//! Converts an image file into the inline base64 payload attached to the
//! next sent message. Only image-typed files are accepted: the extension
//! is a fast pre-check, and the actual format is detected from magic bytes
//! so a renamed text file cannot sneak through.

use crate::error::{ChatterboxError, Result};
use crate::message::ImageAttachment;
use base64::Engine;
use std::path::Path;

/// Extensions accepted by the fast pre-check
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp", "tiff", "tif"];

/// Checks whether a path looks like an image file by extension
///
/// This is only the cheap pre-check; [`load_attachment`] verifies the
/// actual bytes.
///
/// # Examples
///
/// ```
/// use chatterbox::attachment::is_image_file;
/// use std::path::Path;
///
/// assert!(is_image_file(Path::new("photo.png")));
/// assert!(!is_image_file(Path::new("notes.txt")));
/// ```
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Load an image file as an inline attachment
///
/// # Arguments
///
/// * `path` - Path to the image file
///
/// # Errors
///
/// Returns `ChatterboxError::Validation` when the file is not an image
/// (wrong extension or unrecognized content), and
/// `ChatterboxError::Attachment` when the file cannot be read.
pub fn load_attachment(path: &Path) -> Result<ImageAttachment> {
    if !is_image_file(path) {
        return Err(
            ChatterboxError::Validation("Please attach an image file".to_string()).into(),
        );
    }

    let bytes = std::fs::read(path).map_err(|e| {
        ChatterboxError::Attachment(format!("Cannot read {}: {}", path.display(), e))
    })?;

    let format = image::guess_format(&bytes).map_err(|_| {
        ChatterboxError::Validation("Please attach an image file".to_string())
    })?;

    let mime = mime_for(format).ok_or_else(|| {
        ChatterboxError::Validation(format!("Unsupported image format: {:?}", format))
    })?;

    Ok(ImageAttachment {
        mime: mime.to_string(),
        data: base64::engine::general_purpose::STANDARD.encode(&bytes),
    })
}

/// MIME type for the formats Chatterbox accepts
fn mime_for(format: image::ImageFormat) -> Option<&'static str> {
    match format {
        image::ImageFormat::Png => Some("image/png"),
        image::ImageFormat::Jpeg => Some("image/jpeg"),
        image::ImageFormat::WebP => Some("image/webp"),
        image::ImageFormat::Gif => Some("image/gif"),
        image::ImageFormat::Bmp => Some("image/bmp"),
        image::ImageFormat::Tiff => Some("image/tiff"),
        _ => None,
    }
}
