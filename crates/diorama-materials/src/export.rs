//! PNG export of baked textures, for inspection and offline asset packs.

use std::path::Path;

use thiserror::Error;

use crate::pixel::PixelBuffer;

/// Errors returned when writing a texture to disk.
#[derive(Debug, Error)]
pub enum TextureError {
    /// A zero-sized buffer cannot be encoded.
    #[error("cannot encode an empty {width}x{height} texture")]
    Empty { width: u32, height: u32 },

    /// Creating the parent directory failed.
    #[error("failed to create output directory: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding or writing the image failed.
    #[error("failed to encode texture: {0}")]
    Image(#[from] image::ImageError),
}

/// Write `buffer` as an RGBA PNG at `path`, creating parent directories.
///
/// Gray buffers are written as opaque gray RGBA.
pub fn save_png(buffer: &PixelBuffer, path: &Path) -> Result<(), TextureError> {
    if buffer.is_empty() {
        return Err(TextureError::Empty {
            width: buffer.width(),
            height: buffer.height(),
        });
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    buffer
        .to_rgba_image()
        .save_with_format(path, image::ImageFormat::Png)?;
    log::debug!("wrote {}", path.display());
    Ok(())
}
