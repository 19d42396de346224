//! PNG output for composited pages.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::error::{Result, TintError};

/// Encode an image as PNG bytes.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| TintError::Export {
            message: format!("Failed to encode PNG: {}", e),
            help: None,
        })?;
    Ok(bytes)
}

/// Write an image to a PNG file, creating parent directories as needed.
pub fn write_png(img: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| TintError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let bytes = encode_png(img)?;
    std::fs::write(path, bytes).map_err(|e| TintError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })?;

    Ok(())
}
