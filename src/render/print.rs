//! Print output.
//!
//! A print job is the composite scaled to fit a page (inside its margins),
//! centred on white, and handed to a [`PrintSurface`].

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TintError};

use super::write_png;

/// Page geometry in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSize {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
}

impl PageSize {
    /// A4 portrait at 150 dpi.
    pub const A4: Self = Self {
        width: 1240,
        height: 1754,
        margin: 48,
    };

    /// Area available for the picture.
    pub fn printable(&self) -> (u32, u32) {
        (
            self.width.saturating_sub(self.margin.saturating_mul(2)).max(1),
            self.height.saturating_sub(self.margin.saturating_mul(2)).max(1),
        )
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

/// Something that can present a rendered page.
pub trait PrintSurface {
    fn present(&mut self, page: &RgbaImage) -> Result<()>;
}

/// Writes each page to a PNG file.
#[derive(Debug, Clone)]
pub struct PngPage {
    path: PathBuf,
}

impl PngPage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PrintSurface for PngPage {
    fn present(&mut self, page: &RgbaImage) -> Result<()> {
        write_png(page, &self.path)?;
        info!("wrote print page to {}", self.path.display());
        Ok(())
    }
}

/// Saves the page to a temp file and opens it with the OS default viewer,
/// from which it can be printed.
#[derive(Debug, Default, Clone)]
pub struct SystemViewer;

impl PrintSurface for SystemViewer {
    fn present(&mut self, page: &RgbaImage) -> Result<()> {
        let path = std::env::temp_dir().join("tint_print.png");
        write_png(page, &path)?;
        open_with_os(&path)
    }
}

#[cfg(target_os = "macos")]
const OPEN_COMMAND: &str = "open";

#[cfg(target_os = "windows")]
const OPEN_COMMAND: &str = "explorer";

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const OPEN_COMMAND: &str = "xdg-open";

fn open_with_os(path: &Path) -> Result<()> {
    std::process::Command::new(OPEN_COMMAND)
        .arg(path)
        .spawn()
        .map_err(|e| TintError::Export {
            message: format!("Failed to open {} with {}: {}", path.display(), OPEN_COMMAND, e),
            help: Some("Use --print <file> to write the page instead".to_string()),
        })?;
    Ok(())
}

/// Lay out a composite on a page: scaled to fit the printable area with its
/// aspect ratio kept, centred on white.
pub fn layout_page(composite: &RgbaImage, page: PageSize) -> RgbaImage {
    let (avail_w, avail_h) = page.printable();
    let (w, h) = composite.dimensions();

    let scale = (avail_w as f64 / w as f64).min(avail_h as f64 / h as f64);
    let fit_w = ((w as f64 * scale) as u32).clamp(1, avail_w);
    let fit_h = ((h as f64 * scale) as u32).clamp(1, avail_h);

    let picture = if (fit_w, fit_h) == (w, h) {
        composite.clone()
    } else {
        imageops::resize(composite, fit_w, fit_h, FilterType::CatmullRom)
    };

    let mut sheet = RgbaImage::from_pixel(page.width, page.height, Rgba([255, 255, 255, 255]));
    let x = page.width.saturating_sub(fit_w) / 2;
    let y = page.height.saturating_sub(fit_h) / 2;
    imageops::replace(&mut sheet, &picture, x as i64, y as i64);
    sheet
}
