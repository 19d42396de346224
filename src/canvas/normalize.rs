//! Source image loading and canvas sizing.
//!
//! A source drawing is decoded, scaled so it fits the display bounds while
//! keeping its aspect ratio, and flattened onto white paper. The result is
//! the immutable line-art layer every fill consults.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use log::{debug, info};

use crate::error::{Result, TintError};
use crate::types::Colour;

use super::boundary::is_line_pixel;

/// Widest canvas for landscape drawings.
pub const MAX_CANVAS_WIDTH: u32 = 500;

/// Tallest canvas for portrait and square drawings.
pub const MAX_CANVAS_HEIGHT: u32 = 600;

/// Compute the canvas size for a source image of the given natural size.
///
/// Landscape images are bounded by width, everything else by height.
/// Fractional sides are truncated and never drop below one pixel.
pub fn fit_dimensions(natural_width: u32, natural_height: u32) -> (u32, u32) {
    let ratio = natural_width as f64 / natural_height as f64;

    let (width, height) = if ratio > 1.0 {
        let width = natural_width.min(MAX_CANVAS_WIDTH) as f64;
        (width, width / ratio)
    } else {
        let height = natural_height.min(MAX_CANVAS_HEIGHT) as f64;
        (height * ratio, height)
    };

    ((width as u32).max(1), (height as u32).max(1))
}

/// The immutable line drawing, flattened onto white.
///
/// Line classification is computed once on construction.
#[derive(Debug, Clone)]
pub struct LineArt {
    image: RgbaImage,
    lines: Vec<bool>,
}

impl LineArt {
    /// Wrap an already-sized line drawing.
    ///
    /// Transparent areas are flattened onto white so they count as paper.
    pub fn new(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        let mut paper = image;
        for px in paper.pixels_mut() {
            *px = flatten_on_white(*px);
        }

        let lines = (0..height as i64)
            .flat_map(|y| (0..width as i64).map(move |x| (x, y)))
            .map(|(x, y)| is_line_pixel(&paper, x, y))
            .collect();

        Self {
            image: paper,
            lines,
        }
    }

    /// Decode a source image and fit it to the canvas bounds.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let source = image::load_from_memory(bytes).map_err(|e| TintError::Load {
            message: e.to_string(),
            help: Some("Use a PNG, JPEG, GIF, BMP or WebP line drawing".to_string()),
        })?;

        let (natural_width, natural_height) = (source.width(), source.height());
        if natural_width == 0 || natural_height == 0 {
            return Err(TintError::Load {
                message: "Image has no pixels".to_string(),
                help: None,
            });
        }

        let (width, height) = fit_dimensions(natural_width, natural_height);
        debug!(
            "fitting {}x{} source to {}x{} canvas",
            natural_width, natural_height, width, height
        );

        // flatten at natural size so transparent RGB never bleeds into edges
        let mut paper = source.to_rgba8();
        for px in paper.pixels_mut() {
            *px = flatten_on_white(*px);
        }
        let scaled = if (width, height) == (natural_width, natural_height) {
            paper
        } else {
            imageops::resize(&paper, width, height, FilterType::Triangle)
        };

        let art = Self::new(scaled);
        info!(
            "loaded line art {}x{} ({:.1}% line pixels)",
            width,
            height,
            art.line_coverage() * 100.0
        );
        Ok(art)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// The flattened line-art pixels.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Whether (x, y) is a boundary. Outside the canvas is always boundary.
    #[inline]
    pub fn is_line(&self, x: i64, y: i64) -> bool {
        match self.index(x, y) {
            Some(i) => self.lines[i],
            None => true,
        }
    }

    /// Row-major index of an in-canvas coordinate.
    #[inline]
    pub fn index(&self, x: i64, y: i64) -> Option<usize> {
        let (w, h) = (self.width() as i64, self.height() as i64);
        if x < 0 || y < 0 || x >= w || y >= h {
            None
        } else {
            Some((y * w + x) as usize)
        }
    }

    /// Fraction of pixels classified as line.
    pub fn line_coverage(&self) -> f64 {
        if self.lines.is_empty() {
            return 0.0;
        }
        let count = self.lines.iter().filter(|&&l| l).count();
        count as f64 / self.lines.len() as f64
    }

    /// A transparent raster the same size as the drawing.
    pub fn blank_layer(&self) -> RgbaImage {
        RgbaImage::from_pixel(self.width(), self.height(), Colour::TRANSPARENT.to_pixel())
    }
}

/// Source-over a pixel onto opaque white.
fn flatten_on_white(px: Rgba<u8>) -> Rgba<u8> {
    let [r, g, b, a] = px.0;
    if a == 255 {
        return px;
    }
    let alpha = a as f32 / 255.0;
    let over = |c: u8| (c as f32 * alpha + 255.0 * (1.0 - alpha)).round() as u8;
    Rgba([over(r), over(g), over(b), 255])
}
