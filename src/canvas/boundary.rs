//! Line/fillable classification of line-art pixels.

use image::RgbaImage;

use crate::types::Colour;

/// Pixels darker than this luma are treated as line art.
///
/// Tuned for high-contrast black-on-white drawings.
pub const LINE_LUMA_THRESHOLD: f32 = 80.0;

/// Classify a line-art pixel.
///
/// Coordinates outside the image are always line pixels, so every region is
/// closed at the canvas edge.
pub fn is_line_pixel(line_art: &RgbaImage, x: i64, y: i64) -> bool {
    if x < 0 || y < 0 || x >= line_art.width() as i64 || y >= line_art.height() as i64 {
        return true;
    }
    let px = line_art.get_pixel(x as u32, y as u32);
    is_line_colour(Colour::from(*px))
}

/// Whether a colour reads as line ink.
pub fn is_line_colour(colour: Colour) -> bool {
    colour.luma() < LINE_LUMA_THRESHOLD
}
