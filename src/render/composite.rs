//! Flattening the colour layer and line art into one image.
//!
//! Layers, bottom to top: white paper, the colour layer (source-over), the
//! line art (multiply). Multiply keeps dark ink dark over any colour while
//! white paper in the line art leaves the colour untouched.

use image::{Rgba, RgbaImage};

/// Composite `layer` and `line_art` onto white.
///
/// Both images must have the same dimensions. Neither input is modified.
pub fn composite(layer: &RgbaImage, line_art: &RgbaImage) -> RgbaImage {
    debug_assert_eq!(layer.dimensions(), line_art.dimensions());

    let (width, height) = layer.dimensions();
    let mut out = RgbaImage::new(width, height);

    for ((dst, colour), ink) in out.pixels_mut().zip(layer.pixels()).zip(line_art.pixels()) {
        let base = over_white(*colour);
        *dst = multiply(base, *ink);
    }

    out
}

/// Source-over onto opaque white.
fn over_white(px: Rgba<u8>) -> [f32; 3] {
    let [r, g, b, a] = px.0;
    let alpha = a as f32 / 255.0;
    let over = |c: u8| c as f32 * alpha + 255.0 * (1.0 - alpha);
    [over(r), over(g), over(b)]
}

/// Multiply `ink` onto an opaque backdrop, honouring the ink's alpha.
fn multiply(backdrop: [f32; 3], ink: Rgba<u8>) -> Rgba<u8> {
    let alpha = ink.0[3] as f32 / 255.0;
    let mut out = [0u8; 4];
    for (i, &b) in backdrop.iter().enumerate() {
        let product = b * ink.0[i] as f32 / 255.0;
        out[i] = (b * (1.0 - alpha) + product * alpha).round().clamp(0.0, 255.0) as u8;
    }
    out[3] = 255;
    Rgba(out)
}
