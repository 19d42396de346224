//! Local repaint used while the fill tool is held and dragged.
//!
//! This is an approximation of flood fill, not a replacement for it. Each
//! sample repaints the pixels within a fixed radius of the pointer that share
//! the colour under the pointer, without checking that they are connected to
//! it. Work per sample is bounded by the radius, which keeps continuous
//! dragging smooth on large regions.
//!
//! Consequences:
//! - a large region needs several passes to fill completely;
//! - line pixels are never repainted, whatever their thickness;
//! - a same-coloured pixel on the far side of a line thinner than the
//!   radius can be repainted, because connectivity is not checked.

use image::RgbaImage;

use crate::types::Colour;

use super::LineArt;

/// Radius of the neighbourhood repainted per sample.
pub const DRAG_FILL_RADIUS: i64 = 8;

/// Repaint the neighbourhood of (x, y). Returns the number of pixels changed.
pub fn drag_fill(
    layer: &mut RgbaImage,
    line_art: &LineArt,
    x: i64,
    y: i64,
    colour: Colour,
) -> usize {
    drag_fill_radius(layer, line_art, x, y, colour, DRAG_FILL_RADIUS)
}

/// [`drag_fill`] with an explicit radius.
pub fn drag_fill_radius(
    layer: &mut RgbaImage,
    line_art: &LineArt,
    x: i64,
    y: i64,
    colour: Colour,
    radius: i64,
) -> usize {
    debug_assert_eq!(layer.dimensions(), line_art.dimensions());

    if line_art.index(x, y).is_none() || line_art.is_line(x, y) {
        return 0;
    }

    let fill = colour.opaque().to_pixel();
    let target = *layer.get_pixel(x as u32, y as u32);
    if target == fill {
        return 0;
    }

    let mut filled = 0;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            let (px, py) = (x + dx, y + dy);
            if line_art.is_line(px, py) {
                // also rejects out-of-canvas
                continue;
            }
            let pixel = layer.get_pixel_mut(px as u32, py as u32);
            if *pixel == target {
                *pixel = fill;
                filled += 1;
            }
        }
    }
    filled
}
