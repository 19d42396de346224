//! Freehand round brush.
//!
//! A stroke is a disc at the press point followed by capsules (segments with
//! round caps) between consecutive samples, which also gives round joins.
//! The brush ignores line art entirely.

use image::RgbaImage;

use crate::types::{BrushSize, Colour};

use super::Point;

/// An in-progress brush stroke.
#[derive(Debug, Clone)]
pub struct BrushStroke {
    colour: Colour,
    size: BrushSize,
    last: Point,
    segments: usize,
}

impl BrushStroke {
    /// Start a stroke, painting a disc of the brush diameter at `at`.
    pub fn begin(layer: &mut RgbaImage, at: Point, colour: Colour, size: BrushSize) -> Self {
        let colour = colour.opaque();
        paint_capsule(layer, at, at, size.get() as f32 / 2.0, colour);
        Self {
            colour,
            size,
            last: at,
            segments: 0,
        }
    }

    /// Continue the stroke to `to`.
    pub fn extend(&mut self, layer: &mut RgbaImage, to: Point) {
        paint_capsule(layer, self.last, to, self.size.get() as f32 / 2.0, self.colour);
        self.last = to;
        self.segments += 1;
    }

    pub fn colour(&self) -> Colour {
        self.colour
    }

    pub fn size(&self) -> BrushSize {
        self.size
    }

    /// Segments drawn after the initial disc.
    pub fn segments(&self) -> usize {
        self.segments
    }
}

/// Paint every pixel whose centre lies within `radius` of the segment `a`-`b`.
///
/// The pixel containing each endpoint is always painted so that one-pixel
/// brushes still leave a mark.
fn paint_capsule(layer: &mut RgbaImage, a: Point, b: Point, radius: f32, colour: Colour) {
    let (width, height) = layer.dimensions();
    let pixel = colour.to_pixel();

    let min_x = (a.x.min(b.x) - radius).floor().max(0.0);
    let min_y = (a.y.min(b.y) - radius).floor().max(0.0);
    let max_x = (a.x.max(b.x) + radius).ceil().min(width as f32 - 1.0);
    let max_y = (a.y.max(b.y) + radius).ceil().min(height as f32 - 1.0);

    if min_x <= max_x && min_y <= max_y {
        let r2 = radius * radius;
        for py in min_y as u32..=max_y as u32 {
            for px in min_x as u32..=max_x as u32 {
                let centre = Point::new(px as f32 + 0.5, py as f32 + 0.5);
                if distance_sq_to_segment(centre, a, b) <= r2 {
                    layer.put_pixel(px, py, pixel);
                }
            }
        }
    }

    for end in [a, b] {
        if end.x >= 0.0 && end.y >= 0.0 && end.x < width as f32 && end.y < height as f32 {
            layer.put_pixel(end.x as u32, end.y as u32, pixel);
        }
    }
}

fn distance_sq_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (abx, aby) = (b.x - a.x, b.y - a.y);
    let (apx, apy) = (p.x - a.x, p.y - a.y);
    let len_sq = abx * abx + aby * aby;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        ((apx * abx + apy * aby) / len_sq).clamp(0.0, 1.0)
    };
    let (dx, dy) = (apx - t * abx, apy - t * aby);
    dx * dx + dy * dy
}
