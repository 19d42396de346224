//! Boundary-aware flood fill.
//!
//! Fills the 4-connected region of the colour layer that shares the seed's
//! colour, stopping at line-art pixels. Traversal uses an explicit stack of
//! flat indices with a visited mask, so region size never touches the call
//! stack.

use image::RgbaImage;

use crate::types::Colour;

use super::LineArt;

/// Upper bound on pixels painted by a single fill.
///
/// Reaching it leaves a partial fill in place; it is not an error.
pub const MAX_FILL_PIXELS: usize = 100_000;

/// What a fill did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillOutcome {
    /// Pixels repainted.
    pub filled: usize,
    /// The fill stopped at [`MAX_FILL_PIXELS`] with region left unpainted.
    pub truncated: bool,
}

impl FillOutcome {
    pub fn changed(&self) -> bool {
        self.filled > 0
    }
}

/// Flood-fill the region containing (x, y) on `layer` with `colour`.
///
/// No-op when the seed is outside the canvas, on a line, or already the
/// fill colour. Painted pixels are always opaque.
pub fn flood_fill(
    layer: &mut RgbaImage,
    line_art: &LineArt,
    x: i64,
    y: i64,
    colour: Colour,
) -> FillOutcome {
    flood_fill_bounded(layer, line_art, x, y, colour, MAX_FILL_PIXELS)
}

/// [`flood_fill`] with an explicit pixel budget.
pub fn flood_fill_bounded(
    layer: &mut RgbaImage,
    line_art: &LineArt,
    x: i64,
    y: i64,
    colour: Colour,
    max_pixels: usize,
) -> FillOutcome {
    debug_assert_eq!(layer.dimensions(), line_art.dimensions());

    let Some(seed) = line_art.index(x, y) else {
        return FillOutcome::default();
    };
    if line_art.is_line(x, y) {
        return FillOutcome::default();
    }

    let fill = colour.opaque().to_rgba();
    let width = layer.width() as usize;
    let height = layer.height() as usize;
    let pixels: &mut [u8] = layer;

    let target = pixel_at(pixels, seed);
    if target == fill {
        return FillOutcome::default();
    }

    let mut visited = vec![false; width * height];
    let mut stack: Vec<usize> = Vec::with_capacity(4096);
    visited[seed] = true;
    stack.push(seed);

    let mut filled = 0;
    while filled < max_pixels {
        let Some(idx) = stack.pop() else {
            break;
        };

        pixels[idx * 4..idx * 4 + 4].copy_from_slice(&fill);
        filled += 1;

        let cx = idx % width;
        let cy = idx / width;
        let neighbours = [
            (cx + 1 < width).then(|| idx + 1),
            (cx > 0).then(|| idx - 1),
            (cy + 1 < height).then(|| idx + width),
            (cy > 0).then(|| idx - width),
        ];

        for ni in neighbours.into_iter().flatten() {
            if visited[ni] {
                continue;
            }
            let (nx, ny) = ((ni % width) as i64, (ni / width) as i64);
            if !line_art.is_line(nx, ny) && pixel_at(pixels, ni) == target {
                visited[ni] = true;
                stack.push(ni);
            }
        }
    }

    FillOutcome {
        filled,
        truncated: !stack.is_empty(),
    }
}

#[inline]
fn pixel_at(pixels: &[u8], idx: usize) -> [u8; 4] {
    let o = idx * 4;
    [pixels[o], pixels[o + 1], pixels[o + 2], pixels[o + 3]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::test_support::art;

    const RED: Colour = Colour::rgb(255, 0, 0);
    const BLUE: Colour = Colour::rgb(0, 0, 255);

    fn painted(layer: &RgbaImage, colour: Colour) -> usize {
        layer.pixels().filter(|p| p.0 == colour.to_rgba()).count()
    }

    #[test]
    fn test_fill_enclosed_box() {
        let art = art(&[
            "......", //
            ".####.",
            ".#..#.",
            ".#..#.",
            ".####.",
            "......",
        ]);
        let mut layer = art.blank_layer();

        let outcome = flood_fill(&mut layer, &art, 2, 2, RED);

        assert_eq!(outcome, FillOutcome { filled: 4, truncated: false });
        for (x, y) in [(2, 2), (3, 2), (2, 3), (3, 3)] {
            assert_eq!(layer.get_pixel(x, y).0, [255, 0, 0, 255]);
        }
        assert_eq!(layer.get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(layer.get_pixel(1, 1).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_fill_on_line_is_noop() {
        let art = art(&["#.", ".."]);
        let mut layer = art.blank_layer();
        let before = layer.clone();

        assert!(!flood_fill(&mut layer, &art, 0, 0, RED).changed());
        assert_eq!(layer, before);
    }

    #[test]
    fn test_fill_outside_canvas_is_noop() {
        let art = art(&[".."]);
        let mut layer = art.blank_layer();
        assert!(!flood_fill(&mut layer, &art, -1, 0, RED).changed());
        assert!(!flood_fill(&mut layer, &art, 0, 1, RED).changed());
    }

    #[test]
    fn test_fill_same_colour_is_noop() {
        let art = art(&["...", "..."]);
        let mut layer = art.blank_layer();
        assert_eq!(flood_fill(&mut layer, &art, 0, 0, RED).filled, 6);
        let again = flood_fill(&mut layer, &art, 1, 1, RED);
        assert_eq!(again, FillOutcome::default());
    }

    #[test]
    fn test_fill_does_not_cross_diagonal_gap() {
        // 4-connectivity: the diagonal line seals the corners
        let art = art(&[
            "..#", //
            ".#.",
            "#..",
        ]);
        let mut layer = art.blank_layer();
        flood_fill(&mut layer, &art, 0, 0, RED);
        assert_eq!(painted(&layer, RED), 3);
        assert_eq!(layer.get_pixel(2, 2).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_fill_replaces_only_target_colour() {
        let art = art(&["....."]);
        let mut layer = art.blank_layer();
        layer.put_pixel(2, 0, BLUE.to_pixel());

        let outcome = flood_fill(&mut layer, &art, 0, 0, RED);

        // the blue pixel splits the row
        assert_eq!(outcome.filled, 2);
        assert_eq!(layer.get_pixel(2, 0).0, BLUE.to_rgba());
        assert_eq!(layer.get_pixel(3, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_fill_recolours_existing_region() {
        let art = art(&["...#..."]);
        let mut layer = art.blank_layer();
        flood_fill(&mut layer, &art, 0, 0, RED);
        let outcome = flood_fill(&mut layer, &art, 1, 0, BLUE);
        assert_eq!(outcome.filled, 3);
        assert_eq!(painted(&layer, BLUE), 3);
        assert_eq!(painted(&layer, RED), 0);
    }

    #[test]
    fn test_fill_forces_opaque() {
        let art = art(&[".."]);
        let mut layer = art.blank_layer();
        flood_fill(&mut layer, &art, 0, 0, Colour::new(10, 20, 30, 40));
        assert_eq!(layer.get_pixel(1, 0).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_fill_budget_truncates() {
        let art = art(&["..........", ".........."]);
        let mut layer = art.blank_layer();

        let outcome = flood_fill_bounded(&mut layer, &art, 0, 0, RED, 5);

        assert_eq!(outcome, FillOutcome { filled: 5, truncated: true });
        assert_eq!(painted(&layer, RED), 5);
    }

    #[test]
    fn test_fill_large_open_canvas_hits_cap() {
        let art = LineArt::new(RgbaImage::from_pixel(400, 300, Colour::WHITE.to_pixel()));
        let mut layer = art.blank_layer();

        let outcome = flood_fill(&mut layer, &art, 200, 150, RED);

        assert_eq!(outcome.filled, MAX_FILL_PIXELS);
        assert!(outcome.truncated);
    }
}
