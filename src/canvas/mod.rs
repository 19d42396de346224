//! The colouring canvas.
//!
//! A [`Canvas`] pairs the immutable [`LineArt`] with a mutable colour layer
//! of the same size and the snapshot [`History`] of that layer. All pixel
//! operations go through it; callers never get mutable access to either
//! raster.
//!
//! # Example
//!
//! ```ignore
//! use tint::canvas::{Canvas, Point};
//! use tint::Colour;
//!
//! let mut canvas = Canvas::decode(&std::fs::read("cat.png")?)?;
//! canvas.fill(Point::new(120.0, 80.0), Colour::rgb(255, 0, 0));
//! canvas.undo();
//! ```

mod boundary;
mod brush;
mod drag;
mod fill;
mod history;
mod normalize;

use image::RgbaImage;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::render;
use crate::types::{BrushSize, Colour};

pub use boundary::{is_line_colour, is_line_pixel, LINE_LUMA_THRESHOLD};
pub use brush::BrushStroke;
pub use drag::{drag_fill, drag_fill_radius, DRAG_FILL_RADIUS};
pub use fill::{flood_fill, flood_fill_bounded, FillOutcome, MAX_FILL_PIXELS};
pub use history::History;
pub use normalize::{fit_dimensions, LineArt, MAX_CANVAS_HEIGHT, MAX_CANVAS_WIDTH};

/// A pointer position in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f32, f32)", into = "(f32, f32)")]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The pixel this position rounds to.
    pub fn pixel(self) -> (i64, i64) {
        (self.x.round() as i64, self.y.round() as i64)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (f32, f32) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// Line art, colour layer and history for one loaded drawing.
#[derive(Debug, Clone)]
pub struct Canvas {
    line_art: LineArt,
    layer: RgbaImage,
    history: History,
}

impl Canvas {
    /// Create a canvas with a blank colour layer over `line_art`.
    pub fn new(line_art: LineArt) -> Self {
        let layer = line_art.blank_layer();
        let history = History::new(layer.clone());
        Self {
            line_art,
            layer,
            history,
        }
    }

    /// Decode a source image into a fresh canvas.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        LineArt::decode(bytes).map(Self::new)
    }

    pub fn width(&self) -> u32 {
        self.line_art.width()
    }

    pub fn height(&self) -> u32 {
        self.line_art.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.line_art.dimensions()
    }

    /// Whether a position falls on a canvas pixel.
    pub fn contains(&self, at: Point) -> bool {
        let (x, y) = at.pixel();
        self.line_art.index(x, y).is_some()
    }

    pub fn line_art(&self) -> &LineArt {
        &self.line_art
    }

    /// The colour layer as currently painted.
    pub fn layer(&self) -> &RgbaImage {
        &self.layer
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Flood-fill the region under `at` and record it in history.
    pub fn fill(&mut self, at: Point, colour: Colour) -> FillOutcome {
        let (x, y) = at.pixel();
        let outcome = flood_fill(&mut self.layer, &self.line_art, x, y, colour);
        if outcome.truncated {
            warn!(
                "fill at ({}, {}) stopped after {} pixels",
                x, y, outcome.filled
            );
        }
        if outcome.changed() {
            debug!("filled {} pixels at ({}, {}) with {}", outcome.filled, x, y, colour);
            self.commit();
        }
        outcome
    }

    /// Repaint the neighbourhood of `at` for a drag sample.
    ///
    /// Not recorded in history; the gesture commits once on release.
    pub fn drag_fill(&mut self, at: Point, colour: Colour) -> usize {
        let (x, y) = at.pixel();
        drag_fill(&mut self.layer, &self.line_art, x, y, colour)
    }

    /// Start a brush stroke with a disc at `at`.
    pub fn begin_stroke(&mut self, at: Point, colour: Colour, size: BrushSize) -> BrushStroke {
        BrushStroke::begin(&mut self.layer, at, colour, size)
    }

    /// Extend a brush stroke to `to`.
    pub fn extend_stroke(&mut self, stroke: &mut BrushStroke, to: Point) {
        stroke.extend(&mut self.layer, to);
    }

    /// Snapshot the colour layer into history.
    pub fn commit(&mut self) {
        self.history.commit(self.layer.clone());
        debug!(
            "history: {} snapshots, {} KiB",
            self.history.len(),
            self.history.memory_usage() / 1024
        );
    }

    /// Restore the previous snapshot. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(previous) => {
                self.layer.clone_from(previous);
                true
            }
            None => false,
        }
    }

    /// Clear the colour layer and the history.
    pub fn reset(&mut self) {
        self.layer = self.line_art.blank_layer();
        self.history.reset(self.layer.clone());
    }

    /// Flatten colour and line art for export.
    pub fn composite(&self) -> RgbaImage {
        render::composite(&self.layer, self.line_art.image())
    }
}
