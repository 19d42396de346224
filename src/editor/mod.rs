//! The editing session.
//!
//! [`Editor`] owns the canvas (once an image is loaded), the tool
//! configuration and the gesture currently held. Hosts feed it pointer
//! events and clock ticks and talk to it through the [`Controller`] trait for
//! the one-shot actions.

mod gesture;

use std::path::Path;
use std::time::Instant;

use image::RgbaImage;
use log::{debug, info};

use crate::canvas::{Canvas, Point};
use crate::error::{Result, TintError};
use crate::render::{encode_png, layout_page, write_png, PageSize, PrintSurface};
use crate::types::{BrushSize, Colour, Tool, ToolConfig};

pub use gesture::{FillGesture, Gesture, DRAG_SAMPLE_INTERVAL, HOLD_DELAY, REPEAT_INTERVAL};

/// One-shot actions exposed to the surrounding UI.
pub trait Controller {
    /// Step back one history entry.
    fn undo(&mut self);

    /// Clear all colour and history.
    fn reset(&mut self);

    /// Write the composite as a PNG file.
    fn download(&self, path: &Path) -> Result<()>;

    /// Lay the composite out on a page and present it.
    fn print(&self, surface: &mut dyn PrintSurface) -> Result<()>;
}

type HistoryListener = Box<dyn FnMut(bool)>;

/// A single colouring session.
pub struct Editor {
    canvas: Option<Canvas>,
    tools: ToolConfig,
    page: PageSize,
    gesture: Option<Gesture>,
    history_listener: Option<HistoryListener>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(ToolConfig::default())
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("canvas", &self.canvas.as_ref().map(Canvas::dimensions))
            .field("tools", &self.tools)
            .field("page", &self.page)
            .field("gesture", &self.gesture)
            .finish_non_exhaustive()
    }
}

impl Editor {
    pub fn new(tools: ToolConfig) -> Self {
        Self {
            canvas: None,
            tools,
            page: PageSize::default(),
            gesture: None,
            history_listener: None,
        }
    }

    /// Use `page` for print layout.
    pub fn with_page(mut self, page: PageSize) -> Self {
        self.page = page;
        self
    }

    /// Load a new drawing from encoded image bytes.
    ///
    /// On failure the editor keeps whatever it had before.
    pub fn load(&mut self, bytes: &[u8]) -> Result<()> {
        let canvas = Canvas::decode(bytes)?;
        let (w, h) = canvas.dimensions();
        info!("loaded {}x{} canvas", w, h);

        self.gesture = None;
        self.canvas = Some(canvas);
        self.notify_history();
        Ok(())
    }

    /// Load a new drawing from a file.
    pub fn load_path(&mut self, path: &Path) -> Result<()> {
        let bytes = std::fs::read(path).map_err(|e| TintError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read image: {}", e),
        })?;
        self.load(&bytes)
    }

    pub fn is_loaded(&self) -> bool {
        self.canvas.is_some()
    }

    pub fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        self.canvas.as_ref().is_some_and(Canvas::can_undo)
    }

    pub fn tools(&self) -> ToolConfig {
        self.tools
    }

    pub fn page(&self) -> PageSize {
        self.page
    }

    /// Takes effect at the next pointer-down.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tools.tool = tool;
    }

    pub fn set_colour(&mut self, colour: Colour) {
        self.tools.colour = colour;
    }

    pub fn set_brush_size(&mut self, size: BrushSize) {
        self.tools.brush_size = size;
    }

    /// Register a callback fired with the new `can_undo` value whenever
    /// history changes.
    pub fn on_history_change(&mut self, listener: impl FnMut(bool) + 'static) {
        self.history_listener = Some(Box::new(listener));
    }

    pub fn is_gesture_active(&self) -> bool {
        self.gesture.is_some()
    }

    /// The next instant at which [`Editor::tick`] has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        match &self.gesture {
            Some(Gesture::Fill(fill)) => Some(fill.next_deadline()),
            _ => None,
        }
    }

    pub fn pointer_down(&mut self, at: Point, now: Instant) {
        self.end_gesture();

        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };
        if !canvas.contains(at) {
            debug!("pointer down outside canvas at ({}, {})", at.x, at.y);
            return;
        }

        let before = canvas.history().len();
        let gesture = match self.tools.tool {
            Tool::Fill => Gesture::Fill(FillGesture::begin(canvas, at, self.tools.colour, now)),
            Tool::Brush => Gesture::Brush(canvas.begin_stroke(
                at,
                self.tools.colour,
                self.tools.brush_size,
            )),
        };
        let changed = canvas.history().len() != before;

        self.gesture = Some(gesture);
        if changed {
            self.notify_history();
        }
    }

    pub fn pointer_move(&mut self, at: Point, now: Instant) {
        if let (Some(canvas), Some(gesture)) = (self.canvas.as_mut(), self.gesture.as_mut()) {
            gesture.moved(canvas, at, now);
        }
    }

    pub fn pointer_up(&mut self) {
        self.end_gesture();
    }

    pub fn pointer_leave(&mut self) {
        self.end_gesture();
    }

    /// Fire any drag-fill deadline that has passed.
    pub fn tick(&mut self, now: Instant) {
        if let (Some(canvas), Some(gesture)) = (self.canvas.as_mut(), self.gesture.as_mut()) {
            gesture.tick(canvas, now);
        }
    }

    /// The flattened image, if a drawing is loaded.
    pub fn composite(&self) -> Option<RgbaImage> {
        self.canvas.as_ref().map(Canvas::composite)
    }

    /// The composite encoded as PNG bytes.
    pub fn export_png(&self) -> Result<Option<Vec<u8>>> {
        self.composite().map(|img| encode_png(&img)).transpose()
    }

    fn end_gesture(&mut self) {
        let (Some(canvas), Some(gesture)) = (self.canvas.as_mut(), self.gesture.take()) else {
            return;
        };
        if gesture.finish(canvas) {
            self.notify_history();
        }
    }

    fn notify_history(&mut self) {
        let can_undo = self.can_undo();
        if let Some(listener) = self.history_listener.as_mut() {
            listener(can_undo);
        }
    }
}

impl Controller for Editor {
    /// An active gesture is committed first, so undo removes it.
    fn undo(&mut self) {
        self.end_gesture();
        let undone = self.canvas.as_mut().is_some_and(Canvas::undo);
        if undone {
            debug!("undo");
            self.notify_history();
        }
    }

    fn reset(&mut self) {
        self.gesture = None;
        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };
        let painted = canvas
            .layer()
            .pixels()
            .any(|p| !Colour::from(*p).is_transparent());
        if canvas.can_undo() || painted {
            canvas.reset();
            debug!("reset");
            self.notify_history();
        }
    }

    fn download(&self, path: &Path) -> Result<()> {
        let Some(img) = self.composite() else {
            return Ok(());
        };
        write_png(&img, path)?;
        info!("saved {}", path.display());
        Ok(())
    }

    fn print(&self, surface: &mut dyn PrintSurface) -> Result<()> {
        let Some(img) = self.composite() else {
            return Ok(());
        };
        surface.present(&layout_page(&img, self.page))
    }
}
