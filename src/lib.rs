//! tint - line-art colouring engine
//!
//! Load a black-and-white drawing, colour it with boundary-aware flood fill,
//! drag fill and a freehand brush, undo and reset, then export or print the
//! result with the line art kept on top.

pub mod canvas;
pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod output;
pub mod render;
pub mod script;
pub mod types;

pub use canvas::{Canvas, FillOutcome, LineArt, Point};
pub use config::Settings;
pub use editor::{Controller, Editor};
pub use error::{Result, TintError};
pub use render::{composite, layout_page, PageSize, PngPage, PrintSurface, SystemViewer};
pub use script::{Action, Script};
pub use types::{BrushSize, Colour, ColourLibrary, ColourPicker, Tool, ToolConfig};
