//! Core domain types for tint.
//!
//! - `Colour` - RGBA colour values and hex parsing
//! - `Tool`, `BrushSize`, `ToolConfig` - what the next gesture does
//! - `ColourLibrary` - swatches and user-collected colours

mod colour;
mod swatches;
mod tool;

pub use colour::Colour;
pub use swatches::{ColourLibrary, ColourPicker, DEFAULT_SWATCHES, MAX_USER_COLOURS};
pub use tool::{BrushSize, Tool, ToolConfig};
