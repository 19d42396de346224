//! Tool selection and brush sizing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TintError};
use crate::types::Colour;

/// The active colouring tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Press to flood-fill a region, hold to drag-fill.
    #[default]
    Fill,
    /// Freehand round brush.
    Brush,
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tool::Fill => write!(f, "fill"),
            Tool::Brush => write!(f, "brush"),
        }
    }
}

/// Brush diameter in pixels, always within `1..=50`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct BrushSize(u32);

impl BrushSize {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 50;

    /// Validate a brush size.
    pub fn new(size: u32) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&size) {
            Ok(Self(size))
        } else {
            Err(TintError::Parse {
                message: format!("Brush size {} is out of range", size),
                help: Some(format!("Use a size between {} and {}", Self::MIN, Self::MAX)),
            })
        }
    }

    /// Clamp any value into the valid range.
    pub fn clamped(size: u32) -> Self {
        Self(size.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for BrushSize {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<u32> for BrushSize {
    type Error = TintError;

    fn try_from(size: u32) -> Result<Self> {
        Self::new(size)
    }
}

impl From<BrushSize> for u32 {
    fn from(size: BrushSize) -> Self {
        size.0
    }
}

/// Tool configuration supplied by the surrounding UI.
///
/// Read once per pointer-down; changing it mid-gesture affects only the next
/// gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolConfig {
    pub tool: Tool,
    pub colour: Colour,
    pub brush_size: BrushSize,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            tool: Tool::Fill,
            colour: crate::types::DEFAULT_SWATCHES[0],
            brush_size: BrushSize::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brush_size_bounds() {
        assert!(BrushSize::new(0).is_err());
        assert!(BrushSize::new(51).is_err());
        assert_eq!(BrushSize::new(1).unwrap().get(), 1);
        assert_eq!(BrushSize::new(50).unwrap().get(), 50);
    }

    #[test]
    fn test_brush_size_clamped() {
        assert_eq!(BrushSize::clamped(0).get(), 1);
        assert_eq!(BrushSize::clamped(99).get(), 50);
        assert_eq!(BrushSize::clamped(12).get(), 12);
    }

    #[test]
    fn test_brush_size_deserialize_rejects_out_of_range() {
        assert!(serde_yaml::from_str::<BrushSize>("80").is_err());
        assert_eq!(serde_yaml::from_str::<BrushSize>("7").unwrap().get(), 7);
    }

    #[test]
    fn test_tool_names() {
        assert_eq!(serde_yaml::from_str::<Tool>("brush").unwrap(), Tool::Brush);
        assert_eq!(Tool::Fill.to_string(), "fill");
    }

    #[test]
    fn test_default_config() {
        let config = ToolConfig::default();
        assert_eq!(config.tool, Tool::Fill);
        assert_eq!(config.brush_size.get(), 3);
        assert_eq!(config.colour, Colour::rgb(0xFF, 0x69, 0xB4));
    }
}
