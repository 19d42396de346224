//! Project settings (tint.yaml) parsing.
//!
//! Settings supply defaults for the CLI: where output goes, which swatches
//! are offered, the starting tool and brush size, and the print page.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TintError};
use crate::render::PageSize;
use crate::types::{BrushSize, Colour, ColourLibrary, Tool, ToolConfig, DEFAULT_SWATCHES};

/// File name looked up in the working directory.
pub const SETTINGS_FILE: &str = "tint.yaml";

/// Settings loaded from tint.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Output directory for exported images.
    pub output: PathBuf,

    /// Swatches offered in the colour library.
    pub palette: Vec<Colour>,

    /// Starting brush diameter.
    pub brush_size: BrushSize,

    /// Starting tool.
    pub tool: Tool,

    /// Print page geometry.
    pub page: PageSize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output: PathBuf::from("dist"),
            palette: DEFAULT_SWATCHES.to_vec(),
            brush_size: BrushSize::default(),
            tool: Tool::default(),
            page: PageSize::default(),
        }
    }
}

impl Settings {
    /// Load settings from a tint.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| TintError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read settings: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Load `tint.yaml` from `dir`, falling back to defaults when absent.
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(SETTINGS_FILE);
        if path.is_file() {
            log::debug!("using settings from {}", path.display());
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse settings from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| TintError::Parse {
            message: format!("Invalid settings: {}", e),
            help: Some("Check tint.yaml syntax".to_string()),
        })
    }

    /// Tool configuration to start a session with.
    pub fn tool_config(&self) -> ToolConfig {
        let library = self.library();
        ToolConfig {
            tool: self.tool,
            colour: library.active(),
            brush_size: self.brush_size,
        }
    }

    /// Colour library built from the configured swatches.
    pub fn library(&self) -> ColourLibrary {
        ColourLibrary::new(self.palette.clone())
    }
}
