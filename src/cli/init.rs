//! Init command implementation.
//!
//! Writes a `tint.yaml` holding the default settings, ready to edit.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::config::{Settings, SETTINGS_FILE};
use crate::error::{Result, TintError};
use crate::output::{display_path, plural, Printer};

/// Initialize a tint project by generating a tint.yaml
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing tint.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let settings_path = args.path.join(SETTINGS_FILE);

    if settings_path.exists() && !args.force {
        return Err(TintError::Config {
            message: format!("{} already exists", SETTINGS_FILE),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    let settings = Settings::default();
    let yaml = serde_yaml::to_string(&settings).map_err(|e| TintError::Config {
        message: format!("Failed to serialize settings: {}", e),
        help: None,
    })?;

    fs::write(&settings_path, &yaml).map_err(|e| TintError::Io {
        path: settings_path.clone(),
        message: format!("Failed to write settings: {}", e),
    })?;

    printer.status(
        "Created",
        &format!(
            "{} ({})",
            display_path(&settings_path),
            plural(settings.palette.len(), "swatch", "swatches")
        ),
    );

    Ok(())
}
