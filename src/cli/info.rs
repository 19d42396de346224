//! Info command implementation.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::canvas::LineArt;
use crate::error::{Result, TintError};
use crate::output::{display_path, Printer};

/// Show canvas size and line coverage for a drawing
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Line-art image to inspect
    #[arg(required = true)]
    pub image: PathBuf,

    /// Print JSON to stdout
    #[arg(long)]
    pub json: bool,
}

/// What loading a drawing would produce.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageInfo {
    pub source: String,
    pub source_width: u32,
    pub source_height: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Fraction of canvas pixels classified as line.
    pub line_coverage: f64,
}

impl ImageInfo {
    pub fn inspect(source: String, bytes: &[u8]) -> Result<Self> {
        let natural = image::load_from_memory(bytes).map_err(|e| TintError::Load {
            message: e.to_string(),
            help: None,
        })?;
        let art = LineArt::decode(bytes)?;
        Ok(Self {
            source,
            source_width: natural.width(),
            source_height: natural.height(),
            canvas_width: art.width(),
            canvas_height: art.height(),
            line_coverage: art.line_coverage(),
        })
    }
}

pub fn run(args: InfoArgs, printer: &Printer) -> Result<()> {
    let bytes = std::fs::read(&args.image).map_err(|e| TintError::Io {
        path: args.image.clone(),
        message: format!("Failed to read image: {}", e),
    })?;
    let info = ImageInfo::inspect(display_path(&args.image), &bytes)?;

    if args.json {
        let json = serde_json::to_string_pretty(&info).map_err(|e| TintError::Export {
            message: format!("Failed to serialize info: {}", e),
            help: None,
        })?;
        println!("{}", json);
        return Ok(());
    }

    printer.info("Source", &format!("{} ({}x{})", info.source, info.source_width, info.source_height));
    printer.info("Canvas", &format!("{}x{}", info.canvas_width, info.canvas_height));
    printer.info("Lines", &format!("{:.1}% of pixels", info.line_coverage * 100.0));
    Ok(())
}
