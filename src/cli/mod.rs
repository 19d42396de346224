pub mod completions;
pub mod info;
pub mod init;
pub mod paint;
pub mod palette;

use clap::{ArgAction, Parser, Subcommand};

/// tint - colour line-art drawings
#[derive(Parser, Debug)]
#[command(name = "tint")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log filter implied by `-v` flags when RUST_LOG is unset.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Colour a drawing by replaying a session script
    Paint(paint::PaintArgs),

    /// Show canvas size and line coverage for a drawing
    Info(info::InfoArgs),

    /// List swatches, or sample colours from an image
    Palette(palette::PaletteArgs),

    /// Initialize a tint project (generates tint.yaml)
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
