use std::collections::HashMap;
use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::error::{Result, TintError};
use crate::output::{display_path, plural, Printer};
use crate::types::Colour;

/// List the configured swatches, or sample colours from an image
#[derive(Args, Debug)]
pub struct PaletteArgs {
    /// Image to sample colours from (default: list swatches)
    pub file: Option<PathBuf>,

    /// Maximum number of colours to output
    #[arg(long)]
    pub max: Option<usize>,
}

pub fn run(args: PaletteArgs, printer: &Printer) -> Result<()> {
    let colours = match &args.file {
        Some(path) => {
            let img = image::open(path)
                .map_err(|e| TintError::Io {
                    path: path.clone(),
                    message: e.to_string(),
                })?
                .to_rgba8();
            let colours = sample_colours(&img, args.max);
            printer.status(
                "Sampled",
                &format!("{} from {}", plural(colours.len(), "colour", "colours"), display_path(path)),
            );
            colours
        }
        None => {
            let settings = Settings::discover(&std::env::current_dir()?)?;
            let mut colours = settings.palette;
            if let Some(max) = args.max {
                colours.truncate(max);
            }
            printer.status("Listing", &plural(colours.len(), "swatch", "swatches"));
            colours
        }
    };

    for (i, colour) in colours.iter().enumerate() {
        println!("{} {}", printer.dim(&format!("{:>2}", i + 1)), colour);
    }

    Ok(())
}

/// Distinct colours by frequency, most common first. Fully transparent
/// pixels are skipped.
pub fn sample_colours(img: &image::RgbaImage, max: Option<usize>) -> Vec<Colour> {
    let mut counts: HashMap<[u8; 4], usize> = HashMap::new();
    for pixel in img.pixels() {
        let rgba = pixel.0;
        if rgba[3] == 0 {
            continue;
        }
        *counts.entry(rgba).or_insert(0) += 1;
    }

    // ties break on the colour value so output is stable
    let mut colours: Vec<([u8; 4], usize)> = counts.into_iter().collect();
    colours.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    if let Some(max) = max {
        colours.truncate(max);
    }

    colours
        .into_iter()
        .map(|(rgba, _)| Colour::new(rgba[0], rgba[1], rgba[2], rgba[3]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sample_colours_by_frequency() {
        let mut img = RgbaImage::from_pixel(4, 1, Rgba([255, 0, 0, 255]));
        img.put_pixel(0, 0, Rgba([0, 0, 255, 255]));
        img.put_pixel(1, 0, Rgba([0, 0, 0, 0]));

        assert_eq!(
            sample_colours(&img, None),
            vec![Colour::rgb(255, 0, 0), Colour::rgb(0, 0, 255)]
        );
        assert_eq!(sample_colours(&img, Some(1)), vec![Colour::rgb(255, 0, 0)]);
    }
}
