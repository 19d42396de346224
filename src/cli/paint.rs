//! Paint command implementation.
//!
//! Loads a drawing, replays a session script against it and writes the
//! composite (and optionally a print page).

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;

use crate::config::Settings;
use crate::editor::{Controller, Editor};
use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::render::{PngPage, PrintSurface, SystemViewer};
use crate::script::Script;
use crate::types::{BrushSize, Colour, Tool};

/// Colour a drawing by replaying a session script
#[derive(Args, Debug)]
pub struct PaintArgs {
    /// Line-art image to colour
    #[arg(required = true)]
    pub image: PathBuf,

    /// Session script (YAML list of actions)
    #[arg(long, short)]
    pub script: Option<PathBuf>,

    /// Output PNG (default: <output dir>/<name>-coloured.png)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Also write a print page to this PNG
    #[arg(long, conflicts_with = "open")]
    pub print: Option<PathBuf>,

    /// Open the print page in the system viewer
    #[arg(long)]
    pub open: bool,

    /// Starting colour (hex)
    #[arg(long)]
    pub colour: Option<Colour>,

    /// Starting tool
    #[arg(long, value_enum)]
    pub tool: Option<Tool>,

    /// Starting brush size (1-50)
    #[arg(long)]
    pub brush_size: Option<u32>,
}

pub fn run(args: PaintArgs, printer: &Printer) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::discover(&cwd)?;

    let mut tools = settings.tool_config();
    if let Some(colour) = args.colour {
        tools.colour = colour;
    }
    if let Some(tool) = args.tool {
        tools.tool = tool;
    }
    if let Some(size) = args.brush_size {
        tools.brush_size = BrushSize::new(size)?;
    }

    let mut editor = Editor::new(tools).with_page(settings.page);
    editor.load_path(&args.image)?;
    if let Some(canvas) = editor.canvas() {
        let (w, h) = canvas.dimensions();
        printer.status("Loaded", &format!("{} ({}x{})", display_path(&args.image), w, h));
    }

    if let Some(script_path) = &args.script {
        let script = Script::load(script_path)?;
        script.replay(&mut editor, Instant::now());
        printer.status(
            "Replayed",
            &format!(
                "{} from {}",
                plural(script.len(), "action", "actions"),
                display_path(script_path)
            ),
        );
    } else {
        printer.warning("Skipping", "no --script given, exporting uncoloured drawing");
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&settings.output, &args.image));
    editor.download(&output)?;
    printer.status("Saved", &display_path(&output));

    let surface: Option<Box<dyn PrintSurface>> = match (&args.print, args.open) {
        (Some(path), _) => Some(Box::new(PngPage::new(path))),
        (None, true) => Some(Box::new(SystemViewer)),
        (None, false) => None,
    };
    if let Some(mut surface) = surface {
        editor.print(surface.as_mut())?;
        let target = args
            .print
            .as_deref()
            .map(display_path)
            .unwrap_or_else(|| "system viewer".to_string());
        printer.status("Printed", &target);
    }

    Ok(())
}

/// `<dir>/<stem>-coloured.png`
fn default_output(dir: &Path, image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "drawing".to_string());
    dir.join(format!("{}-coloured.png", stem))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::test_support::art_image;
    use crate::render::write_png;
    use tempfile::tempdir;

    #[test]
    fn test_default_output_name() {
        assert_eq!(
            default_output(Path::new("dist"), Path::new("art/cat.png")),
            PathBuf::from("dist/cat-coloured.png")
        );
    }

    #[test]
    fn test_paint_with_script() {
        let dir = tempdir().unwrap();
        let image = dir.path().join("box.png");
        write_png(
            &art_image(&[
                "######", //
                "#....#",
                "#....#",
                "######",
            ]),
            &image,
        )
        .unwrap();
        let script = dir.path().join("session.yaml");
        std::fs::write(&script, "- action: fill\n  at: [2, 1]\n  colour: \"#2ECC40\"\n").unwrap();

        let args = PaintArgs {
            image,
            script: Some(script),
            output: Some(dir.path().join("out.png")),
            print: Some(dir.path().join("page.png")),
            open: false,
            colour: None,
            tool: None,
            brush_size: None,
        };
        run(args, &Printer::new()).unwrap();

        let out = image::open(dir.path().join("out.png")).unwrap().to_rgba8();
        assert_eq!(out.get_pixel(2, 1).0, [0x2E, 0xCC, 0x40, 255]);
        assert_eq!(out.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert!(dir.path().join("page.png").exists());
    }

    #[test]
    fn test_paint_rejects_bad_brush_size() {
        let dir = tempdir().unwrap();
        let args = PaintArgs {
            image: dir.path().join("missing.png"),
            script: None,
            output: None,
            print: None,
            open: false,
            colour: None,
            tool: None,
            brush_size: Some(0),
        };
        assert!(run(args, &Printer::new()).is_err());
    }
}
