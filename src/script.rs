//! Recorded session scripts.
//!
//! A script is a YAML list of actions. Replaying one drives an [`Editor`]
//! through the same pointer calls a UI would make, on a virtual clock, so
//! drag-fill holds and repeats behave as they would interactively.
//!
//! ```yaml
//! - action: colour
//!   value: "#FF4136"
//! - action: fill
//!   at: [120, 80]
//! - action: drag
//!   from: [40, 40]
//!   path: [[48, 40], [56, 42]]
//!   hold_ms: 200
//! - action: stroke
//!   points: [[10, 10], [30, 12]]
//!   size: 5
//! - action: undo
//! ```

use std::path::Path;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::canvas::Point;
use crate::editor::{Controller, Editor};
use crate::error::{Result, TintError};
use crate::types::{BrushSize, Colour, Tool, ToolConfig};

fn default_hold_ms() -> u64 {
    200
}

fn default_step_ms() -> u64 {
    20
}

/// One recorded action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Change the active colour.
    Colour { value: Colour },
    /// Change the active tool.
    Tool { value: Tool },
    /// Change the brush diameter.
    BrushSize { value: BrushSize },
    /// Click with the fill tool.
    Fill {
        at: Point,
        #[serde(default)]
        colour: Option<Colour>,
    },
    /// Press and hold the fill tool, then drag along `path`.
    Drag {
        from: Point,
        #[serde(default)]
        path: Vec<Point>,
        #[serde(default = "default_hold_ms")]
        hold_ms: u64,
        #[serde(default = "default_step_ms")]
        step_ms: u64,
        #[serde(default)]
        colour: Option<Colour>,
    },
    /// Paint a brush stroke through `points`.
    Stroke {
        points: Vec<Point>,
        #[serde(default)]
        size: Option<BrushSize>,
        #[serde(default)]
        colour: Option<Colour>,
    },
    Undo,
    Reset,
}

/// A parsed session script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub actions: Vec<Action>,
}

impl Script {
    /// Load a script from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| TintError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read script: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse a script from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let script: Self = serde_yaml::from_str(content).map_err(|e| TintError::Parse {
            message: format!("Invalid script: {}", e),
            help: Some("Each entry needs an `action` key, e.g. `- action: undo`".to_string()),
        })?;

        for (i, action) in script.actions.iter().enumerate() {
            if let Action::Stroke { points, .. } = action {
                if points.is_empty() {
                    return Err(TintError::Parse {
                        message: format!("Stroke at entry {} has no points", i + 1),
                        help: None,
                    });
                }
            }
        }

        Ok(script)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Replay every action against `editor`, starting the virtual clock at
    /// `start`. Returns the clock reading after the last action.
    pub fn replay(&self, editor: &mut Editor, start: Instant) -> Instant {
        let mut clock = Replay { now: start };
        for action in &self.actions {
            clock.apply(editor, action);
        }
        clock.now
    }
}

struct Replay {
    now: Instant,
}

impl Replay {
    fn apply(&mut self, editor: &mut Editor, action: &Action) {
        log::debug!("replay {:?}", action);
        match action {
            Action::Colour { value } => editor.set_colour(*value),
            Action::Tool { value } => editor.set_tool(*value),
            Action::BrushSize { value } => editor.set_brush_size(*value),
            Action::Fill { at, colour } => {
                with_tools(editor, Tool::Fill, *colour, None, |editor| {
                    editor.pointer_down(*at, self.now);
                    editor.pointer_up();
                });
            }
            Action::Drag {
                from,
                path,
                hold_ms,
                step_ms,
                colour,
            } => {
                with_tools(editor, Tool::Fill, *colour, None, |editor| {
                    editor.pointer_down(*from, self.now);
                    self.advance(editor, Duration::from_millis(*hold_ms));
                    for point in path {
                        self.advance(editor, Duration::from_millis(*step_ms));
                        editor.pointer_move(*point, self.now);
                    }
                    editor.pointer_up();
                });
            }
            Action::Stroke {
                points,
                size,
                colour,
            } => {
                let Some((first, rest)) = points.split_first() else {
                    return;
                };
                with_tools(editor, Tool::Brush, *colour, *size, |editor| {
                    editor.pointer_down(*first, self.now);
                    for point in rest {
                        editor.pointer_move(*point, self.now);
                    }
                    editor.pointer_up();
                });
            }
            Action::Undo => editor.undo(),
            Action::Reset => editor.reset(),
        }
    }

    /// Move the clock forward, firing every deadline that falls due on the way.
    fn advance(&mut self, editor: &mut Editor, by: Duration) {
        let target = self.now + by;
        while let Some(deadline) = editor.next_deadline().filter(|d| *d <= target) {
            self.now = self.now.max(deadline);
            editor.tick(self.now);
            if editor.next_deadline() == Some(deadline) {
                break;
            }
        }
        self.now = target;
    }
}

/// Run `f` with a temporary tool configuration, restoring the previous one.
fn with_tools(
    editor: &mut Editor,
    tool: Tool,
    colour: Option<Colour>,
    size: Option<BrushSize>,
    f: impl FnOnce(&mut Editor),
) {
    let saved: ToolConfig = editor.tools();
    editor.set_tool(tool);
    if let Some(colour) = colour {
        editor.set_colour(colour);
    }
    if let Some(size) = size {
        editor.set_brush_size(size);
    }

    f(editor);

    editor.set_tool(saved.tool);
    editor.set_colour(saved.colour);
    editor.set_brush_size(saved.brush_size);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::test_support::art_image;
    use crate::render::encode_png;
    use pretty_assertions::assert_eq;

    fn editor() -> Editor {
        let bytes = encode_png(&art_image(&[
            "####################", //
            "#........#.........#",
            "#........#.........#",
            "#........#.........#",
            "#........#.........#",
            "####################",
        ]))
        .unwrap();
        let mut editor = Editor::default();
        editor.load(&bytes).unwrap();
        editor
    }

    fn pixel(editor: &Editor, x: u32, y: u32) -> [u8; 4] {
        editor.canvas().unwrap().layer().get_pixel(x, y).0
    }

    #[test]
    fn test_parse_actions() {
        let yaml = r##"
- action: colour
  value: "#FF4136"
- action: fill
  at: [3, 2]
- action: drag
  from: [12, 2]
  path: [[14, 2]]
- action: stroke
  points: [[1, 1], [5, 1]]
  size: 2
- action: undo
- action: reset
"##;
        let script = Script::parse(yaml).unwrap();

        assert_eq!(script.len(), 6);
        assert_eq!(
            script.actions[0],
            Action::Colour {
                value: Colour::rgb(0xFF, 0x41, 0x36)
            }
        );
        assert_eq!(
            script.actions[2],
            Action::Drag {
                from: Point::new(12.0, 2.0),
                path: vec![Point::new(14.0, 2.0)],
                hold_ms: 200,
                step_ms: 20,
                colour: None,
            }
        );
        assert_eq!(script.actions[5], Action::Reset);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Script::parse("- action: explode").is_err());
        assert!(Script::parse("- action: stroke\n  points: []").is_err());
        assert!(Script::parse("- action: brush_size\n  value: 0").is_err());
        assert!(Script::parse("").unwrap().is_empty());
    }

    #[test]
    fn test_replay_fill_and_undo() {
        let mut editor = editor();
        let script = Script::parse(
            r##"
- action: fill
  at: [3, 2]
  colour: "#FF0000"
- action: fill
  at: [12, 2]
  colour: "#0000FF"
- action: undo
"##,
        )
        .unwrap();

        script.replay(&mut editor, Instant::now());

        assert_eq!(pixel(&editor, 3, 2), [255, 0, 0, 255]);
        assert_eq!(pixel(&editor, 12, 2), [0, 0, 0, 0]);
        // per-action colour does not stick
        assert_eq!(editor.tools(), ToolConfig::default());
    }

    #[test]
    fn test_replay_drag_advances_clock() {
        let mut editor = editor();
        let script = Script::parse(
            r##"
- action: drag
  from: [12, 2]
  path: [[7, 2], [3, 2]]
  hold_ms: 160
  step_ms: 20
  colour: "#00FF00"
"##,
        )
        .unwrap();
        let start = Instant::now();

        let end = script.replay(&mut editor, start);

        assert_eq!(end, start + Duration::from_millis(200));
        // press fills the right room, the drag reaches into the left one
        assert_eq!(pixel(&editor, 12, 2), [0, 255, 0, 255]);
        assert_eq!(pixel(&editor, 1, 1), [0, 255, 0, 255]);
        assert_eq!(pixel(&editor, 9, 2), [0, 0, 0, 0]);
        assert_eq!(editor.canvas().unwrap().history().len(), 3);
    }

    #[test]
    fn test_short_hold_never_drags() {
        let mut editor = editor();
        let script = Script::parse(
            r##"
- action: drag
  from: [3, 2]
  path: [[12, 2]]
  hold_ms: 50
  step_ms: 10
"##,
        )
        .unwrap();

        script.replay(&mut editor, Instant::now());

        assert_ne!(pixel(&editor, 3, 2), [0, 0, 0, 0]);
        assert_eq!(pixel(&editor, 12, 2), [0, 0, 0, 0]);
        assert_eq!(editor.canvas().unwrap().history().len(), 2);
    }

    #[test]
    fn test_replay_stroke() {
        let mut editor = editor();
        let script = Script::parse(
            r##"
- action: brush_size
  value: 1
- action: stroke
  points: [[2, 3], [16, 3]]
  colour: "#000000"
"##,
        )
        .unwrap();

        script.replay(&mut editor, Instant::now());

        assert_eq!(pixel(&editor, 9, 3), [0, 0, 0, 255]);
        assert_eq!(editor.tools().brush_size.get(), 1);
        assert_eq!(editor.tools().tool, Tool::Fill);
    }
}
