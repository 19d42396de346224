//! Swatches and the user colour library.
//!
//! The library holds the built-in swatches plus a short list of colours the
//! user collected (from a colour picker or an eyedropper). Selecting a colour
//! makes it the active fill/brush colour.

use log::debug;

use crate::error::Result;
use crate::types::Colour;

/// Built-in swatches, in display order.
pub const DEFAULT_SWATCHES: [Colour; 12] = [
    Colour::rgb(0xFF, 0x69, 0xB4), // pink
    Colour::rgb(0x00, 0xBC, 0xD4), // blue
    Colour::rgb(0xFF, 0x41, 0x36), // red
    Colour::rgb(0xFF, 0xDC, 0x00), // yellow
    Colour::rgb(0x7F, 0xDB, 0xFF), // light blue
    Colour::rgb(0x2E, 0xCC, 0x40), // green
    Colour::rgb(0xFF, 0x85, 0x1B), // orange
    Colour::rgb(0xB1, 0x0D, 0xC9), // purple
    Colour::rgb(0xF0, 0x12, 0xBE), // fuchsia
    Colour::rgb(0x3D, 0x99, 0x70), // olive
    Colour::rgb(0x00, 0x1F, 0x3F), // navy
    Colour::rgb(0xAA, 0xAA, 0xAA), // grey
];

/// Maximum number of user-collected colours.
pub const MAX_USER_COLOURS: usize = 12;

/// A source of colours outside the canvas, such as a screen eyedropper.
///
/// Implementations report whether the capability exists on this platform and
/// return `Ok(None)` when the user cancels.
pub trait ColourPicker {
    fn is_supported(&self) -> bool;

    /// Ask for a colour as a hex string.
    fn pick(&mut self) -> Result<Option<String>>;
}

/// Swatches, user colours and the active colour.
#[derive(Debug, Clone)]
pub struct ColourLibrary {
    swatches: Vec<Colour>,
    user: Vec<Colour>,
    active: Colour,
}

impl ColourLibrary {
    /// Create a library from a swatch list. The first swatch becomes active.
    pub fn new(swatches: Vec<Colour>) -> Self {
        let swatches: Vec<Colour> = swatches.into_iter().map(Colour::opaque).collect();
        let active = swatches.first().copied().unwrap_or(Colour::BLACK);
        Self {
            swatches,
            user: Vec::new(),
            active,
        }
    }

    pub fn swatches(&self) -> &[Colour] {
        &self.swatches
    }

    pub fn user_colours(&self) -> &[Colour] {
        &self.user
    }

    pub fn active(&self) -> Colour {
        self.active
    }

    /// Add a custom colour and make it active.
    ///
    /// Duplicates are not stored twice; once the library is full new colours
    /// are still selected but not remembered.
    pub fn add(&mut self, colour: Colour) {
        let colour = colour.opaque();
        self.remember(colour);
        self.active = colour;
    }

    /// Activate a colour, remembering it if it is not a built-in swatch.
    pub fn select(&mut self, colour: Colour) {
        let colour = colour.opaque();
        if !self.swatches.contains(&colour) {
            self.remember(colour);
        }
        self.active = colour;
    }

    /// Forget a user colour. Returns whether it was present.
    pub fn remove(&mut self, colour: Colour) -> bool {
        let before = self.user.len();
        self.user.retain(|c| *c != colour);
        self.user.len() != before
    }

    /// Run a picker and add its result.
    ///
    /// Returns the picked colour, or `None` when the picker is unavailable or
    /// the user cancelled.
    pub fn pick_with(&mut self, picker: &mut dyn ColourPicker) -> Result<Option<Colour>> {
        if !picker.is_supported() {
            debug!("colour picker not supported on this platform");
            return Ok(None);
        }
        let Some(hex) = picker.pick()? else {
            debug!("colour pick cancelled");
            return Ok(None);
        };
        let colour = Colour::from_hex(&hex)?;
        self.add(colour);
        Ok(Some(colour.opaque()))
    }

    fn remember(&mut self, colour: Colour) {
        if !self.user.contains(&colour) && self.user.len() < MAX_USER_COLOURS {
            self.user.push(colour);
        }
    }
}

impl Default for ColourLibrary {
    fn default() -> Self {
        Self::new(DEFAULT_SWATCHES.to_vec())
    }
}
