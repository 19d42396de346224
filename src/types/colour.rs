//! Colour type and parsing.

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, TintError};

/// An RGBA colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fully transparent colour (the blank colour raster).
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White (the paper behind the line art).
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Parse a hex colour string.
    ///
    /// Supports formats:
    /// - `#RGB` (3 digits, expanded to 6)
    /// - `#RRGGBB` (6 digits)
    /// - `#RRGGBBAA` (8 digits)
    ///
    /// The leading `#` is optional.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        if !hex.is_ascii() {
            return Err(invalid_hex(s));
        }

        match hex.len() {
            3 => {
                let mut digits = [0u8; 3];
                for (slot, c) in digits.iter_mut().zip(hex.chars()) {
                    let d = parse_hex_digit(c)?;
                    *slot = d << 4 | d;
                }
                Ok(Self::rgb(digits[0], digits[1], digits[2]))
            }
            6 => Ok(Self::rgb(
                parse_hex_byte(&hex[0..2])?,
                parse_hex_byte(&hex[2..4])?,
                parse_hex_byte(&hex[4..6])?,
            )),
            8 => Ok(Self::new(
                parse_hex_byte(&hex[0..2])?,
                parse_hex_byte(&hex[2..4])?,
                parse_hex_byte(&hex[4..6])?,
                parse_hex_byte(&hex[6..8])?,
            )),
            _ => Err(invalid_hex(s)),
        }
    }

    /// The same colour with alpha forced to 255.
    pub const fn opaque(self) -> Self {
        Self::rgb(self.r, self.g, self.b)
    }

    /// Perceptual brightness using the ITU-R BT.601 weights.
    pub fn luma(self) -> f32 {
        0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32
    }

    /// Convert to RGBA array.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Convert to an `image` pixel.
    pub fn to_pixel(self) -> Rgba<u8> {
        Rgba(self.to_rgba())
    }

    /// Check if the colour is fully transparent.
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }
}

impl From<Rgba<u8>> for Colour {
    fn from(px: Rgba<u8>) -> Self {
        let [r, g, b, a] = px.0;
        Self::new(r, g, b, a)
    }
}

impl From<Colour> for Rgba<u8> {
    fn from(c: Colour) -> Self {
        c.to_pixel()
    }
}

impl FromStr for Colour {
    type Err = TintError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Serialize for Colour {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Colour {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

fn invalid_hex(s: &str) -> TintError {
    TintError::Parse {
        message: format!("Invalid hex colour: {}", s),
        help: Some("Use #RGB, #RRGGBB, or #RRGGBBAA format".to_string()),
    }
}

/// Parse a single hex digit.
fn parse_hex_digit(c: char) -> Result<u8> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| TintError::Parse {
            message: format!("Invalid hex digit: {}", c),
            help: None,
        })
}

/// Parse a two-character hex byte.
fn parse_hex_byte(s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| TintError::Parse {
        message: format!("Invalid hex byte: {}", s),
        help: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_6digit() {
        let c = Colour::from_hex("#FF69B4").unwrap();
        assert_eq!(c, Colour::rgb(0xFF, 0x69, 0xB4));

        let c = Colour::from_hex("#001f3f").unwrap();
        assert_eq!(c, Colour::rgb(0x00, 0x1f, 0x3f));
    }

    #[test]
    fn test_from_hex_3digit() {
        let c = Colour::from_hex("#F00").unwrap();
        assert_eq!(c, Colour::rgb(255, 0, 0));
    }

    #[test]
    fn test_from_hex_8digit() {
        let c = Colour::from_hex("#FF000080").unwrap();
        assert_eq!(c, Colour::new(255, 0, 0, 128));
        assert_eq!(c.opaque(), Colour::rgb(255, 0, 0));
    }

    #[test]
    fn test_from_hex_no_hash() {
        assert_eq!(Colour::from_hex("00FF00").unwrap(), Colour::rgb(0, 255, 0));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(Colour::from_hex("#GGG").is_err());
        assert!(Colour::from_hex("#12345").is_err());
        assert!(Colour::from_hex("").is_err());
        assert!(Colour::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_luma() {
        assert_eq!(Colour::BLACK.luma(), 0.0);
        assert!((Colour::WHITE.luma() - 255.0).abs() < 0.01);
        assert!((Colour::rgb(100, 100, 100).luma() - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_pixel_conversion() {
        let c = Colour::new(1, 2, 3, 4);
        let px: Rgba<u8> = c.into();
        assert_eq!(px.0, [1, 2, 3, 4]);
        assert_eq!(Colour::from(px), c);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Colour::rgb(255, 0, 0)), "#FF0000");
        assert_eq!(format!("{}", Colour::new(255, 0, 0, 128)), "#FF000080");
    }

    #[test]
    fn test_serde_as_hex_string() {
        let c: Colour = serde_yaml::from_str("\"#2ECC40\"").unwrap();
        assert_eq!(c, Colour::rgb(0x2E, 0xCC, 0x40));
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#2ECC40\"");
    }
}
