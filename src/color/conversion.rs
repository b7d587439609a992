//! Color value type and conversion utilities
//!
//! Provides the 8-bit sRGB [`Color`] used throughout the crate:
//! - Hex parsing and canonical `#RRGGBB` formatting
//! - Euclidean RGB distance
//! - Linear rescaling of distance into a match percentage

use std::fmt;
use std::str::FromStr;

use palette::Srgb;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::matching::MAX_DISTANCE;
use crate::{MatchError, Result};

/// Fallback color for regions without usable pixels
pub const WHITE: Color = Color::new(255, 255, 255);

/// An 8-bit sRGB color, exchanged with callers as a `#RRGGBB` string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color(Srgb<u8>);

impl Color {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    /// Build a color from the low 24 bits of `value` (`0xRRGGBB`)
    pub fn from_u24(value: u32) -> Self {
        Self::new(
            ((value >> 16) & 0xFF) as u8,
            ((value >> 8) & 0xFF) as u8,
            (value & 0xFF) as u8,
        )
    }

    /// A random color for a freshly added candidate
    ///
    /// Drawn from `0x000000..0xFFFFFF`, so pure white is never produced.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::from_u24(rng.gen_range(0..0xFF_FFFF))
    }

    /// Parse a hexadecimal color string
    ///
    /// # Arguments
    ///
    /// * `hex` - Six hex digits with an optional leading `#` (e.g. "#FF0000" or "ff0000")
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InvalidHex` for any other length or non-hex characters
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(MatchError::invalid_hex(hex));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| MatchError::invalid_hex(hex))
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Canonical `#RRGGBB` representation, uppercase and zero-padded
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.components();
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }

    pub fn red(&self) -> u8 {
        self.0.red
    }

    pub fn green(&self) -> u8 {
        self.0.green
    }

    pub fn blue(&self) -> u8 {
        self.0.blue
    }

    pub fn components(&self) -> (u8, u8, u8) {
        self.0.into_components()
    }

    /// Euclidean distance to `other` in 0-255 RGB space
    pub fn distance(&self, other: &Color) -> f64 {
        let dr = f64::from(self.red()) - f64::from(other.red());
        let dg = f64::from(self.green()) - f64::from(other.green());
        let db = f64::from(self.blue()) - f64::from(other.blue());
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

impl Default for Color {
    fn default() -> Self {
        WHITE
    }
}

impl From<Srgb<u8>> for Color {
    fn from(srgb: Srgb<u8>) -> Self {
        Self(srgb)
    }
}

impl From<Color> for Srgb<u8> {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl TryFrom<String> for Color {
    type Error = MatchError;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl FromStr for Color {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Convert an RGB distance to a 0-100 similarity score
///
/// Distance 0 maps to 100 and `MAX_DISTANCE` to 0. Larger inputs clamp to 0.
pub fn match_percentage(distance: f64) -> u8 {
    let percentage = ((1.0 - distance / MAX_DISTANCE) * 100.0).round();
    percentage.clamp(0.0, 100.0) as u8
}
