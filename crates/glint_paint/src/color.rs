//! Color types and color-string parsing

use crate::{ColorError, Result};
use std::fmt;
use std::str::FromStr;

/// Opaque RGB color with u8 components (0 to 255)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create from hex value (0xRRGGBB)
    pub fn from_hex(hex: u32) -> Self {
        Self::rgb(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// Components as a tuple `(r, g, b)`
    pub fn to_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// RGBA ink with the given alpha, `[r, g, b, a]`
    pub fn with_alpha(self, alpha: u8) -> [u8; 4] {
        [self.r, self.g, self.b, alpha]
    }

    /// Fully opaque RGBA ink
    pub fn to_rgba8(self) -> [u8; 4] {
        self.with_alpha(u8::MAX)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        parse_color(s)
    }
}

/// Parse a color string.
///
/// Accepted forms:
/// - `#RRGGBB` (any number of leading `#`, six hex digits, either case)
/// - `R,G,B` (three decimal integers 0-255, whitespace around each is ignored)
pub fn parse_color(value: &str) -> Result<Color> {
    if value.starts_with('#') {
        parse_hex(value.trim_start_matches('#'))
    } else {
        parse_decimal(value)
    }
}

fn parse_hex(digits: &str) -> Result<Color> {
    let invalid = || ColorError::InvalidHex(digits.to_string());

    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
    Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn parse_decimal(value: &str) -> Result<Color> {
    let invalid = || ColorError::InvalidRgb(value.to_string());

    let channels = value
        .split(',')
        .map(|part| part.trim().parse::<u8>().map_err(|_| invalid()))
        .collect::<Result<Vec<u8>>>()?;

    match channels.as_slice() {
        [r, g, b] => Ok(Color::rgb(*r, *g, *b)),
        _ => Err(invalid()),
    }
}
