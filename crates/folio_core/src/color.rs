//! Material colors
//!
//! Colors are authored as sRGB hex strings (`"#ffeded"`) and stored as linear
//! RGB so shading math can use them directly.

use std::fmt;
use serde::{Serialize, Deserialize};

/// A linear RGB color
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0 };

    /// Create a color from linear components
    pub const fn linear(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from 8-bit sRGB components
    pub fn from_srgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: srgb_to_linear(r as f32 / 255.0),
            g: srgb_to_linear(g as f32 / 255.0),
            b: srgb_to_linear(b as f32 / 255.0),
        }
    }

    /// Parse `#rrggbb` or `#rgb` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.trim().trim_start_matches('#');
        let nibble = |c: char| {
            c.to_digit(16)
                .map(|d| d as u8)
                .ok_or_else(|| ColorParseError::InvalidDigit(hex.to_string()))
        };

        let chars: Vec<char> = digits.chars().collect();
        match chars.len() {
            6 => {
                let byte = |i: usize| -> Result<u8, ColorParseError> {
                    Ok(nibble(chars[i])? << 4 | nibble(chars[i + 1])?)
                };
                Ok(Self::from_srgb8(byte(0)?, byte(2)?, byte(4)?))
            }
            3 => {
                let byte = |i: usize| -> Result<u8, ColorParseError> {
                    let n = nibble(chars[i])?;
                    Ok(n << 4 | n)
                };
                Ok(Self::from_srgb8(byte(0)?, byte(1)?, byte(2)?))
            }
            _ => Err(ColorParseError::InvalidLength(hex.to_string())),
        }
    }

    /// Format as an sRGB `#rrggbb` string
    pub fn to_hex(&self) -> String {
        let byte = |c: f32| (linear_to_srgb(c.clamp(0.0, 1.0)) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }

    /// Linear RGBA array with the given alpha (for GPU upload)
    pub fn to_rgba(&self, alpha: f32) -> [f32; 4] {
        [self.r, self.g, self.b, alpha]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Error parsing a hex color string
#[derive(Debug, Clone, PartialEq)]
pub enum ColorParseError {
    /// Not 3 or 6 hex digits
    InvalidLength(String),
    /// A character that is not a hex digit
    InvalidDigit(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorParseError::InvalidLength(s) => {
                write!(f, "Color '{}' must have 3 or 6 hex digits", s)
            }
            ColorParseError::InvalidDigit(s) => {
                write!(f, "Color '{}' contains a non-hex character", s)
            }
        }
    }
}

impl std::error::Error for ColorParseError {}
