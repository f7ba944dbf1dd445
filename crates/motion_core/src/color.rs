//! RGBA colors
//!
//! Channels are stored as `f32` in the 0.0..=1.0 range. Hex strings follow the
//! `#RRGGBB` / `#AARRGGBB` convention used by the catalog and theme tables.

use std::fmt;
use thiserror::Error;

/// Error returned when a hex color string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("color '{0}' must start with '#'")]
    MissingHash(String),
    #[error("color '{0}' must have 3, 6 or 8 hex digits")]
    InvalidLength(String),
    #[error("color '{0}' contains a non-hex digit")]
    InvalidDigit(String),
}

/// RGBA color
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color from a `0xRRGGBB` literal
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    /// Parse `#RGB`, `#RRGGBB` or `#AARRGGBB`
    pub fn parse_hex(input: &str) -> Result<Self, ColorParseError> {
        let digits = input
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(input.to_string()))?;

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(input.to_string()));
        }

        let byte = |range: std::ops::Range<usize>| -> f32 {
            // Digits were validated above.
            u8::from_str_radix(&digits[range], 16).unwrap_or(0) as f32 / 255.0
        };

        match digits.len() {
            3 => {
                let nibble = |i: usize| -> f32 {
                    let v = u8::from_str_radix(&digits[i..i + 1], 16).unwrap_or(0);
                    (v * 17) as f32 / 255.0
                };
                Ok(Self::rgb(nibble(0), nibble(1), nibble(2)))
            }
            6 => Ok(Self::rgb(byte(0..2), byte(2..4), byte(4..6))),
            8 => Ok(Self::rgba(byte(2..4), byte(4..6), byte(6..8), byte(0..2))),
            _ => Err(ColorParseError::InvalidLength(input.to_string())),
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Channel-wise linear interpolation, alpha included.
    ///
    /// `t` is not clamped so that overshooting easings stay continuous.
    pub fn lerp(self, to: Color, t: f32) -> Color {
        Color {
            r: self.r + (to.r - self.r) * t,
            g: self.g + (to.g - self.g) * t,
            b: self.b + (to.b - self.b) * t,
            a: self.a + (to.a - self.a) * t,
        }
    }

    /// Approximate equality, used when comparing interpolated colors
    pub fn approx_eq(&self, other: &Color, epsilon: f32) -> bool {
        (self.r - other.r).abs() <= epsilon
            && (self.g - other.g).abs() <= epsilon
            && (self.b - other.b).abs() <= epsilon
            && (self.a - other.a).abs() <= epsilon
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl fmt::Display for Color {
    /// Formats as `#RRGGBB`, or `#AARRGGBB` when not fully opaque
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        if channel(self.a) == 255 {
            write!(
                f,
                "#{:02X}{:02X}{:02X}",
                channel(self.r),
                channel(self.g),
                channel(self.b)
            )
        } else {
            write!(
                f,
                "#{:02X}{:02X}{:02X}{:02X}",
                channel(self.a),
                channel(self.r),
                channel(self.g),
                channel(self.b)
            )
        }
    }
}

impl std::str::FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse_hex(s)
    }
}
