//! Palette tokens

use motion_core::Color;

/// The four colors recomputed whenever the theme changes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThemePalette {
    pub page_background: Color,
    pub foreground: Color,
    pub accent: Color,
    pub accent2: Color,
}

impl ThemePalette {
    pub(crate) fn from_hex(page_background: u32, foreground: u32, accent: u32, accent2: u32) -> Self {
        Self {
            page_background: Color::from_hex(page_background),
            foreground: Color::from_hex(foreground),
            accent: Color::from_hex(accent),
            accent2: Color::from_hex(accent2),
        }
    }

    /// Relative luminance of the page background (0 = black, 1 = white)
    pub fn background_luminance(&self) -> f32 {
        let c = self.page_background;
        0.2126 * c.r + 0.7152 * c.g + 0.0722 * c.b
    }

    /// Whether foreground text sits on a dark page
    pub fn is_dark(&self) -> bool {
        self.background_luminance() < 0.5
    }
}
