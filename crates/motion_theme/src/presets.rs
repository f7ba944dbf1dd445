//! Built-in theme catalog.

use crate::palette::ThemePalette;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// Built-in theme catalog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ThemeKind {
    /// Navy page with blue accents.
    Dark,
    /// Near-black page with cyan and violet accents.
    #[default]
    Neon,
    /// Off-white page with soft teal and pink accents.
    Pastel,
}

impl ThemeKind {
    /// User-facing display name, also the config value.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Neon => "Neon",
            Self::Pastel => "Pastel",
        }
    }

    /// Full theme list, in picker order.
    pub fn all() -> &'static [ThemeKind] {
        const THEMES: [ThemeKind; 3] = [ThemeKind::Dark, ThemeKind::Neon, ThemeKind::Pastel];
        &THEMES
    }

    /// Resolve a theme name. Unknown names fall back to the default theme.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            n if n.eq_ignore_ascii_case("dark") => Self::Dark,
            n if n.eq_ignore_ascii_case("pastel") => Self::Pastel,
            n => {
                if !n.eq_ignore_ascii_case("neon") {
                    tracing::debug!(theme = n, "unknown theme name, using Neon");
                }
                Self::Neon
            }
        }
    }

    /// Colors for this theme.
    pub fn palette(self) -> ThemePalette {
        match self {
            Self::Dark => ThemePalette::from_hex(0x0B1020, 0xE5E7EB, 0x60A5FA, 0x2563EB),
            Self::Pastel => ThemePalette::from_hex(0xF7F7FB, 0x1E293B, 0x8BD3DD, 0xF6C2D9),
            Self::Neon => ThemePalette::from_hex(0x070711, 0xF8FAFC, 0x22D3EE, 0xA78BFA),
        }
    }
}

impl Display for ThemeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl Serialize for ThemeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.display_name())
    }
}

impl<'de> Deserialize<'de> for ThemeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(ThemeKind::from_name(&name))
    }
}
