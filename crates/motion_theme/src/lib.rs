//! Motion Playground Theme System
//!
//! Three built-in themes, each a flat palette of four colors that the
//! playground screen binds to:
//!
//! - **page background**: the screen behind everything
//! - **foreground**: text and outlines
//! - **accent** / **accent2**: controls and highlights
//!
//! # Quick Start
//!
//! ```rust
//! use motion_theme::ThemeKind;
//!
//! let palette = ThemeKind::Dark.palette();
//! assert_eq!(palette.page_background.to_string(), "#0B1020");
//! ```
//!
//! Theme names are matched leniently: anything that is not `Dark` or
//! `Pastel` resolves to the default `Neon` palette.

pub mod palette;
pub mod presets;

pub use palette::ThemePalette;
pub use presets::ThemeKind;
