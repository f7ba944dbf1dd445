//! The fixed animation catalog shown in the preset list.

use motion_animation::PresetKind;
use motion_core::Color;
use std::sync::OnceLock;

/// Shape displayed on the stage for a preset
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKey {
    Circle,
    Square,
}

impl ShapeKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Square => "square",
        }
    }
}

/// A catalog entry
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationItem {
    pub preset: PresetKind,
    pub name: &'static str,
    pub preview_color: Color,
    pub stage_background: Color,
    pub shape: ShapeKey,
}

impl AnimationItem {
    fn new(
        preset: PresetKind,
        name: &'static str,
        preview: u32,
        stage: u32,
        shape: ShapeKey,
    ) -> Self {
        Self {
            preset,
            name,
            preview_color: Color::from_hex(preview),
            stage_background: Color::from_hex(stage),
            shape,
        }
    }

    pub fn key(&self) -> &'static str {
        self.preset.key()
    }
}

static CATALOG: OnceLock<[AnimationItem; 5]> = OnceLock::new();

/// The five catalog entries, in list order
pub fn catalog() -> &'static [AnimationItem] {
    CATALOG.get_or_init(|| {
        [
            AnimationItem::new(PresetKind::Pulse, "Pulse", 0x38BDF8, 0x0EA5E9, ShapeKey::Circle),
            AnimationItem::new(PresetKind::Rotate, "Rotate", 0xA78BFA, 0x7C3AED, ShapeKey::Square),
            AnimationItem::new(PresetKind::Slide, "Slide", 0x34D399, 0x10B981, ShapeKey::Square),
            AnimationItem::new(PresetKind::Fade, "Fade", 0xFBBF24, 0xF59E0B, ShapeKey::Circle),
            AnimationItem::new(PresetKind::Bounce, "Bounce", 0xF472B6, 0xDB2777, ShapeKey::Square),
        ]
    })
}

/// Position of a preset in the catalog
pub fn index_of(preset: PresetKind) -> Option<usize> {
    catalog().iter().position(|item| item.preset == preset)
}

/// Look up a catalog entry by key, case-insensitively
pub fn find(key: &str) -> Option<&'static AnimationItem> {
    catalog()
        .iter()
        .find(|item| item.key().eq_ignore_ascii_case(key.trim()))
}
