//! Looping animation presets
//!
//! The fixed table of playground presets: which visual property each drives,
//! the timeline of one cycle, and the base cycle length at 1x speed.

use crate::easing::Easing;
use crate::timeline::Timeline;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Lowest effective speed multiplier; keeps cycle lengths bounded
pub const MIN_SPEED_MULTIPLIER: f64 = 0.1;

/// Cycle length for a base duration at a speed multiplier.
///
/// `base_ms / max(speed, 0.1)`, truncated to whole milliseconds.
pub fn cycle_duration_ms(base_ms: u32, speed: f64) -> u32 {
    let speed = if speed.is_nan() {
        MIN_SPEED_MULTIPLIER
    } else {
        speed.max(MIN_SPEED_MULTIPLIER)
    };
    (base_ms as f64 / speed) as u32
}

/// Visual property a preset animates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimatedProperty {
    Scale,
    /// Degrees
    Rotation,
    TranslationX,
    TranslationY,
    Opacity,
}

/// The five playground presets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PresetKind {
    Pulse,
    Rotate,
    Slide,
    Fade,
    Bounce,
}

impl PresetKind {
    /// Stable key, also used as the animation name on the scheduler
    pub fn key(self) -> &'static str {
        match self {
            Self::Pulse => "pulse",
            Self::Rotate => "rotate",
            Self::Slide => "slide",
            Self::Fade => "fade",
            Self::Bounce => "bounce",
        }
    }

    /// All presets in catalog order
    pub fn all() -> &'static [PresetKind] {
        const PRESETS: [PresetKind; 5] = [
            PresetKind::Pulse,
            PresetKind::Rotate,
            PresetKind::Slide,
            PresetKind::Fade,
            PresetKind::Bounce,
        ];
        &PRESETS
    }

    /// Cycle length at 1x speed
    pub fn base_duration_ms(self) -> u32 {
        match self {
            Self::Pulse => 1200,
            Self::Rotate => 3000,
            Self::Slide => 2000,
            Self::Fade => 1500,
            Self::Bounce => 1500,
        }
    }

    pub fn cycle_duration_ms(self, speed: f64) -> u32 {
        cycle_duration_ms(self.base_duration_ms(), speed)
    }

    pub fn property(self) -> AnimatedProperty {
        match self {
            Self::Pulse => AnimatedProperty::Scale,
            Self::Rotate => AnimatedProperty::Rotation,
            Self::Slide => AnimatedProperty::TranslationX,
            Self::Fade => AnimatedProperty::Opacity,
            Self::Bounce => AnimatedProperty::TranslationY,
        }
    }

    /// One cycle of the preset
    pub fn timeline(self) -> Timeline {
        match self {
            Self::Pulse => Timeline::new()
                .segment(0.0, 0.5, 1.0, 1.15, Easing::Linear)
                .segment(0.5, 1.0, 1.15, 1.0, Easing::Linear),
            Self::Rotate => Timeline::tween(0.0, 360.0, Easing::Linear),
            Self::Slide => Timeline::new()
                .segment(0.00, 0.25, 0.0, 70.0, Easing::EaseInOutSine)
                .segment(0.25, 0.50, 70.0, 0.0, Easing::EaseInOutSine)
                .segment(0.50, 0.75, 0.0, -70.0, Easing::EaseInOutSine)
                .segment(0.75, 1.00, -70.0, 0.0, Easing::EaseInOutSine),
            Self::Fade => Timeline::new()
                .segment(0.0, 0.5, 1.0, 0.25, Easing::EaseInCubic)
                .segment(0.5, 1.0, 0.25, 1.0, Easing::EaseOutCubic),
            Self::Bounce => Timeline::new()
                .segment(0.0, 0.5, 0.0, -50.0, Easing::EaseOutCubic)
                .segment(0.5, 1.0, -50.0, 0.0, Easing::EaseOutBounce),
        }
    }
}

impl Display for PresetKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PresetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PresetKind::all()
            .iter()
            .copied()
            .find(|p| p.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown animation preset '{s}'"))
    }
}
