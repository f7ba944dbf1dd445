//! Assertion helpers for headless playground runs.

use crate::app::PlaygroundApp;
use motion_core::Color;

/// Largest per-channel difference accepted when comparing stage colors
pub const COLOR_TOLERANCE: f32 = 0.5 / 255.0;

/// Observable playground state used for assertions.
#[derive(Debug, Clone, Default)]
pub struct PlaygroundSnapshot {
    /// Animations running on the actor, sorted
    pub running: Vec<String>,
    pub stage_color: Color,
}

impl PlaygroundSnapshot {
    pub fn capture(app: &PlaygroundApp) -> Self {
        Self {
            running: app.view_model().running_animations().into_iter().collect(),
            stage_color: app.stage().background(),
        }
    }
}

/// Assertion result with structured failure details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionResult {
    Passed,
    Failed { code: String, message: String },
}

pub fn evaluate_assert_running(expected: usize, snapshot: &PlaygroundSnapshot) -> AssertionResult {
    if snapshot.running.len() == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::Failed {
            code: "running_count_mismatch".to_string(),
            message: format!(
                "expected {expected} running animations, found {} ({})",
                snapshot.running.len(),
                snapshot.running.join(", ")
            ),
        }
    }
}

pub fn evaluate_assert_stage_color(hex: &str, snapshot: &PlaygroundSnapshot) -> AssertionResult {
    let expected = match Color::parse_hex(hex) {
        Ok(color) => color,
        Err(err) => {
            return AssertionResult::Failed {
                code: "invalid_color".to_string(),
                message: err.to_string(),
            }
        }
    };
    if snapshot.stage_color.approx_eq(&expected, COLOR_TOLERANCE) {
        AssertionResult::Passed
    } else {
        AssertionResult::Failed {
            code: "color_mismatch".to_string(),
            message: format!(
                "expected stage color {expected}, got {}",
                snapshot.stage_color
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(running: &[&str], stage: u32) -> PlaygroundSnapshot {
        PlaygroundSnapshot {
            running: running.iter().map(|s| s.to_string()).collect(),
            stage_color: Color::from_hex(stage),
        }
    }

    #[test]
    fn test_running_count() {
        let snap = snapshot(&["pulse", "rotate"], 0x0EA5E9);
        assert_eq!(evaluate_assert_running(2, &snap), AssertionResult::Passed);

        let AssertionResult::Failed { code, message } = evaluate_assert_running(3, &snap) else {
            panic!("expected failure");
        };
        assert_eq!(code, "running_count_mismatch");
        assert!(message.contains("pulse, rotate"));
    }

    #[test]
    fn test_stage_color() {
        let snap = snapshot(&[], 0x7C3AED);
        assert_eq!(
            evaluate_assert_stage_color("#7c3aed", &snap),
            AssertionResult::Passed
        );
        assert!(matches!(
            evaluate_assert_stage_color("#10B981", &snap),
            AssertionResult::Failed { ref code, .. } if code == "color_mismatch"
        ));
        assert!(matches!(
            evaluate_assert_stage_color("7C3AED", &snap),
            AssertionResult::Failed { ref code, .. } if code == "invalid_color"
        ));
    }
}
