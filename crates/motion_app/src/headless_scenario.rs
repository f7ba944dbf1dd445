//! Scenario definition for headless playground runs.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Sequence of steps driving the playground.
#[derive(Debug, Clone, Deserialize)]
pub struct HeadlessScenario {
    pub steps: Vec<ScenarioStep>,
}

impl HeadlessScenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).context("invalid scenario JSON")
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_json(&raw)
    }
}

/// User actions, clock steps and assertions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    Select { key: String },
    Theme { name: String },
    Speed { value: f64 },
    Combine { enabled: bool },
    #[serde(rename = "use_3d")]
    Use3d { enabled: bool },
    Start,
    Stop,
    Tick { frames: u32 },
    Wait { ms: u64 },
    AssertRunning { count: usize },
    AssertStageColor { hex: String },
}

impl ScenarioStep {
    /// Step name as written in scenario files
    pub fn name(&self) -> &'static str {
        match self {
            Self::Select { .. } => "select",
            Self::Theme { .. } => "theme",
            Self::Speed { .. } => "speed",
            Self::Combine { .. } => "combine",
            Self::Use3d { .. } => "use_3d",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Tick { .. } => "tick",
            Self::Wait { .. } => "wait",
            Self::AssertRunning { .. } => "assert_running",
            Self::AssertStageColor { .. } => "assert_stage_color",
        }
    }
}
