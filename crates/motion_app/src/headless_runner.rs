//! Scenario runner that drives the playground on the headless frame clock.

use crate::app::PlaygroundApp;
use crate::headless_assert::{
    evaluate_assert_running, evaluate_assert_stage_color, AssertionResult, PlaygroundSnapshot,
};
use crate::headless_report::HeadlessReport;
use crate::headless_runtime::{HeadlessRunConfig, HeadlessRuntime};
use crate::headless_scenario::{HeadlessScenario, ScenarioStep};
use anyhow::Result;

/// Final outcome of a scenario run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Passed { report: HeadlessReport },
    Failed { report: HeadlessReport },
}

impl RunOutcome {
    pub fn report(&self) -> &HeadlessReport {
        match self {
            RunOutcome::Passed { report } => report,
            RunOutcome::Failed { report } => report,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

#[derive(Debug, Default)]
struct Clock {
    elapsed_frames: u64,
    elapsed_ms: u64,
}

/// Execute scenario JSON against `app`.
pub fn run_scenario_json(
    app: &mut PlaygroundApp,
    input: &str,
    runtime_cfg: HeadlessRunConfig,
) -> Result<RunOutcome> {
    let scenario = HeadlessScenario::from_json(input)?;
    run_scenario(app, &scenario, runtime_cfg)
}

/// Run `runtime_cfg.max_frames` frames with no scripted input.
pub fn run_frames(app: &mut PlaygroundApp, runtime_cfg: HeadlessRunConfig) -> Result<RunOutcome> {
    let mut clock = Clock::default();
    let tick_ms = runtime_cfg.tick_ms;
    advance(app, runtime_cfg, runtime_cfg.max_frames, &mut clock, || tick_ms)?;
    Ok(passed(app, &clock))
}

/// Execute a pre-loaded scenario against `app`.
///
/// The run stops at the first failing step; everything before it has
/// already been applied to `app`.
pub fn run_scenario(
    app: &mut PlaygroundApp,
    scenario: &HeadlessScenario,
    runtime_cfg: HeadlessRunConfig,
) -> Result<RunOutcome> {
    let mut clock = Clock::default();

    for (step_index, step) in scenario.steps.iter().enumerate() {
        tracing::debug!(step_index, step = step.name(), "scenario step");

        let result = match step {
            ScenarioStep::Select { key } => match app.view_model_mut().select_animation(key) {
                Ok(_) => AssertionResult::Passed,
                Err(err) => AssertionResult::Failed {
                    code: "unknown_animation".to_string(),
                    message: err.to_string(),
                },
            },
            ScenarioStep::Theme { name } => {
                app.view_model_mut().set_theme_name(name);
                AssertionResult::Passed
            }
            ScenarioStep::Speed { value } => {
                if value.is_finite() && *value > 0.0 {
                    app.view_model_mut().set_speed_multiplier(*value);
                    AssertionResult::Passed
                } else {
                    AssertionResult::Failed {
                        code: "invalid_speed".to_string(),
                        message: format!("speed must be a positive number, got {value}"),
                    }
                }
            }
            ScenarioStep::Combine { enabled } => {
                app.view_model_mut().set_combine_rotate_pulse(*enabled);
                AssertionResult::Passed
            }
            ScenarioStep::Use3d { enabled } => {
                app.view_model_mut().set_use_3d(*enabled);
                AssertionResult::Passed
            }
            ScenarioStep::Start => {
                app.view_model_mut().start();
                AssertionResult::Passed
            }
            ScenarioStep::Stop => {
                app.view_model_mut().stop();
                AssertionResult::Passed
            }
            ScenarioStep::Tick { frames } => {
                let tick_ms = runtime_cfg.tick_ms;
                advance(app, runtime_cfg, *frames, &mut clock, || tick_ms)?;
                AssertionResult::Passed
            }
            ScenarioStep::Wait { ms } => {
                let frames = wait_frames(*ms, runtime_cfg.tick_ms);
                let mut remaining_ms = *ms;
                advance(app, runtime_cfg, frames, &mut clock, || {
                    let step_ms = remaining_ms.min(runtime_cfg.tick_ms);
                    remaining_ms = remaining_ms.saturating_sub(step_ms);
                    step_ms
                })?;
                AssertionResult::Passed
            }
            ScenarioStep::AssertRunning { count } => {
                evaluate_assert_running(*count, &PlaygroundSnapshot::capture(app))
            }
            ScenarioStep::AssertStageColor { hex } => {
                evaluate_assert_stage_color(hex, &PlaygroundSnapshot::capture(app))
            }
        };

        if let AssertionResult::Failed { code, message } = result {
            tracing::info!(step_index, step = step.name(), code = %code, "scenario step failed");
            let report = HeadlessReport::failed(
                step.name(),
                step_index,
                message,
                clock.elapsed_frames,
                clock.elapsed_ms,
                running(app),
            );
            return Ok(RunOutcome::Failed { report });
        }
    }

    Ok(passed(app, &clock))
}

fn running(app: &PlaygroundApp) -> Vec<String> {
    app.view_model().running_animations().into_iter().collect()
}

fn passed(app: &PlaygroundApp, clock: &Clock) -> RunOutcome {
    RunOutcome::Passed {
        report: HeadlessReport::passed(clock.elapsed_frames, clock.elapsed_ms, running(app)),
    }
}

fn advance<A>(
    app: &mut PlaygroundApp,
    runtime_cfg: HeadlessRunConfig,
    frames: u32,
    clock: &mut Clock,
    mut advance_ms: A,
) -> Result<()>
where
    A: FnMut() -> u64,
{
    if frames == 0 {
        return Ok(());
    }

    let mut cfg = runtime_cfg;
    cfg.max_frames = frames;
    HeadlessRuntime::run(cfg, |_| {
        let dt = advance_ms();
        app.frame(dt as f32);
        clock.elapsed_frames = clock.elapsed_frames.saturating_add(1);
        clock.elapsed_ms = clock.elapsed_ms.saturating_add(dt);
    })
}

fn wait_frames(wait_ms: u64, tick_ms: u64) -> u32 {
    if wait_ms == 0 {
        return 0;
    }
    let tick = tick_ms.max(1);
    let frames = wait_ms.saturating_add(tick.saturating_sub(1)) / tick;
    frames.min(u32::MAX as u64) as u32
}
