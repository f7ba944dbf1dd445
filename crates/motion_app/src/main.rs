//! Motion Playground - headless runner
//!
//! Builds the playground screen from a config file, drives it on a
//! deterministic frame clock (optionally scripted by a JSON scenario) and
//! prints or writes a JSON report.

use anyhow::{Context, Result};
use clap::Parser;
use motion_app::config::PlaygroundConfig;
use motion_app::headless_runner::{run_frames, run_scenario};
use motion_app::headless_runtime::HeadlessRunConfig;
use motion_app::headless_scenario::HeadlessScenario;
use motion_app::model_view::RecordingScriptHost;
use motion_app::PlaygroundApp;
use motion_theme::ThemeKind;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// Animation preset playground
#[derive(Parser, Debug)]
#[command(name = "motion-playground")]
#[command(about = "Run the Motion Playground headlessly and report what it did")]
#[command(version)]
struct Args {
    /// Config file or directory containing playground.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON scenario to execute
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Write the JSON report here (relative path) instead of stdout
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// Frames to run when no scenario is given
    #[arg(long)]
    frames: Option<u32>,

    /// Logical milliseconds per frame
    #[arg(long)]
    tick_ms: Option<u32>,

    /// Theme: Dark, Neon or Pastel
    #[arg(long)]
    theme: Option<String>,

    /// Initially selected animation key
    #[arg(short, long)]
    animation: Option<String>,

    /// Speed multiplier
    #[arg(long)]
    speed: Option<f64>,

    /// Also run rotate and pulse alongside the selected preset
    #[arg(long)]
    combine: bool,

    /// Show the 3D model instead of the 2D shape
    #[arg(long = "use-3d")]
    use_3d: bool,

    /// Binary glTF model for 3D mode
    #[arg(long)]
    model: Option<PathBuf>,
}

impl Args {
    fn apply(&self, config: &mut PlaygroundConfig) {
        let playground = &mut config.playground;
        if let Some(theme) = &self.theme {
            playground.theme = ThemeKind::from_name(theme);
        }
        if let Some(animation) = &self.animation {
            playground.animation = animation.clone();
        }
        if let Some(speed) = self.speed {
            playground.speed = speed;
        }
        playground.combine_rotate_pulse |= self.combine;
        playground.use_3d |= self.use_3d;

        if let Some(model) = &self.model {
            config.viewer.model_path = model.clone();
        }
        if let Some(frames) = self.frames {
            config.headless.frames = frames;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.headless.tick_ms = tick_ms;
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => PlaygroundConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => PlaygroundConfig::default(),
    };
    args.apply(&mut config);
    config.validate().context("invalid settings")?;

    let host = Rc::new(RefCell::new(RecordingScriptHost::new()));
    let mut app = PlaygroundApp::new(&config, host).context("failed to build playground")?;
    app.view_model_mut().appearing();

    let runtime_cfg = HeadlessRunConfig {
        max_frames: config.headless.frames,
        tick_ms: u64::from(config.headless.tick_ms),
    };

    let outcome = match &args.scenario {
        Some(path) => {
            let scenario = HeadlessScenario::from_path(path)?;
            tracing::info!(
                scenario = %path.display(),
                steps = scenario.steps.len(),
                "running scenario"
            );
            run_scenario(&mut app, &scenario, runtime_cfg)?
        }
        None => run_frames(&mut app, runtime_cfg)?,
    };
    app.view_model_mut().disappearing();

    let report = outcome.report();
    match &args.report {
        Some(path) => {
            report.write_to_path(path)?;
            tracing::info!(report = %path.display(), "report written");
        }
        None => report.write_to_writer(&mut std::io::stdout().lock())?,
    }

    if outcome.is_failed() {
        std::process::exit(1);
    }
    Ok(())
}
