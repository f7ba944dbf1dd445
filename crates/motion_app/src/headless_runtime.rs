//! Deterministic frame clock for running the playground without a window.

use anyhow::{bail, Result};

/// Configuration for deterministic headless frame execution.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessRunConfig {
    /// Number of frames to execute.
    pub max_frames: u32,
    /// Logical milliseconds between frames.
    pub tick_ms: u64,
}

impl Default for HeadlessRunConfig {
    fn default() -> Self {
        Self {
            max_frames: 1,
            tick_ms: 16,
        }
    }
}

/// Frame context passed to headless frame callbacks.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessContext {
    pub frame_index: u32,
    /// Time at the start of this frame, relative to the start of the run.
    pub elapsed_ms: u64,
    pub tick_ms: u64,
}

pub struct HeadlessRuntime;

impl HeadlessRuntime {
    /// Run a fixed frame budget.
    pub fn run<F>(cfg: HeadlessRunConfig, mut on_frame: F) -> Result<()>
    where
        F: FnMut(&HeadlessContext),
    {
        if cfg.max_frames == 0 {
            bail!("headless max_frames must be > 0");
        }
        if cfg.tick_ms == 0 {
            bail!("headless tick_ms must be > 0");
        }

        for frame in 0..cfg.max_frames {
            let elapsed_ms = cfg.tick_ms.saturating_mul(frame as u64);
            on_frame(&HeadlessContext {
                frame_index: frame,
                elapsed_ms,
                tick_ms: cfg.tick_ms,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_exact_frame_budget() {
        let mut seen = Vec::new();
        HeadlessRuntime::run(
            HeadlessRunConfig {
                max_frames: 3,
                tick_ms: 20,
            },
            |ctx| seen.push((ctx.frame_index, ctx.elapsed_ms)),
        )
        .unwrap();
        assert_eq!(seen, vec![(0, 0), (1, 20), (2, 40)]);
    }

    #[test]
    fn test_rejects_empty_budget_and_zero_tick() {
        let zero_frames = HeadlessRunConfig {
            max_frames: 0,
            ..Default::default()
        };
        assert!(HeadlessRuntime::run(zero_frames, |_| {}).is_err());

        let zero_tick = HeadlessRunConfig {
            tick_ms: 0,
            ..Default::default()
        };
        assert!(HeadlessRuntime::run(zero_tick, |_| {}).is_err());
    }
}
