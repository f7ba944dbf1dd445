//! Animation orchestrator
//!
//! Drives the looping preset animations on the actor and the one-shot color
//! transition on the stage. Every start is preceded by a full stop: the
//! previous cycle's token is cancelled, every named animation is aborted and
//! the actor's transform is reset before anything new is committed.
//!
//! # Cycle states
//!
//! ```text
//! Idle --Start--> Starting --Started--> Running
//!                    |                     |
//!                    +------Cancel---------+--> Cancelled --Settle--> Idle
//! ```

use crate::catalog::AnimationItem;
use crate::model_view::ModelView;
use crate::visual::{Stage, VisualNode};
use motion_animation::{
    Animation, AnimationError, AnimationScheduler, CancellationToken, CancellationTokenSource,
    CommitOptions, Easing, PresetKind, Timeline,
};
use motion_core::{Color, StateMachine};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;

/// Name of the stage background transition
pub const STAGE_COLOR_ANIMATION: &str = "color";

/// Value callback interval for preset loops, in milliseconds
pub const PRESET_RATE_MS: u32 = 24;

/// Stage color transition timing
pub const STAGE_COLOR_RATE_MS: u32 = 16;
pub const STAGE_COLOR_LENGTH_MS: u32 = 350;

/// Run cycle states
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CyclePhase {
    Idle,
    Starting,
    Running,
    Cancelled,
}

/// Run cycle events
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleEvent {
    Start,
    Started,
    Cancel,
    Settle,
}

/// Phase changes kept for diagnostics, about four restarts
const CYCLE_HISTORY_LIMIT: usize = 16;

fn cycle_machine() -> StateMachine<CyclePhase, CycleEvent> {
    StateMachine::builder(CyclePhase::Idle)
        .on(CyclePhase::Idle, CycleEvent::Start, CyclePhase::Starting)
        .on(CyclePhase::Starting, CycleEvent::Started, CyclePhase::Running)
        .on(CyclePhase::Starting, CycleEvent::Cancel, CyclePhase::Cancelled)
        .on(CyclePhase::Running, CycleEvent::Cancel, CyclePhase::Cancelled)
        .on(CyclePhase::Cancelled, CycleEvent::Settle, CyclePhase::Idle)
        .history_limit(CYCLE_HISTORY_LIMIT)
        .build()
}

/// Parameters of one run cycle
#[derive(Clone, Copy, Debug)]
pub struct RunRequest {
    pub item: &'static AnimationItem,
    pub speed: f64,
    pub combine_rotate_pulse: bool,
    pub use_3d: bool,
}

impl RunRequest {
    /// Presets to run, selected one first
    pub fn presets(&self) -> SmallVec<[PresetKind; 3]> {
        let selected = self.item.preset;
        let mut presets: SmallVec<[PresetKind; 3]> = SmallVec::new();
        presets.push(selected);
        if self.combine_rotate_pulse {
            if selected != PresetKind::Rotate {
                presets.push(PresetKind::Rotate);
            }
            if selected != PresetKind::Pulse {
                presets.push(PresetKind::Pulse);
            }
        }
        presets
    }
}

/// Stage color at transition progress `t`: plain RGBA interpolation
pub fn stage_color_at(from: Color, to: Color, t: f32) -> Color {
    from.lerp(to, t)
}

pub struct AnimationOrchestrator {
    scheduler: Rc<RefCell<AnimationScheduler>>,
    actor: Option<VisualNode>,
    stage: Option<Stage>,
    model_view: Option<Rc<ModelView>>,
    cancel: Option<CancellationTokenSource>,
    cycle: StateMachine<CyclePhase, CycleEvent>,
}

impl AnimationOrchestrator {
    pub fn new(scheduler: Rc<RefCell<AnimationScheduler>>) -> Self {
        Self {
            scheduler,
            actor: None,
            stage: None,
            model_view: None,
            cancel: None,
            cycle: cycle_machine(),
        }
    }

    pub fn scheduler(&self) -> &Rc<RefCell<AnimationScheduler>> {
        &self.scheduler
    }

    pub fn set_actor(&mut self, actor: Option<VisualNode>) {
        self.actor = actor;
    }

    pub fn set_stage(&mut self, stage: Option<Stage>) {
        self.stage = stage;
    }

    pub fn set_model_view(&mut self, model_view: Option<Rc<ModelView>>) {
        self.model_view = model_view;
    }

    pub fn actor(&self) -> Option<&VisualNode> {
        self.actor.as_ref()
    }

    pub fn stage(&self) -> Option<&Stage> {
        self.stage.as_ref()
    }

    pub fn model_view(&self) -> Option<&Rc<ModelView>> {
        self.model_view.as_ref()
    }

    pub fn phase(&self) -> CyclePhase {
        self.cycle.current_state()
    }

    /// Transitions taken so far, oldest first
    pub fn cycle_history(&self) -> &[(CyclePhase, CycleEvent, CyclePhase)] {
        self.cycle.history()
    }

    /// Whether the current cycle's token has been cancelled
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|c| c.is_cancelled())
    }

    /// Names running on the actor, sorted
    pub fn running_animations(&self) -> SmallVec<[String; 4]> {
        match &self.actor {
            Some(actor) => self.scheduler.borrow().running_names(actor.owner()),
            None => SmallVec::new(),
        }
    }

    /// Cancel the current cycle and return the actor to rest
    pub fn stop(&mut self, use_3d: bool) {
        if let Some(cancel) = &self.cancel {
            cancel.cancel();
        }

        {
            let mut scheduler = self.scheduler.borrow_mut();
            if let Some(actor) = &self.actor {
                for preset in PresetKind::all() {
                    scheduler.abort(actor.owner(), preset.key());
                }
            }
            if let Some(stage) = &self.stage {
                scheduler.abort(stage.owner(), STAGE_COLOR_ANIMATION);
            }
        }

        if let Some(actor) = &self.actor {
            actor.reset();
        }
        if use_3d {
            if let Some(model_view) = &self.model_view {
                model_view.reset_yaw();
            }
        }

        if self.cycle.send(CycleEvent::Cancel) == CyclePhase::Cancelled {
            tracing::debug!("run cycle cancelled");
        }
        self.cycle.send(CycleEvent::Settle);
    }

    /// Stop whatever runs, then start a new cycle for `request`.
    ///
    /// Returns false without doing anything when no actor is attached.
    pub fn start(&mut self, request: RunRequest) -> bool {
        if self.actor.is_none() {
            return false;
        }

        self.stop(request.use_3d);
        self.cycle.send(CycleEvent::Start);

        // Nothing can cancel this token before the presets are committed
        self.cancel = Some(CancellationTokenSource::new());

        self.animate_stage_background(request.item.stage_background, true);

        for preset in request.presets() {
            if let Err(err) = self.commit_preset(preset, request.speed, request.use_3d) {
                tracing::warn!(preset = %preset, error = %err, "preset not started");
            }
        }

        self.cycle.send(CycleEvent::Started);
        tracing::info!(
            preset = %request.item.preset,
            speed = request.speed,
            combine = request.combine_rotate_pulse,
            use_3d = request.use_3d,
            "run cycle started"
        );
        true
    }

    /// Commit one looping preset on the actor unless `token` is cancelled.
    ///
    /// In 3D mode, rotate drives the model view's yaw instead of the actor.
    pub fn run_preset(
        &self,
        preset: PresetKind,
        speed: f64,
        use_3d: bool,
        token: &CancellationToken,
    ) -> Result<(), AnimationError> {
        token.check()?;
        self.commit_preset(preset, speed, use_3d)
    }

    fn commit_preset(
        &self,
        preset: PresetKind,
        speed: f64,
        use_3d: bool,
    ) -> Result<(), AnimationError> {
        let Some(actor) = &self.actor else {
            return Ok(());
        };

        let options = CommitOptions {
            rate_ms: PRESET_RATE_MS,
            length_ms: preset.cycle_duration_ms(speed).max(1),
            easing: Easing::Linear,
            repeat: true,
        };

        let animation = match (&self.model_view, preset) {
            (Some(model_view), PresetKind::Rotate) if use_3d => {
                let model_view = model_view.clone();
                Animation::new(preset.timeline(), move |degrees| {
                    model_view.set_yaw(f64::from(degrees))
                })
            }
            _ => {
                let target = actor.clone();
                let property = preset.property();
                Animation::new(preset.timeline(), move |value| {
                    target.set_property(property, value)
                })
            }
        };

        self.scheduler
            .borrow_mut()
            .commit(actor.owner(), preset.key(), animation, options)?;
        Ok(())
    }

    /// Move the stage background to `to`, either at once or as a one-shot
    /// transition from its current color.
    pub fn animate_stage_background(&self, to: Color, animated: bool) {
        let Some(stage) = &self.stage else {
            return;
        };
        if !animated {
            stage.set_background(to);
            return;
        }

        let from = stage.background();
        let target = stage.clone();
        let animation = Animation::new(Timeline::tween(0.0, 1.0, Easing::Linear), move |t| {
            if !target.is_attached() {
                return;
            }
            target.set_background(stage_color_at(from, to, t));
        })
        .on_finished(|_, aborted| {
            if !aborted {
                tracing::trace!("stage color transition completed");
            }
        });

        let options = CommitOptions {
            rate_ms: STAGE_COLOR_RATE_MS,
            length_ms: STAGE_COLOR_LENGTH_MS,
            easing: Easing::EaseInOutCubic,
            repeat: false,
        };

        if let Err(err) =
            self.scheduler
                .borrow_mut()
                .commit(stage.owner(), STAGE_COLOR_ANIMATION, animation, options)
        {
            tracing::warn!(error = %err, "stage color transition not started");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::dispatch::MainThreadDispatcher;
    use crate::model_view::{ModelSource, RecordingScriptHost};

    struct Fixture {
        scheduler: Rc<RefCell<AnimationScheduler>>,
        orchestrator: AnimationOrchestrator,
        actor: VisualNode,
        stage: Stage,
    }

    fn fixture() -> Fixture {
        let scheduler = Rc::new(RefCell::new(AnimationScheduler::new()));
        let actor = VisualNode::new(scheduler.borrow_mut().register_owner("actor"));
        let stage = Stage::new(scheduler.borrow_mut().register_owner("stage"));
        let mut orchestrator = AnimationOrchestrator::new(scheduler.clone());
        orchestrator.set_actor(Some(actor.clone()));
        orchestrator.set_stage(Some(stage.clone()));
        Fixture {
            scheduler,
            orchestrator,
            actor,
            stage,
        }
    }

    fn request(key: &str) -> RunRequest {
        RunRequest {
            item: catalog::find(key).unwrap(),
            speed: 1.0,
            combine_rotate_pulse: false,
            use_3d: false,
        }
    }

    #[test]
    fn test_start_without_actor_is_noop() {
        let scheduler = Rc::new(RefCell::new(AnimationScheduler::new()));
        let mut orchestrator = AnimationOrchestrator::new(scheduler.clone());
        assert!(!orchestrator.start(request("pulse")));
        assert_eq!(orchestrator.phase(), CyclePhase::Idle);
        assert!(!scheduler.borrow().has_active_animations());
    }

    #[test]
    fn test_start_runs_preset_and_color() {
        let mut f = fixture();
        assert!(f.orchestrator.start(request("slide")));

        assert_eq!(f.orchestrator.phase(), CyclePhase::Running);
        assert_eq!(f.orchestrator.running_animations().as_slice(), ["slide"]);
        assert!(f
            .scheduler
            .borrow()
            .is_running(f.stage.owner(), STAGE_COLOR_ANIMATION));
    }

    #[test]
    fn test_combine_extras() {
        let mut f = fixture();
        let cases = [
            ("fade", vec!["fade", "pulse", "rotate"]),
            ("rotate", vec!["pulse", "rotate"]),
            ("pulse", vec!["pulse", "rotate"]),
        ];
        for (key, expected) in cases {
            let mut req = request(key);
            req.combine_rotate_pulse = true;
            f.orchestrator.start(req);
            assert_eq!(f.orchestrator.running_animations().to_vec(), expected, "{key}");
        }
    }

    #[test]
    fn test_stop_resets_actor_and_cancels_token() {
        let mut f = fixture();
        f.orchestrator.start(request("bounce"));
        f.scheduler.borrow_mut().tick(200.0);
        assert!(!f.actor.transform().is_identity());

        f.orchestrator.stop(false);
        assert!(f.actor.transform().is_identity());
        assert!(f.orchestrator.is_cancelled());
        assert!(!f.scheduler.borrow().has_active_animations());
        assert_eq!(f.orchestrator.phase(), CyclePhase::Idle);
    }

    #[test]
    fn test_cycle_history_goes_through_cancelled() {
        let mut f = fixture();
        f.orchestrator.start(request("pulse"));
        f.orchestrator.start(request("fade"));

        let phases: Vec<CyclePhase> = f
            .orchestrator
            .cycle_history()
            .iter()
            .map(|(_, _, to)| *to)
            .collect();
        assert_eq!(
            phases,
            vec![
                CyclePhase::Starting,
                CyclePhase::Running,
                CyclePhase::Cancelled,
                CyclePhase::Idle,
                CyclePhase::Starting,
                CyclePhase::Running,
            ]
        );
    }

    #[test]
    fn test_start_commits_under_a_live_token() {
        let mut f = fixture();
        assert!(f.orchestrator.start(request("slide")));
        assert!(!f.orchestrator.is_cancelled());
        assert_eq!(f.orchestrator.phase(), CyclePhase::Running);
        assert_eq!(f.orchestrator.running_animations().as_slice(), ["slide"]);

        f.orchestrator.start(request("fade"));
        assert!(!f.orchestrator.is_cancelled());
        assert_eq!(f.orchestrator.running_animations().as_slice(), ["fade"]);
    }

    #[test]
    fn test_cycle_history_is_bounded() {
        let mut f = fixture();
        for _ in 0..100 {
            f.orchestrator.start(request("pulse"));
            f.orchestrator.stop(false);
        }
        let history = f.orchestrator.cycle_history();
        assert_eq!(history.len(), CYCLE_HISTORY_LIMIT);
        assert_eq!(history.last().map(|(_, _, to)| *to), Some(CyclePhase::Idle));
    }

    #[test]
    fn test_cancelled_token_blocks_commit() {
        let mut f = fixture();
        let source = CancellationTokenSource::new();
        source.cancel();

        let result = f
            .orchestrator
            .run_preset(PresetKind::Pulse, 1.0, false, &source.token());
        assert!(result.unwrap_err().is_cancelled());
        assert!(f.orchestrator.running_animations().is_empty());
    }

    #[test]
    fn test_stage_color_reaches_target() {
        let mut f = fixture();
        f.stage.set_background(Color::from_hex(0x0EA5E9));
        f.orchestrator
            .animate_stage_background(Color::from_hex(0x7C3AED), true);

        f.scheduler.borrow_mut().tick(16.0);
        let mid = f.stage.background();
        assert!(!mid.approx_eq(&Color::from_hex(0x7C3AED), 1e-3));

        f.scheduler.borrow_mut().tick(400.0);
        assert!(f
            .stage
            .background()
            .approx_eq(&Color::from_hex(0x7C3AED), 1e-5));
        assert!(!f.scheduler.borrow().has_active_animations());
    }

    #[test]
    fn test_detached_stage_ignores_ticks() {
        let mut f = fixture();
        f.orchestrator.animate_stage_background(Color::WHITE, true);
        f.stage.detach();
        f.scheduler.borrow_mut().tick(400.0);
        assert_eq!(f.stage.background(), Color::TRANSPARENT);
    }

    #[test]
    fn test_unanimated_background_is_immediate() {
        let mut f = fixture();
        f.orchestrator.animate_stage_background(Color::BLACK, false);
        assert_eq!(f.stage.background(), Color::BLACK);
        assert!(!f.scheduler.borrow().has_active_animations());
    }

    #[test]
    fn test_rotate_in_3d_drives_yaw() {
        let mut f = fixture();
        let host = Rc::new(RefCell::new(RecordingScriptHost::new()));
        let dispatcher = MainThreadDispatcher::new();
        let model_view = Rc::new(ModelView::new(host.clone(), dispatcher.clone()));
        model_view.load(&ModelSource::bytes(b"glTF\x02\0\0\0".to_vec()));
        f.orchestrator.set_model_view(Some(model_view));

        let mut req = request("rotate");
        req.use_3d = true;
        f.orchestrator.start(req);
        dispatcher.drain();
        assert_eq!(host.borrow().last_script(), Some("resetYaw();"));

        f.scheduler.borrow_mut().tick(750.0);
        dispatcher.drain();

        assert_eq!(host.borrow().last_script(), Some("setYaw(90);"));
        assert_eq!(f.actor.transform().rotation, 0.0);
        assert_eq!(f.orchestrator.running_animations().as_slice(), ["rotate"]);
    }

    #[test]
    fn test_extreme_speed_still_commits() {
        let mut f = fixture();
        let mut req = request("pulse");
        req.speed = 1e9;
        f.orchestrator.start(req);
        assert_eq!(f.orchestrator.running_animations().as_slice(), ["pulse"]);
    }
}
