//! Playground composition root
//!
//! Wires the scheduler, the visual elements, the 3D view and the view-model
//! together the way the main screen does, and advances them one frame at a
//! time.

use crate::config::PlaygroundConfig;
use crate::dispatch::MainThreadDispatcher;
use crate::error::Result;
use crate::model_view::{ModelSource, ModelView, ScriptHost};
use crate::view_model::MainViewModel;
use crate::visual::{Stage, VisualNode};
use motion_animation::AnimationScheduler;
use std::cell::RefCell;
use std::rc::Rc;

pub struct PlaygroundApp {
    scheduler: Rc<RefCell<AnimationScheduler>>,
    dispatcher: MainThreadDispatcher,
    actor: VisualNode,
    stage: Stage,
    model_view: Rc<ModelView>,
    view_model: MainViewModel,
}

impl PlaygroundApp {
    /// Build the screen from `config`, loading the 3D model through `host`.
    ///
    /// The configured animation is selected once the actor is attached, which
    /// starts the first run cycle. Fails before touching the model when
    /// `config` does not validate.
    pub fn new(config: &PlaygroundConfig, host: Rc<RefCell<dyn ScriptHost>>) -> Result<Self> {
        config.validate()?;

        let scheduler = Rc::new(RefCell::new(AnimationScheduler::new()));
        let dispatcher = MainThreadDispatcher::new();

        let (actor, stage) = {
            let mut scheduler = scheduler.borrow_mut();
            (
                VisualNode::new(scheduler.register_owner("actor")),
                Stage::new(scheduler.register_owner("stage")),
            )
        };

        let model_view = Rc::new(ModelView::new(host, dispatcher.clone()));
        model_view.load(&ModelSource::file(&config.viewer.model_path));

        let settings = &config.playground;
        let mut view_model = MainViewModel::new(scheduler.clone());
        view_model.set_theme(settings.theme);
        view_model.set_speed_multiplier(settings.speed);
        view_model.set_combine_rotate_pulse(settings.combine_rotate_pulse);
        view_model.set_use_3d(settings.use_3d);
        view_model.set_model_view(Some(model_view.clone()));
        view_model.set_actor(Some(actor.clone()));
        view_model.set_stage(Some(stage.clone()));
        view_model.select_animation(&settings.animation)?;

        Ok(Self {
            scheduler,
            dispatcher,
            actor,
            stage,
            model_view,
            view_model,
        })
    }

    /// Advance animations by `dt_ms` and run queued main-thread work
    pub fn frame(&mut self, dt_ms: f32) {
        self.scheduler.borrow_mut().tick(dt_ms);
        self.dispatcher.drain();
    }

    pub fn view_model(&self) -> &MainViewModel {
        &self.view_model
    }

    pub fn view_model_mut(&mut self) -> &mut MainViewModel {
        &mut self.view_model
    }

    pub fn actor(&self) -> &VisualNode {
        &self.actor
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn model_view(&self) -> &Rc<ModelView> {
        &self.model_view
    }

    pub fn scheduler(&self) -> &Rc<RefCell<AnimationScheduler>> {
        &self.scheduler
    }

    pub fn dispatcher(&self) -> &MainThreadDispatcher {
        &self.dispatcher
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::error::PlaygroundError;
    use crate::model_view::RecordingScriptHost;
    use crate::orchestrator::CyclePhase;
    use motion_theme::ThemeKind;

    #[test]
    fn test_new_starts_configured_animation() {
        let mut config = PlaygroundConfig::default();
        config.playground.animation = "slide".to_string();
        config.playground.theme = ThemeKind::Dark;
        config.viewer.model_path = "/nonexistent/rubiks_cube.glb".into();

        let host = Rc::new(RefCell::new(RecordingScriptHost::new()));
        let app = PlaygroundApp::new(&config, host).unwrap();

        let vm = app.view_model();
        assert_eq!(vm.theme(), ThemeKind::Dark);
        assert_eq!(vm.running_animations().as_slice(), ["slide"]);
        assert_eq!(vm.phase(), CyclePhase::Running);
        assert!(app.model_view().is_error_visible());
    }

    #[test]
    fn test_frames_advance_actor() {
        let host = Rc::new(RefCell::new(RecordingScriptHost::new()));
        let mut app = PlaygroundApp::new(&PlaygroundConfig::default(), host).unwrap();

        for _ in 0..10 {
            app.frame(16.0);
        }
        assert!(app.actor().transform().scale > 1.0);
        assert_eq!(app.view_model().selected_animation().map(|i| i.key()), Some("pulse"));
    }

    #[test]
    fn test_invalid_config_is_rejected_before_loading() {
        let mut config = PlaygroundConfig::default();
        config.playground.speed = f64::NAN;

        let host = Rc::new(RefCell::new(RecordingScriptHost::new()));
        let err = PlaygroundApp::new(&config, host.clone()).err().unwrap();
        assert!(matches!(
            err,
            PlaygroundError::Config(ConfigError::InvalidSpeed(_))
        ));
        assert!(host.borrow().html().is_none());
    }
}
