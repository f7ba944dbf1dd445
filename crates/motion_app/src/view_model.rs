//! Main screen view-model
//!
//! Holds the user's choices (theme, animation, speed, combine and 3D
//! toggles) and the state derived from them. Setters compare before
//! assigning and notify subscribers with the property name only when the
//! value changed. Changing the animation or the 3D toggle restarts the run
//! cycle as soon as an actor is attached; speed and combine changes apply on
//! the next start.

use crate::catalog::{self, AnimationItem, ShapeKey};
use crate::error::{PlaygroundError, Result};
use crate::model_view::ModelView;
use crate::orchestrator::{AnimationOrchestrator, CyclePhase, RunRequest};
use crate::visual::{Stage, VisualNode};
use motion_animation::AnimationScheduler;
use motion_core::{Color, PropertyChanged, PropertyNotifier, SubscriptionId};
use motion_theme::ThemeKind;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;

/// Property names passed to subscribers
pub mod props {
    pub const THEME: &str = "theme";
    pub const PAGE_BACKGROUND: &str = "page_background";
    pub const FOREGROUND: &str = "foreground";
    pub const ACCENT: &str = "accent";
    pub const ACCENT2: &str = "accent2";
    pub const SELECTED_ANIMATION: &str = "selected_animation";
    pub const SPEED_MULTIPLIER: &str = "speed_multiplier";
    pub const COMBINE_ROTATE_PULSE: &str = "combine_rotate_pulse";
    pub const USE_3D: &str = "use_3d";
    pub const IS_2D_VISIBLE: &str = "is_2d_visible";
    pub const IS_3D_VISIBLE: &str = "is_3d_visible";
    pub const SHOW_CIRCLE: &str = "show_circle";
    pub const SHOW_SQUARE: &str = "show_square";
}

pub struct MainViewModel {
    notifier: PropertyNotifier,
    orchestrator: AnimationOrchestrator,

    theme: ThemeKind,
    page_background: Color,
    foreground: Color,
    accent: Color,
    accent2: Color,

    selected: Option<&'static AnimationItem>,
    speed_multiplier: f64,
    combine_rotate_pulse: bool,
    use_3d: bool,
    show_circle: bool,
    show_square: bool,
}

impl MainViewModel {
    pub fn new(scheduler: Rc<RefCell<AnimationScheduler>>) -> Self {
        let mut vm = Self {
            notifier: PropertyNotifier::new(),
            orchestrator: AnimationOrchestrator::new(scheduler),
            theme: ThemeKind::default(),
            page_background: Color::TRANSPARENT,
            foreground: Color::TRANSPARENT,
            accent: Color::TRANSPARENT,
            accent2: Color::TRANSPARENT,
            selected: None,
            speed_multiplier: 1.0,
            combine_rotate_pulse: false,
            use_3d: false,
            show_circle: true,
            show_square: false,
        };
        vm.apply_theme();
        vm
    }

    /// Subscribe to property changes
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&PropertyChanged) + 'static,
    {
        self.notifier.subscribe(handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    pub fn orchestrator(&self) -> &AnimationOrchestrator {
        &self.orchestrator
    }

    // Attached views

    pub fn set_actor(&mut self, actor: Option<VisualNode>) {
        self.orchestrator.set_actor(actor);
    }

    pub fn set_stage(&mut self, stage: Option<Stage>) {
        self.orchestrator.set_stage(stage);
    }

    pub fn set_model_view(&mut self, model_view: Option<Rc<ModelView>>) {
        self.orchestrator.set_model_view(model_view);
    }

    pub fn actor(&self) -> Option<&VisualNode> {
        self.orchestrator.actor()
    }

    pub fn stage(&self) -> Option<&Stage> {
        self.orchestrator.stage()
    }

    // Theme

    pub fn theme(&self) -> ThemeKind {
        self.theme
    }

    pub fn page_background(&self) -> Color {
        self.page_background
    }

    pub fn foreground(&self) -> Color {
        self.foreground
    }

    pub fn accent(&self) -> Color {
        self.accent
    }

    pub fn accent2(&self) -> Color {
        self.accent2
    }

    pub fn set_theme(&mut self, theme: ThemeKind) -> bool {
        if !self.notifier.set(&mut self.theme, theme, props::THEME) {
            return false;
        }
        tracing::info!(theme = %theme, "theme changed");
        self.apply_theme();
        true
    }

    /// Select a theme by name; unknown names resolve to Neon
    pub fn set_theme_name(&mut self, name: &str) -> bool {
        self.set_theme(ThemeKind::from_name(name))
    }

    fn apply_theme(&mut self) {
        let palette = self.theme.palette();
        let n = &self.notifier;
        n.set(&mut self.page_background, palette.page_background, props::PAGE_BACKGROUND);
        n.set(&mut self.foreground, palette.foreground, props::FOREGROUND);
        n.set(&mut self.accent, palette.accent, props::ACCENT);
        n.set(&mut self.accent2, palette.accent2, props::ACCENT2);
    }

    // Animation selection

    pub fn selected_animation(&self) -> Option<&'static AnimationItem> {
        self.selected
    }

    pub fn set_selected_animation(&mut self, item: Option<&'static AnimationItem>) -> bool {
        if !self
            .notifier
            .set(&mut self.selected, item, props::SELECTED_ANIMATION)
        {
            return false;
        }
        self.apply_stage_background(true);
        self.apply_shape();
        if self.actor().is_some() {
            self.start();
        }
        true
    }

    /// Select a catalog entry by key. Returns whether the selection changed.
    pub fn select_animation(&mut self, key: &str) -> Result<bool> {
        let item =
            catalog::find(key).ok_or_else(|| PlaygroundError::UnknownAnimation(key.to_string()))?;
        Ok(self.set_selected_animation(Some(item)))
    }

    fn apply_stage_background(&mut self, animated: bool) {
        if let Some(item) = self.selected {
            self.orchestrator
                .animate_stage_background(item.stage_background, animated);
        }
    }

    fn apply_shape(&mut self) {
        let Some(item) = self.selected else {
            return;
        };
        let n = &self.notifier;
        n.set(&mut self.show_circle, item.shape == ShapeKey::Circle, props::SHOW_CIRCLE);
        n.set(&mut self.show_square, item.shape == ShapeKey::Square, props::SHOW_SQUARE);
    }

    pub fn show_circle(&self) -> bool {
        self.show_circle
    }

    pub fn show_square(&self) -> bool {
        self.show_square
    }

    // Playback settings

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    pub fn set_speed_multiplier(&mut self, speed: f64) -> bool {
        self.notifier
            .set(&mut self.speed_multiplier, speed, props::SPEED_MULTIPLIER)
    }

    pub fn combine_rotate_pulse(&self) -> bool {
        self.combine_rotate_pulse
    }

    pub fn set_combine_rotate_pulse(&mut self, enabled: bool) -> bool {
        self.notifier.set(
            &mut self.combine_rotate_pulse,
            enabled,
            props::COMBINE_ROTATE_PULSE,
        )
    }

    pub fn use_3d(&self) -> bool {
        self.use_3d
    }

    pub fn is_2d_visible(&self) -> bool {
        !self.use_3d
    }

    pub fn is_3d_visible(&self) -> bool {
        self.use_3d
    }

    pub fn set_use_3d(&mut self, enabled: bool) -> bool {
        if !self.notifier.set(&mut self.use_3d, enabled, props::USE_3D) {
            return false;
        }
        self.notifier.notify(props::IS_2D_VISIBLE);
        self.notifier.notify(props::IS_3D_VISIBLE);
        self.apply_shape();
        if self.actor().is_some() {
            self.start();
        }
        true
    }

    // Run cycle

    pub fn phase(&self) -> CyclePhase {
        self.orchestrator.phase()
    }

    /// Names running on the actor, sorted
    pub fn running_animations(&self) -> SmallVec<[String; 4]> {
        self.orchestrator.running_animations()
    }

    /// Restart the run cycle for the current selection.
    ///
    /// Does nothing without an actor. Selects the first catalog entry when
    /// nothing is selected yet.
    pub fn start(&mut self) -> bool {
        if self.actor().is_none() {
            return false;
        }

        if self.selected.is_none() {
            let first = catalog::catalog().first();
            if self
                .notifier
                .set(&mut self.selected, first, props::SELECTED_ANIMATION)
            {
                self.apply_shape();
            }
        }
        let Some(item) = self.selected else {
            return false;
        };

        self.orchestrator.start(RunRequest {
            item,
            speed: self.speed_multiplier,
            combine_rotate_pulse: self.combine_rotate_pulse,
            use_3d: self.use_3d,
        })
    }

    pub fn stop(&mut self) {
        self.orchestrator.stop(self.use_3d);
    }

    /// Screen became visible
    pub fn appearing(&mut self) {
        self.stop();
        self.start();
    }

    /// Screen is going away
    pub fn disappearing(&mut self) {
        self.stop();
    }
}
