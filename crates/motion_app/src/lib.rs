//! Motion Playground
//!
//! A single screen that showcases looping animation presets (pulse, rotate,
//! slide, fade, bounce) on a 2D shape or an embedded 3D model, with theme
//! switching and a speed control.
//!
//! # Example
//!
//! ```
//! use motion_app::prelude::*;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let host = Rc::new(RefCell::new(RecordingScriptHost::new()));
//! let mut app = PlaygroundApp::new(&PlaygroundConfig::default(), host).unwrap();
//!
//! app.view_model_mut().set_combine_rotate_pulse(true);
//! app.view_model_mut().select_animation("bounce").unwrap();
//! app.frame(16.0);
//!
//! assert_eq!(app.view_model().running_animations().len(), 3);
//! ```

pub mod app;
pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod headless_assert;
pub mod headless_report;
pub mod headless_runner;
pub mod headless_runtime;
pub mod headless_scenario;
pub mod model_view;
pub mod orchestrator;
pub mod view_model;
pub mod visual;

pub use app::PlaygroundApp;
pub use catalog::{catalog, AnimationItem, ShapeKey};
pub use config::{ConfigError, PlaygroundConfig};
pub use dispatch::MainThreadDispatcher;
pub use error::{PlaygroundError, Result};
pub use model_view::{ModelSource, ModelView, RecordingScriptHost, ScriptHost, ViewerError};
pub use orchestrator::{AnimationOrchestrator, CyclePhase, RunRequest};
pub use view_model::MainViewModel;
pub use visual::{Stage, Transform, VisualNode};

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::app::PlaygroundApp;
    pub use crate::catalog::{catalog, AnimationItem, ShapeKey};
    pub use crate::config::PlaygroundConfig;
    pub use crate::error::{PlaygroundError, Result};
    pub use crate::model_view::{ModelSource, ModelView, RecordingScriptHost, ScriptHost};
    pub use crate::view_model::MainViewModel;
    pub use crate::visual::{Stage, Transform, VisualNode};

    pub use motion_animation::{PresetKind, MIN_SPEED_MULTIPLIER};
    pub use motion_core::Color;
    pub use motion_theme::ThemeKind;
}
