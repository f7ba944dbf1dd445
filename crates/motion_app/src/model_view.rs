//! Embedded 3D model view
//!
//! The model is rendered by the `@google/model-viewer` web component inside a
//! host web view. This module builds the HTML document for it, with the
//! binary glTF asset inlined as a base64 data URI, and forwards yaw changes
//! to the page as script calls marshalled onto the main thread.
//!
//! Load failures are shown as an inline error message and turn every yaw
//! call into a silent no-op.

use crate::dispatch::MainThreadDispatcher;
use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine as _};
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;
use thiserror::Error;

/// Asset bundled with the playground
pub const DEFAULT_MODEL_ASSET: &str = "rubiks_cube.glb";

/// Web component script loaded by the viewer page
pub const MODEL_VIEWER_SCRIPT_URL: &str =
    "https://unpkg.com/@google/model-viewer/dist/model-viewer.min.js";

const GLB_MAGIC: &[u8; 4] = b"glTF";

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("could not read model asset {path}: {source}")]
    Asset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("model asset is not binary glTF")]
    InvalidModel,

    #[error("web view rejected the document: {0}")]
    Document(String),

    #[error("script evaluation failed: {0}")]
    Script(String),
}

/// Where the model bytes come from
#[derive(Debug, Clone)]
pub enum ModelSource {
    /// Read from a file path
    File(PathBuf),
    /// Already in memory
    Bytes(Vec<u8>),
}

impl ModelSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub fn bytes(data: Vec<u8>) -> Self {
        Self::Bytes(data)
    }

    fn read(&self) -> Result<Vec<u8>, ViewerError> {
        match self {
            Self::File(path) => std::fs::read(path).map_err(|source| ViewerError::Asset {
                path: path.clone(),
                source,
            }),
            Self::Bytes(data) => Ok(data.clone()),
        }
    }
}

/// The web view hosting the viewer page
pub trait ScriptHost {
    /// Replace the page with `html`
    fn load_html(&mut self, html: &str) -> Result<(), ViewerError>;

    /// Evaluate `script` in the page
    fn evaluate_script(&mut self, script: &str) -> Result<(), ViewerError>;
}

/// Script host that records what it is given.
///
/// Used by the headless runner where no real web view exists.
#[derive(Debug, Default)]
pub struct RecordingScriptHost {
    html: Option<String>,
    scripts: Vec<String>,
    fail_scripts: bool,
}

impl RecordingScriptHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host whose every script evaluation fails
    pub fn failing_scripts() -> Self {
        Self {
            fail_scripts: true,
            ..Self::default()
        }
    }

    pub fn html(&self) -> Option<&str> {
        self.html.as_deref()
    }

    pub fn scripts(&self) -> &[String] {
        &self.scripts
    }

    pub fn last_script(&self) -> Option<&str> {
        self.scripts.last().map(String::as_str)
    }
}

impl ScriptHost for RecordingScriptHost {
    fn load_html(&mut self, html: &str) -> Result<(), ViewerError> {
        self.html = Some(html.to_string());
        Ok(())
    }

    fn evaluate_script(&mut self, script: &str) -> Result<(), ViewerError> {
        if self.fail_scripts {
            return Err(ViewerError::Script(format!("{script} is not defined")));
        }
        self.scripts.push(script.to_string());
        Ok(())
    }
}

/// Format degrees with at most three decimals, trailing zeros trimmed
pub fn format_degrees(degrees: f64) -> String {
    if !degrees.is_finite() {
        return "0".to_string();
    }
    let text = format!("{degrees:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Viewer page with the model inlined
pub fn build_viewer_html(model: &[u8]) -> String {
    let src = format!(
        "data:model/gltf-binary;base64,{}",
        BASE64_STANDARD.encode(model)
    );

    format!(
        r#"<!doctype html>
<html>
<head>
  <meta charset='utf-8'/>
  <meta name='viewport' content='width=device-width, initial-scale=1'/>
  <script type='module' src='{MODEL_VIEWER_SCRIPT_URL}'></script>
  <style>
    html, body {{ margin:0; padding:0; width:100%; height:100%; background:transparent; overflow:hidden; }}
    model-viewer {{ width:100%; height:100%; background:transparent; }}
  </style>
</head>
<body>
  <model-viewer id='mv'
    src='{src}'
    camera-controls
    interaction-prompt='none'
    shadow-intensity='0'
    exposure='1.0'
    style='background: transparent;'>
  </model-viewer>

  <script>
    window.setYaw = function(deg) {{
      const mv = document.getElementById('mv');
      if (!mv) return;
      mv.cameraOrbit = deg + 'deg 75deg 2.5m';
    }};
    window.resetYaw = function() {{ window.setYaw(0); }};
  </script>
</body>
</html>"#
    )
}

/// The 3D view: load state, inline error label, and yaw control
pub struct ModelView {
    host: Rc<RefCell<dyn ScriptHost>>,
    dispatcher: MainThreadDispatcher,
    ready: Cell<bool>,
    error_message: RefCell<Option<String>>,
}

impl ModelView {
    pub fn new(host: Rc<RefCell<dyn ScriptHost>>, dispatcher: MainThreadDispatcher) -> Self {
        Self {
            host,
            dispatcher,
            ready: Cell::new(false),
            error_message: RefCell::new(None),
        }
    }

    /// Load the model and hand the page to the web view.
    ///
    /// Failures never propagate: they set the inline error message and leave
    /// the view not ready.
    pub fn load(&self, source: &ModelSource) {
        match self.try_load(source) {
            Ok(()) => {
                self.error_message.replace(None);
                self.ready.set(true);
                tracing::info!("3D model view ready");
            }
            Err(err) => {
                tracing::warn!(error = %err, "3D model view failed to load");
                self.error_message
                    .replace(Some(format!("3D failed to start: {err}")));
                self.ready.set(false);
            }
        }
    }

    fn try_load(&self, source: &ModelSource) -> Result<(), ViewerError> {
        let model = source.read()?;
        if !model.starts_with(GLB_MAGIC) {
            return Err(ViewerError::InvalidModel);
        }
        let html = build_viewer_html(&model);
        self.host.borrow_mut().load_html(&html)
    }

    pub fn is_ready(&self) -> bool {
        self.ready.get()
    }

    pub fn is_error_visible(&self) -> bool {
        self.error_message.borrow().is_some()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error_message.borrow().clone()
    }

    /// Point the camera at `degrees` of yaw. No-op until loaded.
    pub fn set_yaw(&self, degrees: f64) {
        if !self.is_ready() {
            return;
        }
        self.post_script(format!("setYaw({});", format_degrees(degrees)));
    }

    /// Return the camera to zero yaw. No-op until loaded.
    pub fn reset_yaw(&self) {
        if !self.is_ready() {
            return;
        }
        self.post_script("resetYaw();".to_string());
    }

    fn post_script(&self, script: String) {
        let host = self.host.clone();
        self.dispatcher.begin_invoke(move || {
            if let Err(err) = host.borrow_mut().evaluate_script(&script) {
                tracing::debug!(error = %err, script, "viewer script ignored");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glb() -> Vec<u8> {
        let mut data = GLB_MAGIC.to_vec();
        data.extend_from_slice(&[2, 0, 0, 0, 12, 0, 0, 0]);
        data
    }

    fn view_with(host: RecordingScriptHost) -> (ModelView, Rc<RefCell<RecordingScriptHost>>, MainThreadDispatcher) {
        let host = Rc::new(RefCell::new(host));
        let dispatcher = MainThreadDispatcher::new();
        let view = ModelView::new(host.clone(), dispatcher.clone());
        (view, host, dispatcher)
    }

    #[test]
    fn test_format_degrees() {
        assert_eq!(format_degrees(0.0), "0");
        assert_eq!(format_degrees(90.0), "90");
        assert_eq!(format_degrees(12.5), "12.5");
        assert_eq!(format_degrees(359.123456), "359.123");
        assert_eq!(format_degrees(-0.0001), "0");
        assert_eq!(format_degrees(f64::NAN), "0");
    }

    #[test]
    fn test_html_inlines_model_and_entry_points() {
        let html = build_viewer_html(b"glTF");
        assert!(html.contains("data:model/gltf-binary;base64,Z2xURg=="));
        assert!(html.contains("window.setYaw = function(deg)"));
        assert!(html.contains("window.resetYaw"));
        assert!(html.contains(MODEL_VIEWER_SCRIPT_URL));
    }

    #[test]
    fn test_successful_load_marshals_yaw_calls() {
        let (view, host, dispatcher) = view_with(RecordingScriptHost::new());
        view.load(&ModelSource::bytes(glb()));

        assert!(view.is_ready());
        assert!(!view.is_error_visible());
        assert!(host.borrow().html().is_some());

        view.set_yaw(45.25);
        view.reset_yaw();
        // Nothing reaches the page until the main thread drains
        assert!(host.borrow().scripts().is_empty());

        dispatcher.drain();
        assert_eq!(host.borrow().scripts(), ["setYaw(45.25);", "resetYaw();"]);
    }

    #[test]
    fn test_missing_asset_shows_error_and_disables_yaw() {
        let (view, host, dispatcher) = view_with(RecordingScriptHost::new());
        view.load(&ModelSource::file("/nonexistent/rubiks_cube.glb"));

        assert!(!view.is_ready());
        let message = view.error_message().unwrap();
        assert!(message.starts_with("3D failed to start: "), "{message}");

        view.set_yaw(10.0);
        view.reset_yaw();
        assert_eq!(dispatcher.pending(), 0);
        assert!(host.borrow().scripts().is_empty());
    }

    #[test]
    fn test_non_glb_asset_is_rejected() {
        let (view, _host, _) = view_with(RecordingScriptHost::new());
        view.load(&ModelSource::bytes(b"not a model".to_vec()));
        assert!(!view.is_ready());
        assert!(view.error_message().unwrap().contains("not binary glTF"));
    }

    #[test]
    fn test_script_failures_are_swallowed() {
        let (view, host, dispatcher) = view_with(RecordingScriptHost::failing_scripts());
        view.load(&ModelSource::bytes(glb()));

        view.set_yaw(1.0);
        assert_eq!(dispatcher.drain(), 1);
        assert!(host.borrow().scripts().is_empty());
        assert!(view.is_ready());
    }

    #[test]
    fn test_reload_clears_previous_error() {
        let (view, _host, _) = view_with(RecordingScriptHost::new());
        view.load(&ModelSource::bytes(Vec::new()));
        assert!(view.is_error_visible());

        view.load(&ModelSource::bytes(glb()));
        assert!(view.is_ready());
        assert!(!view.is_error_visible());
    }
}
