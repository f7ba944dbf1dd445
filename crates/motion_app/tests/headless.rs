use motion_app::headless_report::ReportStatus;
use motion_app::headless_runner::{run_frames, run_scenario_json};
use motion_app::headless_runtime::HeadlessRunConfig;
use motion_app::model_view::RecordingScriptHost;
use motion_app::{PlaygroundApp, PlaygroundConfig};
use std::cell::RefCell;
use std::rc::Rc;

fn app() -> PlaygroundApp {
    let mut config = PlaygroundConfig::default();
    config.viewer.model_path = "/nonexistent/rubiks_cube.glb".into();
    let host = Rc::new(RefCell::new(RecordingScriptHost::new()));
    PlaygroundApp::new(&config, host).unwrap()
}

#[test]
fn scenario_passes_and_reports_clock() {
    let mut app = app();
    let outcome = run_scenario_json(
        &mut app,
        r##"{"steps": [
            {"type": "select", "key": "fade"},
            {"type": "assert_running", "count": 1},
            {"type": "combine", "enabled": true},
            {"type": "start"},
            {"type": "assert_running", "count": 3},
            {"type": "wait", "ms": 400},
            {"type": "assert_stage_color", "hex": "#F59E0B"},
            {"type": "select", "key": "rotate"},
            {"type": "assert_running", "count": 2},
            {"type": "tick", "frames": 10},
            {"type": "theme", "name": "Pastel"},
            {"type": "speed", "value": 0.5}
        ]}"##,
        HeadlessRunConfig::default(),
    )
    .unwrap();

    assert!(!outcome.is_failed());
    let report = outcome.report();
    assert_eq!(report.status, ReportStatus::Passed);
    assert_eq!(report.elapsed_frames, 25 + 10);
    assert_eq!(report.elapsed_ms, 400 + 160);
    assert_eq!(report.running, vec!["pulse", "rotate"]);
    assert_eq!(app.view_model().speed_multiplier(), 0.5);
}

#[test]
fn failing_assertion_stops_the_run() {
    let mut app = app();
    let outcome = run_scenario_json(
        &mut app,
        r#"{"steps": [
            {"type": "select", "key": "slide"},
            {"type": "tick", "frames": 2},
            {"type": "assert_running", "count": 3},
            {"type": "stop"}
        ]}"#,
        HeadlessRunConfig::default(),
    )
    .unwrap();

    assert!(outcome.is_failed());
    let report = outcome.report();
    assert_eq!(report.failed_step_index, Some(2));
    assert_eq!(report.step.as_deref(), Some("assert_running"));
    assert_eq!(report.elapsed_frames, 2);
    // The stop step never ran
    assert_eq!(report.running, vec!["slide"]);
}

#[test]
fn unknown_animation_fails_the_select_step() {
    let mut app = app();
    let outcome = run_scenario_json(
        &mut app,
        r#"{"steps": [{"type": "select", "key": "wobble"}]}"#,
        HeadlessRunConfig::default(),
    )
    .unwrap();

    let report = outcome.report();
    assert_eq!(report.step.as_deref(), Some("select"));
    assert!(report.message.as_deref().unwrap().contains("wobble"));
}

#[test]
fn stop_then_start_cycle() {
    let mut app = app();
    let outcome = run_scenario_json(
        &mut app,
        r##"{"steps": [
            {"type": "stop"},
            {"type": "assert_running", "count": 0},
            {"type": "tick", "frames": 30},
            {"type": "start"},
            {"type": "assert_running", "count": 1},
            {"type": "wait", "ms": 350},
            {"type": "assert_stage_color", "hex": "#0EA5E9"}
        ]}"##,
        HeadlessRunConfig::default(),
    )
    .unwrap();
    assert!(!outcome.is_failed(), "{:?}", outcome.report());
}

#[test]
fn unscripted_run_counts_frames() {
    let mut app = app();
    let outcome = run_frames(
        &mut app,
        HeadlessRunConfig {
            max_frames: 12,
            tick_ms: 20,
        },
    )
    .unwrap();

    let report = outcome.report();
    assert_eq!(report.elapsed_frames, 12);
    assert_eq!(report.elapsed_ms, 240);
    assert_eq!(report.running, vec!["pulse"]);
    assert!(app.actor().transform().scale > 1.0);
}

#[test]
fn extreme_speed_and_tick_keep_looping() {
    let mut config = PlaygroundConfig::default();
    config.viewer.model_path = "/nonexistent/rubiks_cube.glb".into();
    config.playground.speed = 1e9;
    let host = Rc::new(RefCell::new(RecordingScriptHost::new()));
    let mut app = PlaygroundApp::new(&config, host).unwrap();

    let outcome = run_frames(
        &mut app,
        HeadlessRunConfig {
            max_frames: 3,
            tick_ms: u64::from(u32::MAX),
        },
    )
    .unwrap();

    assert!(!outcome.is_failed());
    let owner = app.actor().owner();
    assert_eq!(app.scheduler().borrow().iteration(owner, "pulse"), Some(u32::MAX));
    assert_eq!(outcome.report().running, vec!["pulse"]);
}
