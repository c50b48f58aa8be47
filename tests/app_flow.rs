mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use common::{FakeInput, OpenOutcome};
use spectral_lab::app::App;
use spectral_lab::compare::{AdviceService, AudioPayload, ComparisonState};
use spectral_lab::config::AppConfig;
use spectral_lab::render::LoopState;
use spectral_lab::ui::keybindings::NavigationAction;

struct Fixed;

const VERDICT: &str =
    r#"{"tonalBalance":"a","dynamicsCompare":"b","stereoDepth":"c","correctionBlueprint":["d"]}"#;

impl AdviceService for Fixed {
    fn request(&self, _: &AudioPayload, _: &AudioPayload, _: &str) -> anyhow::Result<String> {
        Ok(VERDICT.into())
    }
}

fn wav(samples: usize) -> Vec<u8> {
    let data_len = (samples * 2) as u32;
    let mut out = Vec::new();
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVEfmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&44_100u32.to_le_bytes());
    out.extend_from_slice(&88_200u32.to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.resize(out.len() + samples * 2, 0);
    out
}

fn later() -> Instant {
    Instant::now() + Duration::from_secs(1)
}

fn app_in(dir: &std::path::Path, outcome: OpenOutcome) -> (App, Arc<common::DeviceLog>) {
    let mut config = AppConfig::default();
    config.display.snapshot_dir = dir.join("snapshots");
    let (input, device) = FakeInput::new(outcome);
    let app = App::with_services(config, Box::new(input), Arc::new(Fixed), dir.to_path_buf())
        .unwrap();
    (app, device)
}

#[test]
fn capture_toggle_renders_and_snapshots() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, device) = app_in(
        dir.path(),
        OpenOutcome::Tone {
            hz: 440.0,
            samples: 2048,
        },
    );

    app.apply(NavigationAction::Snapshot);
    assert_eq!(app.status, "nothing to snapshot yet");

    app.apply(NavigationAction::ToggleCapture);
    assert!(app.is_capturing());
    assert_eq!(app.loop_state(), LoopState::Active);
    app.tick(later());
    assert!(app.last_scene().is_some());

    app.apply(NavigationAction::NextGenre);
    app.apply(NavigationAction::NextInstrument);
    assert!(app.context().genre().is_some());
    assert_eq!(app.context().instrument().unwrap().name, "Vocals");

    app.apply(NavigationAction::Snapshot);
    assert!(app.status.starts_with("snapshot saved"), "{}", app.status);
    assert_eq!(std::fs::read_dir(dir.path().join("snapshots")).unwrap().count(), 1);

    app.apply(NavigationAction::ToggleCapture);
    assert!(!app.is_capturing());
    assert_eq!(app.loop_state(), LoopState::Idle);
    assert_eq!(device.stops(), 1);
}

#[test]
fn denied_microphone_shows_status_and_stays_idle() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, _) = app_in(dir.path(), OpenOutcome::Denied);
    app.apply(NavigationAction::ToggleCapture);
    assert!(!app.is_capturing());
    assert!(app.status.contains("denied"), "{}", app.status);
}

#[test]
fn quit_tears_the_session_down() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, device) = app_in(
        dir.path(),
        OpenOutcome::Tone {
            hz: 100.0,
            samples: 512,
        },
    );
    app.apply(NavigationAction::ToggleCapture);
    assert!(app.apply(NavigationAction::Quit));
    assert!(!device.is_live());
}

#[test]
fn comparison_runs_in_the_background() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a-reference.wav"), wav(64)).unwrap();
    std::fs::write(dir.path().join("b-mix.wav"), wav(64)).unwrap();
    let (mut app, _) = app_in(
        dir.path(),
        OpenOutcome::Tone {
            hz: 100.0,
            samples: 512,
        },
    );
    assert_eq!(app.entries[0].name, "a-reference.wav");

    app.apply(NavigationAction::Compare);
    assert!(matches!(app.comparison(), ComparisonState::Failed(_)));

    app.apply(NavigationAction::MarkReference);
    app.apply(NavigationAction::Down);
    app.apply(NavigationAction::MarkCandidate);
    app.apply(NavigationAction::Compare);
    assert!(app.comparison().is_pending());

    let deadline = Instant::now() + Duration::from_secs(5);
    while app.comparison().is_pending() && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
        app.tick(Instant::now());
    }
    match app.comparison() {
        ComparisonState::Ready(v) => assert_eq!(v.correction_blueprint, ["d"]),
        other => panic!("unexpected {other:?}"),
    }
}
