use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use spectral_lab::compare::{AdviceService, AudioPayload, ComparisonEngine};
use spectral_lab::error::ComparisonError;

/// Records what it was asked and answers with a fixed body.
struct ScriptedAdvisor {
    reply: String,
    seen: Mutex<Vec<(PathBuf, PathBuf, String)>>,
}

impl ScriptedAdvisor {
    fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            seen: Mutex::new(Vec::new()),
        })
    }
}

impl AdviceService for ScriptedAdvisor {
    fn request(
        &self,
        reference: &AudioPayload,
        candidate: &AudioPayload,
        instruction: &str,
    ) -> anyhow::Result<String> {
        self.seen.lock().unwrap().push((
            reference.path.clone(),
            candidate.path.clone(),
            instruction.to_string(),
        ));
        Ok(self.reply.clone())
    }
}

fn write_wav(dir: &Path, name: &str) -> PathBuf {
    let samples: Vec<i16> = (0..2205)
        .map(|n| ((n as f32 * 0.06).sin() * 8000.0) as i16)
        .collect();
    let data_len = (samples.len() * 2) as u32;
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVEfmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&44_100u32.to_le_bytes());
    bytes.extend_from_slice(&88_200u32.to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    for s in samples {
        bytes.extend_from_slice(&s.to_le_bytes());
    }
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

const VERDICT: &str = r#"```json
{
  "tonalBalance": "The mix is 2 dB darker above 8 kHz.",
  "dynamicsCompare": "Similar crest factor; the mix pumps on the chorus.",
  "stereoDepth": "Reference keeps the low end mono.",
  "correctionBlueprint": ["High shelf +1.5 dB at 10 kHz", "Slow the bus compressor attack"]
}
```"#;

#[test]
fn valid_verdict_round_trip_through_the_engine() {
    let dir = tempfile::tempdir().unwrap();
    let reference = AudioPayload::load(&write_wav(dir.path(), "reference.wav")).unwrap();
    let candidate = AudioPayload::load(&write_wav(dir.path(), "mix.wav")).unwrap();

    let advisor = ScriptedAdvisor::new(VERDICT);
    let engine = ComparisonEngine::with_instruction(advisor.clone(), "compare these");
    let verdict = engine.compare(Some(&reference), Some(&candidate)).unwrap();

    assert_eq!(verdict.correction_blueprint.len(), 2);
    assert!(verdict.stereo_depth.contains("mono"));

    let seen = advisor.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].0.ends_with("reference.wav"));
    assert!(seen[0].1.ends_with("mix.wav"));
    assert_eq!(seen[0].2, "compare these");
}

#[test]
fn missing_candidate_is_rejected_before_delegating() {
    let dir = tempfile::tempdir().unwrap();
    let reference = AudioPayload::load(&write_wav(dir.path(), "reference.wav")).unwrap();
    let advisor = ScriptedAdvisor::new(VERDICT);
    let engine = ComparisonEngine::new(advisor.clone());

    let err = engine.compare(Some(&reference), None).unwrap_err();
    assert!(matches!(err, ComparisonError::MissingTrack(_)));
    assert!(advisor.seen.lock().unwrap().is_empty());
}

#[test]
fn response_without_blueprint_is_a_delegate_failure() {
    let dir = tempfile::tempdir().unwrap();
    let a = AudioPayload::load(&write_wav(dir.path(), "a.wav")).unwrap();
    let b = AudioPayload::load(&write_wav(dir.path(), "b.wav")).unwrap();
    let engine = ComparisonEngine::new(ScriptedAdvisor::new(
        r#"{"tonalBalance":"x","dynamicsCompare":"y","stereoDepth":"z"}"#,
    ));

    let err = engine.compare(Some(&a), Some(&b)).unwrap_err();
    assert!(matches!(err, ComparisonError::DelegateFailure(_)));
    assert!(err.to_string().starts_with("analysis failed"));
}

#[test]
fn non_audio_payload_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cover.png");
    let png = image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 0, 255]));
    png.save(&path).unwrap();

    let err = AudioPayload::load(&path).unwrap_err();
    assert!(matches!(err, ComparisonError::InvalidPayload { .. }));
}

#[test]
fn payload_reports_track_properties() {
    let dir = tempfile::tempdir().unwrap();
    let payload = AudioPayload::load(&write_wav(dir.path(), "tone.wav")).unwrap();
    assert!(payload.size_bytes > 44);
    if let Some(props) = payload.properties {
        assert_eq!(props.sample_rate, Some(44_100));
        assert_eq!(props.channels, Some(1));
    }
}
