//! Inkwise Replay
//!
//! Loads a recorded pen stroke from JSON and runs it through segmentation
//! and gesture detection.
//!
//! ## Input
//!
//! ```json
//! { "points": [ { "x": 0.0, "y": 0.0, "time_ms": 0.0 }, ... ] }
//! ```

use inkwise_core::{
    ConfigError, GestureArbiter, Primitive, RecognizerConfig, SegmentationWarning, Stroke,
    StrokeBuilder, segment,
};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Config(#[from] ConfigError),
}

/// One recorded pen sample.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RecordedSample {
    pub x: f64,
    pub y: f64,
    pub time_ms: f64,
}

/// A recorded stroke file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recording {
    pub points: Vec<RecordedSample>,
    /// Optional recognizer settings; defaults apply when absent.
    #[serde(default)]
    pub config: RecognizerConfig,
}

impl Recording {
    /// Build the finished stroke.
    pub fn to_stroke(&self) -> Stroke {
        let mut builder = StrokeBuilder::new();
        for sample in &self.points {
            builder.add_sample(Point::new(sample.x, sample.y), sample.time_ms);
        }
        builder.finish()
    }
}

/// What the recognizer made of a recording.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub points: usize,
    pub primitives: Vec<Primitive>,
    pub rounds: usize,
    pub warning: Option<String>,
    pub gesture: Option<GestureReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GestureReport {
    pub kind: String,
    pub probability: f64,
}

/// Load a recording from a JSON file and validate its config.
pub fn load_recording(path: &Path) -> Result<Recording, ReplayError> {
    let json = std::fs::read_to_string(path)?;
    let recording: Recording = serde_json::from_str(&json)?;
    recording.config.validate()?;
    log::info!("Loaded {} samples from {:?}", recording.points.len(), path);
    Ok(recording)
}

/// Run segmentation and gesture detection over a recording.
pub fn replay(recording: &Recording) -> Report {
    let stroke = Arc::new(recording.to_stroke());
    let segmentation = segment(&stroke, &recording.config);
    if let Some(SegmentationWarning::NoConvergence { rounds }) = segmentation.warning {
        log::warn!("Segmentation stopped after {} rounds", rounds);
    }

    let gesture = GestureArbiter::with_default_finders()
        .detect(&stroke)
        .map(|candidate| GestureReport {
            kind: candidate.kind().as_str().to_string(),
            probability: candidate.probability(),
        });

    Report {
        points: stroke.len(),
        primitives: segmentation.primitives,
        rounds: segmentation.rounds,
        warning: segmentation.warning.map(|w| w.to_string()),
        gesture,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_recording(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_and_replay() {
        let mut samples = Vec::new();
        for i in 0..20 {
            samples.push(format!(
                r#"{{ "x": {}, "y": 0, "time_ms": {} }}"#,
                i * 10,
                i * 5
            ));
        }
        let json = format!(r#"{{ "points": [{}] }}"#, samples.join(","));
        let file = write_recording(&json);

        let recording = load_recording(file.path()).unwrap();
        assert_eq!(recording.points.len(), 20);

        let report = replay(&recording);
        assert_eq!(report.points, 20);
        // Uniform speed has no corners and a straight line is no gesture
        assert!(report.primitives.is_empty());
        assert!(report.gesture.is_none());
        assert!(report.warning.is_none());
    }

    #[test]
    fn test_config_in_recording() {
        let file = write_recording(
            r#"{ "points": [], "config": { "hs-error-tolerance": 12.5 } }"#,
        );
        let recording = load_recording(file.path()).unwrap();
        assert!((recording.config.error_tolerance - 12.5).abs() < f64::EPSILON);

        let report = replay(&recording);
        assert_eq!(report.points, 0);
        assert!(report.warning.is_some());
    }

    #[test]
    fn test_out_of_range_config_is_rejected() {
        let file = write_recording(
            r#"{ "points": [], "config": { "hs-speed-mult": 2.0 } }"#,
        );
        let result = load_recording(file.path());
        assert!(matches!(
            result,
            Err(ReplayError::Config(ConfigError::OutOfRange { name: "speed_multiplier", .. }))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = load_recording(Path::new("/nonexistent/stroke.json"));
        assert!(matches!(result, Err(ReplayError::Io(_))));
    }

    #[test]
    fn test_malformed_file() {
        let file = write_recording("{ \"points\": 3 }");
        assert!(matches!(load_recording(file.path()), Err(ReplayError::Parse(_))));
    }
}
