use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gate::quality_gate::GateSettings;
use crate::sampling::region_sampler::SampleWindow;
use crate::shared::constants::{
    CANVAS_HEIGHT, CANVAS_WIDTH, COOLDOWN_INTERVAL_MS, COOLDOWN_TICKS, COUNTDOWN_INTERVAL_MS,
    COUNTDOWN_START, POLL_INTERVAL_MS,
};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Every tunable of a capture session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureSettings {
    pub poll_interval_ms: u64,
    pub countdown_interval_ms: u64,
    pub countdown_start: u32,
    pub cooldown_interval_ms: u64,
    pub cooldown_ticks: u32,
    pub gate: GateSettings,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Derive region points from landmarks at capture time. When on, a
    /// capture without landmarks fails.
    pub sample_regions: bool,
    /// Averaging window for region colors; `None` skips color sampling.
    pub sample_window: Option<SampleWindow>,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: POLL_INTERVAL_MS,
            countdown_interval_ms: COUNTDOWN_INTERVAL_MS,
            countdown_start: COUNTDOWN_START,
            cooldown_interval_ms: COOLDOWN_INTERVAL_MS,
            cooldown_ticks: COOLDOWN_TICKS,
            gate: GateSettings::default(),
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            sample_regions: true,
            sample_window: Some(SampleWindow::default()),
        }
    }
}

impl CaptureSettings {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("FaceGate").join("capture.json"))
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Loads from [`Self::default_path`], falling back to defaults when the
    /// file is absent or unusable.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!("Ignoring settings at {}: {e}", path.display());
            Self::default()
        })
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> SettingsError {
            SettingsError::Invalid {
                field,
                reason: reason.into(),
            }
        }
        fn positive(field: &'static str, v: f64) -> Result<(), SettingsError> {
            if v > 0.0 && v.is_finite() {
                Ok(())
            } else {
                Err(invalid(field, format!("must be positive, got {v}")))
            }
        }

        for (field, ms) in [
            ("poll_interval_ms", self.poll_interval_ms),
            ("countdown_interval_ms", self.countdown_interval_ms),
            ("cooldown_interval_ms", self.cooldown_interval_ms),
        ] {
            if ms == 0 {
                return Err(invalid(field, "must be at least 1ms"));
            }
        }
        if self.countdown_start == 0 {
            return Err(invalid("countdown_start", "must be at least 1"));
        }
        if self.cooldown_ticks == 0 {
            return Err(invalid("cooldown_ticks", "must be at least 1"));
        }
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(invalid(
                "canvas",
                format!("{}x{} is empty", self.canvas_width, self.canvas_height),
            ));
        }

        let gate = &self.gate;
        positive("calibration.reference_width", gate.calibration.reference_width)?;
        positive("calibration.reference_distance", gate.calibration.reference_distance)?;
        positive("guide.radius_x", gate.guide.radius_x)?;
        positive("guide.radius_y", gate.guide.radius_y)?;
        if !(gate.min_distance <= gate.max_distance) {
            return Err(invalid(
                "min_distance",
                format!("{} exceeds max_distance {}", gate.min_distance, gate.max_distance),
            ));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn countdown_interval(&self) -> Duration {
        Duration::from_millis(self.countdown_interval_ms)
    }

    pub fn cooldown_interval(&self) -> Duration {
        Duration::from_millis(self.cooldown_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let s = CaptureSettings::default();
        s.validate().unwrap();
        assert_eq!(s.poll_interval(), Duration::from_millis(100));
        assert_eq!(s.countdown_start, 5);
        assert_eq!(s.cooldown_ticks, 3);
        assert_eq!((s.canvas_width, s.canvas_height), (720, 560));
        assert_relative_eq!(s.gate.min_brightness, 0.5);
        assert_relative_eq!(s.gate.calibration.reference_width, 150.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s = CaptureSettings::from_json(
            r#"{ "countdown_start": 3, "gate": { "calibration": { "reference_width": 180.0, "reference_distance": 150.0 } } }"#,
        )
        .unwrap();
        assert_eq!(s.countdown_start, 3);
        assert_relative_eq!(s.gate.calibration.reference_width, 180.0);
        assert_relative_eq!(s.gate.max_distance, 100.0);
        assert_eq!(s.poll_interval_ms, 100);
    }

    #[test]
    fn test_json_round_trip() {
        let mut s = CaptureSettings::default();
        s.sample_window = None;
        s.gate.require_level_eyes = true;
        let back = CaptureSettings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            CaptureSettings::from_json("{ not json"),
            Err(SettingsError::Json(_))
        ));
    }

    #[rstest]
    #[case::zero_poll(r#"{ "poll_interval_ms": 0 }"#, "poll_interval_ms")]
    #[case::zero_countdown(r#"{ "countdown_start": 0 }"#, "countdown_start")]
    #[case::zero_cooldown(r#"{ "cooldown_ticks": 0 }"#, "cooldown_ticks")]
    #[case::empty_canvas(r#"{ "canvas_width": 0 }"#, "canvas")]
    #[case::zero_radius(
        r#"{ "gate": { "guide": { "center_x": 1.0, "center_y": 1.0, "radius_x": 0.0, "radius_y": 1.0 } } }"#,
        "guide.radius_x"
    )]
    #[case::inverted_band(r#"{ "gate": { "min_distance": 120.0 } }"#, "min_distance")]
    fn test_invalid_values(#[case] json: &str, #[case] expected_field: &str) {
        match CaptureSettings::from_json(json) {
            Err(SettingsError::Invalid { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("expected Invalid({expected_field}), got {other:?}"),
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "cooldown_ticks": 4 }}"#).unwrap();
        let s = CaptureSettings::load(file.path()).unwrap();
        assert_eq!(s.cooldown_ticks, 4);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CaptureSettings::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }
}
