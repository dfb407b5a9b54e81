use serde::{Deserialize, Serialize};

use crate::checks::brightness::brightness;
use crate::checks::distance::{estimate_distance, DistanceCalibration};
use crate::checks::guide::GuideEllipse;
use crate::checks::orientation::{estimate_orientation, Orientation};
use crate::detection::domain::detection::Detection;
use crate::gate::verdict::{FailReason, Verdict};
use crate::shared::constants::{MAX_DISTANCE, MIN_BRIGHTNESS, MIN_DISTANCE};
use crate::shared::frame::Frame;

/// Thresholds and geometry used by [`QualityGate`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateSettings {
    pub calibration: DistanceCalibration,
    pub min_distance: f64,
    pub max_distance: f64,
    /// Raw channel-sum threshold; see `MIN_BRIGHTNESS`.
    pub min_brightness: f64,
    pub guide: GuideEllipse,
    /// Adds an eye-line level check after containment.
    pub require_level_eyes: bool,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            calibration: DistanceCalibration::default(),
            min_distance: MIN_DISTANCE,
            max_distance: MAX_DISTANCE,
            min_brightness: MIN_BRIGHTNESS,
            guide: GuideEllipse::default(),
            require_level_eyes: false,
        }
    }
}

/// Stateless per-tick classifier: first failing check wins.
///
/// Order: face count, distance, brightness, guide containment, then
/// (optionally) eye level.
pub struct QualityGate {
    settings: GateSettings,
}

impl QualityGate {
    pub fn new(settings: GateSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &GateSettings {
        &self.settings
    }

    pub fn evaluate(&self, detections: &[Detection], frame: &Frame) -> Verdict {
        match self.check(detections, frame) {
            Ok(()) => Verdict::Pass,
            Err(reason) => Verdict::Fail(reason),
        }
    }

    fn check(&self, detections: &[Detection], frame: &Frame) -> Result<(), FailReason> {
        let face = match detections {
            [] => return Err(FailReason::NoFace),
            [face] => face,
            _ => return Err(FailReason::MultipleFaces),
        };
        let s = &self.settings;

        let distance = estimate_distance(&face.bounding_box, &s.calibration).map_err(|e| {
            log::warn!("Distance check failed ({e}), treating face as too far");
            FailReason::TooFar
        })?;
        log::debug!("Estimated distance: {distance:.1}");
        if distance < s.min_distance {
            return Err(FailReason::TooClose);
        }
        if distance > s.max_distance {
            return Err(FailReason::TooFar);
        }

        let level = brightness(frame).map_err(|e| {
            log::warn!("Brightness check failed ({e}), treating frame as too dark");
            FailReason::TooDark
        })?;
        log::debug!("Frame brightness: {level:.1}");
        if level < s.min_brightness {
            return Err(FailReason::TooDark);
        }

        if !s.guide.contains(&face.bounding_box) {
            return Err(FailReason::Misaligned);
        }

        if s.require_level_eyes {
            let orientation = face
                .landmarks
                .as_ref()
                .map(|lm| estimate_orientation(lm.left_eye(), lm.right_eye()));
            if orientation != Some(Orientation::Straight) {
                return Err(FailReason::Misaligned);
            }
        }

        Ok(())
    }
}
