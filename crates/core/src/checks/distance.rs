use serde::{Deserialize, Serialize};

use crate::checks::check_error::CheckError;
use crate::shared::constants::{REFERENCE_DISTANCE, REFERENCE_FACE_WIDTH};
use crate::shared::geometry::BoundingBox;

/// Pinhole-style calibration: a face `reference_width` pixels wide is
/// `reference_distance` units from the camera.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistanceCalibration {
    pub reference_width: f64,
    pub reference_distance: f64,
}

impl Default for DistanceCalibration {
    fn default() -> Self {
        Self {
            reference_width: REFERENCE_FACE_WIDTH,
            reference_distance: REFERENCE_DISTANCE,
        }
    }
}

/// Estimated camera distance for a face box, inversely proportional to
/// its width. Unitless beyond the calibration; callers apply bands.
pub fn estimate_distance(
    bbox: &BoundingBox,
    calibration: &DistanceCalibration,
) -> Result<f64, CheckError> {
    if !(bbox.width > 0.0 && bbox.width.is_finite()) {
        return Err(CheckError::InvalidWidth(bbox.width));
    }
    Ok(calibration.reference_width * calibration.reference_distance / bbox.width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn box_of_width(width: f64) -> BoundingBox {
        BoundingBox::new(0.0, 0.0, width, width)
    }

    #[rstest]
    #[case::reference(150.0, 150.0)]
    #[case::twice_as_wide(300.0, 75.0)]
    #[case::near_band(750.0, 30.0)]
    #[case::far_band(225.0, 100.0)]
    fn test_default_calibration(#[case] width: f64, #[case] expected: f64) {
        let d = estimate_distance(&box_of_width(width), &DistanceCalibration::default()).unwrap();
        assert_relative_eq!(d, expected);
    }

    #[test]
    fn test_custom_calibration() {
        let cal = DistanceCalibration {
            reference_width: 200.0,
            reference_distance: 50.0,
        };
        assert_relative_eq!(estimate_distance(&box_of_width(100.0), &cal).unwrap(), 100.0);
    }

    #[test]
    fn test_zero_width_is_an_error_not_infinity() {
        let result = estimate_distance(&box_of_width(0.0), &DistanceCalibration::default());
        assert_eq!(result, Err(CheckError::InvalidWidth(0.0)));
    }

    #[rstest]
    #[case::negative(-10.0)]
    #[case::nan(f64::NAN)]
    #[case::infinite(f64::INFINITY)]
    fn test_degenerate_widths_rejected(#[case] width: f64) {
        let result = estimate_distance(&box_of_width(width), &DistanceCalibration::default());
        assert!(matches!(result, Err(CheckError::InvalidWidth(_))));
    }
}
