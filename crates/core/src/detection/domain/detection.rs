use thiserror::Error;

use crate::detection::domain::face_landmarks::FaceLandmarks;
use crate::shared::geometry::{BoundingBox, Point};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DetectionError {
    #[error("bounding box has non-finite coordinates")]
    NonFiniteBox,
    #[error("bounding box has negative size {width}x{height}")]
    NegativeSize { width: f64, height: f64 },
    #[error("expected 68 landmarks, got {0}")]
    LandmarkCount(usize),
    #[error("landmark {0} has non-finite coordinates")]
    NonFiniteLandmark(usize),
}

/// One face found in one frame. Landmarks are optional: some detector
/// configurations only report boxes.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    pub bounding_box: BoundingBox,
    pub landmarks: Option<FaceLandmarks>,
}

impl Detection {
    pub fn new(bounding_box: BoundingBox, landmarks: Option<FaceLandmarks>) -> Self {
        Self {
            bounding_box,
            landmarks,
        }
    }

    /// Validates raw detector output at the boundary.
    ///
    /// A zero-width box is accepted here; the distance check reports it.
    pub fn from_raw(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        landmarks: Option<&[(f64, f64)]>,
    ) -> Result<Self, DetectionError> {
        if ![x, y, width, height].iter().all(|v| v.is_finite()) {
            return Err(DetectionError::NonFiniteBox);
        }
        if width < 0.0 || height < 0.0 {
            return Err(DetectionError::NegativeSize { width, height });
        }

        let landmarks = match landmarks {
            None => None,
            Some(raw) => {
                let points: Vec<Point> = raw.iter().copied().map(Point::from).collect();
                if let Some(i) = points.iter().position(|p| !p.is_finite()) {
                    return Err(DetectionError::NonFiniteLandmark(i));
                }
                let lm = FaceLandmarks::from_slice(&points)
                    .ok_or(DetectionError::LandmarkCount(points.len()))?;
                Some(lm)
            }
        };

        Ok(Self::new(BoundingBox::new(x, y, width, height), landmarks))
    }
}
