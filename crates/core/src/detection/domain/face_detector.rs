use crate::detection::domain::detection::Detection;
use crate::shared::frame::Frame;

/// Domain interface for face detection.
///
/// Called at ~10 Hz by the capture loop, and once more on the captured
/// frame to obtain landmarks. Implementations may keep state across
/// calls, hence `&mut self`, but must not grow without bound.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>, Box<dyn std::error::Error>>;
}
