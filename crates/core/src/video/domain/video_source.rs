use crate::shared::frame::Frame;

/// Live frame provider (webcam, stream, still image).
///
/// `current_frame` returns the most recent frame at call time; it is
/// called once per poll tick and once more when a capture fires.
pub trait VideoSource: Send {
    fn current_frame(&mut self) -> Result<Frame, Box<dyn std::error::Error>>;
}
