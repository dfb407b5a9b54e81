use thiserror::Error;

/// Precondition violations of the per-frame checks.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CheckError {
    #[error("bounding box width must be positive, got {0}")]
    InvalidWidth(f64),
    #[error("cannot measure brightness of an empty frame")]
    EmptyFrame,
    #[error("brightness needs at least 3 color channels, frame has {0}")]
    UnsupportedChannels(u8),
}
