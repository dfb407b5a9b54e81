use thiserror::Error;

use crate::sampling::sampling_error::SamplingError;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no frame available: {0}")]
    FrameUnavailable(String),
    #[error("landmark detection failed: {0}")]
    Detection(String),
    #[error(transparent)]
    Sampling(#[from] SamplingError),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}
