use thiserror::Error;

use crate::sampling::facial_regions::FacialRegion;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SamplingError {
    #[error("face landmarks are missing")]
    MissingLandmarks,
    #[error("source dimensions must be non-zero, got {width}x{height}")]
    ZeroSourceDimension { width: u32, height: u32 },
    #[error("invalid sample region {region}: {reason}")]
    InvalidRegion { region: String, reason: String },
}

impl SamplingError {
    pub(crate) fn invalid_window(reason: impl Into<String>) -> Self {
        SamplingError::InvalidRegion {
            region: "window".to_string(),
            reason: reason.into(),
        }
    }

    /// Relabels an `InvalidRegion` with the facial region it belongs to.
    pub(crate) fn for_region(self, facial: FacialRegion) -> Self {
        match self {
            SamplingError::InvalidRegion { reason, .. } => SamplingError::InvalidRegion {
                region: facial.to_string(),
                reason,
            },
            other => other,
        }
    }
}
