use std::io::Cursor;

use image::ImageFormat;

use crate::capture::domain::capture_error::CaptureError;
use crate::sampling::region_sampler::RegionSample;
use crate::shared::frame::Frame;

/// The snapshot produced by one capture cycle. Immutable; the next
/// capture replaces it rather than updating it.
#[derive(Clone, Debug, PartialEq)]
pub struct CapturedFrame {
    sequence: u64,
    canvas: Frame,
    source_size: (u32, u32),
    regions: Option<RegionSample>,
}

impl CapturedFrame {
    pub fn new(
        sequence: u64,
        canvas: Frame,
        source_size: (u32, u32),
        regions: Option<RegionSample>,
    ) -> Self {
        Self {
            sequence,
            canvas,
            source_size,
            regions,
        }
    }

    /// 1-based capture number within the session.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Canvas-sized RGBA raster.
    pub fn canvas(&self) -> &Frame {
        &self.canvas
    }

    /// Dimensions of the source frame the canvas was drawn from.
    pub fn source_size(&self) -> (u32, u32) {
        self.source_size
    }

    /// Region points (canvas coordinates) and colors, when sampled.
    pub fn regions(&self) -> Option<&RegionSample> {
        self.regions.as_ref()
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, CaptureError> {
        let mut bytes = Cursor::new(Vec::new());
        self.canvas
            .to_rgba_image()
            .write_to(&mut bytes, ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }
}
