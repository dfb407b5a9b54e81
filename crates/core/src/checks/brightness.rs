use ndarray::s;

use crate::checks::check_error::CheckError;
use crate::shared::frame::Frame;

/// Average per-pixel sum of the R, G and B channels (range 0..=765).
///
/// Alpha and any further channels are ignored.
pub fn brightness(frame: &Frame) -> Result<f64, CheckError> {
    if frame.channels() < 3 {
        return Err(CheckError::UnsupportedChannels(frame.channels()));
    }
    let pixels = frame.pixel_count();
    if pixels == 0 {
        return Err(CheckError::EmptyFrame);
    }

    let sum: u64 = frame
        .as_ndarray()
        .slice(s![.., .., 0..3])
        .iter()
        .map(|&v| v as u64)
        .sum();

    Ok(sum as f64 / pixels as f64)
}
