use serde::{Deserialize, Serialize};

use crate::detection::domain::face_landmarks::FaceLandmarks;
use crate::sampling::canvas_scale::scale_to_canvas;
use crate::sampling::color_sampler::{average_color, Rgb, SampleRect};
use crate::sampling::facial_regions::{derive_regions, RegionMap};
use crate::sampling::sampling_error::SamplingError;
use crate::shared::constants::SAMPLE_HALF_WINDOW;
use crate::shared::frame::Frame;

/// Half-extents of the window averaged around each region point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleWindow {
    pub half_width: u32,
    pub half_height: u32,
}

impl Default for SampleWindow {
    fn default() -> Self {
        Self {
            half_width: SAMPLE_HALF_WINDOW,
            half_height: SAMPLE_HALF_WINDOW,
        }
    }
}

/// Region points in canvas space plus, optionally, their mean colors.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionSample {
    pub points: RegionMap,
    pub colors: Option<RegionMap<Rgb>>,
}

/// Maps landmarks onto a captured canvas and reads region colors.
///
/// Pure: identical inputs always give identical samples.
pub struct RegionSampler {
    window: Option<SampleWindow>,
}

impl RegionSampler {
    pub fn new(window: Option<SampleWindow>) -> Self {
        Self { window }
    }

    /// `landmarks` are in source-frame pixels (`source_width` x
    /// `source_height`); the result is in `canvas` pixels.
    pub fn sample(
        &self,
        landmarks: Option<&FaceLandmarks>,
        source_width: u32,
        source_height: u32,
        canvas: &Frame,
    ) -> Result<RegionSample, SamplingError> {
        let (cw, ch) = (canvas.width(), canvas.height());
        let points = derive_regions(landmarks)?
            .try_map(|_, &p| scale_to_canvas(p, source_width, source_height, cw, ch))?;

        let colors = match self.window {
            None => None,
            Some(w) => Some(points.try_map(|region, &p| {
                let rect = SampleRect::around(p, w.half_width, w.half_height, cw, ch)
                    .ok_or_else(|| SamplingError::invalid_window("point lies outside the canvas"))
                    .map_err(|e| e.for_region(region))?;
                average_color(canvas, &rect).map_err(|e| e.for_region(region))
            })?),
        };

        Ok(RegionSample { points, colors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::face_landmarks::tests::indexed_landmarks;
    use crate::detection::domain::face_landmarks::LANDMARK_COUNT;
    use crate::shared::geometry::Point;
    use approx::assert_relative_eq;

    fn canvas(w: u32, h: u32, rgba: [u8; 4]) -> Frame {
        Frame::new(rgba.repeat((w * h) as usize), w, h, 4, 0)
    }

    #[test]
    fn test_points_scaled_into_canvas() {
        let lm = indexed_landmarks();
        let sampler = RegionSampler::new(None);
        // Source 360x280 onto a 720x560 canvas doubles every coordinate.
        let sample = sampler
            .sample(Some(&lm), 360, 280, &canvas(720, 560, [0, 0, 0, 255]))
            .unwrap();
        let raw = derive_regions(Some(&lm)).unwrap();
        assert_relative_eq!(sample.points.left_cheek.x, raw.left_cheek.x * 2.0);
        assert_relative_eq!(sample.points.middle_forehead.y, raw.middle_forehead.y * 2.0);
        assert!(sample.colors.is_none());
    }

    #[test]
    fn test_colors_sampled_per_region() {
        let sampler = RegionSampler::new(Some(SampleWindow::default()));
        let sample = sampler
            .sample(
                Some(&indexed_landmarks()),
                720,
                560,
                &canvas(720, 560, [180, 120, 90, 255]),
            )
            .unwrap();
        let colors = sample.colors.unwrap();
        for (_, c) in colors.iter() {
            assert_relative_eq!(c.r, 180.0);
            assert_relative_eq!(c.g, 120.0);
            assert_relative_eq!(c.b, 90.0);
        }
    }

    #[test]
    fn test_missing_landmarks() {
        let sampler = RegionSampler::new(Some(SampleWindow::default()));
        let err = sampler
            .sample(None, 720, 560, &canvas(10, 10, [0, 0, 0, 255]))
            .unwrap_err();
        assert_eq!(err, SamplingError::MissingLandmarks);
    }

    #[test]
    fn test_zero_source_dimension() {
        let sampler = RegionSampler::new(None);
        let err = sampler
            .sample(Some(&indexed_landmarks()), 0, 560, &canvas(10, 10, [0, 0, 0, 255]))
            .unwrap_err();
        assert!(matches!(err, SamplingError::ZeroSourceDimension { .. }));
    }

    #[test]
    fn test_region_off_canvas_is_invalid_and_named() {
        // Landmarks far outside a tiny canvas.
        let points = [Point::new(5000.0, 5000.0); LANDMARK_COUNT];
        let lm = FaceLandmarks::new(points);
        let sampler = RegionSampler::new(Some(SampleWindow::default()));
        let err = sampler
            .sample(Some(&lm), 64, 64, &canvas(64, 64, [0, 0, 0, 255]))
            .unwrap_err();
        assert_eq!(
            err,
            SamplingError::InvalidRegion {
                region: "middle-forehead".to_string(),
                reason: "point lies outside the canvas".to_string(),
            }
        );
    }

    #[test]
    fn test_sampling_is_idempotent() {
        let sampler = RegionSampler::new(Some(SampleWindow::default()));
        let frame = canvas(720, 560, [10, 20, 30, 255]);
        let lm = indexed_landmarks();
        assert_eq!(
            sampler.sample(Some(&lm), 640, 480, &frame),
            sampler.sample(Some(&lm), 640, 480, &frame)
        );
    }
}
