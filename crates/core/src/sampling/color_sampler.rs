use ndarray::s;

use crate::sampling::sampling_error::SamplingError;
use crate::shared::frame::Frame;
use crate::shared::geometry::Point;

/// Mean color of a pixel window, per channel in 0..=255.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Half-open pixel rectangle `[x0, x1) x [y0, y1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl SampleRect {
    /// Square-ish window of `(2 * half + 1)` pixels per side around
    /// `center`, clamped to a `frame_width` x `frame_height` frame.
    /// `None` when nothing of it remains inside the frame.
    pub fn around(
        center: Point,
        half_width: u32,
        half_height: u32,
        frame_width: u32,
        frame_height: u32,
    ) -> Option<Self> {
        if !center.is_finite() {
            return None;
        }
        let clamp = |v: f64, max: u32| v.clamp(0.0, max as f64) as u32;
        let x0 = clamp((center.x - half_width as f64).floor(), frame_width);
        let x1 = clamp((center.x + half_width as f64).floor() + 1.0, frame_width);
        let y0 = clamp((center.y - half_height as f64).floor(), frame_height);
        let y1 = clamp((center.y + half_height as f64).floor() + 1.0, frame_height);

        let rect = Self { x0, y0, x1, y1 };
        (!rect.is_empty()).then_some(rect)
    }

    pub fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Uniform average of the R, G, B channels inside `rect`.
pub fn average_color(frame: &Frame, rect: &SampleRect) -> Result<Rgb, SamplingError> {
    if frame.channels() < 3 {
        return Err(SamplingError::invalid_window(format!(
            "frame has {} channels, need 3",
            frame.channels()
        )));
    }
    if rect.is_empty() {
        return Err(SamplingError::invalid_window("empty window"));
    }
    if rect.x1 > frame.width() || rect.y1 > frame.height() {
        return Err(SamplingError::invalid_window(format!(
            "window {rect:?} exceeds {}x{} frame",
            frame.width(),
            frame.height()
        )));
    }

    let pixels = frame.as_ndarray();
    let window = pixels.slice(s![
        rect.y0 as usize..rect.y1 as usize,
        rect.x0 as usize..rect.x1 as usize,
        0..3
    ]);

    let mut sums = [0u64; 3];
    for ((_, _, c), &v) in window.indexed_iter() {
        sums[c] += v as u64;
    }
    let n = (rect.width() as u64 * rect.height() as u64) as f64;

    Ok(Rgb {
        r: sums[0] as f64 / n,
        g: sums[1] as f64 / n,
        b: sums[2] as f64 / n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    /// 4x4 RGBA frame: left half red, right half blue.
    fn split_frame() -> Frame {
        let mut data = Vec::with_capacity(64);
        for _row in 0..4 {
            for col in 0..4 {
                if col < 2 {
                    data.extend_from_slice(&[200, 0, 0, 255]);
                } else {
                    data.extend_from_slice(&[0, 0, 100, 255]);
                }
            }
        }
        Frame::new(data, 4, 4, 4, 0)
    }

    #[test]
    fn test_uniform_window() {
        let rect = SampleRect {
            x0: 0,
            y0: 0,
            x1: 2,
            y1: 4,
        };
        let c = average_color(&split_frame(), &rect).unwrap();
        assert_relative_eq!(c.r, 200.0);
        assert_relative_eq!(c.g, 0.0);
        assert_relative_eq!(c.b, 0.0);
    }

    #[test]
    fn test_straddling_window_mixes_colors() {
        let rect = SampleRect {
            x0: 1,
            y0: 0,
            x1: 3,
            y1: 2,
        };
        let c = average_color(&split_frame(), &rect).unwrap();
        assert_relative_eq!(c.r, 100.0);
        assert_relative_eq!(c.b, 50.0);
    }

    #[test]
    fn test_out_of_bounds_window_is_invalid() {
        let rect = SampleRect {
            x0: 2,
            y0: 2,
            x1: 6,
            y1: 3,
        };
        assert!(matches!(
            average_color(&split_frame(), &rect),
            Err(SamplingError::InvalidRegion { .. })
        ));
    }

    #[test]
    fn test_empty_window_is_invalid() {
        let rect = SampleRect {
            x0: 2,
            y0: 2,
            x1: 2,
            y1: 3,
        };
        assert!(average_color(&split_frame(), &rect).is_err());
    }

    #[test]
    fn test_around_interior_point() {
        let rect = SampleRect::around(Point::new(50.0, 40.0), 5, 3, 100, 100).unwrap();
        assert_eq!(
            rect,
            SampleRect {
                x0: 45,
                y0: 37,
                x1: 56,
                y1: 44
            }
        );
        assert_eq!((rect.width(), rect.height()), (11, 7));
    }

    #[test]
    fn test_around_clamps_at_edges() {
        let rect = SampleRect::around(Point::new(1.0, 98.5), 5, 5, 100, 100).unwrap();
        assert_eq!(rect.x0, 0);
        assert_eq!(rect.y1, 100);
    }

    #[rstest]
    #[case::far_left(Point::new(-20.0, 50.0))]
    #[case::far_below(Point::new(50.0, 130.0))]
    #[case::nan(Point::new(f64::NAN, 50.0))]
    fn test_around_outside_frame(#[case] center: Point) {
        assert!(SampleRect::around(center, 5, 5, 100, 100).is_none());
    }
}
