use crate::detection::domain::detection::Detection;
use crate::detection::domain::face_landmarks::FaceLandmarks;
use crate::sampling::sampling_error::SamplingError;
use crate::shared::geometry::{BoundingBox, Point};

/// Proportionally maps a point from source-frame pixels to canvas pixels.
pub fn scale_to_canvas(
    point: Point,
    source_width: u32,
    source_height: u32,
    target_width: u32,
    target_height: u32,
) -> Result<Point, SamplingError> {
    if source_width == 0 || source_height == 0 {
        return Err(SamplingError::ZeroSourceDimension {
            width: source_width,
            height: source_height,
        });
    }
    let sx = target_width as f64 / source_width as f64;
    let sy = target_height as f64 / source_height as f64;
    Ok(Point::new(point.x * sx, point.y * sy))
}

/// Maps a whole detection (box and landmarks) from source-frame pixels to
/// canvas pixels, the space the guide and distance bands are defined in.
pub fn scale_detection_to_canvas(
    detection: &Detection,
    source_width: u32,
    source_height: u32,
    target_width: u32,
    target_height: u32,
) -> Result<Detection, SamplingError> {
    let scale = |p: Point| scale_to_canvas(p, source_width, source_height, target_width, target_height);

    let bbox = &detection.bounding_box;
    let origin = scale(Point::new(bbox.x, bbox.y))?;
    let far = scale(Point::new(bbox.x + bbox.width, bbox.y + bbox.height))?;
    let bounding_box = BoundingBox::new(origin.x, origin.y, far.x - origin.x, far.y - origin.y);

    let landmarks = match &detection.landmarks {
        None => None,
        Some(lm) => {
            let mut points = *lm.points();
            for p in points.iter_mut() {
                *p = scale(*p)?;
            }
            Some(FaceLandmarks::new(points))
        }
    };

    Ok(Detection::new(bounding_box, landmarks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::identity(640, 480, 640, 480, 100.0, 50.0)]
    #[case::upscale(640, 480, 1280, 960, 200.0, 100.0)]
    #[case::anisotropic(1280, 720, 720, 560, 56.25, 38.888_888_888_888_89)]
    fn test_scaling(
        #[case] sw: u32,
        #[case] sh: u32,
        #[case] tw: u32,
        #[case] th: u32,
        #[case] ex: f64,
        #[case] ey: f64,
    ) {
        let p = scale_to_canvas(Point::new(100.0, 50.0), sw, sh, tw, th).unwrap();
        assert_relative_eq!(p.x, ex, epsilon = 1e-9);
        assert_relative_eq!(p.y, ey, epsilon = 1e-9);
    }

    #[rstest]
    #[case(0, 480)]
    #[case(640, 0)]
    fn test_zero_source_dimension(#[case] sw: u32, #[case] sh: u32) {
        assert_eq!(
            scale_to_canvas(Point::new(1.0, 1.0), sw, sh, 720, 560),
            Err(SamplingError::ZeroSourceDimension {
                width: sw,
                height: sh
            })
        );
    }

    #[test]
    fn test_detection_box_scaled_into_display_space() {
        let face = Detection::new(BoundingBox::new(640.0, 180.0, 400.0, 360.0), None);
        let scaled = scale_detection_to_canvas(&face, 1280, 720, 720, 560).unwrap();
        let b = scaled.bounding_box;
        assert_relative_eq!(b.x, 360.0, epsilon = 1e-9);
        assert_relative_eq!(b.y, 140.0, epsilon = 1e-9);
        assert_relative_eq!(b.width, 225.0, epsilon = 1e-9);
        assert_relative_eq!(b.height, 280.0, epsilon = 1e-9);
        assert!(scaled.landmarks.is_none());
    }

    #[test]
    fn test_detection_landmarks_scaled_with_box() {
        use crate::detection::domain::face_landmarks::tests::indexed_landmarks;

        let face = Detection::new(BoundingBox::new(0.0, 0.0, 10.0, 10.0), Some(indexed_landmarks()));
        let scaled = scale_detection_to_canvas(&face, 360, 280, 720, 560).unwrap();
        let lm = scaled.landmarks.unwrap();
        assert_eq!(lm.point(0), Point::new(200.0, 400.0));
        assert_eq!(lm.point(67), Point::new(334.0, 668.0));
    }

    #[test]
    fn test_detection_zero_source_dimension() {
        let face = Detection::new(BoundingBox::new(0.0, 0.0, 10.0, 10.0), None);
        assert!(matches!(
            scale_detection_to_canvas(&face, 0, 0, 720, 560),
            Err(SamplingError::ZeroSourceDimension { .. })
        ));
    }

    #[test]
    fn test_zero_target_collapses_to_origin() {
        let p = scale_to_canvas(Point::new(100.0, 50.0), 640, 480, 0, 0).unwrap();
        assert_eq!(p, Point::new(0.0, 0.0));
    }
}
