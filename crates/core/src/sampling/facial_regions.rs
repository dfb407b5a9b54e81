//! Skin sample points derived from 68-point landmarks.

use std::fmt;

use crate::detection::domain::face_landmarks::FaceLandmarks;
use crate::sampling::sampling_error::SamplingError;
use crate::shared::constants::{CHEEK_INSET, CHEEK_LIFT, FOREHEAD_LIFT, UNDER_EYE_DROP};
use crate::shared::geometry::Point;

/// Inner ends of the two eyebrows.
const LEFT_BROW_INNER: usize = 21;
const RIGHT_BROW_INNER: usize = 22;
/// Lower eyelid points.
const LEFT_LOWER_LID: usize = 41;
const RIGHT_LOWER_LID: usize = 46;
/// Jaw outline points level with the cheekbones.
const LEFT_JAW_CHEEK: usize = 3;
const RIGHT_JAW_CHEEK: usize = 13;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FacialRegion {
    MiddleForehead,
    LeftUnderEye,
    RightUnderEye,
    LeftCheek,
    RightCheek,
}

impl FacialRegion {
    pub const ALL: &[FacialRegion] = &[
        FacialRegion::MiddleForehead,
        FacialRegion::LeftUnderEye,
        FacialRegion::RightUnderEye,
        FacialRegion::LeftCheek,
        FacialRegion::RightCheek,
    ];
}

impl fmt::Display for FacialRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FacialRegion::MiddleForehead => "middle-forehead",
            FacialRegion::LeftUnderEye => "left-under-eye",
            FacialRegion::RightUnderEye => "right-under-eye",
            FacialRegion::LeftCheek => "left-cheek",
            FacialRegion::RightCheek => "right-cheek",
        };
        f.write_str(name)
    }
}

/// One value per facial region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionMap<T = Point> {
    pub middle_forehead: T,
    pub left_under_eye: T,
    pub right_under_eye: T,
    pub left_cheek: T,
    pub right_cheek: T,
}

impl<T> RegionMap<T> {
    pub fn get(&self, region: FacialRegion) -> &T {
        match region {
            FacialRegion::MiddleForehead => &self.middle_forehead,
            FacialRegion::LeftUnderEye => &self.left_under_eye,
            FacialRegion::RightUnderEye => &self.right_under_eye,
            FacialRegion::LeftCheek => &self.left_cheek,
            FacialRegion::RightCheek => &self.right_cheek,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (FacialRegion, &T)> + '_ {
        FacialRegion::ALL.iter().map(move |&r| (r, self.get(r)))
    }

    /// Applies `f` to every region in `FacialRegion::ALL` order, stopping
    /// at the first error.
    pub fn try_map<U, E>(
        &self,
        mut f: impl FnMut(FacialRegion, &T) -> Result<U, E>,
    ) -> Result<RegionMap<U>, E> {
        Ok(RegionMap {
            middle_forehead: f(FacialRegion::MiddleForehead, &self.middle_forehead)?,
            left_under_eye: f(FacialRegion::LeftUnderEye, &self.left_under_eye)?,
            right_under_eye: f(FacialRegion::RightUnderEye, &self.right_under_eye)?,
            left_cheek: f(FacialRegion::LeftCheek, &self.left_cheek)?,
            right_cheek: f(FacialRegion::RightCheek, &self.right_cheek)?,
        })
    }
}

/// Computes the five sample points from landmark geometry, in the
/// landmarks' own coordinate space.
pub fn derive_regions(landmarks: Option<&FaceLandmarks>) -> Result<RegionMap, SamplingError> {
    let lm = landmarks.ok_or(SamplingError::MissingLandmarks)?;

    let brow_mid = lm.point(LEFT_BROW_INNER).midpoint(lm.point(RIGHT_BROW_INNER));

    Ok(RegionMap {
        middle_forehead: brow_mid.offset(0.0, -FOREHEAD_LIFT),
        left_under_eye: lm.point(LEFT_LOWER_LID).offset(0.0, UNDER_EYE_DROP),
        right_under_eye: lm.point(RIGHT_LOWER_LID).offset(0.0, UNDER_EYE_DROP),
        left_cheek: lm.point(LEFT_JAW_CHEEK).offset(CHEEK_INSET, -CHEEK_LIFT),
        right_cheek: lm.point(RIGHT_JAW_CHEEK).offset(-CHEEK_INSET, -CHEEK_LIFT),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::face_landmarks::tests::indexed_landmarks;
    use approx::assert_relative_eq;

    #[test]
    fn test_missing_landmarks() {
        assert_eq!(derive_regions(None), Err(SamplingError::MissingLandmarks));
    }

    #[test]
    fn test_forehead_above_inner_brows() {
        // Points 21 and 22 sit at (121, 242) and (122, 244).
        let regions = derive_regions(Some(&indexed_landmarks())).unwrap();
        assert_relative_eq!(regions.middle_forehead.x, 121.5);
        assert_relative_eq!(regions.middle_forehead.y, 243.0 - FOREHEAD_LIFT);
    }

    #[test]
    fn test_under_eyes_below_lower_lids() {
        let lm = indexed_landmarks();
        let regions = derive_regions(Some(&lm)).unwrap();
        assert_eq!(regions.left_under_eye, lm.point(41).offset(0.0, UNDER_EYE_DROP));
        assert_eq!(regions.right_under_eye, lm.point(46).offset(0.0, UNDER_EYE_DROP));
    }

    #[test]
    fn test_cheeks_inset_from_jaw() {
        let lm = indexed_landmarks();
        let regions = derive_regions(Some(&lm)).unwrap();
        assert_relative_eq!(regions.left_cheek.x, lm.point(3).x + CHEEK_INSET);
        assert_relative_eq!(regions.right_cheek.x, lm.point(13).x - CHEEK_INSET);
        assert_relative_eq!(regions.left_cheek.y, lm.point(3).y - CHEEK_LIFT);
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let lm = indexed_landmarks();
        assert_eq!(derive_regions(Some(&lm)), derive_regions(Some(&lm)));
    }

    #[test]
    fn test_iter_follows_all_order() {
        let regions = derive_regions(Some(&indexed_landmarks())).unwrap();
        let names: Vec<_> = regions.iter().map(|(r, _)| r).collect();
        assert_eq!(names, FacialRegion::ALL);
        assert_eq!(*regions.get(FacialRegion::RightCheek), regions.right_cheek);
    }

    #[test]
    fn test_try_map_stops_at_first_error() {
        let regions = derive_regions(Some(&indexed_landmarks())).unwrap();
        let mut visited = Vec::new();
        let result: Result<RegionMap<f64>, FacialRegion> = regions.try_map(|r, p| {
            visited.push(r);
            if r == FacialRegion::RightUnderEye {
                Err(r)
            } else {
                Ok(p.x)
            }
        });
        assert_eq!(result, Err(FacialRegion::RightUnderEye));
        assert_eq!(visited.len(), 3);
    }

    #[test]
    fn test_region_names() {
        assert_eq!(FacialRegion::MiddleForehead.to_string(), "middle-forehead");
        assert_eq!(FacialRegion::LeftCheek.to_string(), "left-cheek");
    }
}
