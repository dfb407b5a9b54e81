//! 68-point facial landmarks in the iBUG 300-W layout.
//!
//! Left/right follow the image (viewer) side, matching how detectors
//! report them: the "left eye" is the one with the smaller x.

use std::ops::Range;

use crate::shared::geometry::Point;

pub const LANDMARK_COUNT: usize = 68;

pub const JAW_OUTLINE: Range<usize> = 0..17;
pub const LEFT_EYEBROW: Range<usize> = 17..22;
pub const RIGHT_EYEBROW: Range<usize> = 22..27;
pub const NOSE: Range<usize> = 27..36;
pub const LEFT_EYE: Range<usize> = 36..42;
pub const RIGHT_EYE: Range<usize> = 42..48;
pub const MOUTH: Range<usize> = 48..68;

#[derive(Clone, Debug, PartialEq)]
pub struct FaceLandmarks {
    points: [Point; LANDMARK_COUNT],
}

impl FaceLandmarks {
    pub fn new(points: [Point; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Accepts detector output of unknown length; `None` unless exactly
    /// 68 points are present.
    pub fn from_slice(points: &[Point]) -> Option<Self> {
        let points: [Point; LANDMARK_COUNT] = points.try_into().ok()?;
        Some(Self { points })
    }

    pub fn points(&self) -> &[Point; LANDMARK_COUNT] {
        &self.points
    }

    pub fn point(&self, index: usize) -> Point {
        self.points[index]
    }

    pub fn jaw_outline(&self) -> &[Point] {
        &self.points[JAW_OUTLINE]
    }

    pub fn left_eyebrow(&self) -> &[Point] {
        &self.points[LEFT_EYEBROW]
    }

    pub fn right_eyebrow(&self) -> &[Point] {
        &self.points[RIGHT_EYEBROW]
    }

    pub fn nose(&self) -> &[Point] {
        &self.points[NOSE]
    }

    pub fn left_eye(&self) -> &[Point] {
        &self.points[LEFT_EYE]
    }

    pub fn right_eye(&self) -> &[Point] {
        &self.points[RIGHT_EYE]
    }

    pub fn mouth(&self) -> &[Point] {
        &self.points[MOUTH]
    }
}
