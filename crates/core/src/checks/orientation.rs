use crate::shared::constants::MAX_LEVEL_SLOPE;
use crate::shared::geometry::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Straight,
    Tilted,
}

/// Classifies head roll from the line joining the two eye centroids.
///
/// `Straight` iff `|slope| < 0.1`. A vertical eye line (equal x) has an
/// infinite slope and classifies as `Tilted`, as do empty point sets.
pub fn estimate_orientation(left_eye: &[Point], right_eye: &[Point]) -> Orientation {
    let left = Point::centroid(left_eye);
    let right = Point::centroid(right_eye);
    let slope = (right.y - left.y) / (right.x - left.x);

    if slope.abs() < MAX_LEVEL_SLOPE {
        Orientation::Straight
    } else {
        Orientation::Tilted
    }
}
