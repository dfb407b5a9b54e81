use serde::{Deserialize, Serialize};

use crate::shared::constants::{GUIDE_CENTER_X, GUIDE_CENTER_Y, GUIDE_RADIUS_X, GUIDE_RADIUS_Y};
use crate::shared::geometry::BoundingBox;

/// The on-screen oval a face must be centered in.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GuideEllipse {
    pub center_x: f64,
    pub center_y: f64,
    pub radius_x: f64,
    pub radius_y: f64,
}

impl Default for GuideEllipse {
    fn default() -> Self {
        Self {
            center_x: GUIDE_CENTER_X,
            center_y: GUIDE_CENTER_Y,
            radius_x: GUIDE_RADIUS_X,
            radius_y: GUIDE_RADIUS_Y,
        }
    }
}

impl GuideEllipse {
    pub fn contains(&self, bbox: &BoundingBox) -> bool {
        is_within_guide(
            bbox,
            self.center_x,
            self.center_y,
            self.radius_x,
            self.radius_y,
        )
    }
}

/// Whether the box center lies inside (or on) the guide ellipse.
///
/// Only the center is tested; box size plays no part.
pub fn is_within_guide(
    bbox: &BoundingBox,
    guide_center_x: f64,
    guide_center_y: f64,
    radius_x: f64,
    radius_y: f64,
) -> bool {
    let center = bbox.center();
    let nx = (center.x - guide_center_x) / radius_x;
    let ny = (center.y - guide_center_y) / radius_y;
    nx * nx + ny * ny <= 1.0
}
