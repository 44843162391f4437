// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Top-down projection of vertical wall anchors

use crate::plane::{PlaneClassifier, WorldPlane};
use crate::types::{Classification, FloorPlanConfig, Point2D, WallSegment};
use nalgebra::Vector2;

/// Projected segments bucketed by classification, input order preserved
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectedSegments {
    pub walls: Vec<WallSegment>,
    pub doors: Vec<WallSegment>,
    pub windows: Vec<WallSegment>,
}

impl ProjectedSegments {
    pub fn len(&self) -> usize {
        self.walls.len() + self.doors.len() + self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Project a single anchor onto the floor plane
///
/// Returns `None` for horizontal anchors, anchors whose local X axis is
/// (nearly) vertical, and anchors without horizontal extent.
pub fn project_plane(
    plane: &WorldPlane,
    classification: Classification,
    config: &FloorPlanConfig,
) -> Option<WallSegment> {
    if !plane.is_vertical() {
        return None;
    }

    let translation = plane.transform.translation();
    let center = Point2D::new(translation.x, translation.z);

    let axis = plane.transform.local_x_axis();
    let axis = Vector2::new(axis.x, axis.z);
    let magnitude = axis.norm();
    if magnitude < config.axis_epsilon {
        tracing::debug!(id = %plane.id, magnitude, "Skipping anchor with degenerate horizontal axis");
        return None;
    }
    let axis = axis / magnitude;

    let extent = plane.extent_x as f64;
    if extent <= 0.0 || !extent.is_finite() {
        tracing::debug!(id = %plane.id, extent, "Skipping anchor without horizontal extent");
        return None;
    }
    let half_extent = extent / 2.0;

    Some(WallSegment {
        start: center.offset(&axis, -half_extent),
        end: center.offset(&axis, half_extent),
        thickness: config.default_wall_thickness,
        classification,
        width_meters: extent,
        height_meters: plane.extent_z as f64,
        plane_id: Some(plane.id.clone()),
    })
}

/// Project vertical anchors into wall, door and window segments
pub fn project_planes<C: PlaneClassifier + ?Sized>(
    planes: &[WorldPlane],
    classifier: &C,
    config: &FloorPlanConfig,
) -> ProjectedSegments {
    let mut out = ProjectedSegments::default();

    for plane in planes.iter().filter(|p| p.is_vertical()) {
        let Some(classification) = classifier.classify(plane).classification() else {
            continue;
        };
        let Some(segment) = project_plane(plane, classification, config) else {
            continue;
        };
        match classification {
            Classification::Wall => out.walls.push(segment),
            Classification::Door => out.doors.push(segment),
            Classification::Window => out.windows.push(segment),
        }
    }

    out
}
