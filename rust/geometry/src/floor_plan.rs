// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor plan regeneration pipeline
//!
//! Runs projection, corner joining and bounds computation over a fresh
//! snapshot of anchors. Nothing is retained between calls.

use crate::bounds::{compute_bounds, segment_extent};
use crate::corners::reconstruct_corners;
use crate::joiner::join_corners;
use crate::plane::{PlaneClassifier, WorldPlane};
use crate::projector::project_planes;
use crate::types::{CornerCandidate, FloorPlanConfig, FloorPlanResult, RoomSummary, WallSegment};

/// Builds [`FloorPlanResult`]s from wall anchors
#[derive(Debug, Clone, Default)]
pub struct FloorPlanBuilder {
    config: FloorPlanConfig,
}

impl FloorPlanBuilder {
    pub fn new(config: FloorPlanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FloorPlanConfig {
        &self.config
    }

    /// Regenerate the floor plan from a snapshot of anchors
    ///
    /// When `corners` is `None` the corner candidates are reconstructed from
    /// the projected walls. Doors and windows are projected but not joined.
    pub fn regenerate<C: PlaneClassifier + ?Sized>(
        &self,
        planes: &[WorldPlane],
        classifier: &C,
        corners: Option<&[CornerCandidate]>,
    ) -> FloorPlanResult {
        let projected = project_planes(planes, classifier, &self.config);

        let walls = match corners {
            Some(corners) => join_corners(&projected.walls, corners, &self.config),
            None => {
                let reconstructed = reconstruct_corners(&projected.walls, &self.config);
                join_corners(&projected.walls, &reconstructed, &self.config)
            }
        };

        let room = room_summary(&walls, projected.doors.len(), projected.windows.len());
        let mut plan = FloorPlanResult {
            walls,
            doors: projected.doors,
            windows: projected.windows,
            bounds: Default::default(),
            room,
        };
        plan.bounds = compute_bounds(plan.all_segments(), self.config.bounds_padding);

        tracing::debug!(
            planes = planes.len(),
            walls = plan.walls.len(),
            doors = plan.doors.len(),
            windows = plan.windows.len(),
            "Regenerated floor plan"
        );
        plan
    }
}

/// Room dimensions from the unpadded wall extent, `None` without walls
pub fn room_summary(walls: &[WallSegment], door_count: usize, window_count: usize) -> Option<RoomSummary> {
    let extent = segment_extent(walls)?;
    let height = walls.iter().map(|w| w.height_meters).fold(0.0, f64::max);

    Some(RoomSummary {
        width: extent.width(),
        length: extent.height(),
        height,
        wall_count: walls.len(),
        door_count,
        window_count,
    })
}
