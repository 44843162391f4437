// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Corner candidates reconstructed from wall segment intersections

use crate::types::{CornerCandidate, FloorPlanConfig, Point2D, WallSegment};

/// Intersect the carrier lines of every pair of walls owned by distinct anchors
///
/// A pair yields a corner when the walls meet at `min_corner_angle_deg` or
/// more and the intersection lies within `corner_max_gap` of an endpoint of
/// each wall. `angle` is the folded angle between the walls, in `[0, 90]`.
pub fn reconstruct_corners(walls: &[WallSegment], config: &FloorPlanConfig) -> Vec<CornerCandidate> {
    let mut corners = Vec::new();

    for (i, a) in walls.iter().enumerate() {
        for b in &walls[i + 1..] {
            let (Some(id_a), Some(id_b)) = (a.plane_id.as_deref(), b.plane_id.as_deref()) else {
                continue;
            };
            if id_a == id_b {
                continue;
            }
            let (Some(da), Some(db)) = (a.direction(), b.direction()) else {
                continue;
            };

            let angle = da.dot(&db).abs().clamp(0.0, 1.0).acos().to_degrees();
            if angle < config.min_corner_angle_deg {
                continue;
            }

            let cross = da.x * db.y - da.y * db.x;
            if cross.abs() < f64::EPSILON {
                continue;
            }
            let (dx, dy) = (b.start.x - a.start.x, b.start.y - a.start.y);
            let t = (dx * db.y - dy * db.x) / cross;
            let position = a.start.offset(&da, t);

            if nearest_endpoint_distance(a, &position) <= config.corner_max_gap
                && nearest_endpoint_distance(b, &position) <= config.corner_max_gap
            {
                corners.push(CornerCandidate::new(position, id_a, id_b, angle));
            }
        }
    }

    tracing::debug!(walls = walls.len(), corners = corners.len(), "Reconstructed corners");
    corners
}

fn nearest_endpoint_distance(segment: &WallSegment, p: &Point2D) -> f64 {
    segment.start.distance_to(p).min(segment.end.distance_to(p))
}
