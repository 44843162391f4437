// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Corner snapping and proximity joining of wall segments
//!
//! Two passes run back to back, each over its own working buffer:
//!
//! 1. **Snapping**: every corner candidate pulls the nearer endpoint of each
//!    segment owned by one of its two anchors onto the corner, if that endpoint
//!    is within `snap_threshold`.
//! 2. **Joining**: every unordered segment pair `(i, j)`, `i < j`, merges each
//!    endpoint pairing whose distance lies strictly inside
//!    `(join_epsilon, proximity_threshold)` to the shared midpoint.
//!
//! Joining is a single pass, not a fixed point. A cluster of three or more
//! nearby endpoints may be left partially joined depending on segment order.

use crate::types::{CornerCandidate, Endpoint, FloorPlanConfig, WallSegment};
use rustc_hash::FxHashMap;

/// Endpoint pairings evaluated for every segment pair, in order
const PAIRINGS: [(Endpoint, Endpoint); 4] = [
    (Endpoint::End, Endpoint::Start),
    (Endpoint::Start, Endpoint::End),
    (Endpoint::End, Endpoint::End),
    (Endpoint::Start, Endpoint::Start),
];

/// Run snapping then joining, dropping segments that collapsed to a point
pub fn join_corners(
    walls: &[WallSegment],
    corners: &[CornerCandidate],
    config: &FloorPlanConfig,
) -> Vec<WallSegment> {
    let snapped = snap_to_corners(walls, corners, config.snap_threshold);
    let joined = join_nearby_endpoints(&snapped, config.join_epsilon, config.proximity_threshold);

    let before = joined.len();
    let result: Vec<_> = joined.into_iter().filter(|s| !s.is_degenerate()).collect();
    if result.len() != before {
        tracing::debug!(dropped = before - result.len(), "Dropped collapsed wall segments");
    }
    result
}

/// Phase 1: snap segment endpoints onto matching corner candidates
pub fn snap_to_corners(
    walls: &[WallSegment],
    corners: &[CornerCandidate],
    snap_threshold: f64,
) -> Vec<WallSegment> {
    let mut working = walls.to_vec();

    let mut by_plane: FxHashMap<&str, Vec<usize>> = FxHashMap::default();
    for (i, wall) in walls.iter().enumerate() {
        if let Some(id) = wall.plane_id.as_deref() {
            by_plane.entry(id).or_default().push(i);
        }
    }

    let mut snaps = 0usize;
    for corner in corners {
        let mut matching: Vec<usize> = [corner.plane_id_a.as_str(), corner.plane_id_b.as_str()]
            .iter()
            .filter_map(|id| by_plane.get(id))
            .flatten()
            .copied()
            .collect();
        matching.sort_unstable();
        matching.dedup();

        for i in matching {
            let segment = &mut working[i];
            let to_start = segment.start.distance_to(&corner.position);
            let to_end = segment.end.distance_to(&corner.position);
            let (which, distance) = if to_start <= to_end {
                (Endpoint::Start, to_start)
            } else {
                (Endpoint::End, to_end)
            };

            if distance < snap_threshold {
                segment.set_endpoint(which, corner.position);
                snaps += 1;
            }
        }
    }

    tracing::debug!(corners = corners.len(), snaps, "Snapped wall endpoints to corners");
    working
}

/// Phase 2: merge nearby endpoints of different segments to their midpoint
pub fn join_nearby_endpoints(
    walls: &[WallSegment],
    epsilon: f64,
    proximity_threshold: f64,
) -> Vec<WallSegment> {
    let mut working = walls.to_vec();
    let mut joins = 0usize;

    let len = working.len();
    for i in 0..len {
        for j in (i + 1)..len {
            let (head, tail) = working.split_at_mut(j);
            let a = &mut head[i];
            let b = &mut tail[0];

            for (role_a, role_b) in PAIRINGS {
                let pa = a.endpoint(role_a);
                let pb = b.endpoint(role_b);
                let distance = pa.distance_to(&pb);
                if distance > epsilon && distance < proximity_threshold {
                    let mid = pa.midpoint(&pb);
                    a.set_endpoint(role_a, mid);
                    b.set_endpoint(role_b, mid);
                    joins += 1;
                }
            }
        }
    }

    tracing::debug!(segments = working.len(), joins, "Joined nearby wall endpoints");
    working
}
