// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor plan reconstruction from AR wall anchors
//!
//! This crate turns detected vertical plane anchors into a 2D top-down floor
//! plan:
//! 1. Project each wall anchor onto the floor plane as a segment
//! 2. Snap segment endpoints onto detected (or reconstructed) corners
//! 3. Join nearby endpoints that no corner accounted for
//! 4. Compute padded bounds and a room summary
//!
//! # Usage
//!
//! ```rust,ignore
//! use arlite_geometry::{parse_plane_records, records_from_json, FloorPlanBuilder, RecordClassification};
//!
//! let planes = parse_plane_records(&records_from_json(&json)?);
//! let plan = FloorPlanBuilder::default().regenerate(&planes, &RecordClassification, None);
//! ```

pub mod bounds;
pub mod corners;
pub mod error;
pub mod floor_plan;
pub mod joiner;
pub mod plane;
pub mod projector;
pub mod types;

pub use bounds::compute_bounds;
pub use corners::reconstruct_corners;
pub use error::{Error, Result};
pub use floor_plan::{room_summary, FloorPlanBuilder};
pub use joiner::{join_corners, join_nearby_endpoints, snap_to_corners};
pub use plane::{
    parse_plane_records, records_from_json, records_to_json, AnchorTransform, PlaneAlignment, PlaneClass,
    PlaneClassifier, PlaneRecord, RecordClassification, WorldPlane,
};
pub use projector::{project_plane, project_planes, ProjectedSegments};
pub use types::{
    Classification, CornerCandidate, FloorPlanConfig, FloorPlanResult, Point2D, Rect, RoomSummary, WallSegment,
};
