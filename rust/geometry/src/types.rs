// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for floor plan reconstruction

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// A 2D top-down point in meters (x = world x, y = world z)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(&self, other: &Point2D) -> Point2D {
        Point2D::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub(crate) fn offset(&self, direction: &Vector2<f64>, amount: f64) -> Point2D {
        Point2D::new(self.x + direction.x * amount, self.y + direction.y * amount)
    }
}

/// What a vertical anchor represents in the floor plan
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Wall,
    Door,
    Window,
}

/// Top-down wall, door or window segment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WallSegment {
    pub start: Point2D,
    pub end: Point2D,
    /// Drawn thickness in meters
    pub thickness: f64,
    pub classification: Classification,
    /// Horizontal extent of the owning anchor
    pub width_meters: f64,
    /// Vertical extent of the owning anchor
    pub height_meters: f64,
    /// Owning anchor id. Only used to match corner candidates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plane_id: Option<String>,
}

impl WallSegment {
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn midpoint(&self) -> Point2D {
        self.start.midpoint(&self.end)
    }

    /// Unit direction from `start` to `end`, `None` when the segment collapsed
    pub fn direction(&self) -> Option<Vector2<f64>> {
        let d = Vector2::new(self.end.x - self.start.x, self.end.y - self.start.y);
        let len = d.norm();
        if len < f64::EPSILON {
            None
        } else {
            Some(d / len)
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    pub(crate) fn endpoint(&self, which: Endpoint) -> Point2D {
        match which {
            Endpoint::Start => self.start,
            Endpoint::End => self.end,
        }
    }

    pub(crate) fn set_endpoint(&mut self, which: Endpoint, p: Point2D) {
        match which {
            Endpoint::Start => self.start = p,
            Endpoint::End => self.end = p,
        }
    }
}

/// Segment endpoint role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Endpoint {
    Start,
    End,
}

/// Detected or reconstructed intersection of two wall anchors
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CornerCandidate {
    pub position: Point2D,
    pub plane_id_a: String,
    pub plane_id_b: String,
    /// Angle between the two walls in degrees
    pub angle: f64,
}

impl CornerCandidate {
    pub fn new(position: Point2D, plane_id_a: impl Into<String>, plane_id_b: impl Into<String>, angle: f64) -> Self {
        Self {
            position,
            plane_id_a: plane_id_a.into(),
            plane_id_b: plane_id_b.into(),
            angle,
        }
    }

    pub fn involves(&self, plane_id: &str) -> bool {
        self.plane_id_a == plane_id || self.plane_id_b == plane_id
    }
}

/// Axis-aligned rectangle in top-down meters
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Rect {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn contains(&self, p: &Point2D) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

/// Aggregate dimensions of the reconstructed room
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub width: f64,
    pub length: f64,
    pub height: f64,
    pub wall_count: usize,
    pub door_count: usize,
    pub window_count: usize,
}

/// Complete floor plan, rebuilt from scratch on every regeneration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FloorPlanResult {
    pub walls: Vec<WallSegment>,
    pub doors: Vec<WallSegment>,
    pub windows: Vec<WallSegment>,
    pub bounds: Rect,
    pub room: Option<RoomSummary>,
}

impl FloorPlanResult {
    pub fn is_empty(&self) -> bool {
        self.walls.is_empty() && self.doors.is_empty() && self.windows.is_empty()
    }

    /// Walls, doors and windows in that order
    pub fn all_segments(&self) -> impl Iterator<Item = &WallSegment> {
        self.walls.iter().chain(self.doors.iter()).chain(self.windows.iter())
    }
}

/// Tunables for floor plan reconstruction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FloorPlanConfig {
    /// Maximum endpoint-to-corner distance for snapping (meters)
    pub snap_threshold: f64,
    /// Upper bound (exclusive) for joining nearby endpoints (meters)
    pub proximity_threshold: f64,
    /// Lower bound (exclusive) below which endpoints already coincide (meters)
    pub join_epsilon: f64,
    /// Minimum horizontal axis magnitude for a projectable anchor
    pub axis_epsilon: f64,
    /// Padding added on every side of the bounds (meters)
    pub bounds_padding: f64,
    /// Thickness assigned to projected segments (meters)
    pub default_wall_thickness: f64,
    /// Maximum distance from a reconstructed corner to both segments' endpoints
    pub corner_max_gap: f64,
    /// Minimum angle between two walls to reconstruct a corner (degrees)
    pub min_corner_angle_deg: f64,
}

impl Default for FloorPlanConfig {
    fn default() -> Self {
        Self {
            snap_threshold: 0.5,
            proximity_threshold: 0.3,
            join_epsilon: 0.001,
            axis_epsilon: 1e-6,
            bounds_padding: 0.5,
            default_wall_thickness: 0.1,
            corner_max_gap: 0.5,
            min_corner_angle_deg: 30.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_direction() {
        let seg = WallSegment {
            start: Point2D::new(0.0, 0.0),
            end: Point2D::new(0.0, 2.0),
            thickness: 0.1,
            classification: Classification::Wall,
            width_meters: 2.0,
            height_meters: 2.5,
            plane_id: None,
        };
        let dir = seg.direction().unwrap();
        assert_eq!(dir.x, 0.0);
        assert_eq!(dir.y, 1.0);
        assert_eq!(seg.length(), 2.0);
    }

    #[test]
    fn test_classification_serializes_lowercase() {
        let json = serde_json::to_string(&Classification::Window).unwrap();
        assert_eq!(json, "\"window\"");
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let config: FloorPlanConfig = serde_json::from_str(r#"{"snap_threshold": 0.25}"#).unwrap();
        assert_eq!(config.snap_threshold, 0.25);
        assert_eq!(config.bounds_padding, FloorPlanConfig::default().bounds_padding);
    }
}
