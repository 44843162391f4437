// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall anchors and their flattened record format
//!
//! Anchors arrive from the sensor session (or from a saved scan) with a
//! 16-float world transform in column-major order: the local X axis occupies
//! indices 0..3 and the translation indices 12..15. The flattened array is
//! parsed into [`AnchorTransform`] here and nowhere else.

use crate::error::{Error, Result};
use crate::types::Classification;
use nalgebra::{Matrix4, Vector3};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Number of components in a flattened 4x4 transform
pub const TRANSFORM_LEN: usize = 16;

/// World transform of an anchor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorTransform {
    matrix: Matrix4<f32>,
}

impl AnchorTransform {
    pub fn new(matrix: Matrix4<f32>) -> Self {
        Self { matrix }
    }

    /// Parse a column-major flattened transform
    pub fn from_flat(values: &[f32]) -> Option<Self> {
        if values.len() != TRANSFORM_LEN {
            return None;
        }
        Some(Self {
            matrix: Matrix4::from_column_slice(values),
        })
    }

    /// Pure translation with an identity rotation
    pub fn from_translation(x: f32, y: f32, z: f32) -> Self {
        Self::new(Matrix4::new_translation(&Vector3::new(x, y, z)))
    }

    /// Translation plus a yaw about the vertical (Y) axis
    pub fn from_translation_yaw(x: f32, y: f32, z: f32, yaw: f32) -> Self {
        let rotation = Matrix4::from_axis_angle(&Vector3::y_axis(), yaw);
        Self::new(Matrix4::new_translation(&Vector3::new(x, y, z)) * rotation)
    }

    /// Column-major flattened form, the inverse of [`AnchorTransform::from_flat`]
    pub fn to_flat(&self) -> [f32; TRANSFORM_LEN] {
        let mut out = [0.0f32; TRANSFORM_LEN];
        out.copy_from_slice(self.matrix.as_slice());
        out
    }

    pub fn translation(&self) -> Vector3<f64> {
        let c = self.matrix.column(3);
        Vector3::new(c[0] as f64, c[1] as f64, c[2] as f64)
    }

    /// The anchor's local horizontal (X) axis in world space
    pub fn local_x_axis(&self) -> Vector3<f64> {
        let c = self.matrix.column(0);
        Vector3::new(c[0] as f64, c[1] as f64, c[2] as f64)
    }
}

/// Sensor-reported anchor orientation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlaneAlignment {
    Vertical,
    Horizontal,
}

/// Anchor classification, including anchors the floor plan ignores
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PlaneClass {
    Wall,
    Door,
    Window,
    Other,
}

impl PlaneClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaneClass::Wall => "wall",
            PlaneClass::Door => "door",
            PlaneClass::Window => "window",
            PlaneClass::Other => "other",
        }
    }

    /// Floor plan bucket, `None` for anchors that are dropped
    pub fn classification(&self) -> Option<Classification> {
        match self {
            PlaneClass::Wall => Some(Classification::Wall),
            PlaneClass::Door => Some(Classification::Door),
            PlaneClass::Window => Some(Classification::Window),
            PlaneClass::Other => None,
        }
    }
}

impl FromStr for PlaneClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "wall" => Ok(PlaneClass::Wall),
            "door" => Ok(PlaneClass::Door),
            "window" => Ok(PlaneClass::Window),
            "other" | "none" => Ok(PlaneClass::Other),
            _ => Err(Error::UnknownClassification(s.to_string())),
        }
    }
}

/// A detected plane anchor in world space
#[derive(Debug, Clone, PartialEq)]
pub struct WorldPlane {
    pub id: String,
    pub transform: AnchorTransform,
    /// Extent along the local X axis (meters)
    pub extent_x: f32,
    /// Extent along the local Z axis, the wall height for vertical anchors
    pub extent_z: f32,
    pub alignment: PlaneAlignment,
    /// Sensor-reported classification
    pub classification: PlaneClass,
}

impl WorldPlane {
    pub fn vertical(id: impl Into<String>, transform: AnchorTransform, extent_x: f32, extent_z: f32) -> Self {
        Self {
            id: id.into(),
            transform,
            extent_x,
            extent_z,
            alignment: PlaneAlignment::Vertical,
            classification: PlaneClass::Wall,
        }
    }

    pub fn with_classification(mut self, classification: PlaneClass) -> Self {
        self.classification = classification;
        self
    }

    pub fn is_vertical(&self) -> bool {
        self.alignment == PlaneAlignment::Vertical
    }

    /// Rebuild an anchor from its persisted record
    ///
    /// Records always describe vertical anchors.
    pub fn from_record(record: &PlaneRecord) -> Result<Self> {
        let transform =
            AnchorTransform::from_flat(&record.transform).ok_or_else(|| Error::InvalidTransformLength {
                id: record.id.clone(),
                len: record.transform.len(),
            })?;
        let classification = record.classification.parse()?;

        Ok(Self {
            id: record.id.clone(),
            transform,
            extent_x: record.extent_x,
            extent_z: record.extent_z,
            alignment: PlaneAlignment::Vertical,
            classification,
        })
    }

    pub fn to_record(&self) -> PlaneRecord {
        PlaneRecord {
            transform: self.transform.to_flat().to_vec(),
            extent_x: self.extent_x,
            extent_z: self.extent_z,
            classification: self.classification.as_str().to_string(),
            id: self.id.clone(),
        }
    }
}

/// Persisted/exchanged plane representation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaneRecord {
    pub transform: Vec<f32>,
    #[serde(rename = "extentX")]
    pub extent_x: f32,
    #[serde(rename = "extentZ")]
    pub extent_z: f32,
    pub classification: String,
    pub id: String,
}

/// Parse plane records, skipping malformed ones
pub fn parse_plane_records(records: &[PlaneRecord]) -> Vec<WorldPlane> {
    records
        .iter()
        .filter_map(|record| match WorldPlane::from_record(record) {
            Ok(plane) => Some(plane),
            Err(e) => {
                tracing::warn!(id = %record.id, error = %e, "Skipping malformed plane record");
                None
            }
        })
        .collect()
}

pub fn records_from_json(json: &str) -> Result<Vec<PlaneRecord>> {
    Ok(serde_json::from_str(json)?)
}

pub fn records_to_json(records: &[PlaneRecord]) -> Result<String> {
    Ok(serde_json::to_string(records)?)
}

/// Strategy deciding what a vertical anchor represents
pub trait PlaneClassifier {
    fn classify(&self, plane: &WorldPlane) -> PlaneClass;
}

impl<F> PlaneClassifier for F
where
    F: Fn(&WorldPlane) -> PlaneClass,
{
    fn classify(&self, plane: &WorldPlane) -> PlaneClass {
        self(plane)
    }
}

/// Classifier that trusts the classification reported with the anchor
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordClassification;

impl PlaneClassifier for RecordClassification {
    fn classify(&self, plane: &WorldPlane) -> PlaneClass {
        plane.classification
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(id: &str, transform: Vec<f32>) -> PlaneRecord {
        PlaneRecord {
            transform,
            extent_x: 3.5,
            extent_z: 2.4,
            classification: "door".into(),
            id: id.into(),
        }
    }

    #[test]
    fn test_flat_layout_indices() {
        let t = AnchorTransform::from_translation(2.0, 1.0, 3.0);
        let flat = t.to_flat();
        assert_eq!(flat[0], 1.0);
        assert_eq!(flat[2], 0.0);
        assert_eq!(flat[12], 2.0);
        assert_eq!(flat[13], 1.0);
        assert_eq!(flat[14], 3.0);
        assert_eq!(flat[15], 1.0);
    }

    #[test]
    fn test_record_round_trip_is_identical() {
        let plane = WorldPlane::vertical("a1", AnchorTransform::from_translation_yaw(0.3, 1.1, -2.7, 0.7), 3.25, 2.5)
            .with_classification(PlaneClass::Window);
        let record = plane.to_record();
        let json = records_to_json(std::slice::from_ref(&record)).unwrap();
        let parsed = records_from_json(&json).unwrap();
        assert_eq!(parsed[0], record);

        let rebuilt = WorldPlane::from_record(&parsed[0]).unwrap();
        assert_eq!(rebuilt, plane);
        assert_eq!(rebuilt.to_record(), record);
    }

    #[test]
    fn test_record_json_field_names() {
        let record = sample_record("x", AnchorTransform::from_translation(0.0, 0.0, 0.0).to_flat().to_vec());
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("extentX").is_some());
        assert!(json.get("extentZ").is_some());
        assert_eq!(json["classification"], "door");
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let good = AnchorTransform::from_translation(1.0, 0.0, 1.0).to_flat().to_vec();
        let records = vec![
            sample_record("ok-1", good.clone()),
            sample_record("short", vec![1.0; 12]),
            sample_record("ok-2", good),
        ];

        let planes = parse_plane_records(&records);
        let ids: Vec<_> = planes.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["ok-1", "ok-2"]);
    }

    #[test]
    fn test_wrong_length_error() {
        let err = WorldPlane::from_record(&sample_record("bad", vec![0.0; 9])).unwrap_err();
        assert!(matches!(err, Error::InvalidTransformLength { len: 9, .. }));
    }

    #[test]
    fn test_closure_classifier() {
        let plane = WorldPlane::vertical("w", AnchorTransform::from_translation(0.0, 0.0, 0.0), 1.0, 1.0);
        let classifier = |p: &WorldPlane| if p.extent_x < 1.5 { PlaneClass::Door } else { PlaneClass::Wall };
        assert_eq!(classifier.classify(&plane), PlaneClass::Door);
        assert_eq!(RecordClassification.classify(&plane), PlaneClass::Wall);
    }
}
