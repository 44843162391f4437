// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Real-world distance between two points of a captured still
//!
//! Points arrive normalized to the portrait output image. They are converted
//! to output pixels with the actual output resolution before anything else,
//! since normalized deltas are not distance-proportional on a non-square
//! image. With valid depth at both points each is back-projected through the
//! rotated intrinsics and the camera-space distance is returned. Otherwise the
//! camera rays are intersected with a reference plane, or placed at an assumed
//! depth when no usable plane is known.

use crate::depth::{DepthConfig, DepthMap, DepthSampler};
use crate::intrinsics::{CameraIntrinsics, CaptureGeometry, ImageSize};
use nalgebra::{Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// How a distance estimate was obtained, most to least precise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMethod {
    DepthAware,
    ReferencePlane,
    AssumedDepth,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceEstimate {
    pub meters: f64,
    pub method: DistanceMethod,
}

/// Plane `normal · X = offset` in camera space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferencePlane {
    pub normal: Vector3<f64>,
    pub offset: f64,
}

impl ReferencePlane {
    pub fn new(normal: Vector3<f64>, offset: f64) -> Self {
        Self { normal, offset }
    }

    /// Fronto-parallel plane `distance` meters in front of the camera
    pub fn fronto_parallel(distance: f64) -> Self {
        Self::new(Vector3::z(), distance)
    }

    /// Intersection of the camera ray `direction` with this plane
    pub fn intersect(&self, direction: &Vector3<f64>) -> Option<Point3<f64>> {
        let denom = self.normal.dot(direction);
        if denom.abs() < 1e-9 {
            return None;
        }
        let t = self.offset / denom;
        if !t.is_finite() || t <= 0.0 {
            return None;
        }
        Some(Point3::from(direction * t))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistanceConfig {
    pub depth: DepthConfig,
    /// Depth used when neither depth nor a reference plane is usable (meters)
    pub assumed_depth_m: f64,
}

impl Default for DistanceConfig {
    fn default() -> Self {
        Self {
            depth: DepthConfig::default(),
            assumed_depth_m: 1.5,
        }
    }
}

/// Everything known about the still two points were picked on
#[derive(Debug, Clone, Copy)]
pub struct MeasurementFrame<'a> {
    pub capture: CaptureGeometry,
    /// Pixel size of the portrait output image
    pub output_size: ImageSize,
    pub depth: Option<&'a DepthMap>,
    pub reference_plane: Option<ReferencePlane>,
}

impl<'a> MeasurementFrame<'a> {
    pub fn new(capture: CaptureGeometry, output_size: ImageSize) -> Self {
        Self {
            capture,
            output_size,
            depth: None,
            reference_plane: None,
        }
    }

    pub fn with_depth(mut self, depth: &'a DepthMap) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn with_reference_plane(mut self, plane: ReferencePlane) -> Self {
        self.reference_plane = Some(plane);
        self
    }
}

/// Euclidean distance in output pixels between two normalized points
pub fn pixel_distance(a: &Point2<f64>, b: &Point2<f64>, output_size: ImageSize) -> f64 {
    (output_size.to_pixel(a) - output_size.to_pixel(b)).norm()
}

#[derive(Debug, Clone, Default)]
pub struct DistanceCalculator {
    config: DistanceConfig,
    sampler: DepthSampler,
}

impl DistanceCalculator {
    pub fn new(config: DistanceConfig) -> Self {
        let sampler = DepthSampler::new(config.depth.clone());
        Self { config, sampler }
    }

    pub fn config(&self) -> &DistanceConfig {
        &self.config
    }

    /// Distance between two normalized output-space points
    ///
    /// Never fails; unusable depth silently selects a fallback, reported in
    /// [`DistanceEstimate::method`].
    pub fn measure(&self, a: &Point2<f64>, b: &Point2<f64>, frame: &MeasurementFrame<'_>) -> DistanceEstimate {
        let (pa, pb, method) = self.camera_points(a, b, frame);
        DistanceEstimate {
            meters: (pa - pb).norm(),
            method,
        }
    }

    /// Camera-space positions of both points and how they were obtained
    ///
    /// The intrinsics rotation (`cy' = W - cx`) and the depth lookup
    /// (`(y, 1 - x)`) turn in opposite senses. Depth for a pixel is therefore
    /// read at its mirror through the image centre, which only matters for
    /// non-uniform depth.
    pub fn camera_points(
        &self,
        a: &Point2<f64>,
        b: &Point2<f64>,
        frame: &MeasurementFrame<'_>,
    ) -> (Point3<f64>, Point3<f64>, DistanceMethod) {
        let intrinsics = frame.capture.output_intrinsics(frame.output_size);
        let pixel_a = frame.output_size.to_pixel(a);
        let pixel_b = frame.output_size.to_pixel(b);

        if let Some(depth) = frame.depth {
            let da = self.sampler.sample(a, depth);
            let db = self.sampler.sample(b, depth);
            if da.valid && db.valid {
                return (
                    intrinsics.back_project(&pixel_a, da.meters as f64),
                    intrinsics.back_project(&pixel_b, db.meters as f64),
                    DistanceMethod::DepthAware,
                );
            }
            tracing::debug!(valid_a = da.valid, valid_b = db.valid, "Depth unavailable, using fallback");
        }

        self.fallback_points(&intrinsics, &pixel_a, &pixel_b, frame.reference_plane.as_ref())
    }

    fn fallback_points(
        &self,
        intrinsics: &CameraIntrinsics,
        pixel_a: &Point2<f64>,
        pixel_b: &Point2<f64>,
        plane: Option<&ReferencePlane>,
    ) -> (Point3<f64>, Point3<f64>, DistanceMethod) {
        let ray_a = intrinsics.ray(pixel_a);
        let ray_b = intrinsics.ray(pixel_b);

        if let Some(plane) = plane {
            if let (Some(pa), Some(pb)) = (plane.intersect(&ray_a), plane.intersect(&ray_b)) {
                return (pa, pb, DistanceMethod::ReferencePlane);
            }
            tracing::debug!("Reference plane not hit by both rays, using assumed depth");
        }

        let depth = self.config.assumed_depth_m;
        (
            Point3::from(ray_a * depth),
            Point3::from(ray_b * depth),
            DistanceMethod::AssumedDepth,
        )
    }
}
