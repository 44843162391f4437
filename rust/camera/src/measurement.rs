// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Two-point world-space measurements
//!
//! The distance is captured once, when the measurement is created, and kept
//! through rigid moves of the whole measurement. Repositioning a single
//! endpoint recomputes it.

use nalgebra::{Isometry3, Point3, UnitQuaternion, Vector3};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementEndpoint {
    A,
    B,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    point_a: Point3<f64>,
    point_b: Point3<f64>,
    distance_meters: f64,
}

impl Measurement {
    /// Measurement with a distance computed elsewhere (e.g. depth-aware)
    pub fn new(point_a: Point3<f64>, point_b: Point3<f64>, distance_meters: f64) -> Self {
        Self {
            point_a,
            point_b,
            distance_meters,
        }
    }

    /// Measurement whose distance is the Euclidean distance between the points
    pub fn from_points(point_a: Point3<f64>, point_b: Point3<f64>) -> Self {
        Self::new(point_a, point_b, (point_b - point_a).norm())
    }

    pub fn point_a(&self) -> &Point3<f64> {
        &self.point_a
    }

    pub fn point_b(&self) -> &Point3<f64> {
        &self.point_b
    }

    pub fn distance_meters(&self) -> f64 {
        self.distance_meters
    }

    pub fn midpoint(&self) -> Point3<f64> {
        nalgebra::center(&self.point_a, &self.point_b)
    }

    /// Move both endpoints by `offset`; the distance is kept
    pub fn translate(&mut self, offset: &Vector3<f64>) {
        self.point_a += *offset;
        self.point_b += *offset;
    }

    /// Rotate both endpoints about `pivot`; the distance is kept
    pub fn rotate_about(&mut self, rotation: &UnitQuaternion<f64>, pivot: &Point3<f64>) {
        self.point_a = pivot + rotation * (self.point_a - pivot);
        self.point_b = pivot + rotation * (self.point_b - pivot);
    }

    /// Apply a rigid transform to both endpoints; the distance is kept
    pub fn transform_rigid(&mut self, isometry: &Isometry3<f64>) {
        self.point_a = isometry * self.point_a;
        self.point_b = isometry * self.point_b;
    }

    /// Move one endpoint and recompute the Euclidean distance
    pub fn reposition(&mut self, endpoint: MeasurementEndpoint, position: Point3<f64>) {
        self.set_endpoint(endpoint, position);
        self.distance_meters = (self.point_b - self.point_a).norm();
    }

    /// Move one endpoint, taking a freshly measured distance
    pub fn reposition_measured(&mut self, endpoint: MeasurementEndpoint, position: Point3<f64>, distance_meters: f64) {
        self.set_endpoint(endpoint, position);
        self.distance_meters = distance_meters;
    }

    fn set_endpoint(&mut self, endpoint: MeasurementEndpoint, position: Point3<f64>) {
        match endpoint {
            MeasurementEndpoint::A => self.point_a = position,
            MeasurementEndpoint::B => self.point_b = position,
        }
    }
}
