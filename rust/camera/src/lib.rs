// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Camera geometry for AR measurement
//!
//! Reorients native sensor intrinsics for portrait stills, samples depth
//! across the sensor/output rotation and turns two picked points into a
//! real-world distance.

pub mod depth;
pub mod distance;
pub mod error;
pub mod intrinsics;
pub mod measurement;

pub use depth::{output_to_native, DepthConfig, DepthMap, DepthSample, DepthSampler};
pub use distance::{
    pixel_distance, DistanceCalculator, DistanceConfig, DistanceEstimate, DistanceMethod, MeasurementFrame,
    ReferencePlane,
};
pub use error::{Error, Result};
pub use intrinsics::{to_output_orientation, CameraIntrinsics, CaptureGeometry, ImageSize};
pub use measurement::{Measurement, MeasurementEndpoint};
