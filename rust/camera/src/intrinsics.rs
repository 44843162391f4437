// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pinhole intrinsics and their reorientation for portrait output images
//!
//! The sensor reports intrinsics for its native landscape buffer. Captured
//! stills are delivered rotated by 90° into portrait, so any point projected
//! into (or back-projected from) the still must use the rotated intrinsics
//! from [`to_output_orientation`]. The live preview's display transform uses
//! a different viewport convention and must not be used for stills.

use nalgebra::{Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Pinhole camera parameters in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    pub fx: f64,
    pub fy: f64,
    pub cx: f64,
    pub cy: f64,
}

impl CameraIntrinsics {
    pub fn new(fx: f64, fy: f64, cx: f64, cy: f64) -> Self {
        Self { fx, fy, cx, cy }
    }

    /// Intrinsics for the same image resampled by `(sx, sy)`
    pub fn scaled(&self, sx: f64, sy: f64) -> Self {
        Self {
            fx: self.fx * sx,
            fy: self.fy * sy,
            cx: self.cx * sx,
            cy: self.cy * sy,
        }
    }

    /// Camera-space ray through `pixel`, normalized to `z = 1`
    pub fn ray(&self, pixel: &Point2<f64>) -> Vector3<f64> {
        Vector3::new((pixel.x - self.cx) / self.fx, (pixel.y - self.cy) / self.fy, 1.0)
    }

    /// Camera-space point at `depth` meters along the ray through `pixel`
    pub fn back_project(&self, pixel: &Point2<f64>, depth: f64) -> Point3<f64> {
        Point3::from(self.ray(pixel) * depth)
    }

    /// Pixel coordinates of a camera-space point
    pub fn project(&self, point: &Point3<f64>) -> Option<Point2<f64>> {
        if point.z <= 0.0 {
            return None;
        }
        Some(Point2::new(
            self.fx * point.x / point.z + self.cx,
            self.fy * point.y / point.z + self.cy,
        ))
    }
}

/// Image dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Dimensions after a 90° rotation
    pub fn rotated(&self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Pixel position of a normalized `[0, 1]²` point
    pub fn to_pixel(&self, normalized: &Point2<f64>) -> Point2<f64> {
        Point2::new(normalized.x * self.width as f64, normalized.y * self.height as f64)
    }
}

/// Rotate native landscape intrinsics into the portrait output orientation
///
/// `native_width` is the width of the landscape buffer the intrinsics were
/// reported for.
pub fn to_output_orientation(native: &CameraIntrinsics, native_width: f64) -> CameraIntrinsics {
    CameraIntrinsics {
        fx: native.fy,
        fy: native.fx,
        cx: native.cy,
        cy: native_width - native.cx,
    }
}

/// Intrinsics of a capture together with the buffer they describe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaptureGeometry {
    /// Intrinsics in the native landscape orientation
    pub intrinsics: CameraIntrinsics,
    /// Native landscape buffer size
    pub native_size: ImageSize,
}

impl CaptureGeometry {
    pub fn new(intrinsics: CameraIntrinsics, native_size: ImageSize) -> Self {
        Self { intrinsics, native_size }
    }

    /// Intrinsics valid for a portrait output image of `output_size`
    ///
    /// The rotated intrinsics describe an image of the native size rotated by
    /// 90°; they are rescaled when the output was resampled.
    pub fn output_intrinsics(&self, output_size: ImageSize) -> CameraIntrinsics {
        let rotated = to_output_orientation(&self.intrinsics, self.native_size.width as f64);
        let rotated_size = self.native_size.rotated();
        let sx = output_size.width as f64 / rotated_size.width.max(1) as f64;
        let sy = output_size.height as f64 / rotated_size.height.max(1) as f64;
        rotated.scaled(sx, sy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn native() -> CameraIntrinsics {
        CameraIntrinsics::new(1598.4, 1601.2, 959.7, 719.3)
    }

    #[test]
    fn test_rotation_swaps_focal_lengths() {
        let native = native();
        let rotated = to_output_orientation(&native, 1920.0);

        assert_eq!(rotated.fx, native.fy);
        assert_eq!(rotated.fy, native.fx);
        assert_eq!(rotated.cx, native.cy);
        assert_relative_eq!(rotated.cy, 1920.0 - 959.7);
    }

    #[test]
    fn test_output_intrinsics_rescale() {
        let capture = CaptureGeometry::new(native(), ImageSize::new(1920, 1440));

        let full = capture.output_intrinsics(ImageSize::new(1440, 1920));
        assert_eq!(full, to_output_orientation(&native(), 1920.0));

        let half = capture.output_intrinsics(ImageSize::new(720, 960));
        assert_relative_eq!(half.fx, native().fy / 2.0);
        assert_relative_eq!(half.fy, native().fx / 2.0);
        assert_relative_eq!(half.cx, native().cy / 2.0);
    }

    #[test]
    fn test_back_project_round_trip() {
        let k = native();
        let pixel = Point2::new(300.0, 1100.0);
        let p = k.back_project(&pixel, 2.25);

        assert_relative_eq!(p.z, 2.25);
        let back = k.project(&p).unwrap();
        assert_relative_eq!(back.x, pixel.x, epsilon = 1e-9);
        assert_relative_eq!(back.y, pixel.y, epsilon = 1e-9);
        assert!(k.project(&Point3::new(0.0, 0.0, -1.0)).is_none());
    }

    #[test]
    fn test_to_pixel_uses_actual_resolution() {
        let size = ImageSize::new(1440, 1920);
        let p = size.to_pixel(&Point2::new(0.5, 0.25));
        assert_eq!(p, Point2::new(720.0, 480.0));
    }
}
