// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar homographies from four point correspondences

use crate::quad::Quad;
use nalgebra::{Matrix3, Point2, SMatrix, SVector, Vector3};

/// Homogeneous weights below this are treated as points at infinity
const W_EPSILON: f64 = 1e-12;

/// 3x3 projective transform with `H[(2, 2)] = 1`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Homography(pub Matrix3<f64>);

impl Homography {
    /// Exact DLT for four correspondences, `dst ~ H · src`
    ///
    /// Returns `None` when the correspondences do not determine a unique
    /// transform, e.g. three collinear source points.
    pub fn from_correspondences(src: &[Point2<f64>; 4], dst: &[Point2<f64>; 4]) -> Option<Self> {
        let mut a = SMatrix::<f64, 8, 8>::zeros();
        let mut b = SVector::<f64, 8>::zeros();

        for (i, (s, d)) in src.iter().zip(dst.iter()).enumerate() {
            let (x, y, u, v) = (s.x, s.y, d.x, d.y);
            let r0 = 2 * i;
            let r1 = 2 * i + 1;

            a[(r0, 0)] = x;
            a[(r0, 1)] = y;
            a[(r0, 2)] = 1.0;
            a[(r0, 6)] = -u * x;
            a[(r0, 7)] = -u * y;
            b[r0] = u;

            a[(r1, 3)] = x;
            a[(r1, 4)] = y;
            a[(r1, 5)] = 1.0;
            a[(r1, 6)] = -v * x;
            a[(r1, 7)] = -v * y;
            b[r1] = v;
        }

        let h = a.lu().solve(&b)?;
        if h.iter().any(|v| !v.is_finite()) {
            return None;
        }

        Some(Self(Matrix3::new(h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], 1.0)))
    }

    /// Maps the canonical corners of `quad` onto a `width` x `height` rectangle
    pub fn quad_to_rect(quad: &Quad, width: u32, height: u32) -> Option<Self> {
        let (w, h) = (width as f64, height as f64);
        let rect = [
            Point2::new(0.0, 0.0),
            Point2::new(w, 0.0),
            Point2::new(w, h),
            Point2::new(0.0, h),
        ];
        Self::from_correspondences(&quad.canonical().corners, &rect)
    }

    pub fn apply(&self, p: &Point2<f64>) -> Option<Point2<f64>> {
        let q = self.0 * Vector3::new(p.x, p.y, 1.0);
        if q.z.abs() < W_EPSILON {
            return None;
        }
        Some(Point2::new(q.x / q.z, q.y / q.z))
    }

    pub fn inverse(&self) -> Option<Self> {
        let inv = self.0.try_inverse()?;
        let scale = inv[(2, 2)];
        if scale.abs() < W_EPSILON {
            return Some(Self(inv));
        }
        Some(Self(inv / scale))
    }

    /// Row-major coefficients, the layout `imageproc` projections take
    pub fn to_row_major_f32(&self) -> [f32; 9] {
        let m = &self.0;
        [
            m[(0, 0)] as f32,
            m[(0, 1)] as f32,
            m[(0, 2)] as f32,
            m[(1, 0)] as f32,
            m[(1, 1)] as f32,
            m[(1, 2)] as f32,
            m[(2, 0)] as f32,
            m[(2, 1)] as f32,
            m[(2, 2)] as f32,
        ]
    }
}
