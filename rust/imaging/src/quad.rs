// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Quadrilateral corner selections in source image pixel coordinates

use nalgebra::Point2;

/// Turning below this magnitude counts as collinear
const CROSS_EPSILON: f64 = 1e-9;

/// Key quantization steps per pixel
const KEY_RESOLUTION: f64 = 1000.0;

/// Four corners in traversal order, image coordinates (y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub corners: [Point2<f64>; 4],
}

/// Hashable identity of a canonical quad, quantized to `1 / KEY_RESOLUTION` px
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuadKey([i64; 8]);

impl Quad {
    pub fn new(corners: [Point2<f64>; 4]) -> Self {
        Self { corners }
    }

    /// True when every turn around the polygon has the same, non-zero sign
    pub fn is_convex(&self) -> bool {
        if self.corners.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return false;
        }

        let mut sign = 0.0f64;
        for i in 0..4 {
            let a = self.corners[i];
            let b = self.corners[(i + 1) % 4];
            let c = self.corners[(i + 2) % 4];
            let cross = (b - a).perp(&(c - b));
            if cross.abs() <= CROSS_EPSILON {
                return false;
            }
            if sign == 0.0 {
                sign = cross.signum();
            } else if cross.signum() != sign {
                return false;
            }
        }
        true
    }

    /// Shoelace signed area; positive is clockwise on screen
    pub fn signed_area(&self) -> f64 {
        let c = &self.corners;
        (0..4)
            .map(|i| {
                let (p, q) = (c[i], c[(i + 1) % 4]);
                p.x * q.y - q.x * p.y
            })
            .sum::<f64>()
            / 2.0
    }

    /// Same quad ordered clockwise on screen, starting at the top-left corner
    ///
    /// The top-left corner is the one with the smallest `x + y`, ties going to
    /// the smaller `y`. The result is `[top-left, top-right, bottom-right,
    /// bottom-left]` for any roughly upright selection.
    pub fn canonical(&self) -> Self {
        let mut corners = self.corners;
        if self.signed_area() < 0.0 {
            corners.reverse();
        }

        let start = (0..4)
            .min_by(|&i, &j| {
                let (a, b) = (corners[i], corners[j]);
                (a.x + a.y).total_cmp(&(b.x + b.y)).then(a.y.total_cmp(&b.y))
            })
            .unwrap_or(0);
        corners.rotate_left(start);
        Self { corners }
    }

    pub fn key(&self) -> QuadKey {
        let canonical = self.canonical();
        let mut key = [0i64; 8];
        for (i, p) in canonical.corners.iter().enumerate() {
            key[2 * i] = (p.x * KEY_RESOLUTION).round() as i64;
            key[2 * i + 1] = (p.y * KEY_RESOLUTION).round() as i64;
        }
        QuadKey(key)
    }

    /// Output rectangle size from the mean lengths of opposite edges
    pub fn target_size(&self) -> (u32, u32) {
        let [tl, tr, br, bl] = self.canonical().corners;
        let width = ((tr - tl).norm() + (br - bl).norm()) / 2.0;
        let height = ((bl - tl).norm() + (br - tr).norm()) / 2.0;
        (width.round() as u32, height.round() as u32)
    }
}
