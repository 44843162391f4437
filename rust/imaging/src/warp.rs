// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Perspective rectification of a quadrilateral region

use crate::error::{Error, Result};
use crate::homography::Homography;
use crate::quad::Quad;
use image::{Rgba, RgbaImage};
use imageproc::geometric_transformations::{warp_into, Interpolation, Projection};

/// Fill for output pixels whose preimage falls outside the source
const OUTSIDE: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Largest output `rectify` will allocate (256 MiB of RGBA)
pub const MAX_TARGET_PIXELS: u64 = 64 * 1024 * 1024;

/// Warp the region inside `quad` onto an upright `width` x `height` image
///
/// `quad` must already be known convex; the canonical top-left corner lands
/// on the output origin.
pub fn rectify(source: &RgbaImage, quad: &Quad, width: u32, height: u32) -> Result<RgbaImage> {
    if width == 0 || height == 0 {
        return Err(Error::EmptyTarget { width, height });
    }
    if u64::from(width) * u64::from(height) > MAX_TARGET_PIXELS {
        return Err(Error::TargetTooLarge { width, height });
    }

    let homography = Homography::quad_to_rect(quad, width, height).ok_or(Error::DegenerateHomography)?;
    let projection = Projection::from_matrix(homography.to_row_major_f32()).ok_or(Error::DegenerateHomography)?;

    let mut out = RgbaImage::new(width, height);
    warp_into(source, &projection, Interpolation::Bilinear, OUTSIDE, &mut out);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    const RED: Rgba<u8> = Rgba([220, 30, 30, 255]);
    const BLUE: Rgba<u8> = Rgba([30, 30, 220, 255]);

    /// Red square on [20, 60)² over a blue background
    fn poster() -> RgbaImage {
        RgbaImage::from_fn(100, 100, |x, y| {
            if (20..60).contains(&x) && (20..60).contains(&y) {
                RED
            } else {
                BLUE
            }
        })
    }

    /// Bilinear blending may be off by a rounding step per channel
    fn close(a: &Rgba<u8>, b: Rgba<u8>) -> bool {
        a.0.iter().zip(b.0.iter()).all(|(x, y)| x.abs_diff(*y) <= 2)
    }

    fn square(x0: f64, y0: f64, size: f64) -> Quad {
        Quad::new([
            Point2::new(x0, y0),
            Point2::new(x0 + size, y0),
            Point2::new(x0 + size, y0 + size),
            Point2::new(x0, y0 + size),
        ])
    }

    #[test]
    fn test_axis_aligned_crop() {
        let out = rectify(&poster(), &square(20.0, 20.0, 40.0), 40, 40).unwrap();
        assert_eq!(out.dimensions(), (40, 40));
        assert!(close(out.get_pixel(20, 20), RED));
        assert!(close(out.get_pixel(5, 30), RED));
    }

    #[test]
    fn test_region_outside_selection_is_excluded() {
        // Selection straddles the red square's right edge
        let out = rectify(&poster(), &square(40.0, 20.0, 40.0), 40, 40).unwrap();
        assert!(close(out.get_pixel(5, 20), RED));
        assert!(close(out.get_pixel(35, 20), BLUE));
    }

    #[test]
    fn test_empty_target() {
        assert!(matches!(
            rectify(&poster(), &square(0.0, 0.0, 10.0), 0, 10),
            Err(Error::EmptyTarget { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_oversized_target_rejected_before_allocating() {
        assert!(matches!(
            rectify(&poster(), &square(0.0, 0.0, 10.0), u32::MAX, u32::MAX),
            Err(Error::TargetTooLarge { .. })
        ));
        // 8192 x 8192 is exactly at the limit, one more row is not
        assert!(matches!(
            rectify(&poster(), &square(0.0, 0.0, 10.0), 8192, 8193),
            Err(Error::TargetTooLarge { width: 8192, height: 8193 })
        ));
    }
}
