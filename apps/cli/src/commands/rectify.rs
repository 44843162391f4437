// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Source image and four corners to a perspective-corrected PNG.

use anyhow::{Context, Result};
use arlite_imaging::{PerspectiveCache, SourceImage};
use nalgebra::Point2;
use std::fs;
use std::path::Path;

pub fn run(input: &Path, corners: [Point2<f64>; 4], output: &Path, size: Option<(u32, u32)>) -> Result<()> {
    let bytes = fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let png = rectify_bytes(&bytes, corners, size)?;
    fs::write(output, &png).with_context(|| format!("Failed to write {}", output.display()))?;

    tracing::info!(output = %output.display(), bytes = png.len(), "Wrote corrected image");
    Ok(())
}

pub fn rectify_bytes(bytes: &[u8], corners: [Point2<f64>; 4], size: Option<(u32, u32)>) -> Result<Vec<u8>> {
    let source = SourceImage::from_bytes(bytes)?;
    let mut cache = PerspectiveCache::with_capacity(1);
    if let Some((width, height)) = size {
        cache = cache.with_target_size(width, height);
    }

    let corrected = cache.get(corners, &source).context("Perspective correction failed")?;
    tracing::debug!(width = corrected.width(), height = corrected.height(), "Rectified selection");
    Ok(corrected.to_png()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        RgbaImage::from_pixel(width, height, Rgba([40, 90, 160, 255]))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn corners() -> [Point2<f64>; 4] {
        [
            Point2::new(4.0, 4.0),
            Point2::new(28.0, 6.0),
            Point2::new(26.0, 20.0),
            Point2::new(5.0, 18.0),
        ]
    }

    #[test]
    fn test_rectify_to_fixed_size() {
        let out = rectify_bytes(&png(32, 24), corners(), Some((48, 20))).unwrap();
        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (48, 20));
    }

    #[test]
    fn test_non_convex_corners_fail() {
        let [a, b, c, d] = corners();
        assert!(rectify_bytes(&png(32, 24), [a, c, b, d], None).is_err());
        assert!(rectify_bytes(b"garbage", corners(), None).is_err());
    }
}
