// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rectifying a poster photographed at an angle.

use arlite_imaging::{Error, Homography, PerspectiveCache, Quad, SourceImage};
use image::{Rgba, RgbaImage};
use nalgebra::Point2;

const RED: [u8; 4] = [200, 20, 20, 255];
const GREEN: [u8; 4] = [20, 200, 20, 255];
const GREY: [u8; 4] = [128, 128, 128, 255];

fn corners() -> [Point2<f64>; 4] {
    [
        Point2::new(10.0, 8.0),
        Point2::new(70.0, 4.0),
        Point2::new(74.0, 52.0),
        Point2::new(6.0, 44.0),
    ]
}

/// 40 x 20 poster, red left half and green right half, seen through `corners`
fn photographed_poster() -> SourceImage {
    let h = Homography::quad_to_rect(&Quad::new(corners()), 40, 20).unwrap();
    let photo = RgbaImage::from_fn(80, 60, |x, y| match h.apply(&Point2::new(x as f64, y as f64)) {
        Some(p) if (0.0..40.0).contains(&p.x) && (0.0..20.0).contains(&p.y) => {
            Rgba(if p.x < 20.0 { RED } else { GREEN })
        }
        _ => Rgba(GREY),
    });
    SourceImage::new(42, photo)
}

fn near(pixel: &Rgba<u8>, expected: [u8; 4]) -> bool {
    pixel.0.iter().zip(expected.iter()).all(|(a, b)| a.abs_diff(*b) <= 8)
}

#[test]
fn rectified_poster_is_upright() {
    let mut cache = PerspectiveCache::new().with_target_size(40, 20);
    let corrected = cache.get(corners(), &photographed_poster()).unwrap();

    assert_eq!((corrected.width(), corrected.height()), (40, 20));
    assert!(near(corrected.image().get_pixel(8, 10), RED));
    assert!(near(corrected.image().get_pixel(32, 10), GREEN));
}

#[test]
fn corrected_png_decodes_as_a_new_source() {
    let mut cache = PerspectiveCache::new().with_target_size(40, 20);
    let corrected = cache.get(corners(), &photographed_poster()).unwrap();

    let png = corrected.to_png().unwrap();
    let again = SourceImage::from_bytes(&png).unwrap();
    assert_eq!(again.image().dimensions(), (40, 20));
}

#[test]
fn self_intersecting_selection_is_rejected() {
    let mut cache = PerspectiveCache::new();
    let [a, b, c, d] = corners();

    let result = cache.get([a, c, b, d], &photographed_poster());
    assert!(matches!(result, Err(Error::NonConvex)));
    assert!(cache.is_empty());
}
