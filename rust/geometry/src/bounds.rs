// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bounding rectangle over floor plan segments

use crate::types::{Rect, WallSegment};

/// Tight bounds over every segment endpoint, `None` for no segments
pub fn segment_extent<'a, I>(segments: I) -> Option<Rect>
where
    I: IntoIterator<Item = &'a WallSegment>,
{
    let mut rect: Option<Rect> = None;
    for seg in segments {
        for p in [seg.start, seg.end] {
            let r = rect.get_or_insert(Rect {
                min_x: p.x,
                min_y: p.y,
                max_x: p.x,
                max_y: p.y,
            });
            r.min_x = r.min_x.min(p.x);
            r.min_y = r.min_y.min(p.y);
            r.max_x = r.max_x.max(p.x);
            r.max_y = r.max_y.max(p.y);
        }
    }
    rect
}

/// Bounds over every segment endpoint, padded uniformly on all sides
///
/// Empty input yields the zero rectangle at the origin.
pub fn compute_bounds<'a, I>(segments: I, padding: f64) -> Rect
where
    I: IntoIterator<Item = &'a WallSegment>,
{
    match segment_extent(segments) {
        Some(r) => Rect {
            min_x: r.min_x - padding,
            min_y: r.min_y - padding,
            max_x: r.max_x + padding,
            max_y: r.max_y + padding,
        },
        None => Rect::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Classification, Point2D};

    fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> WallSegment {
        WallSegment {
            start: Point2D::new(x0, y0),
            end: Point2D::new(x1, y1),
            thickness: 0.1,
            classification: Classification::Wall,
            width_meters: 0.0,
            height_meters: 0.0,
            plane_id: None,
        }
    }

    #[test]
    fn test_padded_bounds() {
        let segments = vec![seg(0.0, 0.0, 4.0, 0.0), seg(4.0, 0.0, 4.0, 3.0), seg(-1.0, 2.0, 0.0, 3.0)];
        let rect = compute_bounds(&segments, 0.5);

        assert_eq!(rect.min_x, -1.5);
        assert_eq!(rect.min_y, -0.5);
        assert_eq!(rect.max_x, 4.5);
        assert_eq!(rect.max_y, 3.5);
    }

    #[test]
    fn test_empty_is_zero_rect_at_origin() {
        let rect = compute_bounds(&Vec::<WallSegment>::new(), 0.5);
        assert_eq!(rect, Rect::default());
        assert_eq!(rect.area(), 0.0);
    }

    #[test]
    fn test_single_point_segment_extent() {
        let rect = segment_extent(&[seg(1.0, 1.0, 1.0, 1.0)]).unwrap();
        assert_eq!(rect.width(), 0.0);
        assert!(rect.contains(&Point2D::new(1.0, 1.0)));
    }
}
