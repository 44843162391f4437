// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end floor plan regeneration from persisted plane records.

use approx::assert_abs_diff_eq;
use arlite_geometry::{
    parse_plane_records, records_from_json, records_to_json, AnchorTransform, Classification, FloorPlanBuilder,
    FloorPlanConfig, PlaneClass, PlaneRecord, Point2D, RecordClassification, WorldPlane,
};
use std::f32::consts::FRAC_PI_2;

fn scanned_room() -> Vec<WorldPlane> {
    vec![
        WorldPlane::vertical("w-south", AnchorTransform::from_translation_yaw(2.5, 1.3, 0.0, 0.0), 4.8, 2.7),
        WorldPlane::vertical("w-east", AnchorTransform::from_translation_yaw(5.0, 1.3, 2.0, FRAC_PI_2), 3.85, 2.7),
        WorldPlane::vertical("w-north", AnchorTransform::from_translation_yaw(2.5, 1.3, 4.0, 0.0), 4.9, 2.7),
        WorldPlane::vertical("w-west", AnchorTransform::from_translation_yaw(0.0, 1.3, 2.0, FRAC_PI_2), 3.9, 2.7),
        WorldPlane::vertical("d-1", AnchorTransform::from_translation_yaw(5.0, 1.0, 1.0, FRAC_PI_2), 0.9, 2.1)
            .with_classification(PlaneClass::Door),
        WorldPlane::vertical("n-1", AnchorTransform::from_translation_yaw(2.5, 1.5, 4.0, 0.0), 1.4, 1.2)
            .with_classification(PlaneClass::Window),
    ]
}

#[test]
fn regenerate_from_json_records() {
    let records: Vec<PlaneRecord> = scanned_room().iter().map(WorldPlane::to_record).collect();
    let json = records_to_json(&records).unwrap();

    let planes = parse_plane_records(&records_from_json(&json).unwrap());
    assert_eq!(planes, scanned_room());

    let plan = FloorPlanBuilder::default().regenerate(&planes, &RecordClassification, None);
    assert_eq!(plan.walls.len(), 4);
    assert_eq!(plan.doors.len(), 1);
    assert_eq!(plan.windows.len(), 1);
    assert_eq!(plan.windows[0].classification, Classification::Window);

    let room = plan.room.clone().unwrap();
    assert_abs_diff_eq!(room.width, 5.0, epsilon = 1e-4);
    assert_abs_diff_eq!(room.length, 4.0, epsilon = 1e-4);
    assert_eq!(room.door_count, 1);
    assert_eq!(room.window_count, 1);

    let padding = FloorPlanConfig::default().bounds_padding;
    assert_abs_diff_eq!(plan.bounds.width(), 5.0 + 2.0 * padding, epsilon = 1e-4);
}

#[test]
fn malformed_records_do_not_fail_the_batch() {
    let mut records: Vec<PlaneRecord> = scanned_room().iter().map(WorldPlane::to_record).collect();
    records[1].transform.truncate(15);
    records[3].classification = "ceiling-fan".into();

    let planes = parse_plane_records(&records);
    assert_eq!(planes.len(), 4);

    let plan = FloorPlanBuilder::default().regenerate(&planes, &RecordClassification, None);
    assert_eq!(plan.walls.len(), 2);
}

#[test]
fn injected_classifier_overrides_records() {
    let narrow_is_door = |p: &WorldPlane| if p.extent_x < 1.0 { PlaneClass::Door } else { PlaneClass::Wall };
    let plan = FloorPlanBuilder::default().regenerate(&scanned_room(), &narrow_is_door, None);

    assert_eq!(plan.walls.len(), 5);
    assert_eq!(plan.doors.len(), 1);
    assert!(plan.windows.is_empty());
}

#[test]
fn result_serializes_for_renderers() {
    let plan = FloorPlanBuilder::default().regenerate(&scanned_room(), &RecordClassification, None);
    let value = serde_json::to_value(&plan).unwrap();

    assert!(value["walls"].is_array());
    assert!(value["bounds"]["minX"].is_number());
    assert_eq!(value["room"]["wallCount"], 4);
    assert_eq!(value["walls"][0]["planeId"], "w-south");
    assert_eq!(value["doors"][0]["classification"], "door");

    let back: arlite_geometry::FloorPlanResult = serde_json::from_value(value).unwrap();
    assert_eq!(back, plan);
    assert_eq!(back.walls[0].start, Point2D::new(plan.walls[0].start.x, plan.walls[0].start.y));
}
