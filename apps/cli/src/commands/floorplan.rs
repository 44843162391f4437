// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plane records JSON to floor plan JSON.

use anyhow::{Context, Result};
use arlite_geometry::{
    parse_plane_records, records_from_json, CornerCandidate, FloorPlanBuilder, FloorPlanConfig, FloorPlanResult,
    RecordClassification,
};
use std::fs;
use std::path::Path;

pub fn run(input: &Path, corners: Option<&Path>, output: Option<&Path>, config: &FloorPlanConfig) -> Result<()> {
    let json = fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let corners = corners.map(load_corners).transpose()?;

    let plan = build(&json, corners.as_deref(), config)?;
    tracing::info!(
        walls = plan.walls.len(),
        doors = plan.doors.len(),
        windows = plan.windows.len(),
        "Floor plan regenerated"
    );

    let out = serde_json::to_string_pretty(&plan)?;
    match output {
        Some(path) => fs::write(path, out).with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", out),
    }
    Ok(())
}

pub fn build(records_json: &str, corners: Option<&[CornerCandidate]>, config: &FloorPlanConfig) -> Result<FloorPlanResult> {
    let records = records_from_json(records_json).context("Invalid plane records")?;
    let planes = parse_plane_records(&records);
    if planes.len() != records.len() {
        tracing::warn!(skipped = records.len() - planes.len(), "Some plane records were skipped");
    }

    let builder = FloorPlanBuilder::new(config.clone());
    Ok(builder.regenerate(&planes, &RecordClassification, corners))
}

fn load_corners(path: &Path) -> Result<Vec<CornerCandidate>> {
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Invalid corner candidates in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arlite_geometry::{records_to_json, AnchorTransform, WorldPlane};
    use std::f32::consts::FRAC_PI_2;

    fn square_room_json() -> String {
        let planes = [
            WorldPlane::vertical("south", AnchorTransform::from_translation(1.5, 1.2, 0.0), 3.0, 2.4),
            WorldPlane::vertical("north", AnchorTransform::from_translation(1.5, 1.2, 3.0), 3.0, 2.4),
            WorldPlane::vertical("west", AnchorTransform::from_translation_yaw(0.0, 1.2, 1.5, FRAC_PI_2), 3.0, 2.4),
            WorldPlane::vertical("east", AnchorTransform::from_translation_yaw(3.0, 1.2, 1.5, FRAC_PI_2), 3.0, 2.4),
        ];
        let records: Vec<_> = planes.iter().map(WorldPlane::to_record).collect();
        records_to_json(&records).unwrap()
    }

    #[test]
    fn test_build_square_room() {
        let plan = build(&square_room_json(), None, &FloorPlanConfig::default()).unwrap();
        assert_eq!(plan.walls.len(), 4);
        let room = plan.room.unwrap();
        assert!((room.width - 3.0).abs() < 1e-6);
        assert!((room.length - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_build_rejects_invalid_json() {
        assert!(build("{ not json", None, &FloorPlanConfig::default()).is_err());
    }
}
