// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Runtime configuration loaded from environment variables.

use anyhow::{Context, Result};
use arlite_geometry::FloorPlanConfig;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Floor plan tunables, from `ARLITE_FLOORPLAN_CONFIG` when set.
    pub floor_plan: FloorPlanConfig,
    /// Fixed rectification size; both `ARLITE_RECTIFY_WIDTH` and
    /// `ARLITE_RECTIFY_HEIGHT` must be set to valid sizes.
    pub rectify_size: Option<(u32, u32)>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let floor_plan = match std::env::var("ARLITE_FLOORPLAN_CONFIG") {
            Ok(path) => load_floor_plan_config(Path::new(&path))?,
            Err(_) => FloorPlanConfig::default(),
        };

        let size_var = |name: &str| std::env::var(name).ok().and_then(|v| v.parse::<u32>().ok()).filter(|v| *v > 0);
        let rectify_size = size_var("ARLITE_RECTIFY_WIDTH").zip(size_var("ARLITE_RECTIFY_HEIGHT"));

        Ok(Self {
            floor_plan,
            rectify_size,
        })
    }
}

/// Missing fields fall back to their defaults.
fn load_floor_plan_config(path: &Path) -> Result<FloorPlanConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read floor plan config {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Invalid floor plan config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_file_keeps_defaults() {
        let path = std::env::temp_dir().join(format!("arlite-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "snap_threshold": 0.25 }"#).unwrap();

        let config = load_floor_plan_config(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.snap_threshold, 0.25);
        assert_eq!(config.proximity_threshold, FloorPlanConfig::default().proximity_threshold);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        assert!(load_floor_plan_config(Path::new("/nonexistent/arlite.json")).is_err());
    }
}
