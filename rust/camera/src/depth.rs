// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Depth map sampling across the sensor/output rotation

use crate::error::{Error, Result};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Per-pixel depth in the sensor's native landscape layout, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct DepthMap {
    width: usize,
    height: usize,
    values: Vec<f32>,
    /// Optional per-pixel confidence (0 = low, 1 = medium, 2 = high)
    confidence: Option<Vec<u8>>,
}

impl DepthMap {
    pub fn new(width: usize, height: usize, values: Vec<f32>) -> Result<Self> {
        if width.checked_mul(height) != Some(values.len()) {
            return Err(Error::DepthSizeMismatch {
                width,
                height,
                len: values.len(),
            });
        }
        Ok(Self {
            width,
            height,
            values,
            confidence: None,
        })
    }

    pub fn with_confidence(mut self, confidence: Vec<u8>) -> Result<Self> {
        if confidence.len() != self.values.len() {
            return Err(Error::ConfidenceSizeMismatch {
                len: confidence.len(),
                expected: self.values.len(),
            });
        }
        self.confidence = Some(confidence);
        Ok(self)
    }

    /// Depth map filled with a single value
    pub fn uniform(width: usize, height: usize, meters: f32) -> Result<Self> {
        let len = width
            .checked_mul(height)
            .ok_or(Error::DepthSizeMismatch { width, height, len: 0 })?;
        Self::new(width, height, vec![meters; len])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, col: usize, row: usize) -> Option<f32> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.values.get(row * self.width + col).copied()
    }

    pub fn confidence_at(&self, col: usize, row: usize) -> Option<u8> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.confidence.as_ref()?.get(row * self.width + col).copied()
    }

    pub fn set(&mut self, col: usize, row: usize, meters: f32) {
        if col < self.width && row < self.height {
            self.values[row * self.width + col] = meters;
        }
    }

    /// Nearest cell for a normalized native-space point
    fn cell(&self, native: &Point2<f64>) -> Option<(usize, usize)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let col = (native.x * self.width as f64).floor() as usize;
        let row = (native.y * self.height as f64).floor() as usize;
        Some((col.min(self.width - 1), row.min(self.height - 1)))
    }
}

/// A depth reading and whether it can be trusted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthSample {
    pub meters: f32,
    pub valid: bool,
}

impl DepthSample {
    pub fn invalid() -> Self {
        Self {
            meters: 0.0,
            valid: false,
        }
    }
}

/// Supported depth range and reliability cut-off
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthConfig {
    /// Readings at or below this are invalid (meters)
    pub min_depth_m: f32,
    /// Readings above this are invalid (meters)
    pub max_depth_m: f32,
    /// Minimum confidence level, only checked when the map carries confidence
    pub min_confidence: u8,
}

impl Default for DepthConfig {
    fn default() -> Self {
        Self {
            min_depth_m: 0.0,
            max_depth_m: 5.0,
            min_confidence: 1,
        }
    }
}

/// Map a normalized output (portrait) point into normalized native (landscape) space
pub fn output_to_native(output: &Point2<f64>) -> Point2<f64> {
    Point2::new(output.y, 1.0 - output.x)
}

/// Fetches validated depth for points in output image space
#[derive(Debug, Clone, Default)]
pub struct DepthSampler {
    config: DepthConfig,
}

impl DepthSampler {
    pub fn new(config: DepthConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DepthConfig {
        &self.config
    }

    /// Sample the nearest depth cell for a normalized output-space point
    ///
    /// Out-of-range points and unreliable readings are reported through
    /// `DepthSample::valid`, never as errors.
    pub fn sample(&self, output: &Point2<f64>, depth: &DepthMap) -> DepthSample {
        let in_unit_square = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
        if !in_unit_square(output.x) || !in_unit_square(output.y) {
            return DepthSample::invalid();
        }

        let native = output_to_native(output);
        let Some((col, row)) = depth.cell(&native) else {
            return DepthSample::invalid();
        };
        let Some(meters) = depth.get(col, row) else {
            return DepthSample::invalid();
        };

        let in_range = meters.is_finite() && meters > self.config.min_depth_m && meters <= self.config.max_depth_m;
        let reliable = depth
            .confidence_at(col, row)
            .map_or(true, |c| c >= self.config.min_confidence);

        DepthSample {
            meters,
            valid: in_range && reliable,
        }
    }
}
