// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Perspective correction for AR placement
//!
//! A user picks four corners of a planar region (a wall, a floor patch) on a
//! captured still. The region is validated as a convex quadrilateral, mapped
//! by homography onto an upright rectangle, and the result is cached by
//! [`PerspectiveCache`] so that repeated placements do not re-warp.

pub mod cache;
pub mod error;
pub mod homography;
pub mod quad;
pub mod warp;

pub use cache::{CacheStats, CorrectedImage, PerspectiveCache, SharedPerspectiveCache, SourceImage, DEFAULT_CAPACITY};
pub use error::{Error, Result};
pub use homography::Homography;
pub use quad::{Quad, QuadKey};
pub use warp::{rectify, MAX_TARGET_PIXELS};
