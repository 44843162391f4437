// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for floor plan operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the plane record boundary
#[derive(Error, Debug)]
pub enum Error {
    #[error("plane record {id}: transform must have 16 components, got {len}")]
    InvalidTransformLength { id: String, len: usize },

    #[error("unknown plane classification: {0}")]
    UnknownClassification(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
