// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for camera operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while constructing camera inputs
#[derive(Error, Debug)]
pub enum Error {
    #[error("depth map is {width}x{height} but has {len} values")]
    DepthSizeMismatch { width: usize, height: usize, len: usize },

    #[error("confidence map has {len} values, expected {expected}")]
    ConfidenceSizeMismatch { len: usize, expected: usize },
}
