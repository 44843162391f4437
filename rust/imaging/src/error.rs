// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Corners do not form a convex quadrilateral")]
    NonConvex,

    #[error("No homography maps the quadrilateral onto the target rectangle")]
    DegenerateHomography,

    #[error("Target rectangle is empty: {width}x{height}")]
    EmptyTarget { width: u32, height: u32 },

    #[error("Target rectangle is too large: {width}x{height}")]
    TargetTooLarge { width: u32, height: u32 },

    #[error("Failed to decode source image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode corrected image: {0}")]
    Encode(#[source] image::ImageError),
}
