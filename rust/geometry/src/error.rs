// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while cleaning and comparing planar loops
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Too few points: need at least {needed}, got {got}")]
    TooFewPoints { needed: usize, got: usize },

    #[error("No plane: boundary is fully colinear or degenerate")]
    NoPlane,

    #[error("Loop too degenerate: {0} distinct vertices survive cleaning")]
    DegenerateLoop(usize),

    #[error("Invalid tolerance: {0}")]
    InvalidTolerance(f64),
}
