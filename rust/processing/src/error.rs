// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::kernel::KernelError;
use thiserror::Error;

/// Result type for opening processing
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while deriving openings for a surface
#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("Geometry error: {0}")]
    Geometry(#[from] openings_geometry::Error),

    #[error("Kernel error: {0}")]
    Kernel(#[from] KernelError),

    #[error("Prism extrusion failed in both directions: {forward}; {backward}")]
    PrismFailed {
        forward: KernelError,
        backward: KernelError,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}
