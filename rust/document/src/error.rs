// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for document operations.

use crate::keys::{LabelKey, ShapeKey};
use crate::shape::ShapeKind;

/// Result type alias for document operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or querying a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Label key not found in the document.
    #[error("label not found: {0:?}")]
    LabelNotFound(LabelKey),

    /// Shape key not found in the document.
    #[error("shape not found: {0:?}")]
    ShapeNotFound(ShapeKey),

    /// Sub-shapes were added to a shape kind that cannot hold them.
    #[error("{0} shapes cannot contain sub-shapes")]
    NotAContainer(ShapeKind),
}
