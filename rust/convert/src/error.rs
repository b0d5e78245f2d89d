// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the conversion pipeline.
//!
//! Per-shape failures (an untessellatable face, an empty assembly branch)
//! are not errors: they propagate as boolean "nothing produced" results so
//! ancestors can keep or discard their own partial output. Only parameter
//! validation, scene-graph misuse and the whole-document "nothing came out"
//! verdict surface here.

use crate::config::{ANGLE_INCREMENT_RANGE, DEFLECTION_RANGE};

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during conversion.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Deflection outside the supported range.
    #[error("deflection {0} outside supported range {range:?}", range = DEFLECTION_RANGE)]
    InvalidDeflection(f64),

    /// Angular increment outside the supported range.
    #[error("angular increment {0} outside supported range {range:?}", range = ANGLE_INCREMENT_RANGE)]
    InvalidAngleIncrement(f64),

    /// No free shape produced any renderable geometry.
    #[error("document produced no renderable geometry")]
    EmptyScene,

    /// Scene graph construction error.
    #[error("scene graph error: {0}")]
    Scene(#[from] cadscene_graph::Error),
}
