// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for scene graph operations.

use crate::keys::NodeKey;

/// Result type alias for scene graph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a scene graph.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Node key not found in the graph.
    #[error("scene node not found: {0:?}")]
    NotFound(NodeKey),

    /// The node cannot hold children.
    #[error("node is not a transform: {0:?}")]
    NotATransform(NodeKey),

    /// The node is not a shape.
    #[error("node is not a shape: {0:?}")]
    NotAShape(NodeKey),

    /// The node is not an appearance.
    #[error("node is not an appearance: {0:?}")]
    NotAnAppearance(NodeKey),

    /// Exclusive attachment of a node that already has an owner.
    #[error("node already has an owning parent: {0:?}")]
    AlreadyOwned(NodeKey),

    /// A shape's appearance slot is already filled.
    #[error("shape already has an appearance: {0:?}")]
    AppearanceAlreadySet(NodeKey),
}
