// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # CadScene Graph
//!
//! A renderable scene graph for converted CAD assemblies. Nodes live in an
//! arena with stable keys and come in three kinds: transforms (which own an
//! ordered child list), shapes (vertex and index buffers plus one
//! appearance), and appearances (shareable material leaves).
//!
//! Ownership follows a single rule: every node has at most one owning
//! parent, recorded in its owner slot; any further attachment point is a
//! non-owning reference counted on the node. Attaching a node that already
//! has an owner therefore produces a reference, which is how assembly
//! instancing keeps shared sub-trees shared instead of duplicated.
//!
//! The [`vrml`] module serializes a graph to VRML 2.0, turning multiply
//! attached nodes into `DEF`/`USE` pairs.

pub mod error;
pub mod graph;
pub mod keys;
pub mod node;
pub mod vrml;

pub use error::{Error, Result};
pub use graph::SceneGraph;
pub use keys::NodeKey;
pub use node::{AppearanceNode, ChildLink, NodeKind, ShapeNode, TransformNode};
pub use vrml::write_vrml;
