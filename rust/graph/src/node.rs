// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene node kinds and per-node data.

use std::sync::Arc;

use nalgebra::{Point3, Unit, Vector3};

use crate::keys::NodeKey;

/// A link from a parent to a child node.
///
/// `Owned` links carry the child's lifetime; `Shared` links are additional
/// attachment points that only count toward the child's reference count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildLink {
    Owned(NodeKey),
    Shared(NodeKey),
}

impl ChildLink {
    /// The linked node, regardless of link kind.
    pub fn key(&self) -> NodeKey {
        match *self {
            ChildLink::Owned(k) | ChildLink::Shared(k) => k,
        }
    }
}

/// A grouping node with a rigid placement and an ordered child list.
#[derive(Debug, Clone)]
pub struct TransformNode {
    pub translation: Vector3<f64>,
    /// Axis-angle rotation; `None` means no rotation.
    pub rotation: Option<(Unit<Vector3<f64>>, f64)>,
    pub(crate) children: Vec<ChildLink>,
}

impl Default for TransformNode {
    fn default() -> Self {
        Self {
            translation: Vector3::zeros(),
            rotation: None,
            children: Vec::new(),
        }
    }
}

impl TransformNode {
    /// Links to this transform's children, in attachment order.
    pub fn children(&self) -> &[ChildLink] {
        &self.children
    }
}

/// A renderable triangle mesh referencing one appearance.
///
/// The vertex buffer is shared: the reverse-wound twin of a two-sided face
/// holds a clone of the same `Arc`.
#[derive(Debug, Clone, Default)]
pub struct ShapeNode {
    pub(crate) vertices: Arc<Vec<Point3<f32>>>,
    pub(crate) indices: Vec<u32>,
    pub(crate) appearance: Option<ChildLink>,
}

impl ShapeNode {
    pub fn vertices(&self) -> &Arc<Vec<Point3<f32>>> {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Link to the attached appearance, if set.
    pub fn appearance(&self) -> Option<ChildLink> {
        self.appearance
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// A shareable material description.
#[derive(Debug, Clone, PartialEq)]
pub struct AppearanceNode {
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub ambient: [f32; 3],
    pub shininess: f32,
}

/// Tagged union of the scene node kinds.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Transform(TransformNode),
    Shape(ShapeNode),
    Appearance(AppearanceNode),
}

/// A node in the arena: payload plus ownership bookkeeping.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    /// The owning parent, if this node has been exclusively attached.
    pub(crate) owner: Option<NodeKey>,
    /// Number of non-owning attachment points.
    pub(crate) shared_refs: u32,
    pub(crate) kind: NodeKind,
}

impl Node {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            owner: None,
            shared_refs: 0,
            kind,
        }
    }
}
