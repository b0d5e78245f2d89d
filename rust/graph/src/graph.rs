// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The scene graph arena and its ownership model.
//!
//! All nodes are created detached. [`SceneGraph::attach_child`] gives a node
//! its single owning parent; [`SceneGraph::attach_reference`] adds a
//! non-owning attachment point and bumps the node's reference count.
//! [`SceneGraph::attach`] picks between the two, which is the operation the
//! converter uses for everything that may be instanced.
//!
//! [`SceneGraph::destroy`] frees a node and every owned descendant that is
//! not kept alive by outstanding references. Keys of freed nodes become
//! invalid; stale keys held in caches are detectable via
//! [`SceneGraph::contains`].

use std::sync::Arc;

use nalgebra::{Point3, Unit, Vector3};
use slotmap::SlotMap;

use crate::error::{Error, Result};
use crate::keys::NodeKey;
use crate::node::{AppearanceNode, ChildLink, Node, NodeKind, ShapeNode, TransformNode};

/// Arena of scene nodes.
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: SlotMap<NodeKey, Node>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    /// Create a detached transform node.
    pub fn new_transform(&mut self) -> NodeKey {
        self.nodes
            .insert(Node::new(NodeKind::Transform(TransformNode::default())))
    }

    /// Create a detached shape node with empty buffers.
    pub fn new_shape(&mut self) -> NodeKey {
        self.nodes
            .insert(Node::new(NodeKind::Shape(ShapeNode::default())))
    }

    /// Create a detached appearance node.
    pub fn new_appearance(&mut self, appearance: AppearanceNode) -> NodeKey {
        self.nodes
            .insert(Node::new(NodeKind::Appearance(appearance)))
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the key refers to a live node.
    pub fn contains(&self, node: NodeKey) -> bool {
        self.nodes.contains_key(node)
    }

    /// The owning parent of a node, if it has one.
    pub fn owner(&self, node: NodeKey) -> Option<NodeKey> {
        self.nodes.get(node).and_then(|n| n.owner)
    }

    /// Total attachment points of a node: its owner plus shared references.
    pub fn attachment_count(&self, node: NodeKey) -> usize {
        self.nodes
            .get(node)
            .map(|n| n.owner.is_some() as usize + n.shared_refs as usize)
            .unwrap_or(0)
    }

    /// Whether any scene location points at this node.
    pub fn is_attached(&self, node: NodeKey) -> bool {
        self.attachment_count(node) > 0
    }

    /// Set the translation of a transform node.
    pub fn set_translation(&mut self, node: NodeKey, translation: Vector3<f64>) -> Result<()> {
        self.transform_mut(node)?.translation = translation;
        Ok(())
    }

    /// Set the axis-angle rotation of a transform node.
    pub fn set_rotation(
        &mut self,
        node: NodeKey,
        axis: Unit<Vector3<f64>>,
        angle: f64,
    ) -> Result<()> {
        self.transform_mut(node)?.rotation = Some((axis, angle));
        Ok(())
    }

    /// Set the vertex buffer of a shape node.
    pub fn set_vertices(&mut self, node: NodeKey, vertices: Arc<Vec<Point3<f32>>>) -> Result<()> {
        self.shape_mut(node)?.vertices = vertices;
        Ok(())
    }

    /// Set the triangle index buffer of a shape node.
    pub fn set_indices(&mut self, node: NodeKey, indices: Vec<u32>) -> Result<()> {
        self.shape_mut(node)?.indices = indices;
        Ok(())
    }

    /// Attach an appearance to a shape, owning it if it is not owned yet.
    pub fn set_appearance(&mut self, shape: NodeKey, appearance: NodeKey) -> Result<()> {
        {
            let node = self.nodes.get(appearance).ok_or(Error::NotFound(appearance))?;
            if !matches!(node.kind, NodeKind::Appearance(_)) {
                return Err(Error::NotAnAppearance(appearance));
            }
        }
        let link = if self.nodes[appearance].owner.is_none() {
            ChildLink::Owned(appearance)
        } else {
            ChildLink::Shared(appearance)
        };

        let shape_node = self.shape_mut(shape)?;
        if shape_node.appearance.is_some() {
            return Err(Error::AppearanceAlreadySet(shape));
        }
        shape_node.appearance = Some(link);

        match link {
            ChildLink::Owned(_) => self.nodes[appearance].owner = Some(shape),
            ChildLink::Shared(_) => self.nodes[appearance].shared_refs += 1,
        }
        Ok(())
    }

    /// Attach `child` to `parent` as an exclusively owned child.
    pub fn attach_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<()> {
        let child_node = self.nodes.get(child).ok_or(Error::NotFound(child))?;
        if child_node.owner.is_some() {
            return Err(Error::AlreadyOwned(child));
        }
        self.transform_mut(parent)?
            .children
            .push(ChildLink::Owned(child));
        self.nodes[child].owner = Some(parent);
        Ok(())
    }

    /// Attach `child` to `parent` as a non-owning reference.
    pub fn attach_reference(&mut self, parent: NodeKey, child: NodeKey) -> Result<()> {
        if !self.nodes.contains_key(child) {
            return Err(Error::NotFound(child));
        }
        self.transform_mut(parent)?
            .children
            .push(ChildLink::Shared(child));
        self.nodes[child].shared_refs += 1;
        Ok(())
    }

    /// Attach `child` under `parent`, owning it when it has no owner yet and
    /// referencing it otherwise.
    pub fn attach(&mut self, parent: NodeKey, child: NodeKey) -> Result<()> {
        if self.owner(child).is_none() {
            self.attach_child(parent, child)
        } else {
            self.attach_reference(parent, child)
        }
    }

    /// Links to a transform's children, in attachment order.
    pub fn children(&self, node: NodeKey) -> &[ChildLink] {
        match self.nodes.get(node).map(|n| &n.kind) {
            Some(NodeKind::Transform(t)) => &t.children,
            _ => &[],
        }
    }

    /// The payload of a node.
    pub fn node(&self, node: NodeKey) -> Option<&NodeKind> {
        self.nodes.get(node).map(|n| &n.kind)
    }

    /// Shape payload accessor.
    pub fn shape(&self, node: NodeKey) -> Option<&ShapeNode> {
        match self.nodes.get(node).map(|n| &n.kind) {
            Some(NodeKind::Shape(s)) => Some(s),
            _ => None,
        }
    }

    /// Transform payload accessor.
    pub fn transform(&self, node: NodeKey) -> Option<&TransformNode> {
        match self.nodes.get(node).map(|n| &n.kind) {
            Some(NodeKind::Transform(t)) => Some(t),
            _ => None,
        }
    }

    /// Appearance payload accessor.
    pub fn appearance(&self, node: NodeKey) -> Option<&AppearanceNode> {
        match self.nodes.get(node).map(|n| &n.kind) {
            Some(NodeKind::Appearance(a)) => Some(a),
            _ => None,
        }
    }

    /// Destroy a node.
    ///
    /// Owned descendants are destroyed with it unless outstanding shared
    /// references keep them alive; shared references held by the destroyed
    /// node are released. If the node itself is owned, it is removed from
    /// its parent's child list first.
    pub fn destroy(&mut self, node: NodeKey) {
        let Some(owner) = self.nodes.get(node).map(|n| n.owner) else {
            return;
        };
        if let Some(parent) = owner {
            if let Some(parent_node) = self.nodes.get_mut(parent) {
                match &mut parent_node.kind {
                    NodeKind::Transform(t) => {
                        t.children.retain(|link| link.key() != node);
                    }
                    NodeKind::Shape(s) => {
                        if s.appearance.map(|l| l.key()) == Some(node) {
                            s.appearance = None;
                        }
                    }
                    NodeKind::Appearance(_) => {}
                }
            }
        }
        self.release(node);
    }

    /// Free a node and recurse into its links. The caller has already
    /// unlinked it from any owning parent.
    fn release(&mut self, node: NodeKey) {
        let Some(data) = self.nodes.remove(node) else {
            return;
        };
        let links: Vec<ChildLink> = match data.kind {
            NodeKind::Transform(t) => t.children,
            NodeKind::Shape(s) => s.appearance.into_iter().collect(),
            NodeKind::Appearance(_) => Vec::new(),
        };
        for link in links {
            let child = link.key();
            let free = match (link, self.nodes.get_mut(child)) {
                (ChildLink::Owned(_), Some(c)) => {
                    c.owner = None;
                    c.shared_refs == 0
                }
                (ChildLink::Shared(_), Some(c)) => {
                    c.shared_refs = c.shared_refs.saturating_sub(1);
                    c.shared_refs == 0 && c.owner.is_none()
                }
                (_, None) => false,
            };
            if free {
                self.release(child);
            }
        }
    }

    fn transform_mut(&mut self, node: NodeKey) -> Result<&mut TransformNode> {
        match self.nodes.get_mut(node) {
            Some(Node {
                kind: NodeKind::Transform(t),
                ..
            }) => Ok(t),
            Some(_) => Err(Error::NotATransform(node)),
            None => Err(Error::NotFound(node)),
        }
    }

    fn shape_mut(&mut self, node: NodeKey) -> Result<&mut ShapeNode> {
        match self.nodes.get_mut(node) {
            Some(Node {
                kind: NodeKind::Shape(s),
                ..
            }) => Ok(s),
            Some(_) => Err(Error::NotAShape(node)),
            None => Err(Error::NotFound(node)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appearance() -> AppearanceNode {
        AppearanceNode {
            diffuse: [0.6, 0.6, 0.6],
            specular: [0.04, 0.04, 0.04],
            ambient: [0.04, 0.04, 0.04],
            shininess: 0.05,
        }
    }

    #[test]
    fn attach_child_sets_owner() {
        let mut g = SceneGraph::new();
        let root = g.new_transform();
        let child = g.new_transform();

        g.attach_child(root, child).unwrap();
        assert_eq!(g.owner(child), Some(root));
        assert_eq!(g.attachment_count(child), 1);
        assert_eq!(g.children(root).len(), 1);
    }

    #[test]
    fn second_attachment_becomes_reference() {
        let mut g = SceneGraph::new();
        let a = g.new_transform();
        let b = g.new_transform();
        let shared = g.new_shape();

        g.attach(a, shared).unwrap();
        g.attach(b, shared).unwrap();

        assert_eq!(g.owner(shared), Some(a));
        assert_eq!(g.attachment_count(shared), 2);
        assert_eq!(g.children(a), &[ChildLink::Owned(shared)]);
        assert_eq!(g.children(b), &[ChildLink::Shared(shared)]);
    }

    #[test]
    fn attach_child_rejects_owned_node() {
        let mut g = SceneGraph::new();
        let a = g.new_transform();
        let b = g.new_transform();
        let child = g.new_shape();

        g.attach_child(a, child).unwrap();
        assert!(matches!(
            g.attach_child(b, child),
            Err(Error::AlreadyOwned(_))
        ));
    }

    #[test]
    fn appearance_is_owned_once_then_referenced() {
        let mut g = SceneGraph::new();
        let s1 = g.new_shape();
        let s2 = g.new_shape();
        let app = g.new_appearance(appearance());

        g.set_appearance(s1, app).unwrap();
        g.set_appearance(s2, app).unwrap();

        assert_eq!(g.owner(app), Some(s1));
        assert_eq!(g.attachment_count(app), 2);
        assert_eq!(g.shape(s1).unwrap().appearance(), Some(ChildLink::Owned(app)));
        assert_eq!(g.shape(s2).unwrap().appearance(), Some(ChildLink::Shared(app)));
    }

    #[test]
    fn destroy_frees_owned_subtree() {
        let mut g = SceneGraph::new();
        let root = g.new_transform();
        let shape = g.new_shape();
        let app = g.new_appearance(appearance());
        g.attach_child(root, shape).unwrap();
        g.set_appearance(shape, app).unwrap();

        g.destroy(root);
        assert!(!g.contains(root));
        assert!(!g.contains(shape));
        assert!(!g.contains(app));
        assert!(g.is_empty());
    }

    #[test]
    fn destroy_spares_referenced_children() {
        let mut g = SceneGraph::new();
        let doomed = g.new_transform();
        let keeper = g.new_transform();
        let shared = g.new_shape();

        g.attach_child(doomed, shared).unwrap();
        g.attach_reference(keeper, shared).unwrap();

        g.destroy(doomed);
        assert!(!g.contains(doomed));
        assert!(g.contains(shared));
        assert_eq!(g.owner(shared), None);
        assert_eq!(g.attachment_count(shared), 1);
    }

    #[test]
    fn destroy_releases_references() {
        let mut g = SceneGraph::new();
        let owner = g.new_transform();
        let borrower = g.new_transform();
        let shared = g.new_shape();

        g.attach_child(owner, shared).unwrap();
        g.attach_reference(borrower, shared).unwrap();
        assert_eq!(g.attachment_count(shared), 2);

        g.destroy(borrower);
        assert!(g.contains(shared));
        assert_eq!(g.attachment_count(shared), 1);
        assert_eq!(g.owner(shared), Some(owner));
    }

    #[test]
    fn destroy_unlinks_from_owner() {
        let mut g = SceneGraph::new();
        let root = g.new_transform();
        let child = g.new_transform();
        g.attach_child(root, child).unwrap();

        g.destroy(child);
        assert!(g.contains(root));
        assert!(g.children(root).is_empty());
    }
}
