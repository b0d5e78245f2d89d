// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Recursive assembly traversal.
//!
//! One exhaustive dispatch over the shape kind decides what each document
//! shape becomes in the scene. Compounds and solids open a transform scope;
//! shells and faces emit geometry into the enclosing scope. Every walk
//! reports whether it produced anything, so an ancestor can discard a
//! transform that stayed empty.
//!
//! Solids are the instancing boundary: the node list built for a solid's
//! canonical tag is cached, and any later solid with an equal tag attaches
//! the same nodes by reference. Reuse only ever attaches fully built
//! subtrees — the document tree is acyclic, so a tag can never be
//! re-entered while still under construction.

use cadscene_document::{Color, ShapeKey, ShapeKind};
use cadscene_graph::NodeKey;
use tracing::trace;

use crate::assembler::SceneAssembler;
use crate::color::resolve_color;
use crate::error::Result;
use crate::tag::canonical_tag;

impl SceneAssembler<'_> {
    /// Walk one shape, emitting scene nodes under `parent`.
    ///
    /// `in_solid` tells faces whether an enclosing solid provides a
    /// trustworthy outward orientation; without one they render two-sided.
    pub(crate) fn walk(
        &mut self,
        shape: ShapeKey,
        parent: NodeKey,
        items: &mut Vec<NodeKey>,
        in_solid: bool,
    ) -> Result<bool> {
        match self.document.shape_kind(shape) {
            Some(ShapeKind::Compound) | Some(ShapeKind::CompoundSolid) => {
                self.walk_compound(shape, parent, items)
            }
            Some(ShapeKind::Solid) => self.walk_solid(shape, parent, items),
            Some(ShapeKind::Shell) => self.walk_shell(shape, parent, items, None, in_solid),
            Some(ShapeKind::Face) => self.walk_face(shape, parent, items, None, in_solid),
            Some(ShapeKind::Other) | None => Ok(false),
        }
    }

    /// Compounds group their children under a fresh transform scope. Each
    /// child starts a new assembly boundary, so solid ancestry does not
    /// leak through.
    fn walk_compound(
        &mut self,
        shape: ShapeKey,
        parent: NodeKey,
        items: &mut Vec<NodeKey>,
    ) -> Result<bool> {
        let node = self.graph.new_transform();
        self.apply_location(shape, node)?;

        let mut emitted = false;
        for &child in self.document.subshapes(shape) {
            if self.walk(child, node, items, false)? {
                emitted = true;
            }
        }

        if !emitted {
            self.graph.destroy(node);
            return Ok(false);
        }
        self.graph.attach_child(parent, node)?;
        items.push(node);
        Ok(true)
    }

    fn walk_solid(
        &mut self,
        shape: ShapeKey,
        parent: NodeKey,
        items: &mut Vec<NodeKey>,
    ) -> Result<bool> {
        // a solid without a document entry is processed untagged, which
        // disables instancing for it
        let label = self.document.find_label(shape);
        let tag = label
            .map(|l| canonical_tag(self.document, l))
            .unwrap_or_default();
        let color = label.and_then(|l| resolve_color(self.document, l));

        let node = self.graph.new_transform();
        self.apply_location(shape, node)?;

        let mut emitted = false;
        if !tag.is_empty() {
            if let Some(cached) = self.subtrees.get(&tag) {
                trace!(tag = %tag, nodes = cached.len(), "reusing cached solid subtree");
                let cached = cached.clone();
                for reused in cached {
                    if self.graph.contains(reused) {
                        self.graph.attach(node, reused)?;
                        emitted = true;
                    }
                }
            }
        }
        let reused = emitted;

        let mut built = Vec::new();
        for &child in self.document.subshapes(shape) {
            let ok = match self.document.shape_kind(child) {
                Some(ShapeKind::Shell) => {
                    self.walk_shell(child, node, &mut built, color, true)?
                }
                Some(ShapeKind::Face) => self.walk_face(child, node, &mut built, color, true)?,
                _ => false,
            };
            if ok {
                emitted = true;
            }
        }

        if !emitted {
            self.graph.destroy(node);
            return Ok(false);
        }
        if !tag.is_empty() && !reused && !built.is_empty() {
            self.subtrees.insert(tag, built);
        }
        self.graph.attach_child(parent, node)?;
        items.push(node);
        Ok(true)
    }

    /// Shells are not a transform boundary; their faces land directly in
    /// the enclosing scope.
    fn walk_shell(
        &mut self,
        shape: ShapeKey,
        parent: NodeKey,
        items: &mut Vec<NodeKey>,
        color: Option<Color>,
        in_solid: bool,
    ) -> Result<bool> {
        let mut emitted = false;
        for &child in self.document.subshapes(shape) {
            if self.document.shape_kind(child) != Some(ShapeKind::Face) {
                continue;
            }
            if self.walk_face(child, parent, items, color, in_solid)? {
                emitted = true;
            }
        }
        Ok(emitted)
    }

    fn walk_face(
        &mut self,
        face: ShapeKey,
        parent: NodeKey,
        items: &mut Vec<NodeKey>,
        color: Option<Color>,
        in_solid: bool,
    ) -> Result<bool> {
        let tag = self
            .document
            .find_label(face)
            .map(|l| canonical_tag(self.document, l))
            .unwrap_or_default();
        let two_sided = self.config.force_two_sided || !in_solid;
        self.faces.build(
            self.document,
            self.mesher,
            &self.config,
            &mut self.graph,
            &mut self.appearances,
            face,
            color,
            two_sided,
            &tag,
            parent,
            items,
        )
    }

    /// Copy a shape's local placement onto a transform node: translation
    /// always, rotation only when a non-trivial angle is extractable.
    fn apply_location(&mut self, shape: ShapeKey, node: NodeKey) -> Result<()> {
        if let Some(location) = self.document.location(shape) {
            self.graph
                .set_translation(node, location.translation.vector)?;
            if let Some((axis, angle)) = location.rotation.axis_angle() {
                self.graph.set_rotation(node, axis, angle)?;
            }
        }
        Ok(())
    }
}
