// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The assembly document: label tree, shape arena, attribute storage.
//!
//! A [`Document`] holds two arenas. Labels form the identity tree: every
//! label carries an integer tag unique among its siblings, and the chain of
//! tags from the root down to a label is its canonical position in the
//! assembly. Shapes form the topology: a tree of compounds, solids, shells
//! and faces, where a shape may be bound to the label that describes it.
//! Several shape instances may be bound to the same label; that is how
//! assembly instancing is expressed.
//!
//! Triangulations live in a per-face side table behind a `RefCell` so that
//! a conversion run can lazily tessellate faces while holding a shared
//! reference to the document, mirroring how a geometry kernel attaches
//! meshes to faces in place.

use std::cell::RefCell;
use std::sync::Arc;

use nalgebra::Isometry3;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::color::{Color, ColorCategory};
use crate::error::{Error, Result};
use crate::keys::{LabelKey, ShapeKey};
use crate::shape::{Orientation, ShapeData, ShapeKind};
use crate::triangulation::Triangulation;

/// Data stored for a label in the document tree.
#[derive(Debug, Clone)]
struct LabelData {
    tag: i32,
    parent: Option<LabelKey>,
    children: Vec<LabelKey>,
    colors: [Option<Color>; 3],
}

/// An in-memory CAD assembly document.
#[derive(Debug)]
pub struct Document {
    labels: SlotMap<LabelKey, LabelData>,
    shapes: SlotMap<ShapeKey, ShapeData>,
    root: LabelKey,
    free_shapes: Vec<ShapeKey>,
    shape_labels: FxHashMap<ShapeKey, LabelKey>,
    triangulations: RefCell<FxHashMap<ShapeKey, Arc<Triangulation>>>,
}

impl Document {
    /// Create an empty document with a root label (tag 0).
    pub fn new() -> Self {
        let mut labels = SlotMap::with_key();
        let root = labels.insert(LabelData {
            tag: 0,
            parent: None,
            children: Vec::new(),
            colors: [None; 3],
        });
        Self {
            labels,
            shapes: SlotMap::with_key(),
            root,
            free_shapes: Vec::new(),
            shape_labels: FxHashMap::default(),
            triangulations: RefCell::new(FxHashMap::default()),
        }
    }

    /// The root label of the document tree.
    pub fn root_label(&self) -> LabelKey {
        self.root
    }

    /// Create a child label under `parent` with the next sequential tag.
    pub fn new_label(&mut self, parent: LabelKey) -> Result<LabelKey> {
        let tag = {
            let data = self
                .labels
                .get(parent)
                .ok_or(Error::LabelNotFound(parent))?;
            data.children.len() as i32 + 1
        };
        let child = self.labels.insert(LabelData {
            tag,
            parent: Some(parent),
            children: Vec::new(),
            colors: [None; 3],
        });
        self.labels[parent].children.push(child);
        Ok(child)
    }

    /// The integer tag of a label.
    pub fn label_tag(&self, label: LabelKey) -> Option<i32> {
        self.labels.get(label).map(|l| l.tag)
    }

    /// The parent of a label, `None` for the root.
    pub fn label_parent(&self, label: LabelKey) -> Option<LabelKey> {
        self.labels.get(label).and_then(|l| l.parent)
    }

    /// Child labels of a label, in creation order.
    pub fn label_children(&self, label: LabelKey) -> &[LabelKey] {
        self.labels
            .get(label)
            .map(|l| l.children.as_slice())
            .unwrap_or(&[])
    }

    /// Assign a color attribute of the given category to a label.
    pub fn set_color(
        &mut self,
        label: LabelKey,
        category: ColorCategory,
        color: Color,
    ) -> Result<()> {
        let data = self
            .labels
            .get_mut(label)
            .ok_or(Error::LabelNotFound(label))?;
        data.colors[category.index()] = Some(color);
        Ok(())
    }

    /// The color attribute of the given category on a label itself.
    ///
    /// This does not consult ancestors; inheritance is the resolver's job.
    pub fn color(&self, label: LabelKey, category: ColorCategory) -> Option<Color> {
        self.labels
            .get(label)
            .and_then(|l| l.colors[category.index()])
    }

    /// Add a detached shape of the given kind.
    pub fn add_shape(&mut self, kind: ShapeKind) -> ShapeKey {
        self.shapes.insert(ShapeData::new(kind))
    }

    /// Add `child` as a sub-shape of `parent`.
    pub fn add_subshape(&mut self, parent: ShapeKey, child: ShapeKey) -> Result<()> {
        if !self.shapes.contains_key(child) {
            return Err(Error::ShapeNotFound(child));
        }
        let data = self
            .shapes
            .get_mut(parent)
            .ok_or(Error::ShapeNotFound(parent))?;
        if !data.kind.is_container() {
            return Err(Error::NotAContainer(data.kind));
        }
        data.children.push(child);
        Ok(())
    }

    /// Set the local placement of a shape.
    pub fn set_location(&mut self, shape: ShapeKey, location: Isometry3<f64>) -> Result<()> {
        let data = self
            .shapes
            .get_mut(shape)
            .ok_or(Error::ShapeNotFound(shape))?;
        data.location = Some(location);
        Ok(())
    }

    /// Set the orientation of a face shape.
    pub fn set_orientation(&mut self, shape: ShapeKey, orientation: Orientation) -> Result<()> {
        let data = self
            .shapes
            .get_mut(shape)
            .ok_or(Error::ShapeNotFound(shape))?;
        data.orientation = orientation;
        Ok(())
    }

    /// The kind of a shape.
    pub fn shape_kind(&self, shape: ShapeKey) -> Option<ShapeKind> {
        self.shapes.get(shape).map(|s| s.kind)
    }

    /// Sub-shapes of a shape, in insertion order.
    pub fn subshapes(&self, shape: ShapeKey) -> &[ShapeKey] {
        self.shapes
            .get(shape)
            .map(|s| s.children.as_slice())
            .unwrap_or(&[])
    }

    /// The local placement of a shape, if one was set.
    pub fn location(&self, shape: ShapeKey) -> Option<Isometry3<f64>> {
        self.shapes.get(shape).and_then(|s| s.location)
    }

    /// The orientation of a shape. Defaults to forward.
    pub fn orientation(&self, shape: ShapeKey) -> Orientation {
        self.shapes
            .get(shape)
            .map(|s| s.orientation)
            .unwrap_or_default()
    }

    /// Bind a shape to the label that describes it.
    pub fn bind_label(&mut self, shape: ShapeKey, label: LabelKey) -> Result<()> {
        if !self.shapes.contains_key(shape) {
            return Err(Error::ShapeNotFound(shape));
        }
        if !self.labels.contains_key(label) {
            return Err(Error::LabelNotFound(label));
        }
        self.shape_labels.insert(shape, label);
        Ok(())
    }

    /// The label a shape is bound to, if any.
    pub fn find_label(&self, shape: ShapeKey) -> Option<LabelKey> {
        self.shape_labels.get(&shape).copied()
    }

    /// Register a shape as a top-level (free) shape of the document.
    pub fn add_free_shape(&mut self, shape: ShapeKey) {
        self.free_shapes.push(shape);
    }

    /// Top-level shapes, in registration order.
    pub fn free_shapes(&self) -> &[ShapeKey] {
        &self.free_shapes
    }

    /// The currently stored triangulation of a face, if any.
    pub fn triangulation(&self, face: ShapeKey) -> Option<Arc<Triangulation>> {
        self.triangulations.borrow().get(&face).cloned()
    }

    /// Store (or replace) the triangulation of a face.
    pub fn store_triangulation(&self, face: ShapeKey, triangulation: Triangulation) {
        self.triangulations
            .borrow_mut()
            .insert(face, Arc::new(triangulation));
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Translation3, UnitQuaternion};

    #[test]
    fn labels_get_sequential_tags() {
        let mut doc = Document::new();
        let root = doc.root_label();
        let a = doc.new_label(root).unwrap();
        let b = doc.new_label(root).unwrap();
        let a1 = doc.new_label(a).unwrap();

        assert_eq!(doc.label_tag(root), Some(0));
        assert_eq!(doc.label_tag(a), Some(1));
        assert_eq!(doc.label_tag(b), Some(2));
        assert_eq!(doc.label_tag(a1), Some(1));
        assert_eq!(doc.label_parent(a1), Some(a));
        assert_eq!(doc.label_children(root), &[a, b]);
    }

    #[test]
    fn colors_are_per_category() {
        let mut doc = Document::new();
        let label = doc.new_label(doc.root_label()).unwrap();
        let red = Color::new(1.0, 0.0, 0.0);
        doc.set_color(label, ColorCategory::Surface, red).unwrap();

        assert_eq!(doc.color(label, ColorCategory::Surface), Some(red));
        assert_eq!(doc.color(label, ColorCategory::Generic), None);
        assert_eq!(doc.color(label, ColorCategory::Curve), None);
    }

    #[test]
    fn faces_reject_subshapes() {
        let mut doc = Document::new();
        let face = doc.add_shape(ShapeKind::Face);
        let other = doc.add_shape(ShapeKind::Face);
        assert!(matches!(
            doc.add_subshape(face, other),
            Err(Error::NotAContainer(ShapeKind::Face))
        ));
    }

    #[test]
    fn shape_tree_and_binding() {
        let mut doc = Document::new();
        let label = doc.new_label(doc.root_label()).unwrap();
        let solid = doc.add_shape(ShapeKind::Solid);
        let shell = doc.add_shape(ShapeKind::Shell);
        doc.add_subshape(solid, shell).unwrap();
        doc.bind_label(solid, label).unwrap();
        doc.add_free_shape(solid);

        assert_eq!(doc.shape_kind(solid), Some(ShapeKind::Solid));
        assert_eq!(doc.subshapes(solid), &[shell]);
        assert_eq!(doc.find_label(solid), Some(label));
        assert_eq!(doc.find_label(shell), None);
        assert_eq!(doc.free_shapes(), &[solid]);
    }

    #[test]
    fn location_round_trip() {
        let mut doc = Document::new();
        let solid = doc.add_shape(ShapeKind::Solid);
        assert!(doc.location(solid).is_none());

        let iso = Isometry3::from_parts(
            Translation3::new(1.0, 2.0, 3.0),
            UnitQuaternion::identity(),
        );
        doc.set_location(solid, iso).unwrap();
        let stored = doc.location(solid).unwrap();
        assert_eq!(stored.translation.vector, iso.translation.vector);
    }

    #[test]
    fn triangulation_store() {
        let mut doc = Document::new();
        let face = doc.add_shape(ShapeKind::Face);
        assert!(doc.triangulation(face).is_none());

        let mut tri = Triangulation::new(0.1);
        tri.add_node(Point3::origin());
        doc.store_triangulation(face, tri);

        let stored = doc.triangulation(face).unwrap();
        assert_eq!(stored.node_count(), 1);
        assert_eq!(stored.deflection, 0.1);
    }
}
