// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Topological shape kinds and per-shape data.

use nalgebra::Isometry3;
use smallvec::SmallVec;

use crate::keys::ShapeKey;

/// Kind of a topological shape.
///
/// Containment follows the usual B-rep model: compounds may contain any
/// kind, compound-solids contain solids, solids contain shells, shells
/// contain faces. Faces are leaves as far as this document is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Compound,
    CompoundSolid,
    Solid,
    Shell,
    Face,
    /// Lower-level entities (wires, edges, vertices) the converter skips.
    Other,
}

impl ShapeKind {
    /// Whether shapes of this kind may carry sub-shapes.
    pub fn is_container(self) -> bool {
        !matches!(self, ShapeKind::Face | ShapeKind::Other)
    }

    /// Returns the kind name as a string.
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Compound => "Compound",
            ShapeKind::CompoundSolid => "CompoundSolid",
            ShapeKind::Solid => "Solid",
            ShapeKind::Shell => "Shell",
            ShapeKind::Face => "Face",
            ShapeKind::Other => "Other",
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Orientation of a face relative to its surface normal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Forward,
    Reversed,
}

/// Data stored for a shape in the document arena.
#[derive(Debug, Clone)]
pub(crate) struct ShapeData {
    pub(crate) kind: ShapeKind,
    pub(crate) children: SmallVec<[ShapeKey; 4]>,
    /// Local rigid placement, if any. `None` means identity.
    pub(crate) location: Option<Isometry3<f64>>,
    pub(crate) orientation: Orientation,
}

impl ShapeData {
    pub(crate) fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            children: SmallVec::new(),
            location: None,
            orientation: Orientation::Forward,
        }
    }
}
