// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # CadScene Document
//!
//! In-memory model of a CAD assembly document: a tree of integer-tagged
//! labels carrying color attributes, plus an arena of topological shapes
//! (compounds, solids, shells, faces) bound to those labels.
//!
//! The model mirrors what a STEP/IGES import front end produces: shapes
//! reference labels for identity and attributes, faces carry cached
//! triangulations, and tessellation itself is delegated to a geometry
//! kernel behind the [`FaceMesher`] trait.
//!
//! ## Example
//!
//! ```
//! use cadscene_document::{Color, ColorCategory, Document, ShapeKind};
//!
//! let mut doc = Document::new();
//! let part = doc.new_label(doc.root_label()).unwrap();
//! doc.set_color(part, ColorCategory::Generic, Color::new(0.8, 0.1, 0.1)).unwrap();
//!
//! let solid = doc.add_shape(ShapeKind::Solid);
//! doc.bind_label(solid, part).unwrap();
//! doc.add_free_shape(solid);
//! ```

pub mod color;
pub mod document;
pub mod error;
pub mod keys;
pub mod mesher;
pub mod shape;
pub mod triangulation;

// Re-export nalgebra types for convenience
pub use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector3};

pub use color::{Color, ColorCategory};
pub use document::Document;
pub use error::{Error, Result};
pub use keys::{LabelKey, ShapeKey};
pub use mesher::FaceMesher;
pub use shape::{Orientation, ShapeKind};
pub use triangulation::Triangulation;
