// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # CadScene Convert
//!
//! Turns a CAD assembly document into a renderable scene graph while
//! keeping instanced sub-assemblies shared. The recursive walk maps
//! compounds and solids to transform nodes, shells and faces to shape
//! nodes, and resolved colors to cached appearance nodes. Canonical label
//! tags identify equal assembly positions; whatever was built for a tag
//! once is attached by reference ever after, so the output is a compact
//! DAG rather than an exploded tree.
//!
//! ## Example
//!
//! ```rust,ignore
//! use cadscene_convert::{convert_document, Config};
//!
//! let scene = convert_document(&document, &mesher, Config::default())?;
//! let mut out = std::fs::File::create("model.wrl")?;
//! scene.write_vrml(&mut out)?;
//! ```

pub mod appearance;
pub mod assembler;
pub mod color;
pub mod config;
pub mod error;
pub mod face;
pub mod tag;
pub mod walker;

pub use appearance::AppearanceCache;
pub use assembler::{convert_document, Scene, SceneAssembler};
pub use color::{face_own_color, resolve_color};
pub use config::{Config, DEFAULT_ANGLE_INCREMENT, DEFAULT_DEFLECTION};
pub use error::{Error, Result};
pub use face::FaceBuilder;
pub use tag::{back_tag, canonical_tag};
