// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tessellation seam to the geometry kernel.

use crate::document::Document;
use crate::keys::ShapeKey;
use crate::triangulation::Triangulation;

/// Produces triangle meshes for faces.
///
/// Implemented by the geometry kernel. `deflection` is the maximum chordal
/// distance between the mesh and the true surface; `angle_increment` is the
/// maximum angular step in radians when sampling curved regions. Returns
/// `None` when the face cannot be tessellated; the caller skips such faces.
pub trait FaceMesher {
    fn mesh(
        &self,
        document: &Document,
        face: ShapeKey,
        deflection: f64,
        angle_increment: f64,
    ) -> Option<Triangulation>;
}
