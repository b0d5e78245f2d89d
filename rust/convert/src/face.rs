// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Face conversion: triangulation lookup, winding, two-sided twins.
//!
//! Every successfully converted face becomes one shape node, cached under
//! the face's canonical tag so that later encounters of the same tag attach
//! the existing node as a reference instead of re-tessellating. A two-sided
//! face additionally gets a reverse-wound twin cached under the tag with a
//! `b` suffix; the twin shares the vertex buffer and the appearance of the
//! front copy and differs only in its index buffer.

use std::sync::Arc;

use cadscene_document::{Color, Document, FaceMesher, Orientation, ShapeKey};
use cadscene_graph::{NodeKey, SceneGraph};
use nalgebra::Point3;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::appearance::AppearanceCache;
use crate::color::face_own_color;
use crate::config::Config;
use crate::error::Result;
use crate::tag::back_tag;

/// Slack added to the deflection tolerance when deciding whether a stored
/// triangulation is still acceptable; matches kernel confusion precision.
const DEFLECTION_SLACK: f64 = 1e-7;

/// Builds and caches shape nodes for faces.
#[derive(Debug, Default)]
pub struct FaceBuilder {
    cache: FxHashMap<String, NodeKey>,
}

impl FaceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert one face into shape node(s) under `parent`.
    ///
    /// `inherited` is the color resolved from the enclosing solid or
    /// assembly; a color on the face's own label overrides it. Returns
    /// whether the face contributed anything. Produced (or reused) nodes are
    /// appended to `items`.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn build(
        &mut self,
        document: &Document,
        mesher: &dyn FaceMesher,
        config: &Config,
        graph: &mut SceneGraph,
        appearances: &mut AppearanceCache,
        face: ShapeKey,
        inherited: Option<Color>,
        two_sided: bool,
        tag: &str,
        parent: NodeKey,
        items: &mut Vec<NodeKey>,
    ) -> Result<bool> {
        // instancing path: an equal tag was built before
        if !tag.is_empty() {
            if let Some(&node) = self.cache.get(tag) {
                if graph.contains(node) {
                    trace!(tag, "reusing cached face shape");
                    graph.attach(parent, node)?;
                    items.push(node);
                    if two_sided {
                        if let Some(&back) = self.cache.get(&back_tag(tag)) {
                            if graph.contains(back) {
                                graph.attach(parent, back)?;
                                items.push(back);
                            }
                        }
                    }
                    return Ok(true);
                }
            }
        }

        let Some(triangulation) = self.triangulation(document, mesher, config, face) else {
            debug!(tag, "face skipped: no triangulation");
            return Ok(false);
        };
        if triangulation.is_empty() {
            debug!(tag, "face skipped: empty triangulation");
            return Ok(false);
        }

        // face-local color has precedence over the inherited one
        let color = document
            .find_label(face)
            .and_then(|label| face_own_color(document, label))
            .or(inherited);
        let appearance = appearances.appearance(graph, color);

        let location = document.location(face);
        let mut vertices = Vec::with_capacity(triangulation.node_count());
        for point in &triangulation.nodes {
            let p = match &location {
                Some(loc) => loc * point,
                None => *point,
            };
            vertices.push(Point3::new(p.x as f32, p.y as f32, p.z as f32));
        }
        let vertices = Arc::new(vertices);

        let reversed = document.orientation(face) == Orientation::Reversed;
        let mut indices = Vec::with_capacity(triangulation.triangle_count() * 3);
        let mut back_indices = Vec::with_capacity(if two_sided { indices.capacity() } else { 0 });
        for &[a, b, c] in &triangulation.triangles {
            // a reversed face flips winding by swapping the second and
            // third corner, keeping the first corner in place
            let (a, b, c) = if reversed { (a, c, b) } else { (a, b, c) };
            indices.extend_from_slice(&[a, b, c]);
            if two_sided {
                back_indices.extend_from_slice(&[b, a, c]);
            }
        }

        let shape = graph.new_shape();
        graph.set_vertices(shape, Arc::clone(&vertices))?;
        graph.set_indices(shape, indices)?;
        graph.set_appearance(shape, appearance)?;
        graph.attach(parent, shape)?;
        items.push(shape);
        if !tag.is_empty() {
            self.cache.insert(tag.to_string(), shape);
        }

        if two_sided {
            let back = graph.new_shape();
            graph.set_vertices(back, vertices)?;
            graph.set_indices(back, back_indices)?;
            graph.set_appearance(back, appearance)?;
            graph.attach(parent, back)?;
            items.push(back);
            if !tag.is_empty() {
                self.cache.insert(back_tag(tag), back);
            }
        }

        Ok(true)
    }

    /// Current triangulation if acceptable, otherwise a fresh tessellation.
    fn triangulation(
        &self,
        document: &Document,
        mesher: &dyn FaceMesher,
        config: &Config,
        face: ShapeKey,
    ) -> Option<Arc<cadscene_document::Triangulation>> {
        let stored = document.triangulation(face);
        let stale = match &stored {
            Some(t) => t.deflection > config.deflection + DEFLECTION_SLACK,
            None => true,
        };
        if !stale {
            return stored;
        }
        trace!(?face, deflection = config.deflection, "tessellating face");
        if let Some(fresh) = mesher.mesh(document, face, config.deflection, config.angle_increment)
        {
            document.store_triangulation(face, fresh);
        }
        // a failed re-tessellation falls back to whatever is stored
        document.triangulation(face)
    }

    /// All cached nodes, for the finalize orphan sweep.
    pub fn nodes(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.cache.values().copied()
    }
}
