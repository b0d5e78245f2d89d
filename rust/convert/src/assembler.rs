// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session state and lifecycle of one conversion run.
//!
//! A [`SceneAssembler`] owns everything that is mutable during a run: the
//! scene graph under construction, the appearance cache, the face cache and
//! the solid subtree cache. All of it is scoped to this one session —
//! converting another document means another assembler. Converting in
//! parallel therefore needs no locks, just separate assemblers.
//!
//! [`SceneAssembler::finalize`] ends the session with a defensive sweep:
//! any cached node that never gained an attachment point is destroyed, so
//! abandoned build products cannot leak into the returned scene.

use std::io::{self, Write};

use cadscene_document::{Document, FaceMesher};
use cadscene_graph::{write_vrml, NodeKey, SceneGraph};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::appearance::AppearanceCache;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::face::FaceBuilder;

/// State of one document-to-scene conversion session.
pub struct SceneAssembler<'a> {
    pub(crate) document: &'a Document,
    pub(crate) mesher: &'a dyn FaceMesher,
    pub(crate) config: Config,
    pub(crate) graph: SceneGraph,
    pub(crate) root: NodeKey,
    pub(crate) appearances: AppearanceCache,
    pub(crate) faces: FaceBuilder,
    /// Instancing cache: canonical tag of a solid to the scene nodes its
    /// first build produced.
    pub(crate) subtrees: FxHashMap<String, Vec<NodeKey>>,
}

impl<'a> SceneAssembler<'a> {
    /// Start a session over `document`, tessellating with `mesher`.
    pub fn new(document: &'a Document, mesher: &'a dyn FaceMesher, config: Config) -> Self {
        let mut graph = SceneGraph::new();
        let root = graph.new_transform();
        Self {
            document,
            mesher,
            config,
            graph,
            root,
            appearances: AppearanceCache::new(),
            faces: FaceBuilder::new(),
            subtrees: FxHashMap::default(),
        }
    }

    /// The root transform of the scene under construction.
    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// The scene graph under construction.
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Walk every free shape of the document.
    ///
    /// Returns whether any of them produced output. A `false` is not an
    /// error down here; the caller decides whether an empty result is fatal.
    pub fn convert(&mut self) -> Result<bool> {
        debug!(free = self.document.free_shapes().len(), "converting document");
        let mut any = false;
        let mut items = Vec::new();
        for &shape in self.document.free_shapes() {
            if self.walk(shape, self.root, &mut items, false)? {
                any = true;
            }
        }
        Ok(any)
    }

    /// End the session: destroy orphaned cache entries and hand over the
    /// finished scene.
    pub fn finalize(mut self) -> Scene {
        let candidates: Vec<NodeKey> = self
            .appearances
            .nodes()
            .chain(self.faces.nodes())
            .chain(self.subtrees.values().flatten().copied())
            .collect();

        let mut swept = 0usize;
        for node in candidates {
            if self.graph.contains(node) && !self.graph.is_attached(node) {
                self.graph.destroy(node);
                swept += 1;
            }
        }
        if swept > 0 {
            debug!(swept, "destroyed orphaned cache nodes");
        }

        Scene {
            graph: self.graph,
            root: self.root,
        }
    }
}

/// A finished, self-contained scene.
pub struct Scene {
    pub graph: SceneGraph,
    pub root: NodeKey,
}

impl Scene {
    /// Serialize the scene as VRML 2.0.
    pub fn write_vrml<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write_vrml(&self.graph, self.root, out)
    }
}

/// Convert a whole document in one call.
///
/// Runs a full session and treats "nothing came out at all" as
/// [`Error::EmptyScene`]; partial failures inside the document are not
/// errors, matching the per-shape boolean model.
pub fn convert_document(
    document: &Document,
    mesher: &dyn FaceMesher,
    config: Config,
) -> Result<Scene> {
    let mut assembler = SceneAssembler::new(document, mesher, config);
    if !assembler.convert()? {
        return Err(Error::EmptyScene);
    }
    Ok(assembler.finalize())
}
