// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session cache of appearance nodes.
//!
//! Appearances are keyed by the distance of the resolved color to reference
//! black. The key is a similarity measure, not an identity: two distinct
//! colors equidistant from black share one appearance. Known limitation; a
//! raw RGB key would be exact.

use cadscene_document::Color;
use cadscene_graph::{AppearanceNode, NodeKey, SceneGraph};
use rustc_hash::FxHashMap;

const DEFAULT_DIFFUSE: f32 = 0.6;
const DEFAULT_SPECULAR: f32 = 0.04;
const DEFAULT_AMBIENT: f32 = 0.04;
const DEFAULT_SHININESS: f32 = 0.05;

const COLORED_SPECULAR: f32 = 0.12;
const COLORED_AMBIENT: f32 = 0.1;
const COLORED_SHININESS: f32 = 0.1;

/// Maps resolved colors to shared appearance nodes.
#[derive(Debug, Default)]
pub struct AppearanceCache {
    default_node: Option<NodeKey>,
    by_distance: FxHashMap<u64, NodeKey>,
}

impl AppearanceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the appearance for a resolved color.
    ///
    /// `None` yields the one shared neutral-gray default. Callers receive a
    /// possibly shared node either way and must attach it with reference
    /// semantics.
    pub fn appearance(&mut self, graph: &mut SceneGraph, color: Option<Color>) -> NodeKey {
        match color {
            None => {
                if let Some(node) = self.default_node {
                    if graph.contains(node) {
                        return node;
                    }
                }
                let node = graph.new_appearance(AppearanceNode {
                    diffuse: [DEFAULT_DIFFUSE; 3],
                    specular: [DEFAULT_SPECULAR; 3],
                    ambient: [DEFAULT_AMBIENT; 3],
                    shininess: DEFAULT_SHININESS,
                });
                self.default_node = Some(node);
                node
            }
            Some(color) => {
                let key = color.distance(&Color::BLACK).to_bits();
                if let Some(&node) = self.by_distance.get(&key) {
                    if graph.contains(node) {
                        return node;
                    }
                }
                let node = graph.new_appearance(AppearanceNode {
                    diffuse: [color.r as f32, color.g as f32, color.b as f32],
                    specular: [COLORED_SPECULAR; 3],
                    ambient: [COLORED_AMBIENT; 3],
                    shininess: COLORED_SHININESS,
                });
                self.by_distance.insert(key, node);
                node
            }
        }
    }

    /// All cached nodes, for the finalize orphan sweep.
    pub fn nodes(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.default_node
            .into_iter()
            .chain(self.by_distance.values().copied())
    }
}
