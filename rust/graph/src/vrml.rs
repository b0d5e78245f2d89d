// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! VRML 2.0 serialization of a scene graph.
//!
//! Nodes with more than one attachment point are emitted once under a `DEF`
//! name and referenced with `USE` everywhere else, so instanced sub-trees
//! stay shared in the output file. A node is named at its first emission
//! regardless of whether that emission travels an owned or a shared link;
//! VRML only requires that `DEF` precedes `USE`.

use std::io::{self, Write};

use rustc_hash::FxHashMap;

use crate::graph::SceneGraph;
use crate::keys::NodeKey;
use crate::node::{AppearanceNode, NodeKind, ShapeNode, TransformNode};

/// Serialize the scene rooted at `root` as VRML 2.0.
pub fn write_vrml<W: Write>(graph: &SceneGraph, root: NodeKey, out: &mut W) -> io::Result<()> {
    writeln!(out, "#VRML V2.0 utf8")?;
    let mut writer = VrmlWriter {
        graph,
        names: FxHashMap::default(),
        next_name: 1,
    };
    writer.write_node(out, root, 0)
}

struct VrmlWriter<'a> {
    graph: &'a SceneGraph,
    names: FxHashMap<NodeKey, String>,
    next_name: usize,
}

impl VrmlWriter<'_> {
    fn write_node<W: Write>(&mut self, out: &mut W, node: NodeKey, depth: usize) -> io::Result<()> {
        let pad = Indent(depth);
        if let Some(name) = self.names.get(&node) {
            return writeln!(out, "{pad}USE {name}");
        }
        let def = self.def_prefix(node);
        match self.graph.node(node) {
            Some(NodeKind::Transform(t)) => self.write_transform(out, t, &def, depth),
            Some(NodeKind::Shape(s)) => self.write_shape(out, s, &def, depth),
            Some(NodeKind::Appearance(a)) => write_appearance(out, a, &def, depth),
            None => Ok(()),
        }
    }

    /// `"DEF Nk "` for multiply attached nodes, empty otherwise.
    fn def_prefix(&mut self, node: NodeKey) -> String {
        if self.graph.attachment_count(node) > 1 {
            let name = format!("N{}", self.next_name);
            self.next_name += 1;
            self.names.insert(node, name.clone());
            format!("DEF {name} ")
        } else {
            String::new()
        }
    }

    fn write_transform<W: Write>(
        &mut self,
        out: &mut W,
        transform: &TransformNode,
        def: &str,
        depth: usize,
    ) -> io::Result<()> {
        let pad = Indent(depth);
        let inner = Indent(depth + 1);
        writeln!(out, "{pad}{def}Transform {{")?;
        let t = transform.translation;
        if t != nalgebra::Vector3::zeros() {
            writeln!(out, "{inner}translation {} {} {}", t.x, t.y, t.z)?;
        }
        if let Some((axis, angle)) = transform.rotation {
            writeln!(
                out,
                "{inner}rotation {} {} {} {}",
                axis.x, axis.y, axis.z, angle
            )?;
        }
        writeln!(out, "{inner}children [")?;
        let children: Vec<NodeKey> = transform.children().iter().map(|l| l.key()).collect();
        for child in children {
            self.write_node(out, child, depth + 2)?;
        }
        writeln!(out, "{inner}]")?;
        writeln!(out, "{pad}}}")
    }

    fn write_shape<W: Write>(
        &mut self,
        out: &mut W,
        shape: &ShapeNode,
        def: &str,
        depth: usize,
    ) -> io::Result<()> {
        let pad = Indent(depth);
        let inner = Indent(depth + 1);
        writeln!(out, "{pad}{def}Shape {{")?;
        if let Some(link) = shape.appearance() {
            write!(out, "{inner}appearance ")?;
            let app = link.key();
            if let Some(name) = self.names.get(&app).cloned() {
                writeln!(out, "USE {name}")?;
            } else {
                let app_def = self.def_prefix(app);
                if let Some(a) = self.graph.appearance(app) {
                    write_appearance_body(out, a, &app_def, depth + 1)?;
                }
            }
        }
        writeln!(out, "{inner}geometry IndexedFaceSet {{")?;
        let coords = Indent(depth + 2);
        let points = Indent(depth + 3);
        writeln!(out, "{coords}coord Coordinate {{")?;
        writeln!(out, "{points}point [")?;
        for p in shape.vertices().iter() {
            writeln!(out, "{points}  {} {} {},", p.x, p.y, p.z)?;
        }
        writeln!(out, "{points}]")?;
        writeln!(out, "{coords}}}")?;
        writeln!(out, "{coords}coordIndex [")?;
        for tri in shape.indices().chunks_exact(3) {
            writeln!(out, "{points}{}, {}, {}, -1,", tri[0], tri[1], tri[2])?;
        }
        writeln!(out, "{coords}]")?;
        writeln!(out, "{inner}}}")?;
        writeln!(out, "{pad}}}")
    }
}

fn write_appearance<W: Write>(
    out: &mut W,
    appearance: &AppearanceNode,
    def: &str,
    depth: usize,
) -> io::Result<()> {
    let pad = Indent(depth);
    write!(out, "{pad}")?;
    write_appearance_body(out, appearance, def, depth)
}

/// Writes `Appearance { material Material { .. } }`; the caller has already
/// written any indentation or `appearance ` field prefix.
fn write_appearance_body<W: Write>(
    out: &mut W,
    appearance: &AppearanceNode,
    def: &str,
    depth: usize,
) -> io::Result<()> {
    let pad = Indent(depth);
    let inner = Indent(depth + 1);
    let fields = Indent(depth + 2);
    writeln!(out, "{def}Appearance {{")?;
    writeln!(out, "{inner}material Material {{")?;
    let d = appearance.diffuse;
    let s = appearance.specular;
    let ambient = ambient_intensity(appearance.ambient);
    writeln!(out, "{fields}diffuseColor {} {} {}", d[0], d[1], d[2])?;
    writeln!(out, "{fields}specularColor {} {} {}", s[0], s[1], s[2])?;
    writeln!(out, "{fields}ambientIntensity {ambient}")?;
    writeln!(out, "{fields}shininess {}", appearance.shininess)?;
    writeln!(out, "{inner}}}")?;
    writeln!(out, "{pad}}}")
}

/// VRML materials carry a scalar ambient intensity; collapse the RGB
/// ambient to its mean.
fn ambient_intensity(ambient: [f32; 3]) -> f32 {
    (ambient[0] + ambient[1] + ambient[2]) / 3.0
}

struct Indent(usize);

impl std::fmt::Display for Indent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for _ in 0..self.0 {
            f.write_str("  ")?;
        }
        Ok(())
    }
}
