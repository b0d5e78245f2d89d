// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Triangle meshes produced by the geometry kernel for faces.

use nalgebra::Point3;

/// A triangulated approximation of one face.
///
/// Node coordinates are in the face's local frame; any face location is
/// applied by the consumer. Triangle indices are zero-based and wound
/// counter-clockwise for a forward-oriented face.
#[derive(Debug, Clone)]
pub struct Triangulation {
    /// Triangulation nodes (vertex positions).
    pub nodes: Vec<Point3<f64>>,
    /// Triangles as index triples into `nodes`.
    pub triangles: Vec<[u32; 3]>,
    /// Chordal deflection this mesh was generated at.
    pub deflection: f64,
}

impl Triangulation {
    /// Create an empty triangulation at the given deflection.
    pub fn new(deflection: f64) -> Self {
        Self {
            nodes: Vec::new(),
            triangles: Vec::new(),
            deflection,
        }
    }

    /// Add a node, returning its index.
    pub fn add_node(&mut self, point: Point3<f64>) -> u32 {
        self.nodes.push(point);
        (self.nodes.len() - 1) as u32
    }

    /// Add a triangle from three node indices.
    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.triangles.push([a, b, c]);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_quad() {
        let mut tri = Triangulation::new(0.1);
        let a = tri.add_node(Point3::new(0.0, 0.0, 0.0));
        let b = tri.add_node(Point3::new(1.0, 0.0, 0.0));
        let c = tri.add_node(Point3::new(1.0, 1.0, 0.0));
        let d = tri.add_node(Point3::new(0.0, 1.0, 0.0));
        tri.add_triangle(a, b, c);
        tri.add_triangle(a, c, d);

        assert_eq!(tri.node_count(), 4);
        assert_eq!(tri.triangle_count(), 2);
        assert!(!tri.is_empty());
        assert_eq!(tri.deflection, 0.1);
    }
}
