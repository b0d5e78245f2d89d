// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Color resolution over the label tree.
//!
//! Two deliberately distinct policies. Solids and assemblies resolve with
//! generic before surface before curve, ascending through ancestors until a
//! color is found, which gives the inherited coloring model: an uncolored
//! part takes the nearest colored ancestor's color. Faces check only their
//! own label, with curve ahead of surface, and the result overrides any
//! color inherited from an enclosing solid or shell.

use cadscene_document::{Color, ColorCategory, Document, LabelKey};

const ASSEMBLY_ORDER: [ColorCategory; 3] = [
    ColorCategory::Generic,
    ColorCategory::Surface,
    ColorCategory::Curve,
];

const FACE_ORDER: [ColorCategory; 3] = [
    ColorCategory::Generic,
    ColorCategory::Curve,
    ColorCategory::Surface,
];

/// Resolve the color of a solid or assembly label, consulting ancestors.
pub fn resolve_color(document: &Document, label: LabelKey) -> Option<Color> {
    let mut current = Some(label);
    while let Some(l) = current {
        for category in ASSEMBLY_ORDER {
            if let Some(color) = document.color(l, category) {
                return Some(color);
            }
        }
        current = document.label_parent(l);
    }
    None
}

/// The color a face carries on its own label, if any. Does not ascend.
pub fn face_own_color(document: &Document, label: LabelKey) -> Option<Color> {
    FACE_ORDER
        .into_iter()
        .find_map(|category| document.color(label, category))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_from_nearest_ancestor() {
        let mut doc = Document::new();
        let assembly = doc.new_label(doc.root_label()).unwrap();
        let part = doc.new_label(assembly).unwrap();
        let face = doc.new_label(part).unwrap();

        let blue = Color::new(0.0, 0.0, 1.0);
        doc.set_color(assembly, ColorCategory::Generic, blue).unwrap();

        assert_eq!(resolve_color(&doc, face), Some(blue));
        assert_eq!(resolve_color(&doc, part), Some(blue));
    }

    #[test]
    fn nearer_ancestor_wins() {
        let mut doc = Document::new();
        let assembly = doc.new_label(doc.root_label()).unwrap();
        let part = doc.new_label(assembly).unwrap();
        let face = doc.new_label(part).unwrap();

        let blue = Color::new(0.0, 0.0, 1.0);
        let red = Color::new(1.0, 0.0, 0.0);
        doc.set_color(assembly, ColorCategory::Generic, blue).unwrap();
        doc.set_color(part, ColorCategory::Surface, red).unwrap();

        assert_eq!(resolve_color(&doc, face), Some(red));
    }

    #[test]
    fn generic_beats_surface_beats_curve() {
        let mut doc = Document::new();
        let label = doc.new_label(doc.root_label()).unwrap();
        let generic = Color::new(0.1, 0.1, 0.1);
        let surface = Color::new(0.5, 0.5, 0.5);
        let curve = Color::new(0.9, 0.9, 0.9);
        doc.set_color(label, ColorCategory::Curve, curve).unwrap();
        doc.set_color(label, ColorCategory::Surface, surface).unwrap();
        assert_eq!(resolve_color(&doc, label), Some(surface));

        doc.set_color(label, ColorCategory::Generic, generic).unwrap();
        assert_eq!(resolve_color(&doc, label), Some(generic));
    }

    #[test]
    fn face_order_prefers_curve_over_surface() {
        let mut doc = Document::new();
        let label = doc.new_label(doc.root_label()).unwrap();
        let surface = Color::new(0.5, 0.5, 0.5);
        let curve = Color::new(0.9, 0.9, 0.9);
        doc.set_color(label, ColorCategory::Surface, surface).unwrap();
        doc.set_color(label, ColorCategory::Curve, curve).unwrap();

        assert_eq!(face_own_color(&doc, label), Some(curve));
        assert_eq!(resolve_color(&doc, label), Some(surface));
    }

    #[test]
    fn face_resolution_does_not_ascend() {
        let mut doc = Document::new();
        let part = doc.new_label(doc.root_label()).unwrap();
        let face = doc.new_label(part).unwrap();
        doc.set_color(part, ColorCategory::Generic, Color::new(1.0, 0.0, 0.0))
            .unwrap();

        assert_eq!(face_own_color(&doc, face), None);
    }

    #[test]
    fn uncolored_tree_resolves_to_none() {
        let mut doc = Document::new();
        let a = doc.new_label(doc.root_label()).unwrap();
        let b = doc.new_label(a).unwrap();
        assert_eq!(resolve_color(&doc, b), None);
    }
}
