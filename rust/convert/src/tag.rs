// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Canonical tags: textual identity of a document label.
//!
//! The tag of a label is the colon-separated chain of integer tags from the
//! document root down to the label. Two labels denote the same canonical
//! assembly position iff their tags are equal, which makes the tag the sole
//! key for the instancing and face caches. Tags are never parsed back or
//! used for geometry.

use cadscene_document::{Document, LabelKey};

/// Derive the canonical tag of a label.
///
/// Ascends from `label` to the document root collecting integer tags, then
/// emits them root-first. Returns an empty string for a label that is not
/// part of the document; an empty tag disables caching for its shape.
pub fn canonical_tag(document: &Document, label: LabelKey) -> String {
    let mut tags = Vec::new();
    let mut current = Some(label);
    while let Some(l) = current {
        match document.label_tag(l) {
            Some(tag) => tags.push(tag),
            None => return String::new(),
        }
        current = document.label_parent(l);
    }
    tags.reverse();
    let mut out = String::new();
    for (i, tag) in tags.iter().enumerate() {
        if i > 0 {
            out.push(':');
        }
        out.push_str(&tag.to_string());
    }
    out
}

/// The cache tag of the reverse-oriented twin of a two-sided face.
pub fn back_tag(tag: &str) -> String {
    let mut out = String::with_capacity(tag.len() + 1);
    out.push_str(tag);
    out.push('b');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_comes_first() {
        let mut doc = Document::new();
        let a = doc.new_label(doc.root_label()).unwrap();
        let b = doc.new_label(a).unwrap();
        let c = doc.new_label(b).unwrap();

        assert_eq!(canonical_tag(&doc, doc.root_label()), "0");
        assert_eq!(canonical_tag(&doc, a), "0:1");
        assert_eq!(canonical_tag(&doc, c), "0:1:1:1");
    }

    #[test]
    fn multi_digit_tags_stay_intact() {
        let mut doc = Document::new();
        let root = doc.root_label();
        let mut last = root;
        for _ in 0..12 {
            last = doc.new_label(root).unwrap();
        }
        assert_eq!(canonical_tag(&doc, last), "0:12");
    }

    #[test]
    fn tags_are_stable() {
        let mut doc = Document::new();
        let a = doc.new_label(doc.root_label()).unwrap();
        let first = canonical_tag(&doc, a);
        let second = canonical_tag(&doc, a);
        assert_eq!(first, second);
    }

    #[test]
    fn distinct_positions_get_distinct_tags() {
        let mut doc = Document::new();
        let root = doc.root_label();
        let a = doc.new_label(root).unwrap();
        let b = doc.new_label(root).unwrap();
        assert_ne!(canonical_tag(&doc, a), canonical_tag(&doc, b));
    }

    #[test]
    fn back_tag_appends_suffix() {
        assert_eq!(back_tag("0:1:2"), "0:1:2b");
        assert_eq!(back_tag(""), "b");
    }
}
