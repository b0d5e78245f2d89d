// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Key types for arena-based document storage.

use slotmap::new_key_type;

new_key_type! {
    /// Key for a label in the document tree.
    pub struct LabelKey;

    /// Key for a topological shape.
    pub struct ShapeKey;
}
