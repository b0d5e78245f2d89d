// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Key type for scene nodes.

use slotmap::new_key_type;

new_key_type! {
    /// Key for a scene node of any kind.
    pub struct NodeKey;
}
