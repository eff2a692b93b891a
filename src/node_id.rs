//! A Module with some utilities for working with NodeIDs

use std::hash::{BuildHasherDefault, Hasher};

/// The Type used to reference a Node in a Navigation Graph
///
/// NodeIDs are stored as `i32` in Navigation Files, where negative values are reserved as
/// "no Node" sentinels. In memory they are always non-negative.
pub type NodeID = u32;

/// A specialized [`HashMap`](hashbrown::HashMap) for NodeIDs with a faster Hasher
pub type NodeIDMap<V> = hashbrown::HashMap<NodeID, V, BuildHasherDefault<NodeIDHasher>>;
/// A specialized [`HashSet`](hashbrown::HashSet) for NodeIDs with a faster Hasher
pub type NodeIDSet = hashbrown::HashSet<NodeID, BuildHasherDefault<NodeIDHasher>>;

/// A [`Hasher`] specialized on NodeIDs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct NodeIDHasher(u64);

impl Hasher for NodeIDHasher {
    /// panics, since only NodeIDs are supposed to be used
    fn write(&mut self, _: &[u8]) {
        unreachable!("This Hasher only works with NodeIDs")
    }
    /// Writes a single NodeID into this hasher.
    fn write_u32(&mut self, id: NodeID) {
        // spread sequential ids over the high bits hashbrown uses for its control bytes
        self.0 = (id as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
    fn finish(&self) -> u64 {
        self.0
    }
}

/// create a new, empty [`NodeIDMap`]
pub fn node_id_map<V>() -> NodeIDMap<V> {
    NodeIDMap::default()
}

/// create a new [`NodeIDMap`] with room for `capacity` entries
pub fn node_id_map_with_cap<V>(capacity: usize) -> NodeIDMap<V> {
    NodeIDMap::with_capacity_and_hasher(capacity, Default::default())
}
