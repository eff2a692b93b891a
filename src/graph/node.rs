use crate::NodeID;
use glam::Vec3;

/// The per-search bookkeeping of a [`Node`]. Never persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SearchData {
    /// Position (within the [`NavGraph`](super::NavGraph)) of the Node this one was reached from
    pub parent: Option<usize>,
    /// Cost of the best known way from the start
    pub g: f32,
    /// Heuristic estimate of the remaining cost to the goal
    pub h: f32,
    /// `g + h`
    pub f: f32,
}

impl SearchData {
    pub(crate) fn set(&mut self, parent: Option<usize>, g: f32, h: f32) {
        self.parent = parent;
        self.g = g;
        self.h = h;
        self.f = g + h;
    }
}

/// A Waypoint in a [`NavGraph`](super::NavGraph)
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub(crate) id: NodeID,
    pub(crate) pos: Vec3,
    pub(crate) neighbors: Vec<usize>,
    pub(crate) search: SearchData,
}

impl Node {
    pub(crate) fn new(id: NodeID, pos: Vec3) -> Node {
        Node {
            id,
            pos,
            neighbors: Vec::new(),
            search: SearchData::default(),
        }
    }

    /// The id of this Node
    pub fn id(&self) -> NodeID {
        self.id
    }

    /// The position of this Node
    pub fn pos(&self) -> Vec3 {
        self.pos
    }

    /// The positions of all neighbors within the owning [`NavGraph`](super::NavGraph).
    ///
    /// Use [`NavGraph::neighbors`](super::NavGraph::neighbors) to get the Nodes themselves.
    pub fn neighbors(&self) -> &[usize] {
        &self.neighbors
    }

    /// Number of (not necessarily distinct) neighbors
    pub fn neighbor_count(&self) -> usize {
        self.neighbors.len()
    }

    /// The state of this Node after the last search
    pub fn search_data(&self) -> &SearchData {
        &self.search
    }
}
