//! The linked, searchable form of a Navigation Map.

mod node;
pub use node::{Node, SearchData};

use crate::{nav_file::NodeRecord, node_id::*, NavError, NavResult};

/// A Graph of [`Node`]s with resolved adjacency.
///
/// Nodes are stored densely; their ids are mapped to positions through an explicit index, so
/// ids may be sparse or stored in any order.
#[derive(Clone, Debug, Default)]
pub struct NavGraph {
    nodes: Vec<Node>,
    index: NodeIDMap<usize>,
}

impl NavGraph {
    /// Creates an empty Graph
    pub fn new() -> NavGraph {
        NavGraph::default()
    }

    /// Links `records` using the neighbor ids in `links`.
    ///
    /// Every record becomes a new [`Node`], so the result shares nothing with its input.
    pub(crate) fn from_records(
        records: &[NodeRecord],
        links: &NodeIDMap<Vec<NodeID>>,
    ) -> NavResult<NavGraph> {
        let mut index = node_id_map_with_cap(records.len());
        for (i, record) in records.iter().enumerate() {
            if index.insert(record.id, i).is_some() {
                return Err(NavError::DuplicateNode(record.id));
            }
        }

        let mut nodes = Vec::with_capacity(records.len());
        for record in records {
            let mut node = Node::new(record.id, record.pos);
            if let Some(ids) = links.get(&record.id) {
                node.neighbors = ids
                    .iter()
                    .map(|&neighbor| {
                        index.get(&neighbor).copied().ok_or(NavError::DanglingNeighbor {
                            node: record.id,
                            neighbor,
                        })
                    })
                    .collect::<NavResult<_>>()?;
            }
            nodes.push(node);
        }

        Ok(NavGraph { nodes, index })
    }

    /// Number of Nodes in the Graph
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` if the Graph has no Nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All Nodes in storage order
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    /// The position of the Node with the given id
    pub fn index_of(&self, id: NodeID) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// The Node with the given id
    pub fn get(&self, id: NodeID) -> Option<&Node> {
        self.index_of(id).map(|i| &self.nodes[i])
    }

    /// `true` if a Node with the given id exists
    pub fn contains(&self, id: NodeID) -> bool {
        self.index.contains_key(&id)
    }

    /// The first Node in storage order
    pub fn first(&self) -> Option<&Node> {
        self.nodes.first()
    }

    /// The last Node in storage order
    pub fn last(&self) -> Option<&Node> {
        self.nodes.last()
    }

    /// The neighbors of the Node with the given id
    ///
    /// ## Panics
    /// if no Node with the given id exists. Use [`get`](NavGraph::get) to check first.
    #[track_caller]
    pub fn neighbors(&self, id: NodeID) -> impl Iterator<Item = &Node> + '_ {
        let Some(node) = self.get(id) else {
            panic!("Invalid NodeID {}", id)
        };
        node.neighbors.iter().map(move |&i| &self.nodes[i])
    }

    /// `true` if `b` is one of the neighbors of `a`
    pub fn are_adjacent(&self, a: NodeID, b: NodeID) -> bool {
        match (self.get(a), self.index_of(b)) {
            (Some(a), Some(b)) => a.neighbors.contains(&b),
            _ => false,
        }
    }

    pub(crate) fn reset_search_data(&mut self) {
        for node in self.nodes.iter_mut() {
            node.search = SearchData::default();
        }
    }
}

use std::ops::{Index, IndexMut};
impl Index<usize> for NavGraph {
    type Output = Node;
    #[track_caller]
    fn index(&self, index: usize) -> &Node {
        &self.nodes[index]
    }
}
impl IndexMut<usize> for NavGraph {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut Node {
        &mut self.nodes[index]
    }
}

impl<'a> IntoIterator for &'a NavGraph {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;
    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
