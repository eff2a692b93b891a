//! A* search over a [`NavGraph`].

mod heuristic;
pub use heuristic::{euclidean_distance, manhattan_distance, Heuristic};

mod path;
pub use path::{Cost, Path};

use crate::{NavError, NavFile, NavGraph, NavResult, Node, NodeID};
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Membership {
    Unseen,
    Frontier,
    Visited,
}

/// Finds Paths in a Navigation Graph using the [A* Algorithm](https://en.wikipedia.org/wiki/A*_search_algorithm).
///
/// A PathSearch owns its own copy of a Graph, loaded with [`load`](PathSearch::load) or
/// [`import`](PathSearch::import). Changing the [`NavFile`] afterwards does not affect the search.
///
/// The frontier is a plain list that is scanned for the Node with the lowest `f = g + h`, ties
/// going to the Node discovered first. This keeps results deterministic and is fast enough for
/// Waypoint Graphs of a few hundred Nodes; larger Graphs take `O(n²)` per search.
///
/// ## Examples
/// Basic usage:
/// ```
/// use waypoint_nav::{Heuristic, NavConfig, NavFile, PathSearch};
///
/// //  0 --- 1 --- 2
/// //   \         /
/// //    `-- 3 --'
/// let mut file = NavFile::new("detour", &NavConfig::default()).unwrap();
/// for (x, y) in [(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (1.0, 5.0)] {
///     file.create_node(x, y, 0.0);
/// }
/// for (a, b) in [(0, 1), (1, 2), (0, 3), (3, 2)] {
///     file.attach_nodes(a, b).unwrap();
/// }
///
/// let mut search = PathSearch::new();
/// search.load(&file).unwrap();
///
/// let path = search
///     .find_path(Some(0), Some(2), Heuristic::Euclidean)
///     .unwrap()
///     .expect("0 and 2 are connected");
///
/// // Paths are stored from goal to start
/// assert_eq!(path.path, vec![2, 1, 0]);
/// assert!((path.cost - 2.0).abs() < 1e-6);
/// assert!(search.found());
/// ```
#[derive(Clone, Debug, Default)]
pub struct PathSearch {
    graph: NavGraph,
    frontier: Vec<usize>,
    visited: Vec<usize>,
    membership: Vec<Membership>,
    path: Vec<NodeID>,
    last_cost: Cost,
    found: bool,
    start: Option<NodeID>,
    goal: Option<NodeID>,
}

impl PathSearch {
    /// Creates a PathSearch with an empty Graph
    pub fn new() -> PathSearch {
        PathSearch::default()
    }

    /// Replaces the Graph with a copy of the contents of `file`.
    ///
    /// All results of previous searches are discarded, even if `file` turns out to be invalid.
    pub fn load(&mut self, file: &NavFile) -> NavResult<()> {
        self.import(NavGraph::new());
        self.import(file.build_graph()?);
        log::debug!(
            "loaded navigation map '{}' with {} nodes",
            file.name(),
            self.graph.len()
        );
        Ok(())
    }

    /// Replaces the Graph with `graph`, e.g. the result of [`NavFile::generate_map`].
    pub fn import(&mut self, graph: NavGraph) {
        self.graph = graph;
        self.reset();
        self.start = None;
        self.goal = None;
    }

    fn reset(&mut self) {
        self.frontier.clear();
        self.visited.clear();
        self.path.clear();
        self.membership.clear();
        self.membership.resize(self.graph.len(), Membership::Unseen);
        self.last_cost = 0.0;
        self.found = false;
        self.graph.reset_search_data();
    }

    /// The currently loaded Graph, including the [`SearchData`](crate::SearchData) of the last search
    pub fn graph(&self) -> &NavGraph {
        &self.graph
    }

    /// Searches a Path from `start` to `goal`.
    ///
    /// `None` for `start` means the first Node of the Graph, `None` for `goal` the last one.
    ///
    /// ## Returns
    /// - `Ok(Some(path))` if the goal is reachable. The Path runs **from goal to start** and its
    ///   cost is the sum of the Euclidean lengths of its edges.
    /// - `Ok(None)` if the goal is not reachable.
    /// - `Err(_)` if the Graph is empty or `start`/`goal` are not part of it.
    ///
    /// The result is also kept in [`path`](PathSearch::path), [`last_cost`](PathSearch::last_cost)
    /// and [`found`](PathSearch::found) until the next search or load.
    pub fn find_path(
        &mut self,
        start: Option<NodeID>,
        goal: Option<NodeID>,
        heuristic: Heuristic,
    ) -> NavResult<Option<Path<NodeID>>> {
        self.reset();
        self.start = None;
        self.goal = None;

        let start = self.resolve(start, 0)?;
        let goal = self.resolve(goal, self.graph.len().saturating_sub(1))?;
        self.start = Some(self.graph[start].id);
        self.goal = Some(self.graph[goal].id);

        let goal_id = self.graph[goal].id;
        let goal_pos = self.graph[goal].pos;

        let start_h = heuristic.cost(self.graph[start].pos, goal_pos);
        self.graph[start].search.set(None, 0.0, start_h);
        self.frontier.push(start);
        self.membership[start] = Membership::Frontier;

        while let Some(slot) = self.cheapest_frontier_slot() {
            let current = self.frontier[slot];

            if self.graph[current].id == goal_id {
                self.backtrack(current);
                log::trace!(
                    "search {:?} -> {:?}: visited {} nodes",
                    self.start,
                    self.goal,
                    self.visited.len()
                );
                return Ok(Some(Path::new(self.path.clone(), self.last_cost)));
            }

            self.frontier.remove(slot);
            self.membership[current] = Membership::Visited;
            self.visited.push(current);

            let current_g = self.graph[current].search.g;
            let current_pos = self.graph[current].pos;

            for i in 0..self.graph[current].neighbors.len() {
                let other = self.graph[current].neighbors[i];
                if self.membership[other] == Membership::Visited {
                    continue;
                }

                let other_pos = self.graph[other].pos;
                let tentative_g = current_g + euclidean_distance(current_pos, other_pos);

                if self.membership[other] == Membership::Unseen {
                    self.frontier.push(other);
                    self.membership[other] = Membership::Frontier;
                } else if tentative_g >= self.graph[other].search.g {
                    continue;
                }

                let h = heuristic.cost(other_pos, goal_pos);
                self.graph[other].search.set(Some(current), tentative_g, h);
            }
        }

        log::debug!(
            "no path from {:?} to {:?} after visiting {} nodes",
            self.start,
            self.goal,
            self.visited.len()
        );
        Ok(None)
    }

    fn resolve(&self, id: Option<NodeID>, default: usize) -> NavResult<usize> {
        if self.graph.is_empty() {
            return Err(NavError::EmptyGraph);
        }
        match id {
            Some(id) => self.graph.index_of(id).ok_or(NavError::UnknownNode(id)),
            None => Ok(default),
        }
    }

    fn cheapest_frontier_slot(&self) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (slot, &index) in self.frontier.iter().enumerate() {
            let f = self.graph[index].search.f;
            if best.map_or(true, |(_, best_f)| f < best_f) {
                best = Some((slot, f));
            }
        }
        best.map(|(slot, _)| slot)
    }

    fn backtrack(&mut self, goal: usize) {
        self.path.clear();
        let mut cursor = Some(goal);
        while let Some(index) = cursor {
            let node = &self.graph[index];
            self.path.push(node.id);
            cursor = node.search.parent;
        }
        self.last_cost = self.graph[goal].search.g;
        self.found = true;
    }

    /// Finds the Node closest to `position`.
    ///
    /// If several Nodes are equally close, the first one in the Graph is returned.
    /// `None` if the Graph is empty.
    /// ```
    /// # use waypoint_nav::{NavConfig, NavFile, PathSearch, Vec3};
    /// let mut file = NavFile::new("pair", &NavConfig::default()).unwrap();
    /// file.create_node(0.0, 0.0, 0.0);
    /// file.create_node(10.0, 0.0, 0.0);
    ///
    /// let mut search = PathSearch::new();
    /// search.load(&file).unwrap();
    ///
    /// let nearest = search.nearest_node(Vec3::new(7.0, 1.0, 0.0)).unwrap();
    /// assert_eq!(nearest.id(), 1);
    /// ```
    pub fn nearest_node(&self, position: Vec3) -> Option<&Node> {
        let mut best: Option<(&Node, f32)> = None;
        for node in self.graph.iter() {
            let distance = euclidean_distance(position, node.pos);
            if best.map_or(true, |(_, best_distance)| distance < best_distance) {
                best = Some((node, distance));
            }
        }
        best.map(|(node, _)| node)
    }

    /// The length of the straight line between two Nodes
    pub fn distance(&self, a: &Node, b: &Node) -> f32 {
        euclidean_distance(a.pos, b.pos)
    }

    /// The estimate `heuristic` gives for getting from `a` to `b`
    pub fn heuristic_cost(&self, a: &Node, b: &Node, heuristic: Heuristic) -> f32 {
        heuristic.cost(a.pos, b.pos)
    }

    /// The Path of the last successful search, from goal to start. Empty otherwise.
    pub fn path(&self) -> &[NodeID] {
        &self.path
    }

    /// The cost of the last successful search, `0` otherwise.
    pub fn last_cost(&self) -> Cost {
        self.last_cost
    }

    /// `true` if the last search found a Path
    pub fn found(&self) -> bool {
        self.found
    }

    /// The start Node of the last search
    pub fn start(&self) -> Option<NodeID> {
        self.start
    }

    /// The goal Node of the last search
    pub fn goal(&self) -> Option<NodeID> {
        self.goal
    }

    /// The Nodes that were finalized during the last search, in the order they were visited
    pub fn visited(&self) -> impl Iterator<Item = NodeID> + '_ {
        self.visited.iter().map(move |&i| self.graph[i].id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NavConfig;

    fn file(positions: &[[f32; 3]], edges: &[(NodeID, NodeID)]) -> NavFile {
        let mut file = NavFile::new("test", &NavConfig::default()).unwrap();
        for &[x, y, z] in positions {
            file.create_node(x, y, z);
        }
        for &(a, b) in edges {
            file.attach_nodes(a, b).unwrap();
        }
        file
    }

    fn search(positions: &[[f32; 3]], edges: &[(NodeID, NodeID)]) -> PathSearch {
        let mut search = PathSearch::new();
        search.load(&file(positions, edges)).unwrap();
        search
    }

    #[test]
    fn straight_line() {
        let mut search = search(
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]],
            &[(0, 1), (1, 2)],
        );
        let path = search
            .find_path(Some(0), Some(2), Heuristic::Euclidean)
            .unwrap()
            .unwrap();

        assert_eq!(path.path, vec![2, 1, 0]);
        assert!((path.cost - 2.0).abs() < 1e-6);
        assert_eq!(search.path(), &[2, 1, 0]);
        assert!((search.last_cost() - 2.0).abs() < 1e-6);
        assert!(search.found());
    }

    #[test]
    fn defaults_to_first_and_last() {
        let mut search = search(
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]],
            &[(0, 1), (1, 2)],
        );
        let path = search.find_path(None, None, Heuristic::default()).unwrap().unwrap();
        assert_eq!(path.path, vec![2, 1, 0]);
        assert_eq!(search.start(), Some(0));
        assert_eq!(search.goal(), Some(2));

        // start and goal are not swapped when given explicitly
        let path = search.find_path(Some(2), None, Heuristic::default()).unwrap().unwrap();
        assert_eq!(path.path, vec![2]);
        let path = search.find_path(Some(2), Some(0), Heuristic::default()).unwrap().unwrap();
        assert_eq!(path.path, vec![0, 1, 2]);
    }

    #[test]
    fn prefers_short_detour() {
        //        3
        //      /   \
        // 0 - 1 --- 2 - 4
        //  (1-2 is long because 2 sits far up)
        let mut search = search(
            &[
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [3.0, 0.0, 10.0],
                [2.0, 0.0, 0.5],
                [4.0, 0.0, 0.0],
            ],
            &[(0, 1), (1, 2), (2, 4), (1, 3), (3, 4)],
        );
        let path = search
            .find_path(Some(0), Some(4), Heuristic::Euclidean)
            .unwrap()
            .unwrap();
        assert_eq!(path.path, vec![4, 3, 1, 0]);
    }

    #[test]
    fn unreachable_goal() {
        let mut search = search(
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [5.0, 0.0, 0.0], [6.0, 0.0, 0.0]],
            &[(0, 1), (2, 3)],
        );
        let result = search.find_path(Some(0), Some(3), Heuristic::Manhattan).unwrap();
        assert!(result.is_none());
        assert!(!search.found());
        assert!(search.path().is_empty());
        assert_eq!(search.visited().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn start_is_goal() {
        let mut search = search(&[[3.0, 3.0, 3.0]], &[]);
        let path = search.find_path(Some(0), Some(0), Heuristic::Euclidean).unwrap().unwrap();
        assert_eq!(path.path, vec![0]);
        assert_eq!(path.cost, 0.0);
    }

    #[test]
    fn empty_graph() {
        let mut search = PathSearch::new();
        assert!(matches!(
            search.find_path(None, None, Heuristic::Euclidean),
            Err(NavError::EmptyGraph)
        ));
        assert!(search.nearest_node(Vec3::ZERO).is_none());
        assert!(!search.found());
    }

    #[test]
    fn unknown_node() {
        let mut search = search(&[[0.0, 0.0, 0.0]], &[]);
        assert!(matches!(
            search.find_path(Some(0), Some(7), Heuristic::Euclidean),
            Err(NavError::UnknownNode(7))
        ));
    }

    #[test]
    fn repeated_searches_do_not_leak_state() {
        let mut search = search(
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [3.0, 0.0, 0.0]],
            &[(0, 1), (1, 2), (2, 3)],
        );
        let first = search.find_path(Some(0), Some(3), Heuristic::Euclidean).unwrap();
        let _ = search.find_path(Some(3), Some(1), Heuristic::Manhattan).unwrap();
        let again = search.find_path(Some(0), Some(3), Heuristic::Euclidean).unwrap();
        assert_eq!(first, again);
        assert!((again.unwrap().cost - 3.0).abs() < 1e-6);
    }

    #[test]
    fn self_loops_and_duplicate_edges() {
        let mut search = search(
            &[[0.0, 0.0, 0.0], [0.0, 2.0, 0.0]],
            &[(0, 0), (0, 1), (0, 1)],
        );
        let path = search.find_path(Some(0), Some(1), Heuristic::Euclidean).unwrap().unwrap();
        assert_eq!(path.path, vec![1, 0]);
        assert!((path.cost - 2.0).abs() < 1e-6);
    }

    #[test]
    fn nearest_node_ties() {
        let search = search(&[[1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [0.0, 0.0, 1.0]], &[]);
        assert_eq!(search.nearest_node(Vec3::ZERO).map(Node::id), Some(0));
        assert_eq!(
            search.nearest_node(Vec3::new(0.0, 0.0, 1.0)).map(Node::id),
            Some(2)
        );
    }

    #[test]
    fn loaded_graph_is_a_copy() {
        let mut file = file(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]], &[]);
        let mut search = PathSearch::new();
        search.load(&file).unwrap();

        file.attach_nodes(0, 1).unwrap();
        file.create_node(2.0, 0.0, 0.0);

        assert_eq!(search.graph().len(), 2);
        assert!(search
            .find_path(Some(0), Some(1), Heuristic::Euclidean)
            .unwrap()
            .is_none());
    }

    #[test]
    fn failed_load_resets() {
        let mut search = search(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]], &[(0, 1)]);
        search.find_path(None, None, Heuristic::Euclidean).unwrap();
        assert!(search.found());

        let mut broken = NavFile::new("broken", &NavConfig::default()).unwrap();
        // a node referencing a neighbor that isn't stored
        let mut bytes = 1i32.to_le_bytes().to_vec();
        bytes.extend(0i32.to_le_bytes());
        bytes.extend([0u8; 12]);
        bytes.extend(1i32.to_le_bytes());
        bytes.extend(3i32.to_le_bytes());
        assert!(broken.read_from(bytes.as_slice()).is_err());

        // contents stayed empty, so loading succeeds with an empty graph
        search.load(&broken).unwrap();
        assert!(search.graph().is_empty());
        assert!(!search.found());
        assert!(search.path().is_empty());
    }
}
