#![warn(
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

//! A crate to load, author and search Waypoint Graphs for 3D Navigation.
//!
//! ## Introduction
//! A Waypoint Graph describes where Agents can walk as a set of Nodes placed in the world and
//! connections between Nodes that can be walked between in a straight line. Finding a Path
//! through the world is then reduced to finding a Path through that (usually small) Graph,
//! which this crate does using the A* Algorithm.
//!
//! Graphs are authored and stored as Navigation Files ([`NavFile`]), one file per map. A
//! [`PathSearch`] takes a copy of such a file's Graph and answers Path and nearest-Node queries
//! on it. The [`NavRegistry`] ties both together: it opens and creates files by name and owns
//! the [`PathSearch`] that maps are loaded into.
//!
//! ## Examples
//! Authoring a map:
//! ```
//! use waypoint_nav::prelude::*;
//!
//! //   0 -- 1 -- 2
//! let mut file = NavFile::new("corridor", &NavConfig::default()).unwrap();
//! let a = file.create_node(0.0, 0.0, 0.0);
//! let b = file.create_node(1.0, 0.0, 0.0);
//! let c = file.create_node(2.0, 0.0, 0.0);
//! file.attach_nodes(a, b).unwrap();
//! file.attach_nodes(b, c).unwrap();
//!
//! assert_eq!(file.neighbor_ids(b), &[a, c]);
//! ```
//! Connections are always bidirectional.
//!
//! ### Pathfinding
//! ```
//! # use waypoint_nav::prelude::*;
//! # let mut file = NavFile::new("corridor", &NavConfig::default()).unwrap();
//! # let a = file.create_node(0.0, 0.0, 0.0);
//! # let b = file.create_node(1.0, 0.0, 0.0);
//! # let c = file.create_node(2.0, 0.0, 0.0);
//! # file.attach_nodes(a, b).unwrap();
//! # file.attach_nodes(b, c).unwrap();
//! let mut search = PathSearch::new();
//! search.load(&file).unwrap();
//!
//! // find_path returns Ok(Some(Path)) on success
//! let path = search
//!     .find_path(Some(a), Some(c), Heuristic::Euclidean)
//!     .unwrap()
//!     .unwrap();
//!
//! // Paths run from the goal back to the start
//! assert_eq!(path.path, vec![c, b, a]);
//! assert!((path.cost - 2.0).abs() < 1e-6);
//!
//! // the closest Node to any point in the world
//! let nearest = search.nearest_node(Vec3::new(1.2, 0.5, 0.0)).unwrap();
//! assert_eq!(nearest.id(), b);
//! ```
//! Not finding a Path is not an error: `find_path` returns `Ok(None)`. Errors are only returned
//! for searches that can't be performed, like searching an empty Graph.
//!
//! ### Navigation Files
//! Maps are stored as `<data_dir>/<name>.nav`, with the directory set in the [`NavConfig`].
//! The [`NavRegistry`] reports all failures to a [`Diagnostics`] sink (by default the [`log`]
//! crate) and hands out `Option`s instead of errors:
//! ```
//! use waypoint_nav::prelude::*;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let mut registry = NavRegistry::new(NavConfig::with_data_dir(dir.path()));
//!
//! let mut file = registry.create_navigation_file("corridor").unwrap();
//! let a = file.create_node(0.0, 0.0, 0.0);
//! let b = file.create_node(1.0, 0.0, 0.0);
//! file.attach_nodes(a, b).unwrap();
//! assert!(registry.save_navigation_file(&mut file));
//!
//! registry.load_navigation_map("corridor").unwrap();
//! let path = registry.find_path(None, None).unwrap();
//! assert_eq!(path.path, vec![b, a]);
//! ```
//! See the [`nav_file`] module for the binary layout.

mod node_id;
pub use self::node_id::{NodeID, NodeIDHasher, NodeIDMap, NodeIDSet};

mod error;
pub use self::error::{NavError, NavResult};

mod diagnostics;
pub use self::diagnostics::{Diagnostics, LogDiagnostics, Severity};

mod config;
pub use self::config::NavConfig;

pub mod graph;
pub use self::graph::{NavGraph, Node, SearchData};

pub mod nav_file;
pub use self::nav_file::{FileFormat, NavFile, NodeRecord};

pub mod search;
pub use self::search::{Cost, Heuristic, Path, PathSearch};

mod registry;
pub use self::registry::NavRegistry;

pub use glam::Vec3;

/// The prelude for this crate.
pub mod prelude {
    pub use crate::{
        Diagnostics, FileFormat, Heuristic, NavConfig, NavError, NavFile, NavGraph, NavRegistry,
        Node, NodeID, Path, PathSearch, Severity, Vec3,
    };
}
