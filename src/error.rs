//! Error types for loading, saving and searching Navigation Graphs.

use crate::NodeID;
use std::{io, path::PathBuf};
use thiserror::Error;

/// Result type alias for navigation operations.
pub type NavResult<T> = Result<T, NavError>;

/// Errors that can occur while working with Navigation Files and the Path Search.
///
/// Not finding a Path is **not** an error. See [`PathSearch::find_path`](crate::PathSearch::find_path).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NavError {
    /// Reading or writing Navigation data failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A Navigation File could not be opened for reading.
    #[error("could not open navigation file {path:?}: {source}")]
    Open {
        /// The path that was opened.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// A Navigation File could not be created or truncated for writing.
    #[error("could not create navigation file {path:?}: {source}")]
    Create {
        /// The path that was written.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// The data ended before all announced records were read.
    #[error("navigation data is truncated: needed {needed} more bytes at offset {offset}")]
    Truncated {
        /// Byte offset where reading stopped.
        offset: usize,
        /// Number of bytes that were missing.
        needed: usize,
    },

    /// The stored node count is negative.
    #[error("navigation data announces a negative node count ({0})")]
    NegativeNodeCount(i32),

    /// A stored node record carries a negative id.
    #[error("node record {index} has the invalid id {id}")]
    InvalidNodeId {
        /// Position of the record in the file.
        index: usize,
        /// The stored id.
        id: i32,
    },

    /// Two stored node records share the same id.
    #[error("node id {0} is stored more than once")]
    DuplicateNode(NodeID),

    /// A stored neighbor id does not name any node in the file.
    #[error("node {node} is linked to the unknown node {neighbor}")]
    DanglingNeighbor {
        /// The node owning the link.
        node: NodeID,
        /// The id that could not be resolved.
        neighbor: NodeID,
    },

    /// An operation referenced a node that does not exist.
    #[error("unknown node id {0}")]
    UnknownNode(NodeID),

    /// A search was requested on a graph without nodes.
    #[error("the navigation graph is empty")]
    EmptyGraph,

    /// A Navigation File name that cannot be mapped to a file.
    #[error("invalid navigation file name {0:?}")]
    InvalidName(String),

    /// The file was written by a newer version of the format.
    #[error("unsupported navigation file version {0}")]
    UnsupportedVersion(u32),

    /// A node id does not fit into the 32 bit signed field of the file format.
    #[error("node id {0} cannot be stored in a navigation file")]
    IdOutOfRange(NodeID),
}

impl NavError {
    /// `true` if the error was caused by malformed Navigation data rather than the environment.
    pub fn is_corrupt_data(&self) -> bool {
        matches!(
            self,
            NavError::Truncated { .. }
                | NavError::NegativeNodeCount(_)
                | NavError::InvalidNodeId { .. }
                | NavError::DuplicateNode(_)
                | NavError::DanglingNeighbor { .. }
                | NavError::UnsupportedVersion(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = NavError::DanglingNeighbor { node: 3, neighbor: 17 };
        assert_eq!(err.to_string(), "node 3 is linked to the unknown node 17");

        let err = NavError::Open {
            path: PathBuf::from("Data/paths/forest.nav"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        let msg = err.to_string();
        assert!(msg.contains("forest.nav"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn corrupt_data_classification() {
        assert!(NavError::NegativeNodeCount(-4).is_corrupt_data());
        assert!(NavError::Truncated { offset: 4, needed: 20 }.is_corrupt_data());
        assert!(!NavError::EmptyGraph.is_corrupt_data());
        assert!(!NavError::UnknownNode(2).is_corrupt_data());
    }
}
