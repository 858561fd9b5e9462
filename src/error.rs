//! Error types for graph loading, validation and relaxation runs.
//!
//! A negative-weight cycle is not an error: it is reported through
//! [`crate::SsspOutcome::negative_cycle`].

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the engine and its loading collaborator.
#[derive(Debug, Error)]
pub enum SsspError {
    /// A source id or edge endpoint outside `[0, node_count)`.
    #[error("node id {node} out of range for graph with {node_count} nodes")]
    NodeOutOfRange {
        /// Offending id as read (may be negative when it came from text input).
        node: i64,
        /// Number of nodes in the graph.
        node_count: usize,
    },

    /// A run parameter that the relaxers cannot honour.
    #[error("invalid parameter '{name}' = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Supplied value.
        value: usize,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Malformed line in a graph file.
    #[error("line {line}: {reason}")]
    Parse {
        /// 1-based line number in the input.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// Graph input ended before any header line was seen.
    #[error("graph input has no header line")]
    MissingHeader,

    /// Header edge count disagrees with the number of edge lines.
    #[error("header declares {expected} edges but {found} were read")]
    EdgeCountMismatch {
        /// Edge count from the header.
        expected: usize,
        /// Edge lines actually present.
        found: usize,
    },

    /// Failed to read a graph file.
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl SsspError {
    /// Create a node range error.
    pub fn node_out_of_range(node: impl Into<i64>, node_count: usize) -> Self {
        SsspError::NodeOutOfRange {
            node: node.into(),
            node_count,
        }
    }

    /// Create a parse error for a given line.
    pub fn parse(line: usize, reason: impl Into<String>) -> Self {
        SsspError::Parse {
            line,
            reason: reason.into(),
        }
    }

    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SsspError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Negative status code used by the C ABI.
    pub fn code(&self) -> i32 {
        match self {
            SsspError::NodeOutOfRange { .. } => -2,
            SsspError::InvalidParameter { .. } => -6,
            SsspError::Parse { .. } | SsspError::MissingHeader | SsspError::EdgeCountMismatch { .. } => -7,
            SsspError::ReadFile { .. } => -8,
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SsspError>;
