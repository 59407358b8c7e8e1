//! Error types for the Ohmgraph circuit compiler.
//!
//! This module provides a unified error type [`OhmgraphError`] for every
//! boundary of the crate: snapshot decoding, strict validation, parsing of
//! hand-written circuit definitions and solver request construction.
//!
//! The graph compiler itself never fails. Malformed or cyclic graphs are
//! truncated during traversal instead of being reported.

use thiserror::Error;

/// Result type alias using [`OhmgraphError`].
pub type Result<T> = std::result::Result<T, OhmgraphError>;

/// Unified error type for all Ohmgraph operations.
#[derive(Error, Debug)]
pub enum OhmgraphError {
    // ============ Snapshot Errors ============
    /// Snapshot JSON could not be decoded
    #[error("Invalid graph snapshot: {source}")]
    SnapshotFormat {
        #[source]
        source: serde_json::Error,
    },

    /// Resistance value could not be interpreted
    #[error("Invalid resistance '{text}' for node '{node}'")]
    InvalidValue { node: String, text: String },

    /// Edit referenced a node that is not in the snapshot
    #[error("Node '{node}' not found in graph")]
    NodeNotFound { node: String },

    /// Edit tried to remove or retype a terminal node
    #[error("Node '{node}' is a terminal and cannot be modified")]
    TerminalNode { node: String },

    // ============ Validation Errors ============
    /// Two nodes share the same id
    #[error("Duplicate node id '{node}'")]
    DuplicateNode { node: String },

    /// No source node in the graph
    #[error("Graph has no source node")]
    MissingSource,

    /// No ground node in the graph
    #[error("Graph has no ground node")]
    MissingGround,

    /// More than one source or ground node
    #[error("Graph has {count} {kind} nodes, expected exactly one")]
    DuplicateTerminal { kind: &'static str, count: usize },

    /// Edge endpoint does not exist
    #[error("Edge {from} -> {to} references unknown node '{missing}'")]
    DanglingEdge {
        from: String,
        to: String,
        missing: String,
    },

    /// Resistor with a zero, negative or non-finite resistance
    #[error("Resistor '{node}' has non-positive resistance {value}")]
    NonPositiveResistance { node: String, value: f64 },

    // ============ Definition Errors ============
    /// Hand-written circuit definition is not valid nested-list JSON
    #[error("Invalid circuit definition at {path}: {message}")]
    InvalidDefinition { path: String, message: String },

    // ============ Solver Contract Errors ============
    /// Supply voltage must be positive
    #[error("Invalid total voltage {voltage}: must be a positive number")]
    InvalidVoltage { voltage: f64 },

    /// Solver response body could not be decoded
    #[error("Invalid solver response: {source}")]
    ResponseFormat {
        #[source]
        source: serde_json::Error,
    },

    /// Solver answered with an error message
    #[error("Solver error: {message}")]
    SolverError { message: String },

    // ============ I/O Errors ============
    /// Error reading a snapshot file
    #[error("Failed to read snapshot file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl OhmgraphError {
    /// Create an invalid value error
    pub fn invalid_value(node: impl Into<String>, text: impl Into<String>) -> Self {
        Self::InvalidValue {
            node: node.into(),
            text: text.into(),
        }
    }

    /// Create a node not found error
    pub fn node_not_found(node: impl Into<String>) -> Self {
        Self::NodeNotFound { node: node.into() }
    }

    /// Create an invalid definition error
    pub fn invalid_definition(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for OhmgraphError {
    fn from(source: serde_json::Error) -> Self {
        Self::SnapshotFormat { source }
    }
}
