//! Resistor network graph representation and validation.
//!
//! A [`Network`] is built from an editor [`GraphSnapshot`](crate::snapshot::GraphSnapshot)
//! and exposes, for every node, its direct successors and predecessors in
//! edge-insertion order. It is the read-only input of the compiler.

mod network;
mod types;
mod validate;

pub use network::Network;
pub use types::*;
pub use validate::validate_snapshot;
