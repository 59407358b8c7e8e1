//! # Ohmgraph Core
//!
//! Compiles resistor networks drawn as directed graphs into nested
//! series/parallel circuit definitions.
//!
//! This library provides:
//! - A serde model of the graph editor's snapshot (nodes and edges)
//! - A graph model with ordered adjacency lookups
//! - A cycle-safe compiler from graph to series/parallel expression
//! - The untagged nested-list wire format consumed by the circuit solver
//!
//! ## Architecture
//!
//! - [`snapshot`] - Editor snapshot types, JSON parsing, editing operations
//! - [`graph`] - Network with adjacency lookups, strict validation
//! - [`compiler`] - Topology classification, traversal, normalization
//! - [`expr`] - Tagged circuit expressions and the wire format
//! - [`request`] - Request/response envelopes of the solver API
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! ohmgraph circuit.json --voltage 12 | curl -X POST -H 'Content-Type: application/json' -d @- "$SOLVER_URL"
//! ```
//!
//! ### Library
//!
//! ```
//! let snapshot_json = r#"{
//!     "nodes": [
//!         { "id": "start", "kind": "source" },
//!         { "id": "end", "kind": "ground" },
//!         { "id": "R1", "kind": "resistor", "value": 100 },
//!         { "id": "R2", "kind": "resistor", "value": "1k" }
//!     ],
//!     "edges": [
//!         { "source": "start", "target": "R1" },
//!         { "source": "R1", "target": "R2" },
//!         { "source": "R2", "target": "end" }
//!     ]
//! }"#;
//!
//! let definition = ohmgraph_core::compile_json(snapshot_json).unwrap();
//! assert_eq!(definition.to_json(), "[100,1000]");
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import init, { compile_circuit } from 'ohmgraph_core';
//!
//! await init();
//! const definition = compile_circuit(JSON.stringify({ nodes, edges }));
//! ```
//!
//! ## Wire Format
//!
//! Definitions are nested JSON lists whose meaning alternates with depth: the
//! top level is series, a list inside it is a parallel block, a list inside a
//! parallel block is a series branch. `[100, [200, 300], 400]` is 100 Ω in
//! series with 200 Ω ∥ 300 Ω in series with 400 Ω. An empty circuit is `[]`.

pub mod compiler;
pub mod error;
pub mod expr;
pub mod graph;
pub mod request;
pub mod snapshot;

// Re-export main types for convenience
pub use compiler::{compile, Compiler, CompilerConfig};
pub use error::{OhmgraphError, Result};
pub use expr::{CircuitExpression, Definition};
pub use graph::Network;
pub use snapshot::GraphSnapshot;

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::compile_circuit;

/// Parse an editor snapshot and compile it with the default configuration.
///
/// Only fails when the snapshot JSON itself cannot be decoded; any graph
/// that decodes compiles to some, possibly empty, definition.
pub fn compile_json(snapshot_json: &str) -> Result<Definition> {
    let snapshot = snapshot::parse(snapshot_json)?;
    Ok(compile(&Network::from_snapshot(&snapshot)))
}
