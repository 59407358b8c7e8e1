//! Graph-to-expression compiler.
//!
//! Turns a [`Network`] into a nested series/parallel [`Definition`]:
//!
//! 1. Walk depth-first from the source node, classifying every visited node
//!    (see [`classify`]) as a resistor, ground, wire or fork.
//! 2. Collect resistor values along series chains; at a fork, walk each
//!    successor as an independent branch and combine them in parallel.
//! 3. Normalize the raw result so the top level is always a sequence.
//!
//! The compiler has no error path. Cycles, dangling nodes and topologies that
//! are not series/parallel are truncated where they occur, so an editor can
//! recompile after every keystroke, even mid-edit.
//!
//! ## Example
//!
//! ```
//! use ohmgraph_core::compiler::compile;
//! use ohmgraph_core::graph::Network;
//! use ohmgraph_core::snapshot::GraphSnapshot;
//!
//! let mut snap = GraphSnapshot::with_terminals();
//! let r1 = snap.add_resistor(100.0);
//! let r2 = snap.add_resistor(200.0);
//! let r3 = snap.add_resistor(300.0);
//! snap.connect("start", &r1).unwrap();
//! snap.connect(&r1, &r2).unwrap();
//! snap.connect(&r1, &r3).unwrap();
//! snap.connect(&r2, "end").unwrap();
//! snap.connect(&r3, "end").unwrap();
//!
//! let definition = compile(&Network::from_snapshot(&snap));
//! assert_eq!(definition.to_json(), "[100,[200,300]]");
//! ```

pub mod classify;
mod normalize;
mod trace;

pub use classify::{classify, Role};
pub use normalize::normalize;

use tracing::debug;

use crate::expr::{CircuitExpression, Definition};
use crate::graph::Network;
use crate::snapshot::GraphSnapshot;

use trace::Tracer;

/// Configuration for the compiler.
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// Return a fork with a single live branch as that branch itself.
    pub collapse_single_branch: bool,
    /// Continue in series after parallel branches that meet again.
    pub rejoin_parallel: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            collapse_single_branch: true,
            rejoin_parallel: true,
        }
    }
}

impl CompilerConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether single-branch forks collapse.
    ///
    /// With collapsing off, a fork where only one branch carries resistors
    /// is kept as a one-branch parallel block (`[[100]]` instead of `[100]`).
    pub fn with_collapse_single_branch(mut self, collapse: bool) -> Self {
        self.collapse_single_branch = collapse;
        self
    }

    /// Set whether branches stop at merge points and the series resumes there.
    ///
    /// With rejoining off, every branch runs through to ground on its own
    /// and shared tails are repeated in each branch.
    pub fn with_rejoin_parallel(mut self, rejoin: bool) -> Self {
        self.rejoin_parallel = rejoin;
        self
    }
}

/// The graph compiler.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    config: CompilerConfig,
}

impl Compiler {
    /// Create a compiler with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a compiler with custom configuration.
    pub fn with_config(config: CompilerConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Trace the network without normalizing the result.
    ///
    /// `None` means no resistor is reachable from the source.
    pub fn trace(&self, network: &Network) -> Option<CircuitExpression> {
        Tracer::new(network, &self.config).trace()
    }

    /// Compile a network into a normalized definition.
    pub fn compile(&self, network: &Network) -> Definition {
        let definition = normalize(self.trace(network));
        debug!(
            nodes = network.num_nodes(),
            edges = network.num_edges(),
            resistors = definition.resistor_count(),
            "compiled circuit"
        );
        definition
    }

    /// Build a network from a snapshot and compile it.
    pub fn compile_snapshot(&self, snapshot: &GraphSnapshot) -> Definition {
        self.compile(&Network::from_snapshot(snapshot))
    }
}

/// Compile a network with the default configuration.
pub fn compile(network: &Network) -> Definition {
    Compiler::new().compile(network)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::NodeSpec;

    /// Snapshot with terminals `start`/`end` and resistors `R1..Rn` valued
    /// 100, 200, ... in id order.
    fn snapshot(resistors: usize, edges: &[(&str, &str)]) -> GraphSnapshot {
        let mut snap = GraphSnapshot::with_terminals();
        for i in 1..=resistors {
            snap.add_resistor(100.0 * i as f64);
        }
        for (from, to) in edges {
            snap.connect(from, to).unwrap();
        }
        snap
    }

    fn wire(snap: &GraphSnapshot) -> String {
        Compiler::new().compile_snapshot(snap).to_json()
    }

    #[test]
    fn test_empty_graph() {
        assert_eq!(wire(&GraphSnapshot::with_terminals()), "[]");
        assert_eq!(wire(&GraphSnapshot::new()), "[]");
    }

    #[test]
    fn test_unreachable_resistors() {
        let snap = snapshot(2, &[("R1", "R2"), ("R2", "end")]);
        assert_eq!(wire(&snap), "[]");
    }

    #[test]
    fn test_source_straight_to_ground() {
        let snap = snapshot(1, &[("start", "end")]);
        assert_eq!(wire(&snap), "[]");
    }

    #[test]
    fn test_series_chain() {
        let snap = snapshot(3, &[("start", "R1"), ("R1", "R2"), ("R2", "R3"), ("R3", "end")]);
        assert_eq!(wire(&snap), "[100,200,300]");
    }

    #[test]
    fn test_pure_parallel() {
        let snap = snapshot(
            3,
            &[
                ("start", "R1"),
                ("start", "R2"),
                ("start", "R3"),
                ("R1", "end"),
                ("R2", "end"),
                ("R3", "end"),
            ],
        );
        assert_eq!(wire(&snap), "[[100,200,300]]");
    }

    #[test]
    fn test_series_then_parallel() {
        let snap = snapshot(
            3,
            &[("start", "R1"), ("R1", "R2"), ("R1", "R3"), ("R2", "end"), ("R3", "end")],
        );
        assert_eq!(wire(&snap), "[100,[200,300]]");
    }

    #[test]
    fn test_parallel_rejoins_into_series() {
        let snap = snapshot(
            4,
            &[
                ("start", "R1"),
                ("R1", "R2"),
                ("R1", "R3"),
                ("R2", "R4"),
                ("R3", "R4"),
                ("R4", "end"),
            ],
        );
        assert_eq!(wire(&snap), "[100,[200,300],400]");
    }

    #[test]
    fn test_without_rejoin_tails_repeat() {
        let snap = snapshot(
            4,
            &[
                ("start", "R1"),
                ("R1", "R2"),
                ("R1", "R3"),
                ("R2", "R4"),
                ("R3", "R4"),
                ("R4", "end"),
            ],
        );
        let compiler = Compiler::with_config(CompilerConfig::new().with_rejoin_parallel(false));
        assert_eq!(
            compiler.compile_snapshot(&snap).to_json(),
            "[100,[[200,400],[300,400]]]"
        );
    }

    #[test]
    fn test_nested_parallel_blocks() {
        let snap = snapshot(
            7,
            &[
                ("start", "R1"),
                ("R1", "R2"),
                ("R1", "R6"),
                ("R2", "R3"),
                ("R2", "R4"),
                ("R3", "R5"),
                ("R4", "R5"),
                ("R5", "R7"),
                ("R6", "R7"),
                ("R7", "end"),
            ],
        );
        assert_eq!(wire(&snap), "[100,[[200,[300,400],500],600],700]");
    }

    #[test]
    fn test_merge_shared_by_nested_fork() {
        let snap = snapshot(
            6,
            &[
                ("start", "R1"),
                ("R1", "R2"),
                ("R1", "R3"),
                ("R3", "R4"),
                ("R3", "R5"),
                ("R2", "R6"),
                ("R4", "R6"),
                ("R5", "R6"),
                ("R6", "end"),
            ],
        );
        assert_eq!(wire(&snap), "[100,[200,[300,[400,500]]],600]");
    }

    #[test]
    fn test_self_loop() {
        let snap = snapshot(1, &[("start", "R1"), ("R1", "R1"), ("R1", "end")]);
        assert_eq!(wire(&snap), "[100]");
    }

    #[test]
    fn test_back_edge_to_ancestor() {
        let snap = snapshot(2, &[("start", "R1"), ("R1", "R2"), ("R2", "R1"), ("R2", "end")]);
        assert_eq!(wire(&snap), "[100,200]");
    }

    #[test]
    fn test_cycle_without_ground() {
        let snap = snapshot(2, &[("start", "R1"), ("R1", "R2"), ("R2", "R1")]);
        assert_eq!(wire(&snap), "[100,200]");
    }

    #[test]
    fn test_cycle_back_to_source() {
        let snap = snapshot(2, &[("start", "R1"), ("R1", "R2"), ("R2", "start")]);
        assert_eq!(wire(&snap), "[100,200]");
    }

    #[test]
    fn test_single_live_branch_collapses() {
        let snap = snapshot(1, &[("start", "R1"), ("start", "start"), ("R1", "end")]);
        assert_eq!(wire(&snap), "[100]");

        let compiler =
            Compiler::with_config(CompilerConfig::new().with_collapse_single_branch(false));
        assert_eq!(compiler.compile_snapshot(&snap).to_json(), "[[100]]");
    }

    #[test]
    fn test_dangling_branch_still_contributes() {
        let snap = snapshot(2, &[("start", "R1"), ("start", "R2"), ("R1", "end")]);
        assert_eq!(wire(&snap), "[[100,200]]");
    }

    #[test]
    fn test_bridge_is_finite_and_stable() {
        let snap = snapshot(
            5,
            &[
                ("start", "R1"),
                ("start", "R2"),
                ("R1", "R3"),
                ("R1", "R5"),
                ("R2", "R4"),
                ("R5", "R4"),
                ("R3", "end"),
                ("R4", "end"),
            ],
        );
        let first = Compiler::new().compile_snapshot(&snap);
        let second = Compiler::new().compile_snapshot(&snap);
        assert_eq!(first, second);
        assert_eq!(first.to_json(), "[[[100,[300,[500,400]]],[200,400]]]");
    }

    #[test]
    fn test_merge_beside_ground_branch_keeps_tail() {
        let snap = snapshot(
            4,
            &[
                ("start", "R1"),
                ("start", "R2"),
                ("start", "R4"),
                ("R1", "R3"),
                ("R2", "R3"),
                ("R3", "end"),
                ("R4", "end"),
            ],
        );
        assert_eq!(wire(&snap), "[[[100,300],[200,300],400]]");
    }

    #[test]
    fn test_edge_from_unreachable_node_is_not_a_merge() {
        let snap = snapshot(
            4,
            &[
                ("start", "R1"),
                ("start", "R2"),
                ("R1", "end"),
                ("R2", "R3"),
                ("R3", "end"),
                ("R4", "R3"),
            ],
        );
        assert_eq!(wire(&snap), "[[100,[200,300]]]");
    }

    #[test]
    fn test_self_loop_inside_branch() {
        let snap = snapshot(
            2,
            &[("start", "R1"), ("start", "R2"), ("R1", "end"), ("R2", "end"), ("R1", "R1")],
        );
        assert_eq!(wire(&snap), "[[100,200]]");
    }

    #[test]
    fn test_back_edge_inside_branch() {
        let snap = snapshot(
            3,
            &[
                ("start", "R1"),
                ("start", "R3"),
                ("R1", "R2"),
                ("R2", "R1"),
                ("R2", "end"),
                ("R3", "end"),
            ],
        );
        assert_eq!(wire(&snap), "[[[100,200],300]]");
    }

    #[test]
    fn test_wire_branch_into_merge_is_kept() {
        let snap = snapshot(2, &[("start", "R1"), ("start", "R2"), ("R1", "R2"), ("R2", "end")]);
        let def = Compiler::new().compile_snapshot(&snap);
        assert_eq!(def.to_json(), "[[[100,200],200]]");
        assert_eq!(Definition::from_json(&def.to_json()).unwrap(), def);
    }

    #[test]
    fn test_disagreeing_merges_keep_every_resistor() {
        let snap = snapshot(
            5,
            &[
                ("start", "R1"),
                ("R1", "R2"),
                ("R1", "R3"),
                ("R2", "R4"),
                ("R3", "R5"),
                ("start", "R4"),
                ("start", "R5"),
                ("R4", "end"),
                ("R5", "end"),
            ],
        );
        let def = Compiler::new().compile_snapshot(&snap);
        let mut values = def.values();
        values.sort_by(f64::total_cmp);
        values.dedup();
        assert_eq!(values, vec![100.0, 200.0, 300.0, 400.0, 500.0]);
    }

    #[test]
    fn test_compilation_is_pure() {
        let snap = snapshot(
            4,
            &[
                ("start", "R1"),
                ("R1", "R2"),
                ("R1", "R3"),
                ("R2", "R4"),
                ("R3", "R4"),
                ("R4", "R1"),
                ("R4", "end"),
            ],
        );
        let net = Network::from_snapshot(&snap);
        assert_eq!(compile(&net), compile(&net));
    }

    #[test]
    fn test_clearing_restores_empty() {
        let mut snap = snapshot(3, &[("start", "R1"), ("R1", "R2"), ("R2", "R3"), ("R3", "end")]);
        assert_eq!(wire(&snap), "[100,200,300]");
        snap.clear();
        assert_eq!(wire(&snap), "[]");
    }

    #[test]
    fn test_removing_a_resistor_breaks_the_chain() {
        let mut snap = snapshot(2, &[("start", "R1"), ("R1", "R2"), ("R2", "end")]);
        snap.remove_node("R2").unwrap();
        assert_eq!(wire(&snap), "[100]");
    }

    #[test]
    fn test_edge_order_decides_branch_order() {
        let snap = snapshot(
            2,
            &[("start", "R2"), ("start", "R1"), ("R1", "end"), ("R2", "end")],
        );
        assert_eq!(wire(&snap), "[[200,100]]");
    }

    #[test]
    fn test_without_source() {
        let mut snap = GraphSnapshot::new();
        snap.insert_node(NodeSpec::resistor("R1", 10.0)).unwrap();
        snap.insert_node(NodeSpec::ground("end")).unwrap();
        snap.connect("R1", "end").unwrap();
        assert_eq!(wire(&snap), "[]");
    }

    #[test]
    fn test_wire_output_parses_back() {
        let snap = snapshot(
            7,
            &[
                ("start", "R1"),
                ("R1", "R2"),
                ("R1", "R6"),
                ("R2", "R3"),
                ("R2", "R4"),
                ("R3", "R5"),
                ("R4", "R5"),
                ("R5", "R7"),
                ("R6", "R7"),
                ("R7", "end"),
            ],
        );
        let def = Compiler::new().compile_snapshot(&snap);
        assert_eq!(Definition::from_json(&def.to_json()).unwrap(), def);
    }
}
