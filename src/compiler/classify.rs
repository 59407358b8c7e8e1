//! Structural role of a single node.

use crate::graph::{Network, NodeId, NodeKind};

/// What a node means for the traversal, decided from its kind and local degree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Role {
    /// Resistor: contributes its value whatever the topology around it
    Resistor(f64),
    /// Ground: the path ends here without contributing anything
    Terminal,
    /// One edge out, at most one edge in: a plain wire
    PassThrough(NodeId),
    /// Several edges out: parallel branches start here
    FanOut,
    /// Anything else (no way out, fan-in feeding a single wire, unknown node)
    DeadEnd,
}

/// Where the traversal goes after a node has contributed its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// No outgoing edge
    Stop,
    /// Exactly one outgoing edge
    Next(NodeId),
    /// Several outgoing edges
    Fork,
}

/// Classify a node.
pub fn classify(network: &Network, node: NodeId) -> Role {
    match network.kind(node) {
        Some(NodeKind::Resistor(ohms)) => return Role::Resistor(ohms),
        None => return Role::DeadEnd,
        Some(_) if network.is_ground(node) => return Role::Terminal,
        Some(_) => {}
    }

    let successors = network.successors(node);
    match (successors, network.in_degree(node)) {
        ([next], incoming) if incoming <= 1 => Role::PassThrough(*next),
        (out, _) if out.len() > 1 => Role::FanOut,
        _ => Role::DeadEnd,
    }
}

/// Continuation after a resistor, by out-degree alone.
pub fn exit(network: &Network, node: NodeId) -> Exit {
    match network.successors(node) {
        [] => Exit::Stop,
        [next] => Exit::Next(*next),
        _ => Exit::Fork,
    }
}
