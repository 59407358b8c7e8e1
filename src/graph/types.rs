//! Core types for graph representation.

use std::fmt;

/// Dense index of a node inside a [`Network`](super::Network).
///
/// Indices are assigned in snapshot order when the network is built and are
/// only meaningful for that network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

/// What a node is, with the resistance already resolved for resistors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    /// Voltage supply; traversal starts here
    Source,
    /// Return path; traversal stops here
    Ground,
    /// Resistor with its resistance in ohms
    Resistor(f64),
}

impl NodeKind {
    /// Resistance for resistor nodes.
    pub fn resistance(&self) -> Option<f64> {
        match self {
            NodeKind::Resistor(ohms) => Some(*ohms),
            _ => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Source => write!(f, "source"),
            NodeKind::Ground => write!(f, "ground"),
            NodeKind::Resistor(ohms) => write!(f, "resistor ({ohms} Ω)"),
        }
    }
}
