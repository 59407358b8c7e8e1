//! Editor-side mutations of a [`GraphSnapshot`].
//!
//! These mirror the operations the graph editor performs between two
//! compilations. Terminals (source and ground) can never be removed.

use super::types::{EdgeSpec, GraphSnapshot, NodeKindSpec, NodeSpec, ValueSpec};
use crate::error::{OhmgraphError, Result};

impl GraphSnapshot {
    /// Place a new resistor and return its generated id (`R1`, `R2`, ...).
    pub fn add_resistor(&mut self, ohms: f64) -> String {
        let id = self.next_resistor_id();
        self.nodes.push(NodeSpec::resistor(id.clone(), ohms));
        id
    }

    /// Insert a fully specified node.
    pub fn insert_node(&mut self, node: NodeSpec) -> Result<()> {
        if self.node(&node.id).is_some() {
            return Err(OhmgraphError::DuplicateNode { node: node.id });
        }
        self.nodes.push(node);
        Ok(())
    }

    /// Connect two existing nodes with a directed edge.
    ///
    /// Repeated connections are kept as distinct edges.
    pub fn connect(&mut self, source: &str, target: &str) -> Result<()> {
        for id in [source, target] {
            if self.node(id).is_none() {
                return Err(OhmgraphError::node_not_found(id));
            }
        }
        self.edges.push(EdgeSpec::new(source, target));
        Ok(())
    }

    /// Remove every edge `source -> target`. Returns how many were removed.
    pub fn disconnect(&mut self, source: &str, target: &str) -> usize {
        let before = self.edges.len();
        self.edges
            .retain(|e| !(e.source == source && e.target == target));
        before - self.edges.len()
    }

    /// Remove a resistor together with all edges touching it.
    pub fn remove_node(&mut self, id: &str) -> Result<NodeSpec> {
        let idx = self
            .nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| OhmgraphError::node_not_found(id))?;
        if self.nodes[idx].is_terminal() {
            return Err(OhmgraphError::TerminalNode {
                node: id.to_string(),
            });
        }
        self.edges.retain(|e| e.source != id && e.target != id);
        Ok(self.nodes.remove(idx))
    }

    /// Change the resistance of a resistor node.
    pub fn set_resistance(&mut self, id: &str, ohms: f64) -> Result<()> {
        let node = self
            .nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| OhmgraphError::node_not_found(id))?;
        if node.kind != NodeKindSpec::Resistor {
            return Err(OhmgraphError::TerminalNode {
                node: id.to_string(),
            });
        }
        node.value = Some(ValueSpec::Number(ohms));
        if let Some(data) = node.data.as_mut() {
            data.value = None;
        }
        Ok(())
    }

    /// Drop all resistors and edges, keeping only the terminals.
    pub fn clear(&mut self) {
        self.nodes.retain(NodeSpec::is_terminal);
        self.edges.clear();
    }

    fn next_resistor_id(&self) -> String {
        let highest = self
            .nodes
            .iter()
            .filter_map(|n| n.id.strip_prefix('R'))
            .filter_map(|n| n.parse::<usize>().ok())
            .max()
            .unwrap_or(0);
        format!("R{}", highest + 1)
    }
}
