//! Graph structure with precomputed adjacency.

use indexmap::IndexMap;
use tracing::{debug, warn};

use super::types::{NodeId, NodeKind};
use crate::snapshot::{GraphSnapshot, NodeKindSpec, DEFAULT_RESISTANCE};

/// A resistor network ready for compilation.
///
/// Built once per snapshot; read-only afterwards. Successor and predecessor
/// lists keep edge-insertion order, which makes every traversal
/// deterministic.
#[derive(Debug, Clone)]
pub struct Network {
    /// Mapping from node ids to dense indices
    node_map: IndexMap<String, NodeId>,

    /// Node kinds, indexed by `NodeId`
    kinds: Vec<NodeKind>,

    /// Out-neighbours per node, in edge order
    successors: Vec<Vec<NodeId>>,

    /// In-neighbours per node, in edge order
    predecessors: Vec<Vec<NodeId>>,

    /// Designated source node
    source: Option<NodeId>,

    /// Designated ground node
    ground: Option<NodeId>,

    /// Number of edges that made it into the adjacency lists
    num_edges: usize,
}

impl Network {
    /// Build a network from an editor snapshot.
    ///
    /// Never fails. Anomalies are tolerated the way an editor in the middle
    /// of an edit needs them to be:
    /// - a repeated node id keeps its first definition
    /// - the first source and the first ground become the terminals
    /// - a resistor without a usable, positive value gets [`DEFAULT_RESISTANCE`]
    /// - an edge touching an unknown node is skipped
    ///
    /// Use [`validate_snapshot`](super::validate_snapshot) to reject such
    /// snapshots instead.
    pub fn from_snapshot(snapshot: &GraphSnapshot) -> Self {
        let mut node_map = IndexMap::with_capacity(snapshot.nodes.len());
        let mut kinds = Vec::with_capacity(snapshot.nodes.len());
        let mut source = None;
        let mut ground = None;

        for spec in &snapshot.nodes {
            if node_map.contains_key(&spec.id) {
                debug!(node = %spec.id, "ignoring duplicate node id");
                continue;
            }
            let id = NodeId(kinds.len());
            let kind = match spec.kind {
                NodeKindSpec::Source => {
                    source.get_or_insert(id);
                    NodeKind::Source
                }
                NodeKindSpec::Ground => {
                    ground.get_or_insert(id);
                    NodeKind::Ground
                }
                NodeKindSpec::Resistor => {
                    let ohms = match spec.resistance() {
                        Ok(Some(ohms)) if ohms > 0.0 => ohms,
                        Ok(Some(ohms)) => {
                            warn!(node = %spec.id, ohms, "non-positive resistance, using default");
                            DEFAULT_RESISTANCE
                        }
                        Ok(None) => DEFAULT_RESISTANCE,
                        Err(e) => {
                            warn!(node = %spec.id, error = %e, "using default resistance");
                            DEFAULT_RESISTANCE
                        }
                    };
                    NodeKind::Resistor(ohms)
                }
            };
            node_map.insert(spec.id.clone(), id);
            kinds.push(kind);
        }

        let mut successors = vec![Vec::new(); kinds.len()];
        let mut predecessors = vec![Vec::new(); kinds.len()];
        let mut num_edges = 0usize;

        for edge in &snapshot.edges {
            let (Some(&from), Some(&to)) = (node_map.get(&edge.source), node_map.get(&edge.target))
            else {
                debug!(from = %edge.source, to = %edge.target, "skipping edge with unknown endpoint");
                continue;
            };
            successors[from.0].push(to);
            predecessors[to.0].push(from);
            num_edges += 1;
        }

        Network {
            node_map,
            kinds,
            successors,
            predecessors,
            source,
            ground,
            num_edges,
        }
    }

    /// The designated source node, if the snapshot had one.
    pub fn source(&self) -> Option<NodeId> {
        self.source
    }

    /// The designated ground node, if the snapshot had one.
    pub fn ground(&self) -> Option<NodeId> {
        self.ground
    }

    /// Check if a node is the designated ground.
    pub fn is_ground(&self, node: NodeId) -> bool {
        self.ground == Some(node)
    }

    /// Kind of a node.
    pub fn kind(&self, node: NodeId) -> Option<NodeKind> {
        self.kinds.get(node.0).copied()
    }

    /// Direct successors of a node, in edge-insertion order.
    ///
    /// Empty for indices outside this network.
    pub fn successors(&self, node: NodeId) -> &[NodeId] {
        self.successors.get(node.0).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Direct predecessors of a node, in edge-insertion order.
    pub fn predecessors(&self, node: NodeId) -> &[NodeId] {
        self.predecessors.get(node.0).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Successors looked up by node id; empty for unknown ids.
    pub fn successors_of(&self, name: &str) -> &[NodeId] {
        self.find_node(name).map(|n| self.successors(n)).unwrap_or(&[])
    }

    /// Predecessors looked up by node id; empty for unknown ids.
    pub fn predecessors_of(&self, name: &str) -> &[NodeId] {
        self.find_node(name).map(|n| self.predecessors(n)).unwrap_or(&[])
    }

    /// Number of outgoing edges.
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.successors(node).len()
    }

    /// Number of incoming edges.
    pub fn in_degree(&self, node: NodeId) -> usize {
        self.predecessors(node).len()
    }

    /// Find a node index by id.
    pub fn find_node(&self, name: &str) -> Option<NodeId> {
        self.node_map.get(name).copied()
    }

    /// Get the id of a node.
    pub fn node_name(&self, node: NodeId) -> &str {
        self.node_map
            .get_index(node.0)
            .map_or("?", |(name, _)| name.as_str())
    }

    /// Number of distinct nodes.
    pub fn num_nodes(&self) -> usize {
        self.kinds.len()
    }

    /// Number of edges between known nodes.
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Number of resistor nodes.
    pub fn resistor_count(&self) -> usize {
        self.kinds
            .iter()
            .filter(|k| matches!(k, NodeKind::Resistor(_)))
            .count()
    }
}

impl From<&GraphSnapshot> for Network {
    fn from(snapshot: &GraphSnapshot) -> Self {
        Self::from_snapshot(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{EdgeSpec, NodeSpec, ValueSpec};

    fn names<'a>(net: &'a Network, ids: &[NodeId]) -> Vec<&'a str> {
        ids.iter().map(|&n| net.node_name(n)).collect()
    }

    #[test]
    fn test_adjacency_keeps_edge_order() {
        let mut snap = GraphSnapshot::with_terminals();
        let r1 = snap.add_resistor(100.0);
        let r2 = snap.add_resistor(200.0);
        snap.connect("start", &r2).unwrap();
        snap.connect("start", &r1).unwrap();
        snap.connect(&r1, "end").unwrap();
        snap.connect(&r2, "end").unwrap();

        let net = Network::from_snapshot(&snap);
        assert_eq!(names(&net, net.successors_of("start")), vec!["R2", "R1"]);
        assert_eq!(names(&net, net.predecessors_of("end")), vec!["R1", "R2"]);
        assert_eq!(net.num_edges(), 4);
        assert_eq!(net.resistor_count(), 2);
    }

    #[test]
    fn test_unknown_ids_are_empty() {
        let net = Network::from_snapshot(&GraphSnapshot::with_terminals());
        assert!(net.successors_of("R42").is_empty());
        assert!(net.predecessors_of("R42").is_empty());
        assert!(net.successors(NodeId(99)).is_empty());
        assert_eq!(net.kind(NodeId(99)), None);
    }

    #[test]
    fn test_terminals() {
        let net = Network::from_snapshot(&GraphSnapshot::with_terminals());
        assert_eq!(net.source(), net.find_node("start"));
        assert_eq!(net.ground(), net.find_node("end"));
        assert!(net.is_ground(net.find_node("end").unwrap()));
    }

    #[test]
    fn test_dangling_edges_are_skipped() {
        let mut snap = GraphSnapshot::with_terminals();
        snap.edges.push(EdgeSpec::new("start", "R9"));
        let net = Network::from_snapshot(&snap);
        assert_eq!(net.num_edges(), 0);
        assert_eq!(net.out_degree(net.source().unwrap()), 0);
    }

    #[test]
    fn test_missing_or_bad_value_uses_default() {
        let mut snap = GraphSnapshot::with_terminals();
        let mut bad = NodeSpec::resistor("R1", 0.0);
        bad.value = Some(ValueSpec::Text("oops".to_string()));
        snap.nodes.push(bad);
        let mut missing = NodeSpec::resistor("R2", 0.0);
        missing.value = None;
        snap.nodes.push(missing);

        let net = Network::from_snapshot(&snap);
        let r1 = net.find_node("R1").unwrap();
        let r2 = net.find_node("R2").unwrap();
        assert_eq!(net.kind(r1), Some(NodeKind::Resistor(DEFAULT_RESISTANCE)));
        assert_eq!(net.kind(r2), Some(NodeKind::Resistor(DEFAULT_RESISTANCE)));
    }

    #[test]
    fn test_non_positive_value_uses_default() {
        let mut snap = GraphSnapshot::with_terminals();
        snap.nodes.push(NodeSpec::resistor("R1", 0.0));
        snap.nodes.push(NodeSpec::resistor("R2", -20.0));
        let mut text = NodeSpec::resistor("R3", 0.0);
        text.value = Some(ValueSpec::Text("-5".to_string()));
        snap.nodes.push(text);

        let net = Network::from_snapshot(&snap);
        for id in ["R1", "R2", "R3"] {
            let node = net.find_node(id).unwrap();
            assert_eq!(net.kind(node), Some(NodeKind::Resistor(DEFAULT_RESISTANCE)));
        }
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let mut snap = GraphSnapshot::with_terminals();
        snap.nodes.push(NodeSpec::resistor("R1", 10.0));
        snap.nodes.push(NodeSpec::resistor("R1", 20.0));
        let net = Network::from_snapshot(&snap);
        assert_eq!(net.num_nodes(), 3);
        assert_eq!(net.kind(net.find_node("R1").unwrap()), Some(NodeKind::Resistor(10.0)));
    }
}
