//! Snapshot types exchanged with the graph editor.

use serde::{Deserialize, Serialize};

use super::value::parse_value;
use crate::error::{OhmgraphError, Result};

/// Id the editor gives its source node.
pub const DEFAULT_SOURCE_ID: &str = "start";

/// Id the editor gives its ground node.
pub const DEFAULT_GROUND_ID: &str = "end";

/// Resistance the editor assigns to a freshly placed resistor (ohms).
pub const DEFAULT_RESISTANCE: f64 = 100.0;

/// A snapshot of the editor's graph: all current nodes and edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Nodes in insertion order
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,
    /// Directed edges in insertion order
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

impl GraphSnapshot {
    /// Create a new empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the editor's initial state: a source and a ground, nothing else.
    pub fn with_terminals() -> Self {
        Self {
            nodes: vec![
                NodeSpec::source(DEFAULT_SOURCE_ID),
                NodeSpec::ground(DEFAULT_GROUND_ID),
            ],
            edges: Vec::new(),
        }
    }

    /// Find a node by id.
    pub fn node(&self, id: &str) -> Option<&NodeSpec> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Iterate over resistor nodes in insertion order.
    pub fn resistors(&self) -> impl Iterator<Item = &NodeSpec> {
        self.nodes
            .iter()
            .filter(|n| n.kind == NodeKindSpec::Resistor)
    }
}

/// A node as the editor describes it.
///
/// Unknown fields (position, style, ...) are ignored on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    /// Unique node id
    pub id: String,
    /// Node kind; the editor calls this field `type`
    #[serde(alias = "type")]
    pub kind: NodeKindSpec,
    /// Resistance, for resistor nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ValueSpec>,
    /// Editor payload; may carry the resistance as `data.value`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<NodeData>,
}

impl NodeSpec {
    /// Create a source node.
    pub fn source(id: impl Into<String>) -> Self {
        Self::bare(id, NodeKindSpec::Source)
    }

    /// Create a ground node.
    pub fn ground(id: impl Into<String>) -> Self {
        Self::bare(id, NodeKindSpec::Ground)
    }

    /// Create a resistor node with the given resistance in ohms.
    pub fn resistor(id: impl Into<String>, ohms: f64) -> Self {
        Self {
            value: Some(ValueSpec::Number(ohms)),
            ..Self::bare(id, NodeKindSpec::Resistor)
        }
    }

    fn bare(id: impl Into<String>, kind: NodeKindSpec) -> Self {
        Self {
            id: id.into(),
            kind,
            value: None,
            data: None,
        }
    }

    /// Resolve the resistance of this node.
    ///
    /// A top-level `value` takes precedence over `data.value`. Returns
    /// `Ok(None)` when neither is present.
    pub fn resistance(&self) -> Result<Option<f64>> {
        let spec = self
            .value
            .as_ref()
            .or_else(|| self.data.as_ref().and_then(|d| d.value.as_ref()));
        spec.map(|v| v.resolve(&self.id)).transpose()
    }

    /// Check if this node is a terminal (source or ground).
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, NodeKindSpec::Source | NodeKindSpec::Ground)
    }
}

/// Node kinds understood by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKindSpec {
    /// Voltage supply (positive terminal)
    #[serde(alias = "input")]
    Source,
    /// Return path
    #[serde(alias = "output")]
    Ground,
    /// Resistor
    Resistor,
}

impl NodeKindSpec {
    /// Lowercase name, as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Ground => "ground",
            Self::Resistor => "resistor",
        }
    }
}

/// Editor payload attached to a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    /// Display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Resistance as the editor stores it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ValueSpec>,
}

/// A resistance value: either a JSON number or text such as `"4.7k"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueSpec {
    /// Plain number of ohms
    Number(f64),
    /// Text with optional SI suffix
    Text(String),
}

impl ValueSpec {
    /// Resolve to ohms. `node` is only used for error reporting.
    pub fn resolve(&self, node: &str) -> Result<f64> {
        match self {
            Self::Number(v) => Ok(*v),
            Self::Text(text) => {
                parse_value(text).ok_or_else(|| OhmgraphError::invalid_value(node, text.as_str()))
            }
        }
    }
}

/// A directed edge between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSpec {
    /// Id of the node the edge leaves
    #[serde(alias = "from")]
    pub source: String,
    /// Id of the node the edge enters
    #[serde(alias = "to")]
    pub target: String,
}

impl EdgeSpec {
    /// Create an edge `source -> target`.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}
