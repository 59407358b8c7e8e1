//! Strict snapshot validation.

use std::collections::HashSet;

use crate::error::{OhmgraphError, Result};
use crate::snapshot::{GraphSnapshot, NodeKindSpec};

/// Validate a snapshot before compilation.
///
/// The compiler itself accepts anything; this is for callers that want to
/// reject editor states a [`Network`](super::Network) would silently repair.
///
/// Checks:
/// - Node ids are unique
/// - Exactly one source and exactly one ground
/// - Every edge endpoint exists
/// - Every resistor has a finite, positive resistance
pub fn validate_snapshot(snapshot: &GraphSnapshot) -> Result<()> {
    let mut ids = HashSet::with_capacity(snapshot.nodes.len());
    for node in &snapshot.nodes {
        if !ids.insert(node.id.as_str()) {
            return Err(OhmgraphError::DuplicateNode {
                node: node.id.clone(),
            });
        }
    }

    check_terminal(snapshot, NodeKindSpec::Source, OhmgraphError::MissingSource)?;
    check_terminal(snapshot, NodeKindSpec::Ground, OhmgraphError::MissingGround)?;

    for edge in &snapshot.edges {
        for endpoint in [&edge.source, &edge.target] {
            if !ids.contains(endpoint.as_str()) {
                return Err(OhmgraphError::DanglingEdge {
                    from: edge.source.clone(),
                    to: edge.target.clone(),
                    missing: endpoint.clone(),
                });
            }
        }
    }

    for node in snapshot.resistors() {
        let value = node.resistance()?.unwrap_or(f64::NAN);
        if !(value.is_finite() && value > 0.0) {
            return Err(OhmgraphError::NonPositiveResistance {
                node: node.id.clone(),
                value,
            });
        }
    }

    Ok(())
}

fn check_terminal(snapshot: &GraphSnapshot, kind: NodeKindSpec, missing: OhmgraphError) -> Result<()> {
    match snapshot.nodes.iter().filter(|n| n.kind == kind).count() {
        0 => Err(missing),
        1 => Ok(()),
        count => Err(OhmgraphError::DuplicateTerminal {
            kind: kind.as_str(),
            count,
        }),
    }
}
