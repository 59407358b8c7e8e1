//! Depth-first traversal from the source node.
//!
//! A walk follows a series chain node by node, collecting resistor values.
//! At a fork every successor is walked as its own branch with a private copy
//! of the visited set, so siblings never prune each other while each branch
//! still refuses to revisit its own ancestors.
//!
//! Inside a branch, a node fed by several reachable nodes is a merge point:
//! the branch stops in front of it and reports how it got there. When every
//! stopped branch of a fork agrees on the merge point and carries at least one
//! resistor, the fork ends there and the series resumes from the merge point
//! after the parallel block. Otherwise each stopped branch is walked on
//! through its merge point by itself, so no reachable resistor is dropped.

use std::collections::HashSet;

use tracing::trace;

use super::classify::{classify, exit, Exit, Role};
use super::CompilerConfig;
use crate::expr::CircuitExpression;
use crate::graph::{Network, NodeId};

/// Nodes already visited on the current path.
type Path = HashSet<NodeId>;

/// Where a walk sits in the circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    /// The top-level chain from the source
    Chain,
    /// A parallel branch that stops at merge points
    Branch,
    /// A parallel branch that runs through merge points to the end
    Detached,
}

/// How a walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    /// Reached ground
    Ground,
    /// Stopped in front of a merge point, arriving over `arrivals` edges
    Merge { node: NodeId, arrivals: usize },
    /// Dead end or cycle
    Open,
}

/// Result of walking one series chain.
#[derive(Debug)]
struct Segment {
    items: Vec<CircuitExpression>,
    end: End,
}

/// A walked branch together with the visited set it ended with.
struct Branch {
    segment: Segment,
    path: Path,
}

/// Walks a [`Network`] and builds the raw expression.
pub(crate) struct Tracer<'a> {
    network: &'a Network,
    config: &'a CompilerConfig,
    /// Nodes reachable from the source, indexed by `NodeId`
    reachable: Vec<bool>,
}

impl<'a> Tracer<'a> {
    pub(crate) fn new(network: &'a Network, config: &'a CompilerConfig) -> Self {
        let mut reachable = vec![false; network.num_nodes()];
        let mut stack: Vec<NodeId> = network.source().into_iter().collect();
        while let Some(node) = stack.pop() {
            if std::mem::replace(&mut reachable[node.0], true) {
                continue;
            }
            stack.extend(network.successors(node).iter().filter(|n| !reachable[n.0]));
        }
        Self {
            network,
            config,
            reachable,
        }
    }

    /// Trace the whole circuit. `None` means no resistor contributes.
    pub(crate) fn trace(&self) -> Option<CircuitExpression> {
        let source = self.network.source()?;
        let segment = self.walk(source, &mut Path::new(), Scope::Chain);
        CircuitExpression::series(segment.items)
    }

    /// Incoming edges that can carry a branch into `node`.
    ///
    /// Self-loops and edges from nodes the source never reaches are ignored.
    fn fan_in(&self, node: NodeId) -> usize {
        self.network
            .predecessors(node)
            .iter()
            .filter(|&&from| from != node && self.reachable.get(from.0).copied().unwrap_or(false))
            .count()
    }

    fn walk(&self, start: NodeId, path: &mut Path, scope: Scope) -> Segment {
        let mut items = Vec::new();
        let mut current = start;
        let mut resumed = false;

        loop {
            if path.contains(&current) {
                trace!(node = self.network.node_name(current), "cycle truncated");
                return Segment { items, end: End::Open };
            }

            let role = classify(self.network, current);
            if role == Role::Terminal {
                return Segment { items, end: End::Ground };
            }
            if scope == Scope::Branch && !resumed && self.fan_in(current) > 1 {
                return Segment {
                    items,
                    end: End::Merge {
                        node: current,
                        arrivals: 1,
                    },
                };
            }

            path.insert(current);
            resumed = false;

            let next = match role {
                Role::Resistor(ohms) => {
                    items.push(CircuitExpression::Value(ohms));
                    exit(self.network, current)
                }
                Role::PassThrough(next) => Exit::Next(next),
                Role::FanOut => Exit::Fork,
                Role::Terminal | Role::DeadEnd => Exit::Stop,
            };

            match next {
                Exit::Stop => {
                    trace!(node = self.network.node_name(current), "dead end");
                    return Segment { items, end: End::Open };
                }
                Exit::Next(node) => current = node,
                Exit::Fork => {
                    let (block, end) = self.fork(current, path, scope);
                    items.extend(block);
                    match end {
                        End::Merge { node, arrivals }
                            if scope == Scope::Chain || arrivals >= self.fan_in(node) =>
                        {
                            current = node;
                            resumed = true;
                        }
                        end => return Segment { items, end },
                    }
                }
            }
        }
    }

    /// Walk every successor of `node` as a parallel branch.
    fn fork(&self, node: NodeId, path: &Path, scope: Scope) -> (Option<CircuitExpression>, End) {
        let inner = if scope == Scope::Detached || !self.config.rejoin_parallel {
            Scope::Detached
        } else {
            Scope::Branch
        };

        let mut branches: Vec<Branch> = self
            .network
            .successors(node)
            .iter()
            .map(|&next| {
                let mut path = path.clone();
                let segment = self.walk(next, &mut path, inner);
                Branch { segment, path }
            })
            .collect();

        let end = match rejoin_point(&branches) {
            Some((merge, arrivals)) => End::Merge {
                node: merge,
                arrivals,
            },
            None => {
                for branch in &mut branches {
                    if let End::Merge { node: merge, .. } = branch.segment.end {
                        trace!(
                            fork = self.network.node_name(node),
                            merge = self.network.node_name(merge),
                            "branch runs through merge point on its own"
                        );
                        let tail = self.walk_through(merge, &mut branch.path);
                        branch.segment.items.extend(tail.items);
                        branch.segment.end = tail.end;
                    }
                }
                if branches.iter().any(|b| b.segment.end == End::Ground) {
                    End::Ground
                } else {
                    End::Open
                }
            }
        };

        let block = CircuitExpression::parallel(
            branches
                .into_iter()
                .filter_map(|b| CircuitExpression::series(b.segment.items)),
            self.config.collapse_single_branch,
        );
        (block, end)
    }

    /// Continue a stopped branch through its merge point to wherever it leads.
    fn walk_through(&self, merge: NodeId, path: &mut Path) -> Segment {
        self.walk(merge, path, Scope::Detached)
    }
}

/// The merge point shared by all stopped branches of a fork.
///
/// `None` when no branch stopped, when branches stopped at different nodes,
/// when a sibling reached ground, or when a stopped branch is a bare wire
/// (a parallel block cannot hold a zero-resistance branch).
fn rejoin_point(branches: &[Branch]) -> Option<(NodeId, usize)> {
    let mut merge: Option<(NodeId, usize)> = None;
    for branch in branches {
        match branch.segment.end {
            End::Ground => return None,
            End::Merge { .. } if branch.segment.items.is_empty() => return None,
            End::Merge { node, arrivals } => match merge {
                None => merge = Some((node, arrivals)),
                Some((seen, total)) if seen == node => merge = Some((seen, total + arrivals)),
                Some(_) => return None,
            },
            End::Open => {}
        }
    }
    merge
}
