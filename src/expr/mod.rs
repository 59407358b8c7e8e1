//! Series/parallel circuit expressions.
//!
//! Internally an expression is an explicit tagged tree. On the wire (see
//! [`wire`]) the tags disappear and the meaning of a list comes from its
//! nesting depth: the top level is series, a list inside a series is a
//! parallel block, a list inside a parallel block is a series branch, and so
//! on. The constructors here keep trees in that alternating shape so the
//! untagged form stays unambiguous:
//! - a series never directly contains another series
//! - a parallel block never directly contains another parallel block
//! - groups never hold fewer than one element

use std::fmt;

pub mod wire;

/// A nested series/parallel arrangement of resistors.
#[derive(Debug, Clone, PartialEq)]
pub enum CircuitExpression {
    /// A single resistor, in ohms
    Value(f64),
    /// Elements connected end to end
    Series(Vec<CircuitExpression>),
    /// Branches connected side by side
    Parallel(Vec<CircuitExpression>),
}

impl CircuitExpression {
    /// Build a series group, splicing nested series.
    ///
    /// Returns `None` for no elements and the element itself for one.
    pub fn series(items: impl IntoIterator<Item = CircuitExpression>) -> Option<Self> {
        let mut flat = Vec::new();
        for item in items {
            match item {
                CircuitExpression::Series(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => None,
            1 => flat.pop(),
            _ => Some(CircuitExpression::Series(flat)),
        }
    }

    /// Build a parallel group, splicing nested parallel blocks.
    ///
    /// Returns `None` for no branches. With `collapse_single` a lone branch is
    /// returned unwrapped; otherwise it stays a one-branch parallel block.
    pub fn parallel(
        branches: impl IntoIterator<Item = CircuitExpression>,
        collapse_single: bool,
    ) -> Option<Self> {
        let mut flat = Vec::new();
        for branch in branches {
            match branch {
                CircuitExpression::Parallel(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => None,
            1 if collapse_single => flat.pop(),
            _ => Some(CircuitExpression::Parallel(flat)),
        }
    }

    /// Check if this is a single resistor.
    pub fn is_value(&self) -> bool {
        matches!(self, CircuitExpression::Value(_))
    }

    /// Number of resistors in the expression.
    pub fn resistor_count(&self) -> usize {
        match self {
            CircuitExpression::Value(_) => 1,
            CircuitExpression::Series(items) | CircuitExpression::Parallel(items) => {
                items.iter().map(Self::resistor_count).sum()
            }
        }
    }

    /// Append all resistor values, depth first, to `out`.
    pub fn collect_values(&self, out: &mut Vec<f64>) {
        match self {
            CircuitExpression::Value(v) => out.push(*v),
            CircuitExpression::Series(items) | CircuitExpression::Parallel(items) => {
                for item in items {
                    item.collect_values(out);
                }
            }
        }
    }

    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>, parenthesize: bool) -> fmt::Result {
        let (items, sep) = match self {
            CircuitExpression::Value(v) => return write!(f, "{v}"),
            CircuitExpression::Series(items) => (items, " + "),
            CircuitExpression::Parallel(items) => (items, " || "),
        };
        if parenthesize {
            write!(f, "(")?;
        }
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                write!(f, "{sep}")?;
            }
            item.fmt_nested(f, true)?;
        }
        if parenthesize {
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl fmt::Display for CircuitExpression {
    /// Algebraic notation, e.g. `100 + (200 || 300) + 400`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_nested(f, false)
    }
}

/// A normalized circuit definition: the top-level series handed to the solver.
///
/// Always a sequence, never a bare value. Empty means no resistors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Definition(Vec<CircuitExpression>);

impl Definition {
    /// Create a definition from top-level series elements.
    pub fn new(items: Vec<CircuitExpression>) -> Self {
        Self(items)
    }

    /// The definition of a circuit with no resistors.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if the circuit has no resistors.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Top-level series elements.
    pub fn items(&self) -> &[CircuitExpression] {
        &self.0
    }

    /// Consume the definition, returning its top-level series elements.
    pub fn into_items(self) -> Vec<CircuitExpression> {
        self.0
    }

    /// Number of resistors in the whole circuit.
    pub fn resistor_count(&self) -> usize {
        self.0.iter().map(CircuitExpression::resistor_count).sum()
    }

    /// All resistor values in traversal order.
    ///
    /// The solver names resistors `R1..Rn` in exactly this order.
    pub fn values(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.resistor_count());
        for item in &self.0 {
            item.collect_values(&mut out);
        }
        out
    }

    /// Serialize to the compact nested-list wire format.
    pub fn to_json(&self) -> String {
        wire::to_wire(self)
    }

    /// Serialize to the nested-list wire format, indented by two spaces.
    pub fn to_json_pretty(&self) -> String {
        wire::to_wire_pretty(self)
    }

    /// Parse a hand-written definition in the nested-list wire format.
    pub fn from_json(text: &str) -> crate::error::Result<Self> {
        wire::parse_definition(text)
    }

    /// View the definition as a single expression.
    pub fn as_expression(&self) -> Option<CircuitExpression> {
        CircuitExpression::series(self.0.iter().cloned())
    }
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_expression() {
            Some(expr) => write!(f, "{expr}"),
            None => write!(f, "(empty)"),
        }
    }
}
