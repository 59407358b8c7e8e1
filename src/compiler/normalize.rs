//! Top-level shape of a compiled circuit.

use crate::expr::{CircuitExpression, Definition};

/// Turn the raw traversal result into the definition the solver expects.
///
/// | Raw result | Definition |
/// |------------|------------|
/// | nothing | `[]` |
/// | a value `v` | `[v]` |
/// | a parallel block | `[[...]]`, the block as the only series element |
/// | a series | its elements, unchanged |
pub fn normalize(raw: Option<CircuitExpression>) -> Definition {
    match raw {
        None => Definition::empty(),
        Some(CircuitExpression::Series(items)) => Definition::new(items),
        Some(other) => Definition::new(vec![other]),
    }
}
