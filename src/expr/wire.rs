//! Untagged nested-list wire format.
//!
//! ```text
//! [100, [200, 300], 400]
//! ```
//!
//! is 100 Ω in series with (200 Ω parallel 300 Ω) in series with 400 Ω. The
//! empty circuit is `[]`. Lists alternate meaning by depth: even depth
//! (starting at the top level) is series, odd depth is parallel.
//!
//! Whole-number resistances are written without a fractional part so the
//! output matches what a JavaScript client would produce.

use serde::ser::{Serialize, SerializeSeq, Serializer};
use serde_json::Value;

use super::{CircuitExpression, Definition};
use crate::error::{OhmgraphError, Result};

/// Largest magnitude written as an integer (2^53, exact in f64).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Serialize for CircuitExpression {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            CircuitExpression::Value(v) => {
                if v.fract() == 0.0 && v.abs() <= MAX_EXACT_INTEGER {
                    serializer.serialize_i64(*v as i64)
                } else {
                    serializer.serialize_f64(*v)
                }
            }
            CircuitExpression::Series(items) | CircuitExpression::Parallel(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

impl Serialize for Definition {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for item in &self.0 {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

/// Serialize a definition compactly, e.g. `[100,[200,300],400]`.
pub fn to_wire(definition: &Definition) -> String {
    // Serializing numbers and sequences into a String cannot fail.
    serde_json::to_string(definition).unwrap_or_else(|_| "[]".to_string())
}

/// Serialize a definition with two-space indentation.
pub fn to_wire_pretty(definition: &Definition) -> String {
    serde_json::to_string_pretty(definition).unwrap_or_else(|_| "[]".to_string())
}

/// Parse a definition written by hand in the nested-list format.
///
/// Rejects anything the solver could not use: a top level that is not a
/// list, non-numeric elements, empty groups and non-positive resistances.
/// Error paths look like `$[1][0]`.
pub fn parse_definition(text: &str) -> Result<Definition> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| OhmgraphError::invalid_definition("$", e.to_string()))?;
    let Value::Array(items) = value else {
        return Err(OhmgraphError::invalid_definition(
            "$",
            "top level must be a list",
        ));
    };
    let items = items
        .iter()
        .enumerate()
        .map(|(i, item)| decode(item, Level::Series, &format!("$[{i}]")))
        .collect::<Result<Vec<_>>>()?;
    Ok(Definition::new(items))
}

/// Meaning of the list an element sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Series,
    Parallel,
}

fn decode(value: &Value, parent: Level, path: &str) -> Result<CircuitExpression> {
    match value {
        Value::Number(n) => {
            let ohms = n
                .as_f64()
                .ok_or_else(|| OhmgraphError::invalid_definition(path, "number out of range"))?;
            if !(ohms.is_finite() && ohms > 0.0) {
                return Err(OhmgraphError::invalid_definition(
                    path,
                    format!("resistance must be positive, got {ohms}"),
                ));
            }
            Ok(CircuitExpression::Value(ohms))
        }
        Value::Array(items) => {
            if items.is_empty() {
                return Err(OhmgraphError::invalid_definition(path, "empty group"));
            }
            let level = match parent {
                Level::Series => Level::Parallel,
                Level::Parallel => Level::Series,
            };
            let children = items
                .iter()
                .enumerate()
                .map(|(i, item)| decode(item, level, &format!("{path}[{i}]")))
                .collect::<Result<Vec<_>>>()?;
            Ok(match level {
                Level::Series => CircuitExpression::Series(children),
                Level::Parallel => CircuitExpression::Parallel(children),
            })
        }
        other => Err(OhmgraphError::invalid_definition(
            path,
            format!("expected a number or a list, got {other}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::CircuitExpression::{Parallel, Series, Value as V};

    #[test]
    fn test_integral_values_have_no_fraction() {
        let def = Definition::new(vec![
            V(100.0),
            Parallel(vec![V(200.0), V(300.0)]),
            V(400.0),
        ]);
        assert_eq!(to_wire(&def), "[100,[200,300],400]");
    }

    #[test]
    fn test_fractional_values() {
        let def = Definition::new(vec![V(4.7), V(0.5)]);
        assert_eq!(to_wire(&def), "[4.7,0.5]");
    }

    #[test]
    fn test_empty() {
        assert_eq!(to_wire(&Definition::empty()), "[]");
        assert_eq!(to_wire_pretty(&Definition::empty()), "[]");
        assert!(parse_definition("[]").unwrap().is_empty());
    }

    #[test]
    fn test_pretty_uses_two_spaces() {
        let def = Definition::new(vec![V(1.0), V(2.0)]);
        assert_eq!(to_wire_pretty(&def), "[\n  1,\n  2\n]");
    }

    #[test]
    fn test_parse_alternates_levels() {
        let def = parse_definition("[100, [200, [300, 50]], 400]").unwrap();
        assert_eq!(
            def.items(),
            &[
                V(100.0),
                Parallel(vec![V(200.0), Series(vec![V(300.0), V(50.0)])]),
                V(400.0),
            ]
        );
    }

    #[test]
    fn test_compiled_shape_survives_wire() {
        let def = Definition::new(vec![
            Parallel(vec![Series(vec![V(10.0), V(20.0)]), V(30.0)]),
            V(2.5),
        ]);
        assert_eq!(parse_definition(&to_wire(&def)).unwrap(), def);
    }

    #[test]
    fn test_parse_errors_carry_path() {
        let err = parse_definition("[1, [2, \"x\"]]").unwrap_err();
        match err {
            OhmgraphError::InvalidDefinition { path, .. } => assert_eq!(path, "$[1][1]"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_definition("100").is_err());
        assert!(parse_definition("[1, []]").is_err());
        assert!(parse_definition("[0]").is_err());
        assert!(parse_definition("[-3]").is_err());
        assert!(parse_definition("[1,").is_err());
    }
}
