//! Envelopes of the external solver API.
//!
//! The solver is a remote service that turns a circuit definition and a
//! supply voltage into totals and a per-resistor breakdown. This module only
//! models its request and response bodies; sending them is up to the caller.

use serde::{Deserialize, Serialize};

use crate::error::{OhmgraphError, Result};
use crate::expr::Definition;

/// Circuit type understood by the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CircuitType {
    /// Flat list of resistors in series
    Series,
    /// Flat list of resistors in parallel
    Parallel,
    /// Nested series/parallel definition
    Mixed,
}

/// Body of a solve request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveRequest {
    /// Always [`CircuitType::Mixed`] for compiled graphs
    pub circuit_type: CircuitType,
    /// Supply voltage in volts
    pub total_voltage: f64,
    /// The compiled circuit
    pub resistors: Definition,
}

impl SolveRequest {
    /// Build a mixed-circuit request.
    ///
    /// The voltage must be a finite, positive number.
    pub fn mixed(resistors: Definition, total_voltage: f64) -> Result<Self> {
        if !(total_voltage.is_finite() && total_voltage > 0.0) {
            return Err(OhmgraphError::InvalidVoltage {
                voltage: total_voltage,
            });
        }
        Ok(Self {
            circuit_type: CircuitType::Mixed,
            total_voltage,
            resistors,
        })
    }

    /// Serialize the request body.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Serialize the request body with indentation.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Values computed for one resistor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResistorResult {
    /// Solver-assigned name (`R1`, `R2`, ... in definition order)
    pub resistor: String,
    /// Ohms
    pub resistance: f64,
    /// Volts across the resistor
    pub voltage: f64,
    /// Amperes through the resistor
    pub current: f64,
    /// Watts dissipated
    pub power: f64,
}

/// Successful solver answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Equivalent resistance of the whole circuit (ohms)
    pub total_resistance: f64,
    /// Current drawn from the supply (amperes)
    pub total_current: f64,
    /// Power delivered by the supply (watts)
    pub total_power: f64,
    /// Per-resistor breakdown
    #[serde(default)]
    pub individual_results: Vec<ResistorResult>,
    /// Human-readable derivation
    #[serde(default)]
    pub solution: String,
}

impl Solution {
    /// Find the breakdown of a resistor by its solver name.
    pub fn resistor(&self, name: &str) -> Option<&ResistorResult> {
        self.individual_results.iter().find(|r| r.resistor == name)
    }
}

/// Raw solver answer: either a solution or an error message.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SolveResponse {
    /// The solver reported an error
    Error {
        /// Message, passed through verbatim
        error: String,
    },
    /// The solver computed a solution
    Solved(Solution),
}

impl SolveResponse {
    /// Decode a response body.
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|source| OhmgraphError::ResponseFormat { source })
    }

    /// Convert into a `Result`, turning a solver error into [`OhmgraphError::SolverError`].
    pub fn into_result(self) -> Result<Solution> {
        match self {
            SolveResponse::Solved(solution) => Ok(solution),
            SolveResponse::Error { error } => Err(OhmgraphError::SolverError { message: error }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_request_body() {
        let def = Definition::from_json("[100,[200,300]]").unwrap();
        let request = SolveRequest::mixed(def, 12.0).unwrap();
        assert_eq!(
            request.to_json(),
            r#"{"circuit_type":"mixed","total_voltage":12.0,"resistors":[100,[200,300]]}"#
        );
    }

    #[test]
    fn test_voltage_must_be_positive() {
        for voltage in [0.0, -12.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                SolveRequest::mixed(Definition::empty(), voltage),
                Err(OhmgraphError::InvalidVoltage { .. })
            ));
        }
    }

    #[test]
    fn test_solved_response() {
        let body = r#"{
            "total_resistance": 220.0,
            "total_current": 0.0545,
            "total_power": 0.6545,
            "individual_results": [
                { "resistor": "R1", "resistance": 100.0, "voltage": 5.45, "current": 0.0545, "power": 0.297 },
                { "resistor": "R2", "resistance": 120.0, "voltage": 6.55, "current": 0.0545, "power": 0.357 }
            ],
            "solution": "Schritt 1: ..."
        }"#;
        let solution = SolveResponse::from_json(body).unwrap().into_result().unwrap();
        assert_relative_eq!(solution.total_resistance, 220.0);
        assert_eq!(solution.individual_results.len(), 2);
        assert_relative_eq!(solution.resistor("R2").unwrap().voltage, 6.55);
        assert!(solution.resistor("R3").is_none());
    }

    #[test]
    fn test_malformed_response() {
        for body in ["not json", r#"{"total_resistance": "high"}"#] {
            let err = SolveResponse::from_json(body).unwrap_err();
            assert!(matches!(err, OhmgraphError::ResponseFormat { .. }));
            assert!(err.to_string().starts_with("Invalid solver response"));
        }
    }

    #[test]
    fn test_error_response_passes_through() {
        let body = r#"{"error":"Invalid circuit type 'foo'. Use 'series', 'parallel', or 'mixed'."}"#;
        match SolveResponse::from_json(body).unwrap().into_result() {
            Err(OhmgraphError::SolverError { message }) => {
                assert!(message.starts_with("Invalid circuit type 'foo'"))
            }
            other => panic!("expected solver error, got {other:?}"),
        }
    }
}
