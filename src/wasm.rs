//! WASM bindings for Ohmgraph Core.
//!
//! The graph editor recompiles after every change to its nodes or edges.
//! These bindings expose that step to JavaScript.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { compile_circuit, build_solve_request } from 'ohmgraph_core';
//!
//! await init();
//!
//! useEffect(() => {
//!   setCircuitDefinition(compile_circuit(JSON.stringify({ nodes, edges })));
//! }, [nodes, edges]);
//!
//! const body = build_solve_request(circuitDefinition, 12.0);
//! ```

use wasm_bindgen::prelude::*;

use crate::compiler::{Compiler, CompilerConfig};
use crate::error::OhmgraphError;
use crate::expr::Definition;
use crate::request::SolveRequest;
use crate::snapshot;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(err: OhmgraphError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Compile an editor snapshot into an indented circuit definition.
///
/// # Arguments
/// * `snapshot_json` - `{ nodes, edges }` as produced by the editor
///
/// # Returns
/// The definition as nested-list JSON, `[]` for an empty circuit, or an
/// error if the snapshot JSON cannot be decoded.
#[wasm_bindgen]
pub fn compile_circuit(snapshot_json: &str) -> Result<String, JsValue> {
    compile_circuit_with(snapshot_json, true, true)
}

/// Compile with explicit compiler options.
///
/// # Arguments
/// * `snapshot_json` - `{ nodes, edges }` as produced by the editor
/// * `collapse_single_branch` - unwrap forks with a single live branch
/// * `rejoin_parallel` - resume in series where branches meet again
#[wasm_bindgen]
pub fn compile_circuit_with(
    snapshot_json: &str,
    collapse_single_branch: bool,
    rejoin_parallel: bool,
) -> Result<String, JsValue> {
    let snapshot = snapshot::parse(snapshot_json).map_err(to_js)?;
    let config = CompilerConfig::new()
        .with_collapse_single_branch(collapse_single_branch)
        .with_rejoin_parallel(rejoin_parallel);
    let definition = Compiler::with_config(config).compile_snapshot(&snapshot);
    Ok(definition.to_json_pretty())
}

/// Validate a hand-written definition and wrap it in a solver request body.
///
/// # Arguments
/// * `definition_json` - nested-list definition, e.g. `[100, [200, 300]]`
/// * `total_voltage` - supply voltage in volts, must be positive
#[wasm_bindgen]
pub fn build_solve_request(definition_json: &str, total_voltage: f64) -> Result<String, JsValue> {
    let definition = Definition::from_json(definition_json).map_err(to_js)?;
    let request = SolveRequest::mixed(definition, total_voltage).map_err(to_js)?;
    Ok(request.to_json())
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
