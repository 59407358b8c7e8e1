//! Graph snapshots produced by the interactive editor.
//!
//! The editor hands over its whole state after every edit as JSON:
//!
//! ```text
//! {
//!   "nodes": [
//!     { "id": "start", "kind": "source" },
//!     { "id": "end",   "kind": "ground" },
//!     { "id": "R1",    "kind": "resistor", "value": 100 },
//!     { "id": "R2",    "kind": "resistor", "value": "4.7k" }
//!   ],
//!   "edges": [
//!     { "source": "start", "target": "R1" },
//!     { "source": "R1",    "target": "R2" },
//!     { "source": "R2",    "target": "end" }
//!   ]
//! }
//! ```
//!
//! # Field aliases
//!
//! | Field | Accepted spellings |
//! |-------|--------------------|
//! | node kind | `kind`, `type` |
//! | source kind | `source`, `input` |
//! | ground kind | `ground`, `output` |
//! | resistance | `value`, `data.value` (number or text with SI suffix) |
//! | edge endpoints | `source`/`target`, `from`/`to` |
//!
//! Any other field (positions, styling, handles) is ignored.

mod edit;
mod types;
mod value;

pub use types::*;
pub use value::parse_value;

use crate::error::Result;

/// Parse a snapshot from its JSON text.
pub fn parse(input: &str) -> Result<GraphSnapshot> {
    Ok(serde_json::from_str(input)?)
}

/// Parse a snapshot file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<GraphSnapshot> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::OhmgraphError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}
