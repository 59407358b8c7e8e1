//! Ohmgraph - resistor network compiler
//!
//! Reads an editor graph snapshot and prints the circuit definition.
//!
//! # Usage
//!
//! ```bash
//! ohmgraph circuit.json                # [100,[200,300],400]
//! ohmgraph circuit.json --pretty       # indented definition
//! ohmgraph circuit.json --voltage 12   # full solver request body
//! RUST_LOG=ohmgraph_core=trace ohmgraph circuit.json   # show truncations
//! ```

use std::path::PathBuf;

use clap::Parser;
use ohmgraph_core::{
    error::Result,
    graph::{validate_snapshot, Network},
    request::SolveRequest,
    snapshot, Compiler, CompilerConfig,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Resistor network compiler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the graph snapshot (.json)
    #[arg(value_name = "SNAPSHOT_FILE")]
    snapshot_file: PathBuf,

    /// Reject snapshots with structural problems instead of compiling around them
    #[arg(long)]
    strict: bool,

    /// Indent the output
    #[arg(long)]
    pretty: bool,

    /// Wrap the definition in a solver request with this supply voltage (volts)
    #[arg(short, long)]
    voltage: Option<f64>,

    /// Keep single-branch parallel blocks instead of collapsing them
    #[arg(long)]
    keep_single_branches: bool,

    /// Do not resume in series where parallel branches meet again
    #[arg(long)]
    no_rejoin: bool,

    /// Also print the definition in algebraic notation to stderr
    #[arg(long)]
    explain: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // Parse the snapshot
    let snapshot = snapshot::parse_file(&args.snapshot_file)?;

    if args.strict {
        validate_snapshot(&snapshot)?;
    }

    // Build the network
    let network = Network::from_snapshot(&snapshot);
    info!(
        nodes = network.num_nodes(),
        edges = network.num_edges(),
        "loaded snapshot"
    );

    // Compile
    let config = CompilerConfig::new()
        .with_collapse_single_branch(!args.keep_single_branches)
        .with_rejoin_parallel(!args.no_rejoin);
    let definition = Compiler::with_config(config).compile(&network);

    if args.explain {
        eprintln!("{definition}");
    }

    let output = match args.voltage {
        Some(voltage) => {
            let request = SolveRequest::mixed(definition, voltage)?;
            if args.pretty {
                request.to_json_pretty()
            } else {
                request.to_json()
            }
        }
        None if args.pretty => definition.to_json_pretty(),
        None => definition.to_json(),
    };
    println!("{output}");

    Ok(())
}
