//! `valtree` CLI — copy, print and summarize segment files from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Load a tree, print its outline, and save it elsewhere
//! valtree copy -i in.tree -o out.tree
//!
//! # Print a stored tree as an outline, or in canonical text form
//! valtree print -i data.tree
//! valtree print -i data.tree --canonical
//!
//! # Show node counts and sizes (optionally as JSON)
//! valtree stats -i data.tree --json
//!
//! # Write the built-in example tree
//! valtree demo -o example.tree
//!
//! # Verbose logging
//! VALTREE_LOG=debug valtree print -i data.tree
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use valtree_core::Node;

#[derive(Parser)]
#[command(name = "valtree", version, about = "Value tree segment file tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log filter directive (e.g. "warn", "debug", "valtree_core=trace")
    #[arg(long, global = true, env = "VALTREE_LOG", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a tree, print its outline, and save it to another file
    Copy {
        /// Input tree file
        #[arg(short, long)]
        input: String,
        /// Output tree file (created or truncated)
        #[arg(short, long)]
        output: String,
        /// Do not print the outline
        #[arg(short, long)]
        quiet: bool,
    },
    /// Print a stored tree
    Print {
        /// Input tree file
        #[arg(short, long)]
        input: String,
        /// Print the canonical one-line form instead of the outline
        #[arg(long)]
        canonical: bool,
    },
    /// Show node counts and sizes
    Stats {
        /// Input tree file
        #[arg(short, long)]
        input: String,
        /// Emit the statistics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the built-in example tree
    Demo {
        /// Output tree file (created or truncated)
        #[arg(short, long)]
        output: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Copy {
            input,
            output,
            quiet,
        } => {
            let tree = load(&input)?;
            if !quiet {
                print!("{}", tree.to_outline());
            }
            valtree_core::save(&output, &tree)
                .with_context(|| format!("Failed to save tree to {}", output))?;
        }
        Commands::Print { input, canonical } => {
            let tree = load(&input)?;
            if canonical {
                println!("{}", tree);
            } else {
                print!("{}", tree.to_outline());
            }
        }
        Commands::Stats { input, json } => {
            let tree = load(&input)?;
            let stats = tree.stats();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Nodes:          {}", stats.nodes);
                println!("Leaves:         {}", stats.leaves);
                println!("Max depth:      {}", stats.max_depth);
                println!("Payload size:   {} bytes", stats.payload_bytes);
                println!("Encoded size:   {} bytes", stats.encoded_bytes);
            }
        }
        Commands::Demo { output } => {
            valtree_core::save(&output, &example_tree())
                .with_context(|| format!("Failed to save tree to {}", output))?;
            tracing::info!(path = %output, "example tree written");
        }
    }

    Ok(())
}

/// Install a stderr `fmt` subscriber filtered by `directive`.
fn init_logging(directive: &str) -> Result<()> {
    let filter = EnvFilter::try_new(directive)
        .with_context(|| format!("Invalid log filter: '{}'", directive))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

fn load(path: &str) -> Result<Node> {
    valtree_core::load(path).with_context(|| format!("Failed to load tree from {}", path))
}

/// Ten nodes over four levels, mixing every kind.
fn example_tree() -> Node {
    Node::int(8)
        + (Node::string("bar")
            + (Node::real(2.015) + Node::int(9))
            + Node::int(2015)
            + Node::string("2015"))
        + (Node::string("baz")
            + Node::string("foo")
            + (Node::real(6.28318) + Node::string("hello")))
}
