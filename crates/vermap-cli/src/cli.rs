//! CLI argument definitions for vermap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "vermap",
    version,
    about = "Resolve the coordinates published for declared dependencies",
    long_about = "vermap maps the dependencies a build unit declares onto the coordinates \
                  that belong in its publication metadata, using an already-resolved \
                  dependency graph snapshot."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to Publish.toml (default: search upward from the current directory)
    #[arg(short, long, global = true, env = "VERMAP_MANIFEST")]
    pub manifest: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve published coordinates for every variant
    Resolve {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Display the resolution graph snapshot
    Graph {
        /// Maximum display depth
        #[arg(short, long)]
        depth: Option<u32>,
        /// Show only modules carried by more than one component
        #[arg(long)]
        duplicates: bool,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
