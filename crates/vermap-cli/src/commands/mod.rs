//! Command dispatch and handler modules.

mod graph;
mod resolve;

use std::path::PathBuf;

use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    let manifest = locate(cli.manifest)?;
    match cli.command {
        Command::Resolve { json } => resolve::exec(&manifest, json).await,
        Command::Graph { depth, duplicates } => graph::exec(&manifest, depth, duplicates),
    }
}

fn locate(explicit: Option<PathBuf>) -> Result<PathBuf> {
    let cwd = std::env::current_dir().map_err(vermap_util::errors::VermapError::Io)?;
    vermap_ops::locate_manifest(explicit.as_deref(), &cwd)
}
