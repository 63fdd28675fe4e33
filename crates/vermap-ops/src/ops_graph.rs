//! Operation: inspect the resolution graph snapshot.

use std::path::Path;

use vermap_core::manifest::PublishManifest;
use vermap_resolver::graph::DependencyGraph;
use vermap_resolver::snapshot;

/// Options for `vermap graph`.
#[derive(Default)]
pub struct GraphOptions {
    /// Maximum tree depth to display.
    pub depth: Option<usize>,
    /// Show only modules carried by more than one component.
    pub duplicates: bool,
}

pub fn render(graph: &DependencyGraph, opts: &GraphOptions) -> String {
    if opts.duplicates {
        let dups = graph.duplicate_modules();
        if dups.is_empty() {
            return "No duplicate modules.\n".to_string();
        }
        let mut output = String::new();
        for (key, components) in dups {
            let listed: Vec<String> = components.iter().map(|c| c.to_string()).collect();
            output.push_str(&format!("{key}: {}\n", listed.join(", ")));
        }
        return output;
    }

    if graph.is_empty() {
        return "No components.\n".to_string();
    }
    graph.print_tree(opts.depth)
}

/// Print the snapshot referenced by the manifest at `manifest_path`.
pub fn graph(manifest_path: &Path, opts: &GraphOptions) -> miette::Result<()> {
    let manifest = PublishManifest::from_path(manifest_path)?;
    let Some(path) = manifest.snapshot_path(crate::manifest_dir(manifest_path)) else {
        println!("Version mapping is disabled.");
        return Ok(());
    };
    let graph = snapshot::load(&path)?;
    print!("{}", render(&graph, opts));
    Ok(())
}
