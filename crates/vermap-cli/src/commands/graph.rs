//! Handler for `vermap graph`.

use std::path::Path;

use miette::Result;

use vermap_ops::ops_graph::{self, GraphOptions};

pub fn exec(manifest: &Path, depth: Option<u32>, duplicates: bool) -> Result<()> {
    let opts = GraphOptions {
        depth: depth.map(|d| d as usize),
        duplicates,
    };
    ops_graph::graph(manifest, &opts)
}
