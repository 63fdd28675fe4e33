//! Handler for `vermap resolve`.

use std::path::Path;

use miette::Result;

use vermap_ops::ops_resolve::{self, ResolveOptions};

pub async fn exec(manifest: &Path, json: bool) -> Result<()> {
    ops_resolve::resolve(manifest, &ResolveOptions { json }).await
}
