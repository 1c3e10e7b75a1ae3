//! Handler for `unitforge tree`.

use std::path::Path;

use miette::Result;

pub async fn exec(dir: &Path, unit: &str) -> Result<()> {
    unitforge_ops::ops_tree::tree(dir, unit).await
}
