//! Handler for `unitforge lock`.

use std::path::Path;

use miette::Result;

pub async fn exec(dir: &Path, verbose: bool) -> Result<()> {
    unitforge_ops::ops_lock::lock(dir, verbose).await
}
