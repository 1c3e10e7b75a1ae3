//! Handler for `unitforge compose`.

use std::path::Path;

use miette::Result;

pub async fn exec(dir: &Path, unit: &str, output: Option<&Path>, verbose: bool) -> Result<()> {
    unitforge_ops::ops_compose::compose_unit(dir, unit, output, verbose).await
}
