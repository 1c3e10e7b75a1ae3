//! Operation: display the include tree of a unit.

use std::path::Path;

use unitforge_resolver::catalogue::DirCatalogue;
use unitforge_resolver::compose;
use unitforge_resolver::resolver::resolve_unit;

use crate::parse_unit_arg;

/// Print the include tree for a unit under `units_dir`.
pub async fn tree(units_dir: &Path, unit_arg: &str) -> miette::Result<()> {
    let catalogue = DirCatalogue::new(units_dir);
    let reference = parse_unit_arg(unit_arg)?;
    let root = resolve_unit(&catalogue, &reference).await?;

    let rendered = compose::include_tree(&catalogue, &root).await?;
    print!("{rendered}");
    Ok(())
}
