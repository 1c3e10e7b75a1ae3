//! Operation: compose a unit and its includes into one document.

use std::path::Path;

use unitforge_resolver::catalogue::DirCatalogue;
use unitforge_resolver::compose;
use unitforge_resolver::resolver::resolve_unit;
use unitforge_util::fs::write_atomic;
use unitforge_util::progress::status;

use crate::parse_unit_arg;

/// Compose `unit_arg` (a name or `name@constraint`) against the units under
/// `units_dir`. The merged document goes to `output`, or stdout if none.
pub async fn compose_unit(
    units_dir: &Path,
    unit_arg: &str,
    output: Option<&Path>,
    verbose: bool,
) -> miette::Result<()> {
    let catalogue = DirCatalogue::new(units_dir);
    let reference = parse_unit_arg(unit_arg)?;
    let root = resolve_unit(&catalogue, &reference).await?;

    let artifact = compose::compose(&catalogue, &root).await?;
    if verbose {
        for unit in &artifact.units {
            status("Merged", &unit.key());
        }
    }

    match output {
        Some(path) => {
            write_atomic(path, &artifact.content).map_err(unitforge_util::errors::ForgeError::Io)?;
            status(
                "Composed",
                &format!(
                    "{} -> {} ({} units)",
                    artifact.root,
                    path.display(),
                    artifact.units.len()
                ),
            );
        }
        None => print!("{}", artifact.content),
    }
    Ok(())
}
