//! Operation: resolve every local unit and regenerate `unitforge.lock`.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use unitforge_core::lockfile::{LockFile, ResolvedUnitRecord, LOCK_FILE_NAME};
use unitforge_resolver::catalogue::DirCatalogue;
use unitforge_resolver::compose;
use unitforge_util::errors::ForgeError;
use unitforge_util::progress::{status, status_warn};

const MAX_CONCURRENT_COMPOSITIONS: usize = 8;

/// Resolve the include graph of every unit under `units_dir` and write a
/// fresh `unitforge.lock` next to them. Always a full regeneration.
pub async fn lock(units_dir: &Path, verbose: bool) -> miette::Result<()> {
    let catalogue = DirCatalogue::new(units_dir);
    let units = catalogue.load_all()?;

    if units.is_empty() {
        status_warn("Warning", &format!("no units found under {}", units_dir.display()));
    }
    status("Locking", &format!("{} units", units.len()));

    // Validate every unit's include graph before pinning anything. Cycles
    // and unresolvable constraints abort the whole regeneration.
    let semaphore = Arc::new(Semaphore::new(MAX_CONCURRENT_COMPOSITIONS));
    let mut join_set = JoinSet::new();
    for unit in &units {
        let catalogue = catalogue.clone();
        let unit = unit.clone();
        let sem = semaphore.clone();
        join_set.spawn(async move {
            let _permit = sem.acquire().await;
            let key = unit.key();
            (key, compose::traverse(&catalogue, &unit).await)
        });
    }
    while let Some(result) = join_set.join_next().await {
        let (key, traversal) = result.map_err(|e| ForgeError::Generic {
            message: format!("composition task failed: {e}"),
        })?;
        traversal?;
        if verbose {
            status("Resolved", &key);
        }
    }

    let records = units
        .iter()
        .map(|u| ResolvedUnitRecord {
            name: u.name.clone(),
            version: u.version.clone(),
            source: format!("local:{}", u.name),
            content: u.content.clone(),
        })
        .collect();
    let lockfile = LockFile::generate(records);
    let lock_path = units_dir.join(LOCK_FILE_NAME);
    lockfile.write_to(&lock_path)?;

    status("Locked", &format!("{} units in {}", lockfile.units.len(), lock_path.display()));
    Ok(())
}
