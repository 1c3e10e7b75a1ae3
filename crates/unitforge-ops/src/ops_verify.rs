//! Operation: compare installed units against `unitforge.lock`.

use std::path::Path;

use unitforge_core::lockfile::{LockFile, LOCK_FILE_NAME};
use unitforge_core::verify::{verify, Finding, VerificationReport};
use unitforge_resolver::catalogue::DirCatalogue;
use unitforge_util::errors::ForgeError;
use unitforge_util::progress::{status, status_err, status_info, status_warn};

/// Verify every unit under `units_dir` against the lock file. Reports all
/// findings at once rather than failing on the first one; the caller decides
/// the exit status from the returned report.
pub fn verify_units(units_dir: &Path, json: bool) -> miette::Result<VerificationReport> {
    let lock_path = units_dir.join(LOCK_FILE_NAME);
    if !lock_path.is_file() {
        return Err(ForgeError::LockFile {
            message: format!(
                "no {LOCK_FILE_NAME} found in {}; run `unitforge lock` first",
                units_dir.display()
            ),
        }
        .into());
    }
    let lock = LockFile::from_path(&lock_path)?;
    let installed = DirCatalogue::new(units_dir).load_all()?;

    let report = verify(&lock, &installed);

    if json {
        let rendered = serde_json::to_string_pretty(&report).map_err(|e| ForgeError::Generic {
            message: format!("failed to render verification report: {e}"),
        })?;
        println!("{rendered}");
        return Ok(report);
    }

    for finding in &report.findings {
        match finding {
            Finding::IntegrityViolation { .. } => status_err("Violated", &finding.to_string()),
            Finding::VersionDrift { .. } => status_warn("Drifted", &finding.to_string()),
            Finding::MissingLockedUnit { .. } => status_warn("Missing", &finding.to_string()),
        }
    }
    // Extras are informational, never a failure, but always reported.
    for name in &report.extras {
        status_info("Unlocked", &format!("{name} is installed but not locked"));
    }
    if report.is_clean() {
        status("Verified", &format!("{} units match the lock file", report.matched));
    }

    Ok(report)
}
