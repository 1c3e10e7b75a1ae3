//! Handler for `unitforge verify`.

use std::path::Path;

use miette::Result;
use unitforge_util::errors::ForgeError;

pub fn exec(dir: &Path, json: bool) -> Result<()> {
    let report = unitforge_ops::ops_verify::verify_units(dir, json)?;
    if report.is_clean() {
        return Ok(());
    }
    Err(ForgeError::Generic {
        message: format!(
            "verification {}: {} finding(s)",
            report.outcome(),
            report.findings.len()
        ),
    }
    .into())
}
