//! Lock verification: compare installed units against the pinned lock file.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use unitforge_util::hash::content_checksum;

use crate::lockfile::LockFile;
use crate::unit::Unit;

/// A single verification finding. Each kind carries enough context to act
/// on: the offending name and the locked/installed versions or checksums.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Finding {
    /// A locked unit has no installed counterpart.
    MissingLockedUnit { name: String, locked_version: String },

    /// The installed version differs from the locked one. Usually an
    /// intentional upgrade that needs a lock regeneration.
    VersionDrift {
        name: String,
        locked_version: String,
        installed_version: String,
    },

    /// The version matches but the content bytes differ from the locked
    /// checksum: tampering or non-reproducible content.
    IntegrityViolation {
        name: String,
        version: String,
        expected: String,
        actual: String,
    },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::MissingLockedUnit {
                name,
                locked_version,
            } => {
                write!(f, "{name}@{locked_version} is locked but not installed")
            }
            Finding::VersionDrift {
                name,
                locked_version,
                installed_version,
            } => {
                write!(
                    f,
                    "{name}: locked {locked_version} but installed {installed_version}"
                )
            }
            Finding::IntegrityViolation {
                name,
                version,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "{name}@{version}: content checksum mismatch (expected {expected}, actual {actual})"
                )
            }
        }
    }
}

/// Overall verification outcome. An integrity violation dominates drift.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum VerificationOutcome {
    Clean,
    Drifted,
    Violated,
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            VerificationOutcome::Clean => "clean",
            VerificationOutcome::Drifted => "drifted",
            VerificationOutcome::Violated => "violated",
        };
        f.write_str(text)
    }
}

/// The result of verifying installed units against a lock file.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    pub findings: Vec<Finding>,
    /// Installed units absent from the lock file. Informational, never a
    /// failure.
    pub extras: Vec<String>,
    /// Count of units that matched version and checksum.
    pub matched: usize,
}

impl VerificationReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn outcome(&self) -> VerificationOutcome {
        if self
            .findings
            .iter()
            .any(|f| matches!(f, Finding::IntegrityViolation { .. }))
        {
            VerificationOutcome::Violated
        } else if self.findings.is_empty() {
            VerificationOutcome::Clean
        } else {
            VerificationOutcome::Drifted
        }
    }
}

/// Compare installed units against a lock file. Read-only: produces a
/// report and mutates nothing.
///
/// Findings follow lock file order (sorted by name), so reports are
/// deterministic for a given lock file and installed set.
pub fn verify(lock: &LockFile, installed: &[Unit]) -> VerificationReport {
    let index: HashMap<&str, &Unit> = installed.iter().map(|u| (u.name.as_str(), u)).collect();

    let mut findings = Vec::new();
    let mut matched = 0usize;

    for entry in &lock.units {
        match index.get(entry.name.as_str()) {
            None => findings.push(Finding::MissingLockedUnit {
                name: entry.name.clone(),
                locked_version: entry.version.clone(),
            }),
            Some(unit) => {
                let installed_version = unit.version.to_string();
                if installed_version != entry.version {
                    findings.push(Finding::VersionDrift {
                        name: entry.name.clone(),
                        locked_version: entry.version.clone(),
                        installed_version,
                    });
                } else if !entry.matches_content(&unit.content) {
                    findings.push(Finding::IntegrityViolation {
                        name: entry.name.clone(),
                        version: entry.version.clone(),
                        expected: entry.checksum.clone(),
                        actual: content_checksum(&unit.content),
                    });
                } else {
                    matched += 1;
                }
            }
        }
    }

    let mut extras: Vec<String> = installed
        .iter()
        .filter(|u| lock.entry(&u.name).is_none())
        .map(|u| u.name.clone())
        .collect();
    extras.sort();

    VerificationReport {
        findings,
        extras,
        matched,
    }
}
