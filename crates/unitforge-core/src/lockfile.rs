//! Deterministic lock file recording exact resolved unit versions with
//! content checksums, for reproducible installation.

use serde::{Deserialize, Serialize};
use std::path::Path;

use unitforge_util::errors::ForgeError;
use unitforge_util::fs::write_atomic;
use unitforge_util::hash::content_checksum;

use crate::version::SemanticVersion;

/// Default lock file name.
pub const LOCK_FILE_NAME: &str = "unitforge.lock";
/// Current on-disk format version tag.
pub const LOCK_FORMAT_VERSION: &str = "1";

/// The parsed representation of a `unitforge.lock` file. Entries are kept
/// sorted by name so the file is stable and diffable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LockFile {
    pub version: String,
    #[serde(default, rename = "unit")]
    pub units: Vec<LockEntry>,
}

/// A single locked unit with its resolved version and content checksum.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LockEntry {
    pub name: String,
    pub version: String,
    pub source: String,
    pub checksum: String,
}

impl LockEntry {
    /// True if `content` hashes to this entry's checksum.
    pub fn matches_content(&self, content: &str) -> bool {
        content_checksum(content) == self.checksum
    }
}

/// A resolved unit ready to be pinned. The caller supplies the source
/// identifier (registry URL or `local:` path).
#[derive(Debug, Clone)]
pub struct ResolvedUnitRecord {
    pub name: String,
    pub version: SemanticVersion,
    pub source: String,
    pub content: String,
}

impl LockFile {
    /// Build a lock file from resolved units: checksum each content blob
    /// and order entries by name. Always a full regeneration, never an
    /// incremental patch.
    pub fn generate(mut records: Vec<ResolvedUnitRecord>) -> Self {
        records.sort_by(|a, b| a.name.cmp(&b.name));
        let units = records
            .into_iter()
            .map(|r| LockEntry {
                name: r.name,
                version: r.version.to_string(),
                source: r.source,
                checksum: content_checksum(&r.content),
            })
            .collect();
        Self {
            version: LOCK_FORMAT_VERSION.to_string(),
            units,
        }
    }

    /// Look up a locked entry by unit name.
    pub fn entry(&self, name: &str) -> Option<&LockEntry> {
        self.units.iter().find(|u| u.name == name)
    }

    /// Parse lock file content.
    pub fn parse_toml(content: &str) -> Result<Self, ForgeError> {
        toml::from_str(content).map_err(|e| ForgeError::LockFile {
            message: format!("failed to parse lock file: {e}"),
        })
    }

    /// Load and parse a `unitforge.lock` file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ForgeError::LockFile {
            message: format!("failed to read lock file {}: {e}", path.display()),
        })?;
        Ok(Self::parse_toml(&content)?)
    }

    /// Serialize to a pretty-printed TOML string. Parsing the output and
    /// re-serializing it yields byte-identical text.
    pub fn to_string_pretty(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Write the lock file atomically: the previous file is replaced
    /// wholesale, never left partially written.
    pub fn write_to(&self, path: &Path) -> miette::Result<()> {
        let content = self.to_string_pretty().map_err(|e| ForgeError::LockFile {
            message: format!("failed to serialize lock file: {e}"),
        })?;
        write_atomic(path, &content).map_err(ForgeError::Io)?;
        Ok(())
    }
}
