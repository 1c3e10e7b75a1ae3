//! Capability units: named, versioned, content-bearing artifacts that may
//! include other units by name and version constraint.

use std::fmt;
use std::path::Path;

use miette::Diagnostic;
use serde::Deserialize;
use thiserror::Error;

use crate::version::{SemanticVersion, VersionConstraint, VersionError};

/// Manifest file name inside a unit directory.
pub const MANIFEST_FILE_NAME: &str = "Unit.toml";
/// Content file name inside a unit directory.
pub const CONTENT_FILE_NAME: &str = "UNIT.md";

/// Raised when a unit directory or manifest cannot be loaded.
#[derive(Debug, Error, Diagnostic)]
pub enum ManifestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid unit manifest: {message}")]
    #[diagnostic(help("check the [unit] section and includes entries of Unit.toml"))]
    Invalid { message: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Version(#[from] VersionError),
}

/// Check a unit name against the naming rules: non-empty, lowercase
/// alphanumeric segments separated by single hyphens.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && !name.ends_with('-')
        && !name.contains("--")
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// A reference to another unit: a name plus a version constraint. Used both
/// as an include edge and as a catalogue pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitReference {
    pub name: String,
    pub constraint: VersionConstraint,
}

impl UnitReference {
    pub fn new(name: impl Into<String>, constraint: VersionConstraint) -> Self {
        Self {
            name: name.into(),
            constraint,
        }
    }

    /// Parse the short `name@constraint` form used in includes lists,
    /// e.g. `base-style@^1.0.0` or `rust-idioms@1.2.0`.
    pub fn parse(text: &str) -> Result<Self, ManifestError> {
        let (name, constraint_text) =
            text.split_once('@').ok_or_else(|| ManifestError::Invalid {
                message: format!("include reference `{text}` must use the form name@constraint"),
            })?;
        if !is_valid_name(name) {
            return Err(ManifestError::Invalid {
                message: format!("invalid unit name `{name}` (lowercase, hyphen-separated)"),
            });
        }
        let constraint = VersionConstraint::parse(constraint_text)?;
        Ok(Self {
            name: name.to_string(),
            constraint,
        })
    }
}

impl fmt::Display for UnitReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.constraint)
    }
}

/// A concrete unit as stored in a catalogue. Read-only during resolution.
#[derive(Debug, Clone)]
pub struct Unit {
    pub name: String,
    pub version: SemanticVersion,
    pub description: Option<String>,
    /// Opaque content blob (the UNIT.md body).
    pub content: String,
    /// Ordered include edges.
    pub includes: Vec<UnitReference>,
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    unit: RawUnitSection,
}

#[derive(Debug, Deserialize)]
struct RawUnitSection {
    name: String,
    version: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    includes: Vec<String>,
}

impl Unit {
    /// Parse a `Unit.toml` manifest string together with the unit content.
    pub fn parse_manifest(manifest: &str, content: &str) -> Result<Self, ManifestError> {
        let raw: RawManifest = toml::from_str(manifest).map_err(|e| ManifestError::Invalid {
            message: e.to_string(),
        })?;
        if !is_valid_name(&raw.unit.name) {
            return Err(ManifestError::Invalid {
                message: format!(
                    "invalid unit name `{}` (lowercase, hyphen-separated)",
                    raw.unit.name
                ),
            });
        }
        let version = SemanticVersion::parse(&raw.unit.version)?;
        let includes = raw
            .unit
            .includes
            .iter()
            .map(|entry| UnitReference::parse(entry))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: raw.unit.name,
            version,
            description: raw.unit.description,
            content: content.to_string(),
            includes,
        })
    }

    /// Load a unit from a directory containing `Unit.toml` and `UNIT.md`.
    pub fn from_dir(dir: &Path) -> Result<Self, ManifestError> {
        let manifest_path = dir.join(MANIFEST_FILE_NAME);
        let manifest =
            std::fs::read_to_string(&manifest_path).map_err(|source| ManifestError::Io {
                path: manifest_path.display().to_string(),
                source,
            })?;
        let content_path = dir.join(CONTENT_FILE_NAME);
        let content =
            std::fs::read_to_string(&content_path).map_err(|source| ManifestError::Io {
                path: content_path.display().to_string(),
                source,
            })?;
        Self::parse_manifest(&manifest, &content)
    }

    /// `name@version` identifier.
    pub fn key(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }
}
