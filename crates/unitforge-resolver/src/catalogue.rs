//! Catalogue abstraction: where published units come from.
//!
//! Resolution only needs two operations, listing the published versions of a
//! name and fetching one concrete unit, so the trait stays that small. The
//! in-memory implementation backs tests; the directory implementation backs
//! local workflows.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use miette::Diagnostic;
use thiserror::Error;
use unitforge_core::unit::{ManifestError, Unit, MANIFEST_FILE_NAME};
use unitforge_core::version::SemanticVersion;

use crate::error::ResolveError;

/// Raised by catalogue implementations.
#[derive(Debug, Error, Diagnostic)]
pub enum CatalogueError {
    #[error("unit `{name}` not found")]
    NotFound { name: String },

    #[error("catalogue unavailable for `{name}`: {reason}")]
    Unavailable { name: String, reason: String },

    #[error("unit `{name}` is invalid: {source}")]
    InvalidUnit {
        name: String,
        #[source]
        source: ManifestError,
    },
}

impl From<CatalogueError> for ResolveError {
    fn from(err: CatalogueError) -> Self {
        match err {
            CatalogueError::NotFound { name } => ResolveError::UnitNotFound { name },
            CatalogueError::Unavailable { name, reason } => {
                ResolveError::CatalogueUnavailable { name, reason }
            }
            // Version errors keep their own kind; everything else about a
            // bad manifest is an authoring error, not a transient failure.
            CatalogueError::InvalidUnit { name, source } => match source {
                ManifestError::Version(e) => ResolveError::Version(e),
                other => ResolveError::InvalidUnit {
                    name,
                    reason: other.to_string(),
                },
            },
        }
    }
}

/// A source of published units.
#[async_trait]
pub trait Catalogue: Send + Sync {
    /// All published versions of `name`, in ascending order. An unknown name
    /// is `NotFound`, never an empty list.
    async fn list_versions(&self, name: &str) -> Result<Vec<SemanticVersion>, CatalogueError>;

    /// Fetch one concrete unit.
    async fn fetch(&self, name: &str, version: &SemanticVersion) -> Result<Unit, CatalogueError>;
}

/// In-memory catalogue for tests and programmatic use.
#[derive(Debug, Default)]
pub struct MemoryCatalogue {
    units: HashMap<String, BTreeMap<SemanticVersion, Unit>>,
}

impl MemoryCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a unit, replacing any previous unit of the same name and
    /// version.
    pub fn publish(&mut self, unit: Unit) {
        self.units
            .entry(unit.name.clone())
            .or_default()
            .insert(unit.version.clone(), unit);
    }
}

#[async_trait]
impl Catalogue for MemoryCatalogue {
    async fn list_versions(&self, name: &str) -> Result<Vec<SemanticVersion>, CatalogueError> {
        let versions = self
            .units
            .get(name)
            .ok_or_else(|| CatalogueError::NotFound {
                name: name.to_string(),
            })?;
        Ok(versions.keys().cloned().collect())
    }

    async fn fetch(&self, name: &str, version: &SemanticVersion) -> Result<Unit, CatalogueError> {
        self.units
            .get(name)
            .and_then(|versions| versions.get(version))
            .cloned()
            .ok_or_else(|| CatalogueError::NotFound {
                name: name.to_string(),
            })
    }
}

/// Catalogue backed by a directory of unit subdirectories, one unit per
/// subdirectory, each holding `Unit.toml` and `UNIT.md`. A directory holds
/// one version per name.
#[derive(Debug, Clone)]
pub struct DirCatalogue {
    root: PathBuf,
}

impl DirCatalogue {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn load(&self, name: &str) -> Result<Unit, CatalogueError> {
        let dir = self.root.join(name);
        if !dir.join(MANIFEST_FILE_NAME).is_file() {
            return Err(CatalogueError::NotFound {
                name: name.to_string(),
            });
        }
        Unit::from_dir(&dir).map_err(|source| CatalogueError::InvalidUnit {
            name: name.to_string(),
            source,
        })
    }

    /// Load every unit under the root, sorted by name.
    pub fn load_all(&self) -> Result<Vec<Unit>, CatalogueError> {
        let entries = std::fs::read_dir(&self.root).map_err(|e| CatalogueError::Unavailable {
            name: self.root.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut units = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CatalogueError::Unavailable {
                name: self.root.display().to_string(),
                reason: e.to_string(),
            })?;
            let path = entry.path();
            if !path.is_dir() || !path.join(MANIFEST_FILE_NAME).is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            units.push(self.load(&name)?);
        }
        units.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(units)
    }
}

#[async_trait]
impl Catalogue for DirCatalogue {
    async fn list_versions(&self, name: &str) -> Result<Vec<SemanticVersion>, CatalogueError> {
        let unit = self.load(name)?;
        Ok(vec![unit.version])
    }

    async fn fetch(&self, name: &str, version: &SemanticVersion) -> Result<Unit, CatalogueError> {
        let unit = self.load(name)?;
        if &unit.version != version {
            return Err(CatalogueError::NotFound {
                name: name.to_string(),
            });
        }
        Ok(unit)
    }
}
