//! Resolution error taxonomy.

use miette::Diagnostic;
use thiserror::Error;
use unitforge_core::version::VersionError;

/// Raised when resolution fails. Each variant names the unit that caused the
/// failure; `IncludeChain` adds the path the resolver walked to reach it.
#[derive(Debug, Error, Diagnostic)]
pub enum ResolveError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Version(#[from] VersionError),

    #[error("unit `{name}` not found in the catalogue")]
    #[diagnostic(help("check the unit name spelling, or publish the unit first"))]
    UnitNotFound { name: String },

    #[error(
        "no version of `{name}` satisfies `{constraint}` (available: {})",
        .available.join(", ")
    )]
    #[diagnostic(help("relax the constraint or publish a satisfying version"))]
    NoSatisfyingVersion {
        name: String,
        constraint: String,
        available: Vec<String>,
    },

    #[error("circular include detected: {}", .cycle.join(" -> "))]
    #[diagnostic(help("break the cycle by removing one of the includes"))]
    CircularDependency { cycle: Vec<String> },

    #[error("unit `{name}` has an invalid manifest: {reason}")]
    #[diagnostic(help("fix the unit's Unit.toml before resolving against it"))]
    InvalidUnit { name: String, reason: String },

    #[error("catalogue unavailable while fetching `{name}`: {reason}")]
    CatalogueUnavailable { name: String, reason: String },

    #[error("while resolving includes of {}", .chain.join(" -> "))]
    IncludeChain {
        chain: Vec<String>,
        #[source]
        source: Box<ResolveError>,
    },
}

impl ResolveError {
    /// Annotate this error with the include chain that led to it. Cycle
    /// errors already carry their own path and chain wrappers are never
    /// nested, so both pass through unchanged.
    pub fn within(self, chain: Vec<String>) -> Self {
        match self {
            ResolveError::CircularDependency { .. } | ResolveError::IncludeChain { .. } => self,
            other if chain.is_empty() => other,
            other => ResolveError::IncludeChain {
                chain,
                source: Box::new(other),
            },
        }
    }

    /// The underlying error with any chain annotation stripped.
    pub fn root_cause(&self) -> &ResolveError {
        match self {
            ResolveError::IncludeChain { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
