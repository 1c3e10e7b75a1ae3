//! Constraint resolution: pick the maximum published version that satisfies
//! a constraint.

use unitforge_core::unit::{Unit, UnitReference};
use unitforge_core::version::SemanticVersion;

use crate::catalogue::Catalogue;
use crate::error::ResolveError;

/// Pick the highest published version of `reference.name` that satisfies its
/// constraint.
///
/// Ties between versions that compare equal (differing only in build
/// metadata) break on the lexicographically greater rendered text, so the
/// choice is deterministic for a fixed published set.
pub async fn resolve_version(
    catalogue: &dyn Catalogue,
    reference: &UnitReference,
) -> Result<SemanticVersion, ResolveError> {
    let available = catalogue.list_versions(&reference.name).await?;

    let mut satisfying: Vec<&SemanticVersion> = available
        .iter()
        .filter(|v| reference.constraint.satisfies(v))
        .collect();

    if satisfying.is_empty() {
        return Err(ResolveError::NoSatisfyingVersion {
            name: reference.name.clone(),
            constraint: reference.constraint.to_string(),
            available: available.iter().map(|v| v.to_string()).collect(),
        });
    }

    satisfying.sort_by(|a, b| a.cmp(b).then_with(|| a.to_string().cmp(&b.to_string())));
    let picked = satisfying[satisfying.len() - 1].clone();
    tracing::debug!(
        unit = %reference.name,
        constraint = %reference.constraint,
        version = %picked,
        "resolved constraint"
    );
    Ok(picked)
}

/// Resolve a reference to a concrete unit: pick the version, then fetch it.
pub async fn resolve_unit(
    catalogue: &dyn Catalogue,
    reference: &UnitReference,
) -> Result<Unit, ResolveError> {
    let version = resolve_version(catalogue, reference).await?;
    Ok(catalogue.fetch(&reference.name, &version).await?)
}
