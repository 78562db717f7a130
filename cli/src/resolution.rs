//! Matching configured library identifiers to resolved dependencies.
//!
//! Each identifier yields at most one [`PatchRequest`]. Identifiers that do
//! not parse or match nothing are skipped; they are logged at debug level so
//! a run with a stale configuration still completes.

use crate::coordinates::LibraryId;
use crate::dependency::ResolvedDependency;
use log::debug;
use scala_suffix::{LibraryName, PatchRequest};
use std::collections::HashSet;

/// Returns the first dependency satisfying `id`.
///
/// # Examples
///
/// ```
/// use scala_suffix_cli::coordinates::LibraryId;
/// use scala_suffix_cli::dependency::ResolvedDependency;
/// use scala_suffix_cli::resolution::find_dependency;
///
/// let deps = vec![
///     ResolvedDependency::new("org.example", "foo", "/jars/foo-a.jar"),
///     ResolvedDependency::new("org.other", "foo", "/jars/foo-b.jar"),
/// ];
/// let id = LibraryId::parse("foo").unwrap();
/// let found = find_dependency(&id, &deps).unwrap();
/// assert_eq!(found.file, "/jars/foo-a.jar");
/// ```
#[must_use]
pub fn find_dependency<'a>(
    id: &LibraryId,
    dependencies: &'a [ResolvedDependency],
) -> Option<&'a ResolvedDependency> {
    dependencies
        .iter()
        .find(|dep| id.matches(&dep.group_id, &dep.artifact_id))
}

/// Build one request per distinct, resolvable identifier, in first-seen
/// order.
///
/// The declared library name is the identifier exactly as configured.
#[must_use]
pub fn resolve_requests(
    libraries: &[String],
    dependencies: &[ResolvedDependency],
) -> Vec<PatchRequest> {
    let mut seen = HashSet::new();
    libraries
        .iter()
        .filter(|identifier| seen.insert(identifier.as_str()))
        .filter_map(|identifier| resolve_one(identifier, dependencies))
        .collect()
}

fn resolve_one(identifier: &str, dependencies: &[ResolvedDependency]) -> Option<PatchRequest> {
    let id = match LibraryId::parse(identifier) {
        Ok(id) => id,
        Err(err) => {
            debug!("skipping library: {err}");
            return None;
        }
    };

    let Some(dependency) = find_dependency(&id, dependencies) else {
        debug!("no dependency matches library \"{identifier}\"; skipping");
        return None;
    };

    let library = match LibraryName::try_from(identifier) {
        Ok(library) => library,
        Err(err) => {
            debug!("skipping library: {err}");
            return None;
        }
    };

    debug!(
        "library \"{identifier}\" resolved to {} at {}",
        dependency.coordinates(),
        dependency.file
    );
    Some(PatchRequest::new(dependency.file.clone(), library))
}
