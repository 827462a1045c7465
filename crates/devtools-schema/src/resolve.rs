//! # Reference Resolution
//!
//! Populates a [`SchemaRegistry`] with every schema reachable by `$ref`
//! from the schemas already in it.
//!
//! Resolution runs in rounds over a frontier of missing names. Every name
//! in a round is loaded and registered before the next frontier is
//! computed, and the next frontier is drawn only from the documents loaded
//! in that round, minus anything already registered. Registry membership
//! is the visited set: a name is loaded at most once, so mutually
//! referencing schemas terminate, and the number of rounds equals the depth
//! of the reference graph rather than its size.

use std::collections::BTreeSet;

use crate::error::SchemaError;
use crate::registry::{referenced_names, SchemaRegistry};
use crate::source::SchemaSource;

/// What a resolution pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionReport {
    /// Number of rounds that loaded at least one schema.
    pub rounds: usize,
    /// Names loaded, in load order.
    pub loaded: Vec<String>,
}

/// Load every transitively referenced schema into `registry`.
///
/// # Errors
///
/// Returns [`SchemaError::Reference`] for the first referenced name the
/// source cannot load. Schemas registered before the failure stay in the
/// registry.
pub fn resolve_references<S>(
    registry: &mut SchemaRegistry,
    source: &S,
) -> Result<ResolutionReport, SchemaError>
where
    S: SchemaSource + ?Sized,
{
    let mut report = ResolutionReport::default();
    let mut frontier = registry.missing_references();

    while !frontier.is_empty() {
        report.rounds += 1;
        tracing::debug!(round = report.rounds, missing = ?frontier, "resolving schema references");

        let mut discovered = BTreeSet::new();
        for name in frontier {
            let schema = source.load(&name).map_err(|e| SchemaError::Reference {
                name: name.clone(),
                source: Box::new(e),
            })?;
            discovered.extend(referenced_names(&schema));
            registry.register(name.clone(), schema);
            report.loaded.push(name);
        }

        discovered.retain(|name| !registry.contains(name));
        frontier = discovered;
    }

    Ok(report)
}
