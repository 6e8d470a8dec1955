use std::collections::HashSet;

use super::behavior::CacheBehavior;
use super::behaviors::CacheBehaviors;
use super::error::{Result, RoutingError};
use crate::origin::CFOrigins;

/// Validates how a distribution's behaviors route to its origins.
///
/// The default behavior must have no pattern, every listed behavior must
/// have a unique one, and every behavior must target a known origin.
pub fn validate_routing(
    origins: &CFOrigins,
    default_behavior: &CacheBehavior,
    cache_behaviors: &CacheBehaviors,
) -> Result<()> {
    if let Some(pattern) = default_behavior.path_pattern() {
        return Err(RoutingError::DefaultHasPattern(pattern.to_string()));
    }

    let mut seen = HashSet::new();
    for behavior in cache_behaviors {
        let pattern = behavior
            .path_pattern()
            .ok_or_else(|| RoutingError::MissingPattern(behavior.target_origin_id.clone()))?;
        if !seen.insert(pattern) {
            return Err(RoutingError::DuplicatePattern(pattern.to_string()));
        }
    }

    std::iter::once(default_behavior)
        .chain(cache_behaviors)
        .find(|b| !origins.contains(&b.target_origin_id))
        .map_or(Ok(()), |b| {
            Err(RoutingError::UnknownOrigin(b.target_origin_id.clone()))
        })
}
