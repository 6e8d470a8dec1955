use thiserror::Error;

use crate::origin::OriginId;

/// Errors found when validating a distribution's routing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoutingError {
    #[error("Default cache behavior cannot have a path pattern: {0}")]
    DefaultHasPattern(String),
    #[error("Cache behavior targeting {0} has no path pattern")]
    MissingPattern(OriginId),
    #[error("Duplicate path pattern: {0}")]
    DuplicatePattern(String),
    #[error("Cache behavior targets unknown origin: {0}")]
    UnknownOrigin(OriginId),
}

/// Result type for routing validation.
pub type Result<T> = std::result::Result<T, RoutingError>;
