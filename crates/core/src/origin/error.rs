use thiserror::Error;

/// Errors that can occur when normalizing origins.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OriginError {
    #[error("Origin domain name cannot be empty")]
    EmptyDomainName,
    #[error("Origin port must be non-zero, got {0}")]
    InvalidPort(u16),
}

/// Result type for origin operations.
pub type Result<T> = std::result::Result<T, OriginError>;
