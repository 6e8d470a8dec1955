//! CLI error types.

use std::path::PathBuf;

use cfdist_core::{DecodeError, EncodeError, OriginError, RoutingError};
use thiserror::Error;

/// Result type alias for the CLI library.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur while rendering or inspecting documents.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("Invalid origin: {0}")]
    Origin(#[from] OriginError),

    #[error("Invalid routing: {0}")]
    Routing(#[from] RoutingError),

    #[error("Invalid response document: {0}")]
    Decode(#[from] DecodeError),

    #[error("Failed to render XML: {0}")]
    Encode(#[from] EncodeError),

    #[error("Failed to serialize JSON: {0}")]
    Serialize(serde_json::Error),

    #[error("No distribution elements found in {0}")]
    NothingFound(String),
}

impl CliError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::Read {
            path: path.into(),
            source,
        }
    }
}
