//! cfdist_cli - render and inspect CDN distribution configuration.

pub mod cli;
pub mod distribution;
pub mod error;
pub mod manifest;
pub mod output;

pub use distribution::{Distribution, Inspection};
pub use error::{CliError, Result};
pub use manifest::Manifest;
