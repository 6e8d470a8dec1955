//! CLI command definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Render and inspect CDN distribution configuration.
#[derive(Debug, Parser)]
#[command(name = "cfdist")]
#[command(version, about = "Render and inspect CDN distribution configuration", long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(long, env = "CFDIST_FORMAT", default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented JSON.
    Json,
    /// XML for `render`, readable text for `inspect`.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a JSON manifest as a distribution config request body.
    Render {
        /// Path to the manifest.
        manifest: PathBuf,
    },
    /// Decode origins and cache behaviors from a response document.
    Inspect {
        /// Path to the XML document.
        document: PathBuf,
    },
}
