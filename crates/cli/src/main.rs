//! cfdist CLI entry point.

use std::fs;
use std::path::Path;

use anyhow::Result;
use cfdist_cli::cli::{Cli, Commands, OutputFormat};
use cfdist_cli::output::{format_output, json};
use cfdist_cli::{CliError, Inspection, Manifest};
use cfdist_core::ToXml;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the document.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cfdist=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Render { manifest } => {
            let distribution = Manifest::from_json(&read(&manifest)?)?.into_distribution()?;
            tracing::info!(
                manifest = %manifest.display(),
                origins = distribution.origins.len(),
                cache_behaviors = distribution.cache_behaviors.len(),
                "rendering distribution"
            );
            match cli.format {
                OutputFormat::Json => println!("{}", json::format_json(&distribution)?),
                OutputFormat::Pretty => println!("{}", distribution.to_xml()?),
            }
            if !cli.quiet {
                eprintln!(
                    "Rendered {} origins and {} patterned cache behaviors",
                    distribution.origins.len(),
                    distribution.cache_behaviors.len()
                );
            }
        }
        Commands::Inspect { document } => {
            let inspection = Inspection::from_xml(&read(&document)?)?;
            tracing::info!(document = %document.display(), "inspected response document");
            println!("{}", format_output(&inspection, cli.format)?);
        }
    }

    Ok(())
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|e| CliError::read(path, e))
}
