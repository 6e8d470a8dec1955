//! Output formatting functions.

pub mod json;
pub mod pretty;

use crate::cli::OutputFormat;
use crate::distribution::Inspection;
use crate::error::Result;

/// Format an inspection result for output.
pub fn format_output(inspection: &Inspection, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format_json(inspection),
        OutputFormat::Pretty => Ok(pretty::format_inspection(inspection)),
    }
}
