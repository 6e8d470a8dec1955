//! Pretty output formatting.

use cfdist_core::{CFOrigin, CacheBehavior, CookiePreference, OriginConfig};

use crate::distribution::Inspection;

/// Format an origin for display.
pub fn format_origin(origin: &CFOrigin) -> String {
    let mut output = format!("{}\n  ID: {}", origin.domain_name, origin.origin_id);
    match &origin.config {
        OriginConfig::S3(s3) => {
            output.push_str("\n  Type: s3");
            if let Some(oai) = &s3.origin_access_identity {
                output.push_str(&format!("\n  Access identity: {}", oai.id()));
            }
        }
        OriginConfig::Custom(custom) => {
            output.push_str(&format!(
                "\n  Type: custom\n  Ports: {}/{}\n  Protocol: {}",
                custom.http_port, custom.https_port, custom.origin_protocol_policy
            ));
        }
    }
    output
}

/// Format origins for display.
pub fn format_origins(origins: &[CFOrigin]) -> String {
    if origins.is_empty() {
        return "No origins found.".to_string();
    }
    let mut output = format!("ORIGINS ({})\n", origins.len());
    output.push_str(&"-".repeat(40));
    for origin in origins {
        output.push_str(&format!("\n{}", format_origin(origin)));
        output.push('\n');
    }
    output
}

/// Format a cache behavior for display.
pub fn format_behavior(behavior: &CacheBehavior) -> String {
    let mut output = format!(
        "{} -> {}\n  Viewer protocol: {}\n  Min TTL: {}s",
        behavior.path_pattern().unwrap_or("(default)"),
        behavior.target_origin_id,
        behavior.viewer_protocol_policy,
        behavior.min_ttl
    );
    let forwarded = &behavior.forwarded_values;
    output.push_str(&format!(
        "\n  Query string: {}\n  Cookies: {}",
        forwarded.query_string,
        forwarded.cookies.forward()
    ));
    if let CookiePreference::Whitelist(names) = &forwarded.cookies {
        output.push_str(&format!(" ({})", names.names().join(", ")));
    }
    if !behavior.trusted_signers.is_empty() {
        output.push_str(&format!(
            "\n  Trusted signers: {}",
            behavior.trusted_signers.account_numbers().join(", ")
        ));
    }
    output
}

/// Format cache behaviors for display.
pub fn format_behaviors<'a>(behaviors: impl ExactSizeIterator<Item = &'a CacheBehavior>) -> String {
    if behaviors.len() == 0 {
        return "No cache behaviors found.".to_string();
    }
    let mut output = format!("CACHE BEHAVIORS ({})\n", behaviors.len());
    output.push_str(&"-".repeat(40));
    for behavior in behaviors {
        output.push_str(&format!("\n{}", format_behavior(behavior)));
        output.push('\n');
    }
    output
}

/// Format every section found by an inspection.
pub fn format_inspection(inspection: &Inspection) -> String {
    let mut sections = Vec::new();
    if let Some(origins) = &inspection.origins {
        sections.push(format_origins(origins.as_slice()));
    }
    if let Some(behavior) = &inspection.default_behavior {
        sections.push(format!("DEFAULT CACHE BEHAVIOR\n{}", format_behavior(behavior)));
    }
    if let Some(behaviors) = &inspection.cache_behaviors {
        sections.push(format_behaviors(behaviors.iter()));
    }
    sections.join("\n")
}
