//! JSON manifest describing a distribution to render.

use cfdist_core::{
    validate_routing, CFOrigins, CacheBehavior, CacheBehaviors, OriginInput, OriginSpec,
};
use serde::Deserialize;

use crate::distribution::Distribution;
use crate::error::Result;

/// An origin as written in a manifest: a bare domain or named parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OriginEntry {
    Domain(String),
    Spec(OriginSpec),
}

impl From<OriginEntry> for OriginInput {
    fn from(entry: OriginEntry) -> Self {
        match entry {
            OriginEntry::Domain(domain_name) => OriginInput::Domain(domain_name),
            OriginEntry::Spec(spec) => OriginInput::Spec(spec),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    pub origins: Vec<OriginEntry>,
    pub default_behavior: CacheBehavior,
    #[serde(default)]
    pub cache_behaviors: CacheBehaviors,
}

impl Manifest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Normalizes the origins and validates routing.
    pub fn into_distribution(self) -> Result<Distribution> {
        let mut origins = CFOrigins::new();
        origins.append_origin(self.origins)?;
        validate_routing(&origins, &self.default_behavior, &self.cache_behaviors)?;

        tracing::debug!(
            origins = origins.len(),
            cache_behaviors = self.cache_behaviors.len(),
            "manifest validated"
        );

        Ok(Distribution {
            origins,
            default_behavior: self.default_behavior,
            cache_behaviors: self.cache_behaviors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use cfdist_core::{CookiePreference, OriginError, RoutingError, ViewerProtocolPolicy};

    const MANIFEST: &str = r#"{
        "origins": [
            {"domain_name": "www.example.com", "origin_id": "web", "http_port": 8080},
            {"domain_name": "media.s3.amazonaws.com", "origin_id": "media", "s3_oai": "E2QWRUHAPOMQZL"}
        ],
        "default_behavior": {
            "target_origin_id": "web",
            "forwarded_values": {"query_string": true, "cookies": "all"},
            "viewer_protocol_policy": "https"
        },
        "cache_behaviors": [
            {"pattern": "/media/*", "target_origin_id": "media", "min_ttl": 60}
        ]
    }"#;

    #[test]
    fn test_from_json() {
        let manifest = Manifest::from_json(MANIFEST).unwrap();
        assert_eq!(manifest.origins.len(), 2);
        assert_eq!(
            manifest.default_behavior.forwarded_values.cookies,
            CookiePreference::All
        );
        assert_eq!(
            manifest.default_behavior.viewer_protocol_policy,
            ViewerProtocolPolicy::Https
        );
        assert_eq!(manifest.cache_behaviors.len(), 1);
    }

    #[test]
    fn test_domain_string_entry() {
        let entry: OriginEntry = serde_json::from_str(r#""cdn.example.com""#).unwrap();
        assert_eq!(entry, OriginEntry::Domain("cdn.example.com".to_string()));
    }

    #[test]
    fn test_into_distribution() {
        let distribution = Manifest::from_json(MANIFEST)
            .unwrap()
            .into_distribution()
            .unwrap();
        let origins = distribution.origins.as_slice();
        assert_eq!(origins[0].origin_id.as_str(), "web");
        assert!(origins[0].config.is_custom());
        assert!(origins[1].config.is_s3());
        assert_eq!(distribution.cache_behaviors.iter().next().unwrap().min_ttl, 60);
    }

    #[test]
    fn test_unknown_target_rejected() {
        let json = r#"{"origins": ["www.example.com"], "default_behavior": {"target_origin_id": "nope"}}"#;
        let err = Manifest::from_json(json)
            .unwrap()
            .into_distribution()
            .unwrap_err();
        assert!(matches!(err, CliError::Routing(RoutingError::UnknownOrigin(_))));
    }

    #[test]
    fn test_empty_domain_rejected() {
        let json = r#"{"origins": [""], "default_behavior": {"target_origin_id": "web"}}"#;
        let err = Manifest::from_json(json)
            .unwrap()
            .into_distribution()
            .unwrap_err();
        assert!(matches!(err, CliError::Origin(OriginError::EmptyDomainName)));
    }

    #[test]
    fn test_zero_port_rejected() {
        let json = r#"{
            "origins": [{"domain_name": "www.example.com", "origin_id": "web", "https_port": 0}],
            "default_behavior": {"target_origin_id": "web"}
        }"#;
        let err = Manifest::from_json(json)
            .unwrap()
            .into_distribution()
            .unwrap_err();
        assert!(matches!(err, CliError::Origin(OriginError::InvalidPort(0))));
    }

    #[test]
    fn test_missing_default_behavior() {
        let err = Manifest::from_json(r#"{"origins": []}"#).unwrap_err();
        assert!(matches!(err, CliError::Manifest(_)));
    }
}
