//! Distribution configuration model - pure data and XML, no I/O.
//!
//! This crate provides:
//! - Origins (canonical and deprecated shapes) and their ordered collection
//! - Cache behaviors with forwarding and signing policy
//! - Routing validation between behaviors and origins
//! - XML rendering and response decoding
//!
//! # Example
//!
//! ```
//! use cfdist_core::{CFOrigins, CacheBehavior, CacheBehaviors, ToXml, validate_routing};
//!
//! let mut origins = CFOrigins::new();
//! origins.append_origin(vec!["www.example.com", "assets.s3.amazonaws.com"]).unwrap();
//!
//! let web = origins.as_slice()[0].origin_id.clone();
//! let assets = origins.as_slice()[1].origin_id.clone();
//! assert!(origins.as_slice()[1].config.is_s3());
//!
//! let default_behavior = CacheBehavior::new(web);
//! let behaviors: CacheBehaviors = [CacheBehavior::new(assets).with_pattern("/static/*")]
//!     .into_iter()
//!     .collect();
//! validate_routing(&origins, &default_behavior, &behaviors).unwrap();
//!
//! let xml = origins.to_xml().unwrap();
//! assert_eq!(CFOrigins::from_xml(&xml).unwrap(), origins);
//! ```

pub mod cache;
pub mod origin;
pub mod xml;

pub use cache::{
    validate_routing, CacheBehavior, CacheBehaviors, CookiePreference, ForwardedValues,
    RoutingError, TrustedSigners, ViewerProtocolPolicy, WhitelistedNames, DEFAULT_MIN_TTL,
};
pub use origin::{
    is_s3_domain, CFOrigin, CFOrigins, CustomOrigin, CustomOriginConfig, OriginAccessIdentity,
    OriginConfig, OriginError, OriginId, OriginInput, OriginProtocolPolicy, OriginSpec, S3Origin,
    S3OriginConfig, DEFAULT_HTTPS_PORT, DEFAULT_HTTP_PORT, S3_DOMAIN_MARKER,
};
pub use xml::{DecodeError, DecodeResult, EncodeError, ToXml};
