mod config;
mod descriptor;
mod error;
mod id;
mod legacy;
mod origins;

pub use config::{
    CustomOriginConfig, OriginAccessIdentity, OriginConfig, OriginProtocolPolicy, S3OriginConfig,
    DEFAULT_HTTPS_PORT, DEFAULT_HTTP_PORT,
};
pub use descriptor::{is_s3_domain, CFOrigin, OriginSpec, S3_DOMAIN_MARKER};
pub use error::{OriginError, Result};
pub use id::OriginId;
pub use legacy::{CustomOrigin, S3Origin};
pub use origins::{CFOrigins, OriginInput};

pub(crate) use descriptor::OriginDraft;
