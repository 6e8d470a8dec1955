mod behavior;
mod behaviors;
mod error;
mod forwarded_values;
mod routing;
mod signers;

pub use behavior::{CacheBehavior, ViewerProtocolPolicy, DEFAULT_MIN_TTL};
pub use behaviors::CacheBehaviors;
pub use error::{Result, RoutingError};
pub use forwarded_values::{CookiePreference, ForwardedValues, WhitelistedNames};
pub use routing::validate_routing;
pub use signers::TrustedSigners;

pub(crate) use behavior::BehaviorDraft;
pub(crate) use forwarded_values::ForwardedValuesDraft;
