use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of an origin within a distribution.
///
/// Cache behaviors reference their target origin by this id, so it is kept
/// distinct from plain strings such as domain names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OriginId(String);

impl OriginId {
    /// Wraps an existing identifier, e.g. one assigned by the server.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random identifier (UUID v4).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for OriginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for OriginId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OriginId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for OriginId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_uuid_v4() {
        let id = OriginId::generate();
        let parsed = Uuid::parse_str(id.as_str()).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn test_new_preserves_value() {
        let id = OriginId::new("my-origin");
        assert_eq!(id.to_string(), "my-origin");
        assert!(!id.is_empty());
    }

    #[test]
    fn test_serde_transparent() {
        let id = OriginId::new("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
        let back: OriginId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(back, id);
    }
}
