//! JSON output for `render` and `inspect`.

use serde::Serialize;

use crate::error::{CliError, Result};

/// Serializes `value` as indented JSON.
///
/// Serialization failures surface as [`CliError::Serialize`] rather than
/// printing an empty document.
pub fn format_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(CliError::Serialize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfdist_core::{CacheBehavior, CFOrigin};
    use serde::ser::Error as _;

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> std::result::Result<S::Ok, S::Error> {
            Err(S::Error::custom("no JSON form"))
        }
    }

    #[test]
    fn test_format_behavior() {
        let json = format_json(&CacheBehavior::new("web")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["target_origin_id"], "web");
        assert_eq!(value["min_ttl"], 3600);
        assert!(value.get("pattern").is_none());
    }

    #[test]
    fn test_format_is_indented() {
        let json = format_json(&CFOrigin::new("www.example.com").with_id("web")).unwrap();
        assert!(json.starts_with("{\n  \""));
        assert!(json.contains("\"domain_name\": \"www.example.com\""));
    }

    #[test]
    fn test_format_error_propagates() {
        let err = format_json(&Unserializable).unwrap_err();
        assert!(matches!(err, CliError::Serialize(_)));
        assert!(err.to_string().contains("no JSON form"));
    }
}
