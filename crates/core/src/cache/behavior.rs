use std::fmt;
use std::io::Write;
use std::str::FromStr;

use quick_xml::Writer;
use serde::{Deserialize, Serialize};

use super::forwarded_values::{ForwardedValues, ForwardedValuesDraft};
use super::signers::TrustedSigners;
use crate::origin::OriginId;
use crate::xml::decode::{decode_root, parse_enum, parse_u64, Element, Node};
use crate::xml::encode::write_text;
use crate::xml::{DecodeError, DecodeResult, ToXml};

/// Minimum TTL applied when none is given, in seconds.
pub const DEFAULT_MIN_TTL: u64 = 3600;

fn default_min_ttl() -> u64 {
    DEFAULT_MIN_TTL
}

/// Which protocols viewers may use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewerProtocolPolicy {
    #[default]
    AllowAll,
    Https,
}

impl ViewerProtocolPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewerProtocolPolicy::AllowAll => "allow-all",
            ViewerProtocolPolicy::Https => "https",
        }
    }
}

impl fmt::Display for ViewerProtocolPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewerProtocolPolicy {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allow-all" => Ok(ViewerProtocolPolicy::AllowAll),
            "https" => Ok(ViewerProtocolPolicy::Https),
            other => Err(DecodeError::invalid_value("ViewerProtocolPolicy", other)),
        }
    }
}

/// A routing and caching rule matched against request paths.
///
/// A behavior without a pattern is the distribution's default behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheBehavior {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    pub target_origin_id: OriginId,
    #[serde(default)]
    pub forwarded_values: ForwardedValues,
    #[serde(default)]
    pub trusted_signers: TrustedSigners,
    #[serde(default)]
    pub viewer_protocol_policy: ViewerProtocolPolicy,
    #[serde(default = "default_min_ttl")]
    pub min_ttl: u64,
}

impl CacheBehavior {
    /// Creates a default behavior (no pattern) routing to `target_origin_id`.
    pub fn new(target_origin_id: impl Into<OriginId>) -> Self {
        Self {
            pattern: None,
            target_origin_id: target_origin_id.into(),
            forwarded_values: ForwardedValues::default(),
            trusted_signers: TrustedSigners::default(),
            viewer_protocol_policy: ViewerProtocolPolicy::default(),
            min_ttl: DEFAULT_MIN_TTL,
        }
    }

    /// Sets the path pattern, e.g. `/images/*.jpg`.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_forwarded_values(mut self, forwarded_values: ForwardedValues) -> Self {
        self.forwarded_values = forwarded_values;
        self
    }

    pub fn with_trusted_signers(mut self, trusted_signers: TrustedSigners) -> Self {
        self.trusted_signers = trusted_signers;
        self
    }

    pub fn with_viewer_protocol_policy(mut self, policy: ViewerProtocolPolicy) -> Self {
        self.viewer_protocol_policy = policy;
        self
    }

    pub fn with_min_ttl(mut self, min_ttl: u64) -> Self {
        self.min_ttl = min_ttl;
        self
    }

    /// Returns the path pattern, treating an empty pattern as absent.
    pub fn path_pattern(&self) -> Option<&str> {
        self.pattern.as_deref().filter(|p| !p.is_empty())
    }

    /// Returns true for the distribution's default behavior.
    pub fn is_default(&self) -> bool {
        self.path_pattern().is_none()
    }

    /// Decodes the first `<CacheBehavior>` or `<DefaultCacheBehavior>`
    /// element of a response document.
    pub fn from_xml(xml: &str) -> DecodeResult<Self> {
        Self::decode(xml, &["CacheBehavior", "DefaultCacheBehavior"])
    }

    /// Decodes the `<DefaultCacheBehavior>` element of a response document.
    pub fn default_from_xml(xml: &str) -> DecodeResult<Self> {
        Self::decode(xml, &["DefaultCacheBehavior"])
    }

    fn decode(xml: &str, tags: &[&str]) -> DecodeResult<Self> {
        decode_root(
            xml,
            tags,
            |tag| Node::CacheBehavior(BehaviorDraft::new(tag == "DefaultCacheBehavior")),
            |node| match node {
                Node::CacheBehavior(draft) => draft.build(),
                other => Err(DecodeError::UnexpectedElement(other.kind().to_string())),
            },
        )
    }
}

impl ToXml for CacheBehavior {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> quick_xml::Result<()> {
        let pattern = self.path_pattern();
        let tag = if pattern.is_some() {
            "CacheBehavior"
        } else {
            "DefaultCacheBehavior"
        };
        writer.create_element(tag).write_inner_content(|w| {
            if let Some(pattern) = pattern {
                write_text(w, "PathPattern", pattern)?;
            }
            write_text(w, "TargetOriginId", self.target_origin_id.as_str())?;
            self.forwarded_values.write_xml(w)?;
            self.trusted_signers.write_xml(w)?;
            write_text(w, "ViewerProtocolPolicy", self.viewer_protocol_policy.as_str())?;
            write_text(w, "MinTTL", &self.min_ttl.to_string())
        })?;
        Ok(())
    }
}

/// A `<CacheBehavior>` or `<DefaultCacheBehavior>` element being decoded.
#[derive(Debug)]
pub(crate) struct BehaviorDraft {
    is_default: bool,
    pattern: Option<String>,
    target_origin_id: Option<OriginId>,
    forwarded_values: ForwardedValues,
    trusted_signers: TrustedSigners,
    viewer_protocol_policy: ViewerProtocolPolicy,
    min_ttl: u64,
}

impl BehaviorDraft {
    pub(crate) fn new(is_default: bool) -> Self {
        Self {
            is_default,
            pattern: None,
            target_origin_id: None,
            forwarded_values: ForwardedValues::default(),
            trusted_signers: TrustedSigners::default(),
            viewer_protocol_policy: ViewerProtocolPolicy::default(),
            min_ttl: DEFAULT_MIN_TTL,
        }
    }

    pub(crate) fn build(self) -> DecodeResult<CacheBehavior> {
        let target_origin_id = self
            .target_origin_id
            .ok_or_else(|| DecodeError::MissingElement("TargetOriginId".to_string()))?;
        if !self.is_default && self.pattern.is_none() {
            return Err(DecodeError::MissingElement("PathPattern".to_string()));
        }
        Ok(CacheBehavior {
            pattern: self.pattern,
            target_origin_id,
            forwarded_values: self.forwarded_values,
            trusted_signers: self.trusted_signers,
            viewer_protocol_policy: self.viewer_protocol_policy,
            min_ttl: self.min_ttl,
        })
    }
}

impl Element for BehaviorDraft {
    fn open_child(&self, tag: &str) -> Option<Node> {
        match tag {
            "TrustedSigners" => Some(Node::TrustedSigners(TrustedSigners::default())),
            "ForwardedValues" => Some(Node::ForwardedValues(ForwardedValuesDraft::default())),
            _ => None,
        }
    }

    fn close_field(&mut self, tag: &str, text: &str) -> DecodeResult<()> {
        match tag {
            "PathPattern" if !self.is_default => self.pattern = Some(text.to_string()),
            "TargetOriginId" => self.target_origin_id = Some(OriginId::new(text)),
            "ViewerProtocolPolicy" => self.viewer_protocol_policy = parse_enum(text)?,
            "MinTTL" => self.min_ttl = parse_u64(tag, text)?,
            _ => {}
        }
        Ok(())
    }

    fn attach(&mut self, child: Node) -> DecodeResult<()> {
        match child {
            Node::TrustedSigners(signers) => self.trusted_signers = signers,
            Node::ForwardedValues(draft) => self.forwarded_values = draft.build(),
            other => return Err(DecodeError::UnexpectedElement(other.kind().to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::cache::CookiePreference;

    #[test]
    fn test_new_uses_defaults() {
        let behavior = CacheBehavior::new("web");
        assert!(behavior.is_default());
        assert_eq!(behavior.forwarded_values, ForwardedValues::default());
        assert!(behavior.trusted_signers.is_empty());
        assert_eq!(behavior.viewer_protocol_policy, ViewerProtocolPolicy::AllowAll);
        assert_eq!(behavior.min_ttl, 3600);
    }

    #[test]
    fn test_default_behavior_xml() {
        let xml = CacheBehavior::new("web").to_xml().unwrap();
        assert!(xml.starts_with("<DefaultCacheBehavior>\n  <TargetOriginId>web</TargetOriginId>"));
        assert!(!xml.contains("PathPattern"));
        assert!(xml.contains("<Enabled>false</Enabled>"));
        assert!(xml.contains("<ViewerProtocolPolicy>allow-all</ViewerProtocolPolicy>"));
        assert!(xml.ends_with("<MinTTL>3600</MinTTL>\n</DefaultCacheBehavior>"));
    }

    #[test]
    fn test_patterned_behavior_xml_order() {
        let xml = CacheBehavior::new("assets")
            .with_pattern("/images/*.jpg")
            .with_trusted_signers(TrustedSigners::new(["111122223333"]))
            .to_xml()
            .unwrap();
        let positions: Vec<usize> = [
            "<CacheBehavior>",
            "<PathPattern>/images/*.jpg</PathPattern>",
            "<TargetOriginId>assets</TargetOriginId>",
            "<ForwardedValues>",
            "<TrustedSigners>",
            "<AWSAccountNumber>111122223333</AWSAccountNumber>",
            "<ViewerProtocolPolicy>",
            "<MinTTL>",
            "</CacheBehavior>",
        ]
        .iter()
        .map(|needle| xml.find(needle).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_pattern_is_default() {
        let behavior = CacheBehavior::new("web").with_pattern("");
        assert!(behavior.is_default());
        assert!(behavior.to_xml().unwrap().starts_with("<DefaultCacheBehavior>"));
    }

    #[rstest]
    #[case::default_behavior(CacheBehavior::new("web"))]
    #[case::patterned(CacheBehavior::new("assets").with_pattern("/static/*"))]
    #[case::https_whitelist(
        CacheBehavior::new("api")
            .with_pattern("/api/*")
            .with_viewer_protocol_policy(ViewerProtocolPolicy::Https)
            .with_forwarded_values(ForwardedValues::whitelist(true, ["session", "lang"]))
            .with_min_ttl(0)
    )]
    #[case::signed(
        CacheBehavior::new("private")
            .with_pattern("/private/*")
            .with_trusted_signers(TrustedSigners::new(["111122223333", "444455556666"]))
            .with_forwarded_values(ForwardedValues::new(false, CookiePreference::All))
    )]
    #[case::spaced_text(
        CacheBehavior::new(" web ")
            .with_pattern("/my files/* ")
            .with_forwarded_values(ForwardedValues::whitelist(false, [" a "]))
    )]
    fn test_roundtrip(#[case] behavior: CacheBehavior) {
        let decoded = CacheBehavior::from_xml(&behavior.to_xml().unwrap()).unwrap();
        assert_eq!(decoded, behavior);
    }

    #[test]
    fn test_default_behavior_ignores_path_pattern() {
        let xml = "<DefaultCacheBehavior><PathPattern>/x</PathPattern>\
                   <TargetOriginId>web</TargetOriginId></DefaultCacheBehavior>";
        let behavior = CacheBehavior::from_xml(xml).unwrap();
        assert_eq!(behavior.pattern, None);
    }

    #[test]
    fn test_default_from_xml_skips_patterned_behaviors() {
        let xml = "<DistributionConfig>\
                   <CacheBehaviors><Quantity>1</Quantity><Items><CacheBehavior>\
                   <PathPattern>/a</PathPattern><TargetOriginId>a</TargetOriginId>\
                   </CacheBehavior></Items></CacheBehaviors>\
                   <DefaultCacheBehavior><TargetOriginId>web</TargetOriginId>\
                   <MinTTL>60</MinTTL></DefaultCacheBehavior></DistributionConfig>";
        let behavior = CacheBehavior::default_from_xml(xml).unwrap();
        assert_eq!(behavior, CacheBehavior::new("web").with_min_ttl(60));
    }

    #[test]
    fn test_from_xml_requires_target_origin() {
        let xml = "<CacheBehavior><PathPattern>/a</PathPattern></CacheBehavior>";
        let err = CacheBehavior::from_xml(xml).unwrap_err();
        assert_eq!(err, DecodeError::MissingElement("TargetOriginId".to_string()));
    }

    #[test]
    fn test_from_xml_requires_pattern_outside_default() {
        let xml = "<CacheBehavior><TargetOriginId>a</TargetOriginId></CacheBehavior>";
        let err = CacheBehavior::from_xml(xml).unwrap_err();
        assert_eq!(err, DecodeError::MissingElement("PathPattern".to_string()));
    }

    #[test]
    fn test_from_xml_rejects_bad_min_ttl() {
        let xml = "<DefaultCacheBehavior><TargetOriginId>a</TargetOriginId>\
                   <MinTTL>soon</MinTTL></DefaultCacheBehavior>";
        let err = CacheBehavior::from_xml(xml).unwrap_err();
        assert_eq!(err, DecodeError::invalid_integer("MinTTL", "soon"));
    }

    #[test]
    fn test_from_xml_rejects_unknown_viewer_policy() {
        let xml = "<DefaultCacheBehavior><TargetOriginId>a</TargetOriginId>\
                   <ViewerProtocolPolicy>ftp</ViewerProtocolPolicy></DefaultCacheBehavior>";
        let err = CacheBehavior::from_xml(xml).unwrap_err();
        assert_eq!(err, DecodeError::invalid_value("ViewerProtocolPolicy", "ftp"));
    }
}
