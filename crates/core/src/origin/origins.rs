use std::io::Write;

use quick_xml::Writer;
use serde::Serialize;

use super::descriptor::{CFOrigin, OriginDraft, OriginSpec};
use super::error::{OriginError, Result};
use super::id::OriginId;
use super::legacy::{CustomOrigin, S3Origin};
use crate::xml::decode::{decode_root, Element, Node};
use crate::xml::encode::write_items;
use crate::xml::{DecodeError, DecodeResult, ToXml};

/// Every shape [`CFOrigins::append_origin`] accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginInput {
    /// A bare domain name.
    Domain(String),
    /// A deprecated S3 origin.
    S3(S3Origin),
    /// A deprecated custom origin.
    Custom(CustomOrigin),
    /// An already canonical origin, appended as-is.
    Origin(CFOrigin),
    /// Named construction parameters.
    Spec(OriginSpec),
    /// Any sequence of the above, flattened in order.
    Many(Vec<OriginInput>),
}

impl From<&str> for OriginInput {
    fn from(domain_name: &str) -> Self {
        OriginInput::Domain(domain_name.to_string())
    }
}

impl From<String> for OriginInput {
    fn from(domain_name: String) -> Self {
        OriginInput::Domain(domain_name)
    }
}

impl From<S3Origin> for OriginInput {
    fn from(origin: S3Origin) -> Self {
        OriginInput::S3(origin)
    }
}

impl From<CustomOrigin> for OriginInput {
    fn from(origin: CustomOrigin) -> Self {
        OriginInput::Custom(origin)
    }
}

impl From<CFOrigin> for OriginInput {
    fn from(origin: CFOrigin) -> Self {
        OriginInput::Origin(origin)
    }
}

impl From<OriginSpec> for OriginInput {
    fn from(spec: OriginSpec) -> Self {
        OriginInput::Spec(spec)
    }
}

impl From<CFOrigins> for OriginInput {
    fn from(origins: CFOrigins) -> Self {
        OriginInput::Many(origins.origins.into_iter().map(OriginInput::Origin).collect())
    }
}

impl<T: Into<OriginInput>> From<Vec<T>> for OriginInput {
    fn from(items: Vec<T>) -> Self {
        OriginInput::Many(items.into_iter().map(Into::into).collect())
    }
}

/// Ordered collection of origins. Order is rendering order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CFOrigins {
    origins: Vec<CFOrigin>,
}

impl CFOrigins {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes `origin` into canonical origins and appends them.
    ///
    /// Sequences are flattened recursively in order. Nothing is appended if
    /// any element fails to normalize.
    pub fn append_origin(&mut self, origin: impl Into<OriginInput>) -> Result<()> {
        let mut staged = Vec::new();
        normalize(origin.into(), &mut staged)?;
        self.origins.extend(staged);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CFOrigin> {
        self.origins.iter()
    }

    pub fn as_slice(&self) -> &[CFOrigin] {
        &self.origins
    }

    /// Looks up an origin by id.
    pub fn get(&self, origin_id: &OriginId) -> Option<&CFOrigin> {
        self.origins.iter().find(|o| &o.origin_id == origin_id)
    }

    pub fn contains(&self, origin_id: &OriginId) -> bool {
        self.get(origin_id).is_some()
    }

    /// Decodes the first `<Origins>` element of a response document.
    pub fn from_xml(xml: &str) -> DecodeResult<Self> {
        decode_root(
            xml,
            &["Origins"],
            |_| Node::Origins(CFOrigins::new()),
            |node| match node {
                Node::Origins(origins) => Ok(origins),
                other => Err(DecodeError::UnexpectedElement(other.kind().to_string())),
            },
        )
    }
}

fn normalize(input: OriginInput, out: &mut Vec<CFOrigin>) -> Result<()> {
    let origin = match input {
        OriginInput::Domain(domain_name) => {
            require_domain(&domain_name)?;
            CFOrigin::new(domain_name)
        }
        OriginInput::S3(legacy) => {
            require_domain(&legacy.dns_name)?;
            legacy.to_config()?
        }
        OriginInput::Custom(legacy) => {
            require_domain(&legacy.dns_name)?;
            legacy.to_config()?
        }
        OriginInput::Origin(origin) => {
            require_domain(&origin.domain_name)?;
            origin
        }
        OriginInput::Spec(spec) => {
            require_domain(&spec.domain_name)?;
            spec.build()?
        }
        OriginInput::Many(items) => {
            for item in items {
                normalize(item, out)?;
            }
            return Ok(());
        }
    };
    tracing::debug!(
        origin_id = %origin.origin_id,
        domain_name = %origin.domain_name,
        s3 = origin.config.is_s3(),
        "Normalized origin"
    );
    out.push(origin);
    Ok(())
}

fn require_domain(domain_name: &str) -> Result<()> {
    if domain_name.trim().is_empty() {
        return Err(OriginError::EmptyDomainName);
    }
    Ok(())
}

impl<'a> IntoIterator for &'a CFOrigins {
    type Item = &'a CFOrigin;
    type IntoIter = std::slice::Iter<'a, CFOrigin>;

    fn into_iter(self) -> Self::IntoIter {
        self.origins.iter()
    }
}

impl IntoIterator for CFOrigins {
    type Item = CFOrigin;
    type IntoIter = std::vec::IntoIter<CFOrigin>;

    fn into_iter(self) -> Self::IntoIter {
        self.origins.into_iter()
    }
}

impl ToXml for CFOrigins {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> quick_xml::Result<()> {
        writer.create_element("Origins").write_inner_content(|w| {
            write_items(w, &self.origins, |w, origin| origin.write_xml(w))
        })?;
        Ok(())
    }
}

impl Element for CFOrigins {
    fn open_child(&self, tag: &str) -> Option<Node> {
        (tag == "Origin").then(|| Node::Origin(OriginDraft::default()))
    }

    fn close_field(&mut self, _tag: &str, _text: &str) -> DecodeResult<()> {
        Ok(())
    }

    fn attach(&mut self, child: Node) -> DecodeResult<()> {
        match child {
            Node::Origin(draft) => {
                self.origins.push(draft.build()?);
                Ok(())
            }
            other => Err(DecodeError::UnexpectedElement(other.kind().to_string())),
        }
    }

    fn item_count(&self) -> Option<usize> {
        Some(self.origins.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::origin::{
        CustomOriginConfig, OriginAccessIdentity, OriginConfig, OriginProtocolPolicy,
        S3OriginConfig,
    };

    fn domains(origins: &CFOrigins) -> Vec<&str> {
        origins.iter().map(|o| o.domain_name.as_str()).collect()
    }

    #[test]
    fn test_append_bare_domain() {
        let mut origins = CFOrigins::new();
        origins.append_origin("bucket.s3.amazonaws.com").unwrap();
        assert_eq!(origins.len(), 1);
        assert!(origins.as_slice()[0].config.is_s3());
    }

    #[test]
    fn test_append_legacy_shapes() {
        let mut origins = CFOrigins::new();
        origins
            .append_origin(S3Origin::new("b.s3.amazonaws.com").with_origin_access_identity("E1"))
            .unwrap();
        origins
            .append_origin(CustomOrigin::new("www.example.com").with_ports(81, 444))
            .unwrap();
        assert_eq!(
            origins.as_slice()[0].config,
            OriginConfig::S3(S3OriginConfig::new(Some(OriginAccessIdentity::new("E1"))))
        );
        assert_eq!(
            origins.as_slice()[1].config,
            OriginConfig::Custom(
                CustomOriginConfig::new(81, 444, OriginProtocolPolicy::MatchViewer).unwrap()
            )
        );
    }

    #[test]
    fn test_append_canonical_origin_as_is() {
        let origin = CFOrigin::new("www.example.com").with_id("web");
        let mut origins = CFOrigins::new();
        origins.append_origin(origin.clone()).unwrap();
        assert_eq!(origins.as_slice(), [origin]);
    }

    #[test]
    fn test_append_spec() {
        let mut origins = CFOrigins::new();
        origins
            .append_origin(OriginSpec::new("api.example.com").origin_id("api").ports(8080, 443))
            .unwrap();
        let origin = origins.get(&OriginId::new("api")).unwrap();
        assert_eq!(
            origin.config,
            OriginConfig::Custom(
                CustomOriginConfig::new(8080, 443, OriginProtocolPolicy::MatchViewer).unwrap()
            )
        );
    }

    #[test]
    fn test_append_list_matches_individual_appends() {
        let inputs = || {
            vec![
                OriginInput::from(CFOrigin::new("a.example.com").with_id("a")),
                OriginInput::from(OriginSpec::new("b.s3.amazonaws.com").origin_id("b")),
                OriginInput::from(vec![
                    CFOrigin::new("c.example.com").with_id("c"),
                    CFOrigin::new("d.example.com").with_id("d"),
                ]),
            ]
        };

        let mut batched = CFOrigins::new();
        batched.append_origin(inputs()).unwrap();

        let mut individual = CFOrigins::new();
        for input in inputs() {
            individual.append_origin(input).unwrap();
        }

        assert_eq!(batched, individual);
        assert_eq!(
            domains(&batched),
            ["a.example.com", "b.s3.amazonaws.com", "c.example.com", "d.example.com"]
        );
    }

    #[test]
    fn test_append_nested_collection() {
        let mut first = CFOrigins::new();
        first.append_origin(vec!["one.example.com", "two.example.com"]).unwrap();

        let mut second = CFOrigins::new();
        second.append_origin("zero.example.com").unwrap();
        second.append_origin(first.clone()).unwrap();

        assert_eq!(
            domains(&second),
            ["zero.example.com", "one.example.com", "two.example.com"]
        );
        assert_eq!(second.as_slice()[1], first.as_slice()[0]);
    }

    #[test]
    fn test_append_empty_domain_rejected_atomically() {
        let mut origins = CFOrigins::new();
        let err = origins
            .append_origin(vec!["ok.example.com", ""])
            .unwrap_err();
        assert_eq!(err, OriginError::EmptyDomainName);
        assert!(origins.is_empty());
    }

    #[test]
    fn test_append_zero_port_rejected_atomically() {
        let mut origins = CFOrigins::new();
        let err = origins
            .append_origin(vec![
                OriginInput::from("ok.example.com"),
                OriginInput::from(OriginSpec::new("api.example.com").ports(8080, 0)),
            ])
            .unwrap_err();
        assert_eq!(err, OriginError::InvalidPort(0));
        assert!(origins.is_empty());
    }

    #[test]
    fn test_to_xml_single_s3_origin() {
        let mut origins = CFOrigins::new();
        origins.append_origin("bucket.s3.amazonaws.com").unwrap();
        let xml = origins.to_xml().unwrap();
        assert!(xml.starts_with("<Origins>\n  <Quantity>1</Quantity>\n  <Items>\n    <Origin>"));
        assert!(xml.contains("<DomainName>bucket.s3.amazonaws.com</DomainName>"));
        assert!(xml.contains(
            "<S3OriginConfig>\n        <OriginAccessIdentity></OriginAccessIdentity>\n      </S3OriginConfig>"
        ));
        assert_eq!(xml.matches("<Origin>").count(), 1);
    }

    #[test]
    fn test_from_xml_reads_origins_in_order() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <DistributionConfig xmlns="http://cloudfront.amazonaws.com/doc/2012-05-05/">
              <CallerReference>ref</CallerReference>
              <Origins>
                <Quantity>2</Quantity>
                <Items>
                  <Origin>
                    <Id>s3-assets</Id>
                    <DomainName>assets.s3.amazonaws.com</DomainName>
                    <S3OriginConfig><OriginAccessIdentity/></S3OriginConfig>
                  </Origin>
                  <Origin>
                    <Id>web</Id>
                    <DomainName>www.example.com</DomainName>
                    <CustomOriginConfig>
                      <HTTPPort>80</HTTPPort>
                      <HTTPSPort>443</HTTPSPort>
                      <OriginProtocolPolicy>match-viewer</OriginProtocolPolicy>
                    </CustomOriginConfig>
                  </Origin>
                </Items>
              </Origins>
            </DistributionConfig>"#;
        let origins = CFOrigins::from_xml(xml).unwrap();
        let ids: Vec<&str> = origins.iter().map(|o| o.origin_id.as_str()).collect();
        assert_eq!(ids, ["s3-assets", "web"]);
        assert_eq!(
            origins.as_slice()[0].config,
            OriginConfig::S3(S3OriginConfig::default())
        );
        assert!(origins.as_slice()[1].config.is_custom());
    }

    #[test]
    fn test_from_xml_quantity_mismatch() {
        let xml = "<Origins><Quantity>2</Quantity><Items><Origin><Id>a</Id>\
                   <DomainName>a.example.com</DomainName><CustomOriginConfig/></Origin>\
                   </Items></Origins>";
        let err = CFOrigins::from_xml(xml).unwrap_err();
        assert!(matches!(err, DecodeError::QuantityMismatch { declared: 2, actual: 1, .. }));
    }

    #[test]
    fn test_roundtrip_preserves_ids() {
        let mut origins = CFOrigins::new();
        origins
            .append_origin(vec!["bucket.s3.amazonaws.com", "www.example.com"])
            .unwrap();
        let decoded = CFOrigins::from_xml(&origins.to_xml().unwrap()).unwrap();
        assert_eq!(decoded, origins);
    }
}
