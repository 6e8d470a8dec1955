use std::io::Write;

use quick_xml::Writer;
use serde::{Deserialize, Serialize};

use super::config::{
    default_http_port, default_https_port, CustomOriginConfig, OriginAccessIdentity,
    OriginConfig, OriginProtocolPolicy, S3OriginConfig,
};
use super::error::Result;
use super::id::OriginId;
use crate::xml::decode::{decode_root, Element, Node};
use crate::xml::encode::write_text;
use crate::xml::{DecodeError, DecodeResult, ToXml};

/// Domain-name marker identifying S3 bucket endpoints.
pub const S3_DOMAIN_MARKER: &str = "s3.amazonaws.com";

/// Returns true if `domain_name` points at an S3 bucket endpoint.
pub fn is_s3_domain(domain_name: &str) -> bool {
    domain_name.contains(S3_DOMAIN_MARKER)
}

/// The canonical origin descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CFOrigin {
    pub domain_name: String,
    pub origin_id: OriginId,
    pub config: OriginConfig,
}

impl CFOrigin {
    /// Creates an origin for `domain_name` with a generated id and the config
    /// variant implied by the domain.
    pub fn new(domain_name: impl Into<String>) -> Self {
        let domain_name = domain_name.into();
        let config = if is_s3_domain(&domain_name) {
            OriginConfig::S3(S3OriginConfig::default())
        } else {
            OriginConfig::Custom(CustomOriginConfig::default())
        };
        Self {
            domain_name,
            origin_id: OriginId::generate(),
            config,
        }
    }

    /// Sets a specific id for this origin.
    pub fn with_id(mut self, origin_id: impl Into<OriginId>) -> Self {
        self.origin_id = origin_id.into();
        self
    }

    /// Replaces the config variant.
    pub fn with_config(mut self, config: impl Into<OriginConfig>) -> Self {
        self.config = config.into();
        self
    }

    /// Decodes the first `<Origin>` element of a response document.
    pub fn from_xml(xml: &str) -> DecodeResult<Self> {
        decode_root(
            xml,
            &["Origin"],
            |_| Node::Origin(OriginDraft::default()),
            |node| match node {
                Node::Origin(draft) => draft.build(),
                other => Err(DecodeError::UnexpectedElement(other.kind().to_string())),
            },
        )
    }
}

impl ToXml for CFOrigin {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> quick_xml::Result<()> {
        writer.create_element("Origin").write_inner_content(|w| {
            write_text(w, "Id", self.origin_id.as_str())?;
            write_text(w, "DomainName", &self.domain_name)?;
            self.config.write_xml(w)
        })?;
        Ok(())
    }
}

/// Named construction parameters for a [`CFOrigin`].
///
/// When `config` is absent the variant is derived from the domain name:
/// S3 endpoints get an [`S3OriginConfig`] wrapping `s3_oai`, everything else a
/// [`CustomOriginConfig`] built from the port and protocol fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginSpec {
    pub domain_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_id: Option<OriginId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<OriginConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_oai: Option<OriginAccessIdentity>,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    #[serde(default = "default_https_port")]
    pub https_port: u16,
    #[serde(default)]
    pub origin_protocol_policy: OriginProtocolPolicy,
}

impl OriginSpec {
    pub fn new(domain_name: impl Into<String>) -> Self {
        Self {
            domain_name: domain_name.into(),
            origin_id: None,
            config: None,
            s3_oai: None,
            http_port: default_http_port(),
            https_port: default_https_port(),
            origin_protocol_policy: OriginProtocolPolicy::default(),
        }
    }

    pub fn origin_id(mut self, origin_id: impl Into<OriginId>) -> Self {
        self.origin_id = Some(origin_id.into());
        self
    }

    pub fn config(mut self, config: impl Into<OriginConfig>) -> Self {
        self.config = Some(config.into());
        self
    }

    pub fn s3_oai(mut self, oai: impl Into<OriginAccessIdentity>) -> Self {
        self.s3_oai = Some(oai.into());
        self
    }

    pub fn ports(mut self, http_port: u16, https_port: u16) -> Self {
        self.http_port = http_port;
        self.https_port = https_port;
        self
    }

    pub fn origin_protocol_policy(mut self, policy: OriginProtocolPolicy) -> Self {
        self.origin_protocol_policy = policy;
        self
    }

    /// Builds the origin, generating an id when none was given.
    ///
    /// Fails if a custom config would carry a zero port.
    pub fn build(self) -> Result<CFOrigin> {
        let origin_id = self
            .origin_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(OriginId::generate);
        let config = match self.config {
            Some(config) => config,
            None if is_s3_domain(&self.domain_name) => {
                OriginConfig::S3(S3OriginConfig::new(self.s3_oai))
            }
            None => OriginConfig::Custom(CustomOriginConfig::new(
                self.http_port,
                self.https_port,
                self.origin_protocol_policy,
            )?),
        };
        Ok(CFOrigin {
            domain_name: self.domain_name,
            origin_id,
            config,
        })
    }
}

/// An `<Origin>` element being decoded.
///
/// Fields stay optional until the end tag so a parsed origin never receives a
/// generated id.
#[derive(Debug, Default)]
pub(crate) struct OriginDraft {
    origin_id: Option<OriginId>,
    domain_name: Option<String>,
    config: Option<OriginConfig>,
}

impl OriginDraft {
    pub(crate) fn build(self) -> DecodeResult<CFOrigin> {
        let missing = |tag: &str| DecodeError::MissingElement(tag.to_string());
        Ok(CFOrigin {
            origin_id: self.origin_id.ok_or_else(|| missing("Id"))?,
            domain_name: self.domain_name.ok_or_else(|| missing("DomainName"))?,
            config: self
                .config
                .ok_or_else(|| missing("S3OriginConfig|CustomOriginConfig"))?,
        })
    }
}

impl Element for OriginDraft {
    fn open_child(&self, tag: &str) -> Option<Node> {
        match tag {
            "S3OriginConfig" => Some(Node::S3OriginConfig(S3OriginConfig::default())),
            "CustomOriginConfig" => Some(Node::CustomOriginConfig(CustomOriginConfig::default())),
            _ => None,
        }
    }

    fn close_field(&mut self, tag: &str, text: &str) -> DecodeResult<()> {
        match tag {
            "Id" => self.origin_id = Some(OriginId::new(text)),
            "DomainName" => self.domain_name = Some(text.to_string()),
            _ => {}
        }
        Ok(())
    }

    fn attach(&mut self, child: Node) -> DecodeResult<()> {
        self.config = Some(match child {
            Node::S3OriginConfig(config) => OriginConfig::S3(config),
            Node::CustomOriginConfig(config) => OriginConfig::Custom(config),
            other => return Err(DecodeError::UnexpectedElement(other.kind().to_string())),
        });
        Ok(())
    }
}
