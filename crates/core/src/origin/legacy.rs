//! Deprecated per-protocol origin shapes.
//!
//! Streaming distributions still describe their origin with `<S3Origin>` or
//! `<CustomOrigin>`. Download distributions convert them to a [`CFOrigin`]
//! through `to_config`.

use std::collections::BTreeMap;
use std::io::Write;

use quick_xml::Writer;
use serde::{Deserialize, Serialize};

use super::config::{
    default_http_port, default_https_port, parse_oai, parse_port, OriginAccessIdentity,
    OriginProtocolPolicy,
};
use super::descriptor::OriginSpec;
use super::error::Result;
use super::CFOrigin;
use crate::xml::decode::{decode_root, parse_enum, Element, Node};
use crate::xml::encode::write_text;
use crate::xml::{DecodeError, DecodeResult, ToXml};

/// Legacy S3 bucket origin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3Origin {
    pub dns_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_access_identity: Option<OriginAccessIdentity>,
    /// Elements this model does not know, keyed by tag name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl S3Origin {
    pub fn new(dns_name: impl Into<String>) -> Self {
        Self {
            dns_name: dns_name.into(),
            ..Self::default()
        }
    }

    pub fn with_origin_access_identity(mut self, oai: impl Into<OriginAccessIdentity>) -> Self {
        self.origin_access_identity = Some(oai.into());
        self
    }

    /// Projects this origin onto the canonical descriptor.
    ///
    /// The config variant follows the domain name, like any other origin.
    pub fn to_config(&self) -> Result<CFOrigin> {
        OriginSpec {
            s3_oai: self.origin_access_identity.clone(),
            ..OriginSpec::new(self.dns_name.clone())
        }
        .build()
    }

    /// Decodes the first `<S3Origin>` element of a response document.
    pub fn from_xml(xml: &str) -> DecodeResult<Self> {
        decode_root(
            xml,
            &["S3Origin"],
            |_| Node::S3Origin(S3Origin::default()),
            |node| match node {
                Node::S3Origin(origin) => Ok(origin),
                other => Err(DecodeError::UnexpectedElement(other.kind().to_string())),
            },
        )
    }
}

impl ToXml for S3Origin {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> quick_xml::Result<()> {
        writer.create_element("S3Origin").write_inner_content(|w| {
            write_text(w, "DNSName", &self.dns_name)?;
            if let Some(oai) = &self.origin_access_identity {
                write_text(w, "OriginAccessIdentity", &oai.uri())?;
            }
            Ok::<(), quick_xml::Error>(())
        })?;
        Ok(())
    }
}

impl Element for S3Origin {
    fn close_field(&mut self, tag: &str, text: &str) -> DecodeResult<()> {
        match tag {
            "DNSName" => self.dns_name = text.to_string(),
            "OriginAccessIdentity" => self.origin_access_identity = parse_oai(text),
            _ => keep_unknown(&mut self.extra, tag, text),
        }
        Ok(())
    }
}

/// Legacy custom HTTP(S) origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomOrigin {
    pub dns_name: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    #[serde(default = "default_https_port")]
    pub https_port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_protocol_policy: Option<OriginProtocolPolicy>,
    /// Elements this model does not know, keyed by tag name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl Default for CustomOrigin {
    fn default() -> Self {
        Self {
            dns_name: String::new(),
            http_port: default_http_port(),
            https_port: default_https_port(),
            origin_protocol_policy: None,
            extra: BTreeMap::new(),
        }
    }
}

impl CustomOrigin {
    pub fn new(dns_name: impl Into<String>) -> Self {
        Self {
            dns_name: dns_name.into(),
            ..Self::default()
        }
    }

    pub fn with_ports(mut self, http_port: u16, https_port: u16) -> Self {
        self.http_port = http_port;
        self.https_port = https_port;
        self
    }

    pub fn with_origin_protocol_policy(mut self, policy: OriginProtocolPolicy) -> Self {
        self.origin_protocol_policy = Some(policy);
        self
    }

    fn policy_or_default(&self) -> OriginProtocolPolicy {
        self.origin_protocol_policy.unwrap_or_default()
    }

    /// Projects this origin onto the canonical descriptor.
    ///
    /// The config variant follows the domain name, like any other origin.
    pub fn to_config(&self) -> Result<CFOrigin> {
        OriginSpec::new(self.dns_name.clone())
            .ports(self.http_port, self.https_port)
            .origin_protocol_policy(self.policy_or_default())
            .build()
    }

    /// Decodes the first `<CustomOrigin>` element of a response document.
    pub fn from_xml(xml: &str) -> DecodeResult<Self> {
        decode_root(
            xml,
            &["CustomOrigin"],
            |_| Node::CustomOrigin(CustomOrigin::default()),
            |node| match node {
                Node::CustomOrigin(origin) => Ok(origin),
                other => Err(DecodeError::UnexpectedElement(other.kind().to_string())),
            },
        )
    }
}

impl ToXml for CustomOrigin {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> quick_xml::Result<()> {
        writer.create_element("CustomOrigin").write_inner_content(|w| {
            write_text(w, "DNSName", &self.dns_name)?;
            write_text(w, "HTTPPort", &self.http_port.to_string())?;
            write_text(w, "HTTPSPort", &self.https_port.to_string())?;
            write_text(w, "OriginProtocolPolicy", self.policy_or_default().as_str())
        })?;
        Ok(())
    }
}

impl Element for CustomOrigin {
    fn close_field(&mut self, tag: &str, text: &str) -> DecodeResult<()> {
        match tag {
            "DNSName" => self.dns_name = text.to_string(),
            "HTTPPort" => self.http_port = parse_port(tag, text)?.get(),
            "HTTPSPort" => self.https_port = parse_port(tag, text)?.get(),
            "OriginProtocolPolicy" => self.origin_protocol_policy = Some(parse_enum(text)?),
            _ => keep_unknown(&mut self.extra, tag, text),
        }
        Ok(())
    }
}

fn keep_unknown(extra: &mut BTreeMap<String, String>, tag: &str, text: &str) {
    tracing::debug!(tag, "keeping unrecognized legacy origin element");
    extra.insert(tag.to_string(), text.to_string());
}
