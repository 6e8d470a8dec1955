//! Protocol-specific origin configuration payloads.

use std::fmt;
use std::io::Write;
use std::num::NonZeroU16;
use std::str::FromStr;

use quick_xml::Writer;
use serde::{Deserialize, Serialize};

use super::error::{OriginError, Result};
use crate::xml::decode::{parse_enum, parse_u16, Element};
use crate::xml::encode::write_text;
use crate::xml::{DecodeError, DecodeResult, ToXml};

const OAI_URI_PREFIX: &str = "origin-access-identity/cloudfront/";

/// Reference to an origin access identity (OAI).
///
/// Accepts either the bare identity id or its full
/// `origin-access-identity/cloudfront/<id>` URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct OriginAccessIdentity {
    id: String,
}

impl OriginAccessIdentity {
    pub fn new(id_or_uri: impl AsRef<str>) -> Self {
        let value = id_or_uri.as_ref().trim();
        let id = value.strip_prefix(OAI_URI_PREFIX).unwrap_or(value);
        Self { id: id.to_string() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The URI form expected in request bodies.
    pub fn uri(&self) -> String {
        format!("{}{}", OAI_URI_PREFIX, self.id)
    }
}

impl From<String> for OriginAccessIdentity {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for OriginAccessIdentity {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<OriginAccessIdentity> for String {
    fn from(oai: OriginAccessIdentity) -> Self {
        oai.uri()
    }
}

/// Parses an `OriginAccessIdentity` element's text; empty means absent.
pub(crate) fn parse_oai(text: &str) -> Option<OriginAccessIdentity> {
    if text.trim().is_empty() {
        None
    } else {
        Some(OriginAccessIdentity::new(text))
    }
}

/// Configuration of an S3 bucket origin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3OriginConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_access_identity: Option<OriginAccessIdentity>,
}

impl S3OriginConfig {
    pub fn new(origin_access_identity: Option<OriginAccessIdentity>) -> Self {
        Self {
            origin_access_identity,
        }
    }
}

impl ToXml for S3OriginConfig {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> quick_xml::Result<()> {
        let oai = self
            .origin_access_identity
            .as_ref()
            .map(OriginAccessIdentity::uri)
            .unwrap_or_default();
        writer
            .create_element("S3OriginConfig")
            .write_inner_content(|w| write_text(w, "OriginAccessIdentity", &oai))?;
        Ok(())
    }
}

impl Element for S3OriginConfig {
    fn close_field(&mut self, tag: &str, text: &str) -> DecodeResult<()> {
        if tag == "OriginAccessIdentity" {
            self.origin_access_identity = parse_oai(text);
        }
        Ok(())
    }
}

/// Protocol the CDN uses when fetching from a custom origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OriginProtocolPolicy {
    HttpOnly,
    #[default]
    MatchViewer,
}

impl OriginProtocolPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OriginProtocolPolicy::HttpOnly => "http-only",
            OriginProtocolPolicy::MatchViewer => "match-viewer",
        }
    }
}

impl fmt::Display for OriginProtocolPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OriginProtocolPolicy {
    type Err = DecodeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "http-only" => Ok(OriginProtocolPolicy::HttpOnly),
            "match-viewer" => Ok(OriginProtocolPolicy::MatchViewer),
            other => Err(DecodeError::invalid_value("OriginProtocolPolicy", other)),
        }
    }
}

const fn port(n: u16) -> NonZeroU16 {
    match NonZeroU16::new(n) {
        Some(port) => port,
        None => panic!("port must be non-zero"),
    }
}

/// Port used for plain HTTP when none is given.
pub const DEFAULT_HTTP_PORT: NonZeroU16 = port(80);
/// Port used for HTTPS when none is given.
pub const DEFAULT_HTTPS_PORT: NonZeroU16 = port(443);

/// Configuration of a custom HTTP(S) origin server.
///
/// Ports are non-zero; deserializing a zero port fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomOriginConfig {
    #[serde(default = "default_config_http_port")]
    pub http_port: NonZeroU16,
    #[serde(default = "default_config_https_port")]
    pub https_port: NonZeroU16,
    #[serde(default)]
    pub origin_protocol_policy: OriginProtocolPolicy,
}

fn default_config_http_port() -> NonZeroU16 {
    DEFAULT_HTTP_PORT
}

fn default_config_https_port() -> NonZeroU16 {
    DEFAULT_HTTPS_PORT
}

pub(crate) fn default_http_port() -> u16 {
    DEFAULT_HTTP_PORT.get()
}

pub(crate) fn default_https_port() -> u16 {
    DEFAULT_HTTPS_PORT.get()
}

impl CustomOriginConfig {
    /// Builds a config from raw port numbers, rejecting zero.
    pub fn new(http_port: u16, https_port: u16, policy: OriginProtocolPolicy) -> Result<Self> {
        let checked = |n: u16| NonZeroU16::new(n).ok_or(OriginError::InvalidPort(n));
        Ok(Self {
            http_port: checked(http_port)?,
            https_port: checked(https_port)?,
            origin_protocol_policy: policy,
        })
    }
}

impl Default for CustomOriginConfig {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            https_port: DEFAULT_HTTPS_PORT,
            origin_protocol_policy: OriginProtocolPolicy::default(),
        }
    }
}

impl ToXml for CustomOriginConfig {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> quick_xml::Result<()> {
        writer
            .create_element("CustomOriginConfig")
            .write_inner_content(|w| {
                write_text(w, "HTTPPort", &self.http_port.to_string())?;
                write_text(w, "HTTPSPort", &self.https_port.to_string())?;
                write_text(w, "OriginProtocolPolicy", self.origin_protocol_policy.as_str())
            })?;
        Ok(())
    }
}

impl Element for CustomOriginConfig {
    fn close_field(&mut self, tag: &str, text: &str) -> DecodeResult<()> {
        match tag {
            "HTTPPort" => self.http_port = parse_port(tag, text)?,
            "HTTPSPort" => self.https_port = parse_port(tag, text)?,
            "OriginProtocolPolicy" => self.origin_protocol_policy = parse_enum(text)?,
            _ => {}
        }
        Ok(())
    }
}

/// Parses a port number, rejecting zero.
pub(crate) fn parse_port(tag: &str, text: &str) -> DecodeResult<NonZeroU16> {
    NonZeroU16::new(parse_u16(tag, text)?)
        .ok_or_else(|| DecodeError::invalid_value(tag, text.trim()))
}

/// The configuration variant attached to an origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginConfig {
    S3(S3OriginConfig),
    Custom(CustomOriginConfig),
}

impl OriginConfig {
    pub fn is_s3(&self) -> bool {
        matches!(self, OriginConfig::S3(_))
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, OriginConfig::Custom(_))
    }
}

impl From<S3OriginConfig> for OriginConfig {
    fn from(config: S3OriginConfig) -> Self {
        OriginConfig::S3(config)
    }
}

impl From<CustomOriginConfig> for OriginConfig {
    fn from(config: CustomOriginConfig) -> Self {
        OriginConfig::Custom(config)
    }
}

impl ToXml for OriginConfig {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> quick_xml::Result<()> {
        match self {
            OriginConfig::S3(config) => config.write_xml(writer),
            OriginConfig::Custom(config) => config.write_xml(writer),
        }
    }
}
