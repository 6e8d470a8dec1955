//! Query-string and cookie forwarding policy of a cache behavior.

use std::io::Write;

use quick_xml::Writer;
use serde::{Deserialize, Serialize};

use crate::xml::decode::{decode_root, parse_bool, Element, Node};
use crate::xml::encode::{write_bool, write_items, write_text};
use crate::xml::{DecodeError, DecodeResult, ToXml};

/// Names of the cookies forwarded under a whitelist policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WhitelistedNames(Vec<String>);

impl WhitelistedNames {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn push(&mut self, name: impl Into<String>) {
        self.0.push(name.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ToXml for WhitelistedNames {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> quick_xml::Result<()> {
        writer
            .create_element("WhitelistedNames")
            .write_inner_content(|w| write_items(w, &self.0, |w, name| write_text(w, "Name", name)))?;
        Ok(())
    }
}

impl Element for WhitelistedNames {
    fn close_field(&mut self, tag: &str, text: &str) -> DecodeResult<()> {
        if tag == "Name" {
            self.push(text);
        }
        Ok(())
    }

    fn item_count(&self) -> Option<usize> {
        Some(self.len())
    }
}

/// Which cookies are forwarded to the origin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CookiePreference {
    All,
    #[default]
    None,
    Whitelist(WhitelistedNames),
}

impl CookiePreference {
    /// The `Forward` wire value.
    pub fn forward(&self) -> &'static str {
        match self {
            CookiePreference::All => "all",
            CookiePreference::None => "none",
            CookiePreference::Whitelist(_) => "whitelist",
        }
    }
}

/// Forwarding policy embedded in every cache behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardedValues {
    #[serde(default)]
    pub query_string: bool,
    #[serde(default)]
    pub cookies: CookiePreference,
}

impl ForwardedValues {
    pub fn new(query_string: bool, cookies: CookiePreference) -> Self {
        Self {
            query_string,
            cookies,
        }
    }

    /// Forwards only the named cookies.
    pub fn whitelist<I, S>(query_string: bool, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            query_string,
            CookiePreference::Whitelist(WhitelistedNames::new(names)),
        )
    }

    /// Decodes the first `<ForwardedValues>` element of a response document.
    pub fn from_xml(xml: &str) -> DecodeResult<Self> {
        decode_root(
            xml,
            &["ForwardedValues"],
            |_| Node::ForwardedValues(ForwardedValuesDraft::default()),
            |node| match node {
                Node::ForwardedValues(draft) => Ok(draft.build()),
                other => Err(DecodeError::UnexpectedElement(other.kind().to_string())),
            },
        )
    }
}

impl ToXml for ForwardedValues {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> quick_xml::Result<()> {
        writer
            .create_element("ForwardedValues")
            .write_inner_content(|w| {
                write_bool(w, "QueryString", self.query_string)?;
                w.create_element("Cookies").write_inner_content(|w| {
                    write_text(w, "Forward", self.cookies.forward())?;
                    if let CookiePreference::Whitelist(names) = &self.cookies {
                        names.write_xml(w)?;
                    }
                    Ok::<(), quick_xml::Error>(())
                })?;
                Ok::<(), quick_xml::Error>(())
            })?;
        Ok(())
    }
}

/// A `<ForwardedValues>` element being decoded.
///
/// `Forward` and `WhitelistedNames` may arrive in either order, so both are
/// held until the end tag.
#[derive(Debug, Default)]
pub(crate) struct ForwardedValuesDraft {
    query_string: bool,
    cookies: CookiePreference,
    names: Option<WhitelistedNames>,
}

impl ForwardedValuesDraft {
    pub(crate) fn build(self) -> ForwardedValues {
        let cookies = match (self.cookies, self.names) {
            (CookiePreference::Whitelist(_), names) => {
                CookiePreference::Whitelist(names.unwrap_or_default())
            }
            (other, Some(names)) if !names.is_empty() => {
                tracing::debug!(
                    forward = other.forward(),
                    names = names.len(),
                    "Ignoring whitelisted cookie names"
                );
                other
            }
            (other, _) => other,
        };
        ForwardedValues::new(self.query_string, cookies)
    }
}

impl Element for ForwardedValuesDraft {
    fn open_child(&self, tag: &str) -> Option<Node> {
        (tag == "WhitelistedNames").then(|| Node::WhitelistedNames(WhitelistedNames::default()))
    }

    fn close_field(&mut self, tag: &str, text: &str) -> DecodeResult<()> {
        match tag {
            "QueryString" => self.query_string = parse_bool(text),
            "Forward" => {
                self.cookies = match text.trim() {
                    "all" => CookiePreference::All,
                    "none" => CookiePreference::None,
                    "whitelist" => CookiePreference::Whitelist(WhitelistedNames::default()),
                    other => return Err(DecodeError::invalid_value(tag, other)),
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn attach(&mut self, child: Node) -> DecodeResult<()> {
        match child {
            Node::WhitelistedNames(names) => {
                self.names = Some(names);
                Ok(())
            }
            other => Err(DecodeError::UnexpectedElement(other.kind().to_string())),
        }
    }
}
