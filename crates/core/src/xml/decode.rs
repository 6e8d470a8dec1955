//! Response document decoding.
//!
//! Decoding is driven by a stack of in-progress objects. A start tag asks the
//! object on top of the stack whether the tag opens a nested object; if so
//! the fresh child is pushed. The end tag of a pushed element pops it and
//! attaches it to its parent. Every other end tag assigns its buffered text
//! to a scalar field of the object on top.

use std::str::{self, FromStr};

use quick_xml::events::Event;
use quick_xml::Reader;

use super::error::{DecodeError, DecodeResult};
use crate::cache::{
    BehaviorDraft, CacheBehaviors, ForwardedValuesDraft, TrustedSigners, WhitelistedNames,
};
use crate::origin::{
    CFOrigins, CustomOrigin, CustomOriginConfig, OriginDraft, S3Origin, S3OriginConfig,
};

/// Callbacks an object implements to be populated from decode events.
pub(crate) trait Element {
    /// Returns a fresh child object when `tag` opens a nested object.
    fn open_child(&self, _tag: &str) -> Option<Node> {
        None
    }

    /// Assigns the text of a closed scalar element.
    fn close_field(&mut self, tag: &str, text: &str) -> DecodeResult<()>;

    /// Receives a finished child previously returned by `open_child`.
    fn attach(&mut self, child: Node) -> DecodeResult<()> {
        Err(DecodeError::UnexpectedElement(child.kind().to_string()))
    }

    /// Number of items held, for objects whose element carries a `Quantity`.
    fn item_count(&self) -> Option<usize> {
        None
    }
}

/// An in-progress object on the decode stack.
#[derive(Debug)]
pub(crate) enum Node {
    Origins(CFOrigins),
    Origin(OriginDraft),
    S3OriginConfig(S3OriginConfig),
    CustomOriginConfig(CustomOriginConfig),
    S3Origin(S3Origin),
    CustomOrigin(CustomOrigin),
    CacheBehaviors(CacheBehaviors),
    CacheBehavior(BehaviorDraft),
    ForwardedValues(ForwardedValuesDraft),
    WhitelistedNames(WhitelistedNames),
    TrustedSigners(TrustedSigners),
}

impl Node {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Node::Origins(_) => "Origins",
            Node::Origin(_) => "Origin",
            Node::S3OriginConfig(_) => "S3OriginConfig",
            Node::CustomOriginConfig(_) => "CustomOriginConfig",
            Node::S3Origin(_) => "S3Origin",
            Node::CustomOrigin(_) => "CustomOrigin",
            Node::CacheBehaviors(_) => "CacheBehaviors",
            Node::CacheBehavior(_) => "CacheBehavior",
            Node::ForwardedValues(_) => "ForwardedValues",
            Node::WhitelistedNames(_) => "WhitelistedNames",
            Node::TrustedSigners(_) => "TrustedSigners",
        }
    }

    fn element(&mut self) -> &mut dyn Element {
        match self {
            Node::Origins(n) => n,
            Node::Origin(n) => n,
            Node::S3OriginConfig(n) => n,
            Node::CustomOriginConfig(n) => n,
            Node::S3Origin(n) => n,
            Node::CustomOrigin(n) => n,
            Node::CacheBehaviors(n) => n,
            Node::CacheBehavior(n) => n,
            Node::ForwardedValues(n) => n,
            Node::WhitelistedNames(n) => n,
            Node::TrustedSigners(n) => n,
        }
    }
}

struct Frame {
    tag: String,
    depth: usize,
    node: Node,
    declared: Option<usize>,
}

impl Frame {
    fn check_quantity(&mut self) -> DecodeResult<()> {
        let (Some(declared), Some(actual)) = (self.declared, self.node.element().item_count())
        else {
            return Ok(());
        };
        if declared != actual {
            return Err(DecodeError::QuantityMismatch {
                tag: self.tag.clone(),
                declared,
                actual,
            });
        }
        Ok(())
    }
}

/// The decode stack for one root element.
struct ParseContext {
    stack: Vec<Frame>,
    depth: usize,
    text: String,
}

impl ParseContext {
    fn new(tag: &str, node: Node) -> Self {
        Self {
            stack: vec![Frame {
                tag: tag.to_string(),
                depth: 1,
                node,
                declared: None,
            }],
            depth: 1,
            text: String::new(),
        }
    }

    fn root_tag(&self) -> &str {
        self.stack.first().map(|f| f.tag.as_str()).unwrap_or_default()
    }

    fn start(&mut self, tag: &str) {
        self.depth += 1;
        self.text.clear();
        let Some(top) = self.stack.last_mut() else {
            return;
        };
        if let Some(child) = top.node.element().open_child(tag) {
            tracing::trace!(tag, depth = self.depth, "push");
            self.stack.push(Frame {
                tag: tag.to_string(),
                depth: self.depth,
                node: child,
                declared: None,
            });
        }
    }

    fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Handles an end tag. Returns the root object once its own end tag closes.
    fn end(&mut self, tag: &str) -> DecodeResult<Option<Node>> {
        let text = std::mem::take(&mut self.text);
        let depth = self.depth;
        self.depth = self.depth.saturating_sub(1);

        let Some(top) = self.stack.last_mut() else {
            return Ok(None);
        };

        if top.depth == depth {
            let Some(mut frame) = self.stack.pop() else {
                return Ok(None);
            };
            frame.check_quantity()?;
            tracing::trace!(tag, depth, "pop");
            return match self.stack.last_mut() {
                Some(parent) => {
                    parent.node.element().attach(frame.node)?;
                    Ok(None)
                }
                None => Ok(Some(frame.node)),
            };
        }

        let value = text.as_str();
        if tag == "Quantity" && depth == top.depth + 1 && top.node.element().item_count().is_some()
        {
            top.declared = Some(parse_count(tag, value)?);
            return Ok(None);
        }
        top.node.element().close_field(tag, value)?;
        Ok(None)
    }
}

fn tag_name(bytes: &[u8]) -> DecodeResult<&str> {
    str::from_utf8(bytes).map_err(|e| DecodeError::Xml(e.to_string()))
}

/// Decodes the first element named one of `tags` found in `xml`.
///
/// Elements before the root (document wrappers, sibling sections) are
/// skipped. `root` builds the fresh object for the matched tag and `finish`
/// converts the completed object into the caller's type.
pub(crate) fn decode_root<T>(
    xml: &str,
    tags: &[&str],
    root: impl Fn(&str) -> Node,
    finish: impl FnOnce(Node) -> DecodeResult<T>,
) -> DecodeResult<T> {
    // Text is kept verbatim; typed fields trim when they parse.
    let mut reader = Reader::from_str(xml);

    let mut ctx: Option<ParseContext> = None;
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.local_name();
                let tag = tag_name(name.as_ref())?;
                if let Some(c) = ctx.as_mut() {
                    c.start(tag);
                } else if tags.contains(&tag) {
                    tracing::trace!(tag, "decode root");
                    ctx = Some(ParseContext::new(tag, root(tag)));
                }
            }
            Event::Empty(e) => {
                let name = e.local_name();
                let tag = tag_name(name.as_ref())?;
                if let Some(c) = ctx.as_mut() {
                    c.start(tag);
                    if let Some(node) = c.end(tag)? {
                        return finish(node);
                    }
                } else if tags.contains(&tag) {
                    return finish(root(tag));
                }
            }
            Event::Text(e) => {
                if let Some(c) = ctx.as_mut() {
                    c.push_text(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(c) = ctx.as_mut() {
                    c.push_text(tag_name(&e)?);
                }
            }
            Event::End(e) => {
                let name = e.local_name();
                let tag = tag_name(name.as_ref())?;
                if let Some(c) = ctx.as_mut() {
                    if let Some(node) = c.end(tag)? {
                        return finish(node);
                    }
                }
            }
            Event::Eof => {
                return Err(match ctx {
                    Some(c) => DecodeError::UnexpectedEof(c.root_tag().to_string()),
                    None => DecodeError::MissingElement(tags.join("|")),
                });
            }
            _ => {}
        }
    }
}

/// Parses `true` (any case) as true and everything else as false.
pub(crate) fn parse_bool(text: &str) -> bool {
    text.trim().eq_ignore_ascii_case("true")
}

fn parse_int<T: FromStr>(tag: &str, text: &str) -> DecodeResult<T> {
    let text = text.trim();
    text.parse()
        .map_err(|_| DecodeError::invalid_integer(tag, text))
}

pub(crate) fn parse_u16(tag: &str, text: &str) -> DecodeResult<u16> {
    parse_int(tag, text)
}

pub(crate) fn parse_u64(tag: &str, text: &str) -> DecodeResult<u64> {
    parse_int(tag, text)
}

fn parse_count(tag: &str, text: &str) -> DecodeResult<usize> {
    parse_int(tag, text)
}

/// Parses an enumerated wire value, ignoring surrounding whitespace.
pub(crate) fn parse_enum<T: FromStr>(text: &str) -> Result<T, T::Err> {
    text.trim().parse()
}
