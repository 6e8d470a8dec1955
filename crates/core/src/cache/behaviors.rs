use std::io::Write;

use quick_xml::Writer;
use serde::{Deserialize, Serialize};

use super::behavior::{BehaviorDraft, CacheBehavior};
use crate::xml::decode::{decode_root, Element, Node};
use crate::xml::encode::write_items;
use crate::xml::{DecodeError, DecodeResult, ToXml};

/// Ordered patterned behaviors, matched against request paths in list order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheBehaviors(Vec<CacheBehavior>);

impl CacheBehaviors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, behavior: CacheBehavior) {
        self.0.push(behavior);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CacheBehavior> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the first behavior whose pattern equals `pattern`.
    pub fn find(&self, pattern: &str) -> Option<&CacheBehavior> {
        self.0.iter().find(|b| b.path_pattern() == Some(pattern))
    }

    /// Decodes the first `<CacheBehaviors>` element of a response document.
    pub fn from_xml(xml: &str) -> DecodeResult<Self> {
        decode_root(
            xml,
            &["CacheBehaviors"],
            |_| Node::CacheBehaviors(CacheBehaviors::new()),
            |node| match node {
                Node::CacheBehaviors(behaviors) => Ok(behaviors),
                other => Err(DecodeError::UnexpectedElement(other.kind().to_string())),
            },
        )
    }
}

impl FromIterator<CacheBehavior> for CacheBehaviors {
    fn from_iter<I: IntoIterator<Item = CacheBehavior>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a CacheBehaviors {
    type Item = &'a CacheBehavior;
    type IntoIter = std::slice::Iter<'a, CacheBehavior>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl ToXml for CacheBehaviors {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> quick_xml::Result<()> {
        writer
            .create_element("CacheBehaviors")
            .write_inner_content(|w| write_items(w, &self.0, |w, behavior| behavior.write_xml(w)))?;
        Ok(())
    }
}

impl Element for CacheBehaviors {
    fn open_child(&self, tag: &str) -> Option<Node> {
        (tag == "CacheBehavior").then(|| Node::CacheBehavior(BehaviorDraft::new(false)))
    }

    fn close_field(&mut self, _tag: &str, _text: &str) -> DecodeResult<()> {
        Ok(())
    }

    fn attach(&mut self, child: Node) -> DecodeResult<()> {
        match child {
            Node::CacheBehavior(draft) => {
                self.push(draft.build()?);
                Ok(())
            }
            other => Err(DecodeError::UnexpectedElement(other.kind().to_string())),
        }
    }

    fn item_count(&self) -> Option<usize> {
        Some(self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CacheBehaviors {
        [
            CacheBehavior::new("assets").with_pattern("/static/*"),
            CacheBehavior::new("api").with_pattern("/api/*").with_min_ttl(0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_empty_behaviors_xml() {
        let xml = CacheBehaviors::new().to_xml().unwrap();
        assert_eq!(
            xml,
            "<CacheBehaviors>\n  <Quantity>0</Quantity>\n</CacheBehaviors>"
        );
    }

    #[test]
    fn test_find_by_pattern() {
        let behaviors = sample();
        assert_eq!(
            behaviors.find("/api/*").map(|b| b.target_origin_id.as_str()),
            Some("api")
        );
        assert!(behaviors.find("/missing/*").is_none());
    }

    #[test]
    fn test_roundtrip_keeps_order() {
        let behaviors = sample();
        let decoded = CacheBehaviors::from_xml(&behaviors.to_xml().unwrap()).unwrap();
        assert_eq!(decoded, behaviors);
    }

    #[test]
    fn test_from_xml_empty_collection() {
        let decoded =
            CacheBehaviors::from_xml("<CacheBehaviors><Quantity>0</Quantity></CacheBehaviors>")
                .unwrap();
        assert!(decoded.is_empty());
    }
}
