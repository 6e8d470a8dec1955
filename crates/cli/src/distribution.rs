//! Whole-distribution rendering and response inspection.

use std::io::Write;

use cfdist_core::{CFOrigins, CacheBehavior, CacheBehaviors, DecodeError, DecodeResult, ToXml};
use quick_xml::Writer;
use serde::Serialize;

use crate::error::{CliError, Result};

/// A validated set of origins and the behaviors routing to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Distribution {
    pub origins: CFOrigins,
    pub default_behavior: CacheBehavior,
    pub cache_behaviors: CacheBehaviors,
}

impl ToXml for Distribution {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> quick_xml::Result<()> {
        writer
            .create_element("DistributionConfig")
            .write_inner_content(|w| {
                self.origins.write_xml(w)?;
                self.default_behavior.write_xml(w)?;
                self.cache_behaviors.write_xml(w)
            })?;
        Ok(())
    }
}

/// The distribution elements found in a response document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Inspection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origins: Option<CFOrigins>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_behavior: Option<CacheBehavior>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_behaviors: Option<CacheBehaviors>,
}

impl Inspection {
    /// Decodes every known element present in `xml`.
    ///
    /// Absent elements are skipped. A document holding none of them is an error.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let inspection = Self {
            origins: present(CFOrigins::from_xml(xml))?,
            default_behavior: present(CacheBehavior::default_from_xml(xml))?,
            cache_behaviors: present(CacheBehaviors::from_xml(xml))?,
        };
        if inspection.is_empty() {
            return Err(CliError::NothingFound(
                "Origins, DefaultCacheBehavior, CacheBehaviors".to_string(),
            ));
        }
        Ok(inspection)
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_none() && self.default_behavior.is_none() && self.cache_behaviors.is_none()
    }
}

fn present<T>(result: DecodeResult<T>) -> DecodeResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(DecodeError::MissingElement(tag)) => {
            tracing::debug!(tag = %tag, "element not present");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
