use std::io::Write;

use quick_xml::Writer;
use serde::{Deserialize, Serialize};

use crate::xml::decode::Element;
use crate::xml::encode::{write_bool, write_items, write_text};
use crate::xml::{DecodeResult, ToXml};

/// Accounts allowed to sign URLs or cookies for private content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustedSigners(Vec<String>);

impl TrustedSigners {
    pub fn new<I, S>(account_numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(account_numbers.into_iter().map(Into::into).collect())
    }

    pub fn account_numbers(&self) -> &[String] {
        &self.0
    }

    pub fn push(&mut self, account_number: impl Into<String>) {
        self.0.push(account_number.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ToXml for TrustedSigners {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> quick_xml::Result<()> {
        writer
            .create_element("TrustedSigners")
            .write_inner_content(|w| {
                write_bool(w, "Enabled", !self.is_empty())?;
                write_items(w, &self.0, |w, account| {
                    write_text(w, "AWSAccountNumber", account)
                })
            })?;
        Ok(())
    }
}

impl Element for TrustedSigners {
    fn close_field(&mut self, tag: &str, text: &str) -> DecodeResult<()> {
        if tag == "AWSAccountNumber" {
            self.push(text);
        }
        Ok(())
    }

    fn item_count(&self) -> Option<usize> {
        Some(self.len())
    }
}
