//! Request body rendering.
//!
//! Every configuration type writes itself through a shared `quick_xml::Writer`
//! so nested objects embed into their parent's element without intermediate
//! string concatenation.

use std::io::Write;

use quick_xml::events::BytesText;
use quick_xml::Writer;

use super::error::EncodeError;

/// A type that renders itself as an XML request body fragment.
pub trait ToXml {
    /// Writes this object's element (and its children) to `writer`.
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> quick_xml::Result<()>;

    /// Renders this object as an indented XML string.
    fn to_xml(&self) -> Result<String, EncodeError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        self.write_xml(&mut writer)?;
        Ok(String::from_utf8(writer.into_inner())?)
    }
}

/// Writes `<tag>text</tag>`.
pub(crate) fn write_text<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    text: &str,
) -> quick_xml::Result<()> {
    writer
        .create_element(tag)
        .write_text_content(BytesText::new(text))?;
    Ok(())
}

/// Writes `<tag>true</tag>` or `<tag>false</tag>`.
pub(crate) fn write_bool<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: bool,
) -> quick_xml::Result<()> {
    write_text(writer, tag, if value { "true" } else { "false" })
}

/// Writes a `Quantity` element followed by an `Items` wrapper.
///
/// `Items` is omitted for an empty list.
pub(crate) fn write_items<W, T, F>(
    writer: &mut Writer<W>,
    items: &[T],
    write_item: F,
) -> quick_xml::Result<()>
where
    W: Write,
    F: Fn(&mut Writer<W>, &T) -> quick_xml::Result<()>,
{
    write_text(writer, "Quantity", &items.len().to_string())?;
    if items.is_empty() {
        return Ok(());
    }
    writer.create_element("Items").write_inner_content(|w| {
        for item in items {
            write_item(w, item)?;
        }
        Ok::<(), quick_xml::Error>(())
    })?;
    Ok(())
}
