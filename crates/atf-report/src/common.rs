//! Shared constants and element helpers.

use std::io::Write;

use anyhow::Result;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

/// TEI namespace.
pub const TEI_NS: &str = "http://www.tei-c.org/ns/1.0";

/// CTS index namespace, bound to the `ti` prefix.
pub const CTS_NS: &str = "http://chs.harvard.edu/xmlns/cts";

/// Language of CTS labels and descriptions.
pub const INDEX_LANGUAGE: &str = "eng";

/// Write a simple text element.
pub fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Write a text element, or an empty one when there is no text.
pub fn write_optional_text<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: Option<&str>,
) -> Result<()> {
    match text {
        Some(text) => write_text_element(writer, name, text),
        None => {
            writer.write_event(Event::Empty(BytesStart::new(name)))?;
            Ok(())
        }
    }
}

/// Write a text element tagged `xml:lang="eng"`.
pub fn write_index_text<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    let mut start = BytesStart::new(name);
    start.push_attribute(("xml:lang", INDEX_LANGUAGE));
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
