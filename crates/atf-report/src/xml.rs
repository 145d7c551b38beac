//! The serialization capability shared by every output entity.

use std::io::Write;

use anyhow::{Context, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, Event};

/// Something that can write itself as XML events.
pub trait ToXml {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> Result<()>;
}

/// Render `item` as a standalone UTF-8 document with a declaration and
/// two-space indentation.
pub fn render<T: ToXml + ?Sized>(item: &T) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    item.write_xml(&mut writer)?;
    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).context("rendered xml is not utf-8")
}
