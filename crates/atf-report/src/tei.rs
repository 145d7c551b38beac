//! TEI rendering of the document model.

use std::io::Write;

use anyhow::Result;
use atf_model::{Document, Header, Line, Node, Note, RefsDecl, TextPart};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::common::{TEI_NS, write_optional_text, write_text_element};
use crate::xml::ToXml;

/// Source collection named in `sourceDesc`.
const SOURCE_TITLE: &str = "CDLI";

impl ToXml for Document {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut root = BytesStart::new("TEI");
        root.push_attribute(("xmlns", TEI_NS));
        writer.write_event(Event::Start(root))?;
        self.header.write_xml(writer)?;
        writer.write_event(Event::Start(BytesStart::new("text")))?;
        writer.write_event(Event::Start(BytesStart::new("body")))?;
        for part in &self.parts {
            part.write_xml(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new("body")))?;
        writer.write_event(Event::End(BytesEnd::new("text")))?;
        writer.write_event(Event::End(BytesEnd::new("TEI")))?;
        Ok(())
    }
}

impl ToXml for Header {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("teiHeader")))?;
        writer.write_event(Event::Start(BytesStart::new("fileDesc")))?;

        writer.write_event(Event::Start(BytesStart::new("titleStmt")))?;
        write_optional_text(writer, "title", self.title.as_deref())?;
        writer.write_event(Event::End(BytesEnd::new("titleStmt")))?;

        if let Some(publication) = &self.publication {
            writer.write_event(Event::Start(BytesStart::new("publicationStmt")))?;
            write_text_element(writer, "p", publication)?;
            writer.write_event(Event::End(BytesEnd::new("publicationStmt")))?;
        }

        if let Some(code) = &self.code {
            writer.write_event(Event::Start(BytesStart::new("sourceDesc")))?;
            writer.write_event(Event::Start(BytesStart::new("bibl")))?;
            write_text_element(writer, "title", SOURCE_TITLE)?;
            let mut idno = BytesStart::new("idno");
            idno.push_attribute(("type", SOURCE_TITLE));
            writer.write_event(Event::Start(idno))?;
            writer.write_event(Event::Text(BytesText::new(code)))?;
            writer.write_event(Event::End(BytesEnd::new("idno")))?;
            writer.write_event(Event::End(BytesEnd::new("bibl")))?;
            writer.write_event(Event::End(BytesEnd::new("sourceDesc")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("fileDesc")))?;

        if let Some(refs_decl) = &self.refs_decl {
            writer.write_event(Event::Start(BytesStart::new("encodingDesc")))?;
            refs_decl.write_xml(writer)?;
            writer.write_event(Event::End(BytesEnd::new("encodingDesc")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("teiHeader")))?;
        Ok(())
    }
}

impl ToXml for RefsDecl {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut root = BytesStart::new("refsDecl");
        root.push_attribute(("n", "CTS"));
        writer.write_event(Event::Start(root))?;
        for pattern in &self.patterns {
            let match_pattern = pattern.match_pattern();
            let mut node = BytesStart::new("cRefPattern");
            node.push_attribute(("n", pattern.name.as_str()));
            node.push_attribute(("matchPattern", match_pattern.as_str()));
            node.push_attribute(("replacementPattern", pattern.replacement.as_str()));
            writer.write_event(Event::Start(node))?;
            write_text_element(writer, "p", &pattern.description)?;
            writer.write_event(Event::End(BytesEnd::new("cRefPattern")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("refsDecl")))?;
        Ok(())
    }
}

impl ToXml for TextPart {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut div = BytesStart::new("div");
        div.push_attribute(("type", self.division.as_str()));
        if let Some(name) = &self.name {
            div.push_attribute(("n", name.as_str()));
        }
        if let Some(subtype) = &self.subtype {
            div.push_attribute(("subtype", subtype.as_str()));
        }
        if let Some(language) = &self.language {
            div.push_attribute(("xml:lang", language.as_str()));
        }
        if self.children.is_empty() {
            writer.write_event(Event::Empty(div))?;
            return Ok(());
        }
        writer.write_event(Event::Start(div))?;
        for child in &self.children {
            match child {
                Node::Part(part) => part.write_xml(writer)?,
                Node::Line(line) => line.write_xml(writer)?,
                Node::Note(note) => note.write_xml(writer)?,
            }
        }
        writer.write_event(Event::End(BytesEnd::new("div")))?;
        Ok(())
    }
}

impl ToXml for Line {
    /// Content is already an escaped fragment and is written verbatim.
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new("l");
        start.push_attribute(("n", self.reference.as_str()));
        writer.write_event(Event::Start(start))?;
        writer.write_event(Event::Text(BytesText::from_escaped(self.content.as_str())))?;
        writer.write_event(Event::End(BytesEnd::new("l")))?;
        Ok(())
    }
}

impl ToXml for Note {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        write_text_element(writer, "note", &self.text)
    }
}
