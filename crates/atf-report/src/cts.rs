//! CTS index rendering (`ti:textgroup`, `ti:work`).

use std::io::Write;

use anyhow::Result;
use atf_model::{TextGroup, Work, WorkPart, WorkPartKind};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, Event};

use crate::common::{CTS_NS, write_index_text};
use crate::xml::ToXml;

impl ToXml for TextGroup {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut root = BytesStart::new("ti:textgroup");
        root.push_attribute(("xmlns:ti", CTS_NS));
        if let Some(urn) = &self.urn {
            root.push_attribute(("urn", urn.as_str()));
        }
        let Some(name) = &self.name else {
            writer.write_event(Event::Empty(root))?;
            return Ok(());
        };
        writer.write_event(Event::Start(root))?;
        write_index_text(writer, "ti:groupname", name)?;
        writer.write_event(Event::End(BytesEnd::new("ti:textgroup")))?;
        Ok(())
    }
}

impl ToXml for Work {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut root = BytesStart::new("ti:work");
        root.push_attribute(("xmlns:ti", CTS_NS));
        if let Some(group_urn) = &self.group_urn {
            root.push_attribute(("groupUrn", group_urn.as_str()));
        }
        if let Some(work_urn) = &self.work_urn {
            root.push_attribute(("urn", work_urn.as_str()));
        }
        if let Some(language) = &self.language {
            root.push_attribute(("xml:lang", language.as_str()));
        }
        writer.write_event(Event::Start(root))?;
        write_index_text(writer, "ti:title", self.title.as_deref().unwrap_or_default())?;
        for part in &self.parts {
            write_work_part(writer, self.work_urn.as_deref(), part)?;
        }
        writer.write_event(Event::End(BytesEnd::new("ti:work")))?;
        Ok(())
    }
}

fn write_work_part<W: Write>(
    writer: &mut Writer<W>,
    work_urn: Option<&str>,
    part: &WorkPart,
) -> Result<()> {
    let element = part.kind.element();
    let mut start = BytesStart::new(element);
    if let Some(work_urn) = work_urn {
        start.push_attribute(("workUrn", work_urn));
    }
    start.push_attribute(("urn", part.urn.as_str()));
    if part.kind == WorkPartKind::Translation {
        start.push_attribute(("xml:lang", part.language.as_str()));
    }
    writer.write_event(Event::Start(start))?;
    if let Some(label) = &part.label {
        write_index_text(writer, "ti:label", label)?;
    }
    if let Some(description) = &part.description {
        write_index_text(writer, "ti:description", description)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element)))?;
    Ok(())
}
