//! Reverse conversion: TEI back to ATF.
//!
//! Only the edition is converted. Each division directly under it becomes an
//! object directive (`@tablet`, or `@{subtype} {n}` when a subtype is set),
//! each division below that a surface directive, and every `l` a numbered
//! line holding the element's text with markup stripped. Translations and
//! notes are dropped.

use std::str;

use anyhow::{Context, Result, anyhow};
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

enum Capture {
    Title,
    Idno,
    Line(String),
}

#[derive(Default)]
struct Extractor {
    /// Local names of the open elements.
    stack: Vec<Vec<u8>>,
    in_header: bool,
    title: Option<String>,
    idno: Option<String>,
    /// Stack depth of the edition `div` once it is open.
    edition_depth: Option<usize>,
    edition_done: bool,
    language: Option<String>,
    urn: Option<String>,
    capture: Option<(Capture, usize, String)>,
    body: Vec<String>,
}

/// Convert a TEI document to ATF text.
pub fn tei_to_atf(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut extractor = Extractor::default();
    loop {
        match reader.read_event().context("read tei")? {
            Event::Start(start) => {
                extractor.open(&start, false)?;
                extractor.stack.push(start.local_name().as_ref().to_vec());
            }
            Event::Empty(start) => extractor.open(&start, true)?,
            Event::End(end) => {
                extractor.close(end.local_name().as_ref())?;
                extractor.stack.pop();
            }
            Event::Text(text) => extractor.text(str::from_utf8(&text)?),
            Event::GeneralRef(reference) => {
                let name = str::from_utf8(&reference)?;
                extractor.text(&format!("&{name};"));
            }
            Event::Eof => break,
            _ => {}
        }
    }
    extractor.finish()
}

impl Extractor {
    fn open(&mut self, start: &BytesStart<'_>, empty: bool) -> Result<()> {
        let depth = self.stack.len();
        match start.local_name().as_ref() {
            b"teiHeader" => self.in_header = !empty,
            b"title" if self.in_header && self.title.is_none() => {
                if empty {
                    self.title = Some(String::new());
                } else {
                    self.capture = Some((Capture::Title, depth, String::new()));
                }
            }
            b"idno" if self.in_header && self.idno.is_none() && !empty => {
                self.capture = Some((Capture::Idno, depth, String::new()));
            }
            b"div" => self.open_div(start, depth, empty)?,
            b"l" if self.in_edition_division(depth) => {
                let label = attribute(start, b"n")?.unwrap_or_default();
                if empty {
                    self.body.push(format!("{label}."));
                } else {
                    self.capture = Some((Capture::Line(label), depth, String::new()));
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn open_div(&mut self, start: &BytesStart<'_>, depth: usize, empty: bool) -> Result<()> {
        let Some(edition_depth) = self.edition_depth else {
            if self.edition_done || attribute(start, b"type")?.as_deref() != Some("edition") {
                return Ok(());
            }
            self.language = attribute(start, b"xml:lang")?;
            self.urn = attribute(start, b"n")?;
            if empty {
                self.edition_done = true;
            } else {
                self.edition_depth = Some(depth + 1);
            }
            return Ok(());
        };
        let n = attribute(start, b"n")?.unwrap_or_default();
        if depth == edition_depth {
            match attribute(start, b"subtype")? {
                Some(subtype) => self.body.push(format!("@{subtype} {n}")),
                None => self.body.push(format!("@{n}")),
            }
        } else if depth == edition_depth + 1 {
            self.body.push(format!("@{n}"));
        }
        Ok(())
    }

    fn in_edition_division(&self, depth: usize) -> bool {
        let Some(edition_depth) = self.edition_depth else {
            return false;
        };
        let parent_is_div = self.stack.last().is_some_and(|name| name == b"div");
        parent_is_div && (depth == edition_depth + 1 || depth == edition_depth + 2)
    }

    fn text(&mut self, raw: &str) {
        if let Some((_, _, buffer)) = &mut self.capture {
            buffer.push_str(raw);
        }
    }

    fn close(&mut self, name: &[u8]) -> Result<()> {
        // Depth of the element being closed, matching the one recorded in `open`.
        let depth = self.stack.len().saturating_sub(1);
        if name == b"teiHeader" {
            self.in_header = false;
        }
        if name == b"div" && self.edition_depth == Some(depth + 1) {
            self.edition_depth = None;
            self.edition_done = true;
        }
        let finished = matches!(&self.capture, Some((_, start, _)) if *start == depth);
        if !finished {
            return Ok(());
        }
        let Some((capture, _, raw)) = self.capture.take() else {
            return Ok(());
        };
        let text = unescape(&raw)?.trim().to_string();
        match capture {
            Capture::Title => self.title = Some(text),
            Capture::Idno => self.idno = Some(text),
            Capture::Line(label) => self.body.push(format!("{label}. {text}")),
        }
        Ok(())
    }

    fn finish(self) -> Result<String> {
        if !self.edition_done && self.edition_depth.is_none() {
            return Err(anyhow!("document has no edition division"));
        }
        let code = match (self.idno, self.urn) {
            (Some(idno), _) if !idno.is_empty() => idno,
            (_, Some(urn)) => urn.split(':').skip(2).collect::<Vec<_>>().join(":"),
            _ => return Err(anyhow!("document has neither an idno nor an edition urn")),
        };
        let language = self
            .language
            .ok_or_else(|| anyhow!("edition division has no xml:lang"))?;
        let title = self.title.unwrap_or_default();

        let mut atf = vec![format!("&{code} = {title}"), format!("#atf: lang {language}")];
        atf.extend(self.body);
        let mut out = atf.join("\n");
        out.push('\n');
        Ok(out)
    }
}

fn attribute(start: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    for attr in start.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == name {
            let raw = str::from_utf8(&attr.value)?;
            return Ok(Some(unescape(raw)?.into_owned()));
        }
    }
    Ok(None)
}
