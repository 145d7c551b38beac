//! Re-parse rendered TEI and compare it with the source document.

use std::str;

use atf_model::{DivisionType, Document};
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use tracing::trace;

use crate::error::{Result, RoundTripError};

const ROOT: &str = "TEI";

/// One `div` directly under `body`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartOutline {
    pub division: Option<DivisionType>,
    pub name: Option<String>,
    pub language: Option<String>,
}

/// Structural summary of a TEI document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TeiOutline {
    pub root: Option<String>,
    pub parts: Vec<PartOutline>,
}

impl TeiOutline {
    pub fn editions(&self) -> usize {
        self.parts
            .iter()
            .filter(|part| part.division == Some(DivisionType::Edition))
            .count()
    }

    pub fn translations(&self) -> impl Iterator<Item = &PartOutline> {
        self.parts
            .iter()
            .filter(|part| part.division == Some(DivisionType::Translation))
    }
}

/// Parse `xml` to the end and collect its outline.
///
/// Fails on anything that is not well-formed, including end tags that do
/// not match their start tag and elements left open at the end.
pub fn outline(xml: &str) -> Result<TeiOutline> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<String> = Vec::new();
    let mut outline = TeiOutline::default();
    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let name = element_name(&start)?;
                visit(&mut outline, &stack, &name, &start)?;
                stack.push(name);
            }
            Event::Empty(start) => {
                let name = element_name(&start)?;
                visit(&mut outline, &stack, &name, &start)?;
            }
            Event::End(end) => {
                let found = str::from_utf8(end.name().as_ref())?.to_string();
                match stack.pop() {
                    Some(expected) if expected == found => {}
                    Some(expected) => return Err(RoundTripError::MismatchedEnd { expected, found }),
                    None => {
                        return Err(RoundTripError::MismatchedEnd {
                            expected: String::new(),
                            found,
                        });
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    if let Some(open) = stack.pop() {
        return Err(RoundTripError::Unclosed(open));
    }
    Ok(outline)
}

fn element_name(start: &BytesStart<'_>) -> Result<String> {
    Ok(str::from_utf8(start.name().as_ref())?.to_string())
}

fn visit(outline: &mut TeiOutline, stack: &[String], name: &str, start: &BytesStart<'_>) -> Result<()> {
    if stack.is_empty() {
        outline.root.get_or_insert_with(|| name.to_string());
        return Ok(());
    }
    let under_body = stack.last().is_some_and(|parent| parent == "body");
    if name == "div" && under_body {
        outline.parts.push(PartOutline {
            division: attribute(start, b"type")?
                .as_deref()
                .and_then(DivisionType::parse),
            name: attribute(start, b"n")?,
            language: attribute(start, b"xml:lang")?,
        });
    }
    Ok(())
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

/// Check that `xml` is a faithful rendering of `document`.
///
/// The rendered text must parse, have a `TEI` root, hold exactly one
/// edition and list the same top-level parts with the same translation
/// languages in the same order.
pub fn validate_round_trip(xml: &str, document: &Document) -> Result<TeiOutline> {
    let outline = outline(xml)?;
    if outline.root.as_deref() != Some(ROOT) {
        return Err(RoundTripError::MissingRoot);
    }
    let editions = outline.editions();
    if editions != 1 {
        return Err(RoundTripError::EditionCount(editions));
    }
    if outline.parts.len() != document.parts.len() {
        return Err(RoundTripError::PartCount {
            expected: document.parts.len(),
            found: outline.parts.len(),
        });
    }
    for (index, (expected, found)) in document
        .translations()
        .zip(outline.translations())
        .enumerate()
    {
        if expected.language != found.language {
            return Err(RoundTripError::TranslationLanguage {
                index,
                expected: expected.language.clone(),
                found: found.language.clone(),
            });
        }
    }
    trace!(parts = outline.parts.len(), "round trip ok");
    Ok(outline)
}
