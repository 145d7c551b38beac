//! TEI document model.
//!
//! A [`Document`] is a header plus an ordered list of top-level parts: exactly
//! one edition followed by zero or more translations. Parts are [`TextPart`]
//! trees whose leaves are [`Line`]s and [`Note`]s.

use serde::{Deserialize, Serialize};

use crate::refs_decl::RefsDecl;

/// Publication statement stamped on every converted header.
pub const DEFAULT_PUBLICATION: &str = "Converted from ATF by atf2tei.";

/// A TEI document holding one converted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub header: Header,
    /// Primary language of the transliterated text.
    pub language: String,
    pub parts: Vec<TextPart>,
}

impl Document {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            header: Header::default(),
            language: language.into(),
            parts: Vec::new(),
        }
    }

    /// The edition part, if one has been added.
    pub fn edition(&self) -> Option<&TextPart> {
        self.parts
            .iter()
            .find(|part| part.division == DivisionType::Edition)
    }

    pub fn translations(&self) -> impl Iterator<Item = &TextPart> {
        self.parts
            .iter()
            .filter(|part| part.division == DivisionType::Translation)
    }

    /// Find the translation part for `language`.
    pub fn translation_mut(&mut self, language: &str) -> Option<&mut TextPart> {
        self.parts.iter_mut().find(|part| {
            part.division == DivisionType::Translation && part.language.as_deref() == Some(language)
        })
    }

    /// Copy of this document holding only the part at `index`.
    ///
    /// Used to write one file per edition/translation with a shared header.
    pub fn with_single_part(&self, index: usize) -> Option<Document> {
        let part = self.parts.get(index)?.clone();
        Some(Document {
            header: self.header.clone(),
            language: self.language.clone(),
            parts: vec![part],
        })
    }
}

/// TEI header fields carried over from the ATF record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Record description from the `&` line.
    pub title: Option<String>,
    /// CDLI identifier (for example `P123456`).
    pub code: Option<String>,
    pub publication: Option<String>,
    pub refs_decl: Option<RefsDecl>,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            title: None,
            code: None,
            publication: Some(DEFAULT_PUBLICATION.to_string()),
            refs_decl: Some(RefsDecl::cts()),
        }
    }
}

/// Value of the `type` attribute on a `div`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DivisionType {
    Edition,
    Translation,
    Textpart,
}

impl DivisionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DivisionType::Edition => "edition",
            DivisionType::Translation => "translation",
            DivisionType::Textpart => "textpart",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "edition" => Some(DivisionType::Edition),
            "translation" => Some(DivisionType::Translation),
            "textpart" => Some(DivisionType::Textpart),
            _ => None,
        }
    }
}

/// An Epidoc text division (`div`).
///
/// Top-level parts use [`DivisionType::Edition`] or
/// [`DivisionType::Translation`] and carry the CTS urn as their name once
/// urns are assigned. Nested divisions are named after the object or
/// surface they mirror (`tablet`, `obverse`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPart {
    pub name: Option<String>,
    pub division: DivisionType,
    pub subtype: Option<String>,
    pub language: Option<String>,
    pub children: Vec<Node>,
}

impl TextPart {
    pub fn edition(language: impl Into<String>) -> Self {
        Self {
            name: None,
            division: DivisionType::Edition,
            subtype: None,
            language: Some(language.into()),
            children: Vec::new(),
        }
    }

    pub fn translation(language: impl Into<String>) -> Self {
        Self {
            name: None,
            division: DivisionType::Translation,
            subtype: None,
            language: Some(language.into()),
            children: Vec::new(),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            division: DivisionType::Textpart,
            subtype: None,
            language: None,
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Number of lines in this division and all nested divisions.
    pub fn line_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child {
                Node::Part(part) => part.line_count(),
                Node::Line(_) => 1,
                Node::Note(_) => 0,
            })
            .sum()
    }

    /// Lines in document order, depth first.
    pub fn lines(&self) -> Vec<&Line> {
        let mut out = Vec::new();
        collect_lines(self, &mut out);
        out
    }
}

fn collect_lines<'a>(part: &'a TextPart, out: &mut Vec<&'a Line>) {
    for child in &part.children {
        match child {
            Node::Part(nested) => collect_lines(nested, out),
            Node::Line(line) => out.push(line),
            Node::Note(_) => {}
        }
    }
}

/// Child of a [`TextPart`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Part(TextPart),
    Line(Line),
    Note(Note),
}

impl From<TextPart> for Node {
    fn from(part: TextPart) -> Self {
        Node::Part(part)
    }
}

impl From<Line> for Node {
    fn from(line: Line) -> Self {
        Node::Line(line)
    }
}

impl From<Note> for Node {
    fn from(note: Note) -> Self {
        Node::Note(note)
    }
}

/// A citable line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Citation label (`1`, `2'`, ...).
    pub reference: String,
    /// Escaped XML fragment; may contain inline `hi` markup.
    pub content: String,
}

impl Line {
    pub fn new(reference: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            content: content.into(),
        }
    }
}

/// Free-text annotation such as a state or ruling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub text: String,
}

impl Note {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
