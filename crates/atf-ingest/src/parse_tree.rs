//! Typed parse tree produced by an [`AtfParser`](crate::parser::AtfParser).
//!
//! Node kinds form a closed enum so consumers dispatch with an exhaustive
//! `match` instead of probing types.

use serde::{Deserialize, Serialize};

/// One parsed ATF record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParseTree {
    /// CDLI identifier from the `&` line.
    pub code: String,
    /// Free-text description from the `&` line.
    pub description: String,
    /// Language from `#atf: lang`.
    pub language: String,
    pub project: Option<String>,
    /// Top-level objects (tablets, envelopes, ...) in input order.
    pub objects: Vec<AtfObject>,
}

/// An object or surface grouping (`@tablet`, `@obverse`, `@face a`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtfObject {
    /// Type tag, e.g. `tablet` or `obverse`.
    pub kind: String,
    /// Optional argument, e.g. `a` for `@face a`.
    pub name: Option<String>,
    pub children: Vec<AtfNode>,
}

impl AtfObject {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: None,
            children: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name if one was given, otherwise the type tag.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.kind)
    }
}

/// A numbered text line and the notes that follow it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtfLine {
    pub label: String,
    pub words: Vec<String>,
    /// Comment bodies without the leading `#`, e.g. `tr.en: to the king`.
    pub notes: Vec<String>,
}

impl AtfLine {
    pub fn new(label: impl Into<String>, words: Vec<String>) -> Self {
        Self {
            label: label.into(),
            words,
            notes: Vec::new(),
        }
    }
}

/// Parallel translation block (`@translation parallel en ...`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtfTranslation {
    pub language: String,
    pub project: Option<String>,
    pub children: Vec<AtfNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum AtfNode {
    Object(AtfObject),
    Line(AtfLine),
    /// Raw `$` line including the marker.
    State(String),
    /// Raw `$ ... ruling` line including the marker.
    Ruling(String),
    Translation(AtfTranslation),
    /// Standalone `#` comment not attached to a line.
    Comment(String),
}

impl AtfNode {
    /// Short kind name for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            AtfNode::Object(_) => "object",
            AtfNode::Line(_) => "line",
            AtfNode::State(_) => "state",
            AtfNode::Ruling(_) => "ruling",
            AtfNode::Translation(_) => "translation",
            AtfNode::Comment(_) => "comment",
        }
    }
}
