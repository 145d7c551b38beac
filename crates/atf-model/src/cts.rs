//! CTS index entities (`__cts__.xml` files).

use serde::{Deserialize, Serialize};

use crate::document::{DivisionType, Document};
use crate::urn::{edition_id, translation_id};

/// Description attached to every converted work version.
pub const DEFAULT_WORK_DESCRIPTION: &str = "Test doc converted from atf.";

/// A CTS textgroup: one per collection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextGroup {
    pub urn: Option<String>,
    pub name: Option<String>,
}

impl TextGroup {
    pub fn new(urn: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            urn: Some(urn.into()),
            name: Some(name.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkPartKind {
    Edition,
    Translation,
}

impl WorkPartKind {
    /// Element name inside `ti:work`.
    pub fn element(&self) -> &'static str {
        match self {
            WorkPartKind::Edition => "ti:edition",
            WorkPartKind::Translation => "ti:translation",
        }
    }
}

/// One edition or translation listed in a work index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkPart {
    pub kind: WorkPartKind,
    pub urn: String,
    pub language: String,
    pub label: Option<String>,
    pub description: Option<String>,
}

/// A CTS work: one per record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Work {
    pub group_urn: Option<String>,
    pub work_urn: Option<String>,
    pub language: Option<String>,
    pub title: Option<String>,
    pub label: Option<String>,
    pub description: Option<String>,
    pub parts: Vec<WorkPart>,
}

impl Work {
    /// Build the work index entry for a mapped document.
    ///
    /// Lists the edition first, then translations in document order.
    pub fn for_document(
        group_urn: &str,
        work_urn: &str,
        document: &Document,
        description: &str,
    ) -> Self {
        let title = document.header.title.clone().unwrap_or_default();
        let code = document.header.code.clone().unwrap_or_default();
        let label = format!("CDLI {code} {title}").trim().to_string();
        let mut parts = Vec::new();
        for part in &document.parts {
            let (kind, language, urn) = match part.division {
                DivisionType::Edition => {
                    let language = document.language.clone();
                    let urn = edition_id(work_urn, &language);
                    (WorkPartKind::Edition, language, urn)
                }
                DivisionType::Translation => {
                    let language = part.language.clone().unwrap_or_default();
                    let urn = translation_id(work_urn, &language);
                    (WorkPartKind::Translation, language, urn)
                }
                DivisionType::Textpart => continue,
            };
            parts.push(WorkPart {
                kind,
                urn,
                language,
                label: Some(label.clone()),
                description: Some(description.to_string()),
            });
        }
        Self {
            group_urn: Some(group_urn.to_string()),
            work_urn: Some(work_urn.to_string()),
            language: Some(document.language.clone()),
            title: Some(title),
            label: Some(label),
            description: Some(description.to_string()),
            parts,
        }
    }
}
