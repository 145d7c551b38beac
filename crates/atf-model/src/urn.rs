//! CTS urn composition.
//!
//! Urns are dotted below the namespace: `urn:cts:cdli:{group}.{work}.{version}`
//! where the version is `cdli-{language}` for editions and translations alike.

use crate::document::{DivisionType, Document};
use crate::error::{ModelError, Result};

/// Version prefix shared by editions and translations.
pub const VERSION_PREFIX: &str = "cdli-";

/// Builds work urns under a fixed textgroup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrnComposer {
    group_urn: String,
}

impl UrnComposer {
    pub fn new(group_urn: impl Into<String>) -> Result<Self> {
        let group_urn = group_urn.into();
        if group_urn.trim().is_empty() {
            return Err(ModelError::EmptyGroupUrn);
        }
        Ok(Self { group_urn })
    }

    pub fn group_urn(&self) -> &str {
        &self.group_urn
    }

    /// `{group}.{code}`.
    ///
    /// The code also names the work directory, so it may not contain a
    /// separator or be `.`/`..`.
    pub fn work_urn(&self, code: &str) -> Result<String> {
        let code = code.trim();
        if code.is_empty() {
            return Err(ModelError::EmptyCode);
        }
        if code.contains([':', '/', '\\']) {
            return Err(ModelError::ReservedCharacter(code.to_string()));
        }
        if code == "." || code == ".." {
            return Err(ModelError::PathSegment(code.to_string()));
        }
        Ok(format!("{}.{code}", self.group_urn))
    }

    /// Name every edition and translation part after its version urn.
    ///
    /// Returns the work urn used.
    pub fn assign(&self, document: &mut Document) -> Result<String> {
        let code = document.header.code.as_deref().unwrap_or_default();
        let work_urn = self.work_urn(code)?;
        let language = document.language.clone();
        for part in &mut document.parts {
            match part.division {
                DivisionType::Edition => {
                    part.name = Some(edition_id(&work_urn, &language));
                }
                DivisionType::Translation => {
                    let lang = part.language.clone().unwrap_or_default();
                    part.name = Some(translation_id(&work_urn, &lang));
                }
                DivisionType::Textpart => {}
            }
        }
        Ok(work_urn)
    }
}

pub fn edition_id(work_urn: &str, language: &str) -> String {
    format!("{work_urn}.{VERSION_PREFIX}{language}")
}

pub fn translation_id(work_urn: &str, language: &str) -> String {
    format!("{work_urn}.{VERSION_PREFIX}{language}")
}

/// Portion of a urn after its last `:`.
pub fn urn_tail(urn: &str) -> &str {
    urn.rsplit(':').next().unwrap_or(urn)
}

/// Directory name for a textgroup (`urn:cts:cdli:test` -> `test`).
pub fn group_segment(group_urn: &str) -> &str {
    urn_tail(group_urn)
}

/// File name for an edition or translation id.
pub fn part_file_name(id: &str) -> String {
    format!("{}.xml", urn_tail(id))
}
