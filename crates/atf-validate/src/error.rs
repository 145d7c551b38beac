//! Error types for round-trip validation.

use std::str::Utf8Error;

use quick_xml::escape::EscapeError;
use quick_xml::events::attributes::AttrError;
use thiserror::Error;

/// Ways a rendered document can fail to match its source.
#[derive(Debug, Error)]
pub enum RoundTripError {
    #[error("xml is not well-formed: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("bad attribute: {0}")]
    Attribute(#[from] AttrError),
    #[error("bad escape in attribute: {0}")]
    Escape(#[from] EscapeError),
    #[error("invalid utf-8: {0}")]
    Utf8(#[from] Utf8Error),
    #[error("closing tag </{found}> does not match <{expected}>")]
    MismatchedEnd { expected: String, found: String },
    #[error("element <{0}> is never closed")]
    Unclosed(String),
    #[error("document has no TEI root element")]
    MissingRoot,
    #[error("expected exactly one edition, found {0}")]
    EditionCount(usize),
    #[error("expected {expected} top-level parts, found {found}")]
    PartCount { expected: usize, found: usize },
    #[error("translation {index} has language {found:?}, expected {expected:?}")]
    TranslationLanguage {
        index: usize,
        expected: Option<String>,
        found: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, RoundTripError>;
