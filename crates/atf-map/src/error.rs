//! Error types for record mapping.

use atf_ingest::IngestError;
use thiserror::Error;

/// Errors from turning a record into a document.
#[derive(Debug, Error)]
pub enum MapError {
    /// The parser rejected the record.
    #[error(transparent)]
    Parse(#[from] IngestError),
    /// The record header has no code to build a work urn from.
    #[error("record header has no code")]
    MissingCode,
}
