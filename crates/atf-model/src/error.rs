use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("textgroup urn is empty")]
    EmptyGroupUrn,
    #[error("record has no CDLI code; cannot compose a work urn")]
    EmptyCode,
    #[error("urn component {0:?} contains a reserved character")]
    ReservedCharacter(String),
    #[error("code {0:?} is not usable as a directory name")]
    PathSegment(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
