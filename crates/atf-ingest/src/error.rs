use thiserror::Error;

/// Errors raised while reading or parsing ATF input.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("record does not start with an '&' header line")]
    MissingHeader,
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
    #[error("record {code} declares no language (#atf: lang)")]
    MissingLanguage { code: String },
    #[error("record {code} has no #project line")]
    MissingProject { code: String },
    #[error("line {line}: unsupported translation {argument:?}, only 'parallel en' is recognized")]
    UnsupportedTranslation { line: usize, argument: String },
}

impl IngestError {
    pub(crate) fn syntax(line: usize, message: impl Into<String>) -> Self {
        IngestError::Syntax {
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
