//! Error handling for the resume parser

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeParserError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Document decoding error: {0}")]
    DecodeFailure(String),

    #[error("Skill taxonomy error: {0}")]
    TaxonomyLoad(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Field extraction aborted: {0}")]
    Extraction(String),
}

pub type Result<T> = std::result::Result<T, ResumeParserError>;

/// Coarse classification used when a failure is reported per document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    UnsupportedFormat,
    DecodeFailure,
    Io,
    TaxonomyLoad,
    Extraction,
    Other,
}

impl ResumeParserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResumeParserError::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            ResumeParserError::DecodeFailure(_) => ErrorKind::DecodeFailure,
            ResumeParserError::Io(_) => ErrorKind::Io,
            ResumeParserError::TaxonomyLoad(_) => ErrorKind::TaxonomyLoad,
            ResumeParserError::Extraction(_) => ErrorKind::Extraction,
            _ => ErrorKind::Other,
        }
    }

    /// Errors that must stop a run before any document is processed
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ResumeParserError::TaxonomyLoad(_) | ResumeParserError::Configuration(_)
        )
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::UnsupportedFormat => write!(f, "unsupported format"),
            ErrorKind::DecodeFailure => write!(f, "decode failure"),
            ErrorKind::Io => write!(f, "io"),
            ErrorKind::TaxonomyLoad => write!(f, "taxonomy load"),
            ErrorKind::Extraction => write!(f, "extraction failure"),
            ErrorKind::Other => write!(f, "other"),
        }
    }
}
