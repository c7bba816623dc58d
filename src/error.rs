// ============================================================
// Library Error Type
// ============================================================
// Every data-pipeline step (corpus loading, embedding parsing,
// matrix building, splitting) returns this error type.
// The application and CLI layers wrap it in anyhow::Error
// and attach context with .with_context(...).
//
// Reference: thiserror crate documentation
//            Rust Book §9 (Error Handling)

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corpus directory '{}' does not exist or is not a directory", .0.display())]
    CorpusNotFound(PathBuf),

    #[error("cannot decode '{}' as UTF-8", .0.display())]
    Decode(PathBuf),

    #[error("line {line}: cannot parse coefficient '{token}' as a number (line: '{content}')")]
    Parse {
        line:    usize,
        token:   String,
        content: String,
    },

    #[error("line {line}: expected {expected} coefficients, found {found} (line: '{content}')")]
    DimensionMismatch {
        line:     usize,
        expected: usize,
        found:    usize,
        content:  String,
    },

    #[error("line {line}: not valid UTF-8")]
    InvalidUtf8 { line: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("serialisation error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl Error {
    /// Line number (1-based) of a malformed embedding line, if this is one
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Parse { line, .. }
            | Error::DimensionMismatch { line, .. }
            | Error::InvalidUtf8 { line } => Some(*line),
            _ => None,
        }
    }
}
