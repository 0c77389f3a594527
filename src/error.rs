//! Error types shared by the packer and the packed-embedding reader.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to parse a single line of a text embedding file.
#[derive(Debug, Error, PartialEq)]
pub enum LineError {
    /// A vector component that is not a floating point number.
    #[error("token {token:?} in column {column} is not a number")]
    Number { token: String, column: usize },
}

/// Errors raised while packing, reading back or querying embeddings.
#[derive(Debug, Error)]
pub enum PackError {
    /// Raised when an input cannot be read or an output cannot be written.
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Raised when a line contains a malformed vector component.
    #[error("{source_name}:{line}: {source}")]
    Parse {
        source_name: String,
        line: usize,
        #[source]
        source: LineError,
    },
    /// Raised when a vector length differs from the first parsed line.
    #[error(
        "{source_name}:{line}: vector for {word:?} has {found} components, expected {expected}"
    )]
    Dimension {
        source_name: String,
        line: usize,
        word: String,
        expected: usize,
        found: usize,
    },
    /// Raised when the word list cannot be encoded or decoded.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// Raised when a values buffer cannot be reshaped into one row per word.
    #[error("values buffer of {len} bytes does not hold {word_count} rows of f32")]
    BufferLength { len: usize, word_count: usize },
    /// Raised when a query names a word outside the vocabulary.
    #[error("word {0:?} is not in the vocabulary")]
    UnknownWord(String),
}

impl PackError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
