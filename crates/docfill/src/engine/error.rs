//! Error types for loading documents and reading values.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that occur while loading a document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading a document.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors that occur while converting raw input into a typed value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// The input is not a date in the expected format.
    #[error("invalid date '{input}', expected format {expected}")]
    InvalidDate { input: String, expected: String },

    /// The input is not an integer or decimal number.
    #[error("invalid number '{input}'")]
    InvalidNumber { input: String },

    /// A value failed to convert for a specific field.
    #[error("value for '{key}': {source}")]
    Field {
        key: String,
        #[source]
        source: Box<ValueError>,
    },
}
