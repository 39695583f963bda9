extern crate thiserror;

use std::io;

use thiserror::Error;

/// Error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Source(#[from] SourceError),

    #[error("{0}")]
    Store(#[from] StoreError),
}

/// Structural failures while extracting the embedded lexical table.
///
/// Any of these aborts the whole run; the extractor fails loudly rather
/// than silently truncating a malformed artifact.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Anchor `{0}` not found in source artifact")]
    AnchorNotFound(String),

    #[error("No opening brace after anchor `{0}`")]
    TableStartNotFound(String),

    #[error("No closing `}};` after table start")]
    TableEndNotFound,

    #[error("Embedded table is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Dictionary store and book corpus I/O failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("File I/O Error: {0}")]
    File(io::ErrorKind),

    #[error("Serialization Error: {0}")]
    Serialization(String),
}

impl From<io::Error> for StoreError {
    fn from(error: io::Error) -> Self {
        StoreError::File(error.kind())
    }
}
