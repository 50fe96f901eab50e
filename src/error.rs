//! Error type shared by the reader, the field coercions and the writer

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while opening, reading or writing delimited text.
///
/// Running out of rows is not an error: [`Reader::next`](crate::Reader::next)
/// reports it by returning `false`.
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("cannot open file '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid {target} literal: {text:?}")]
    InvalidNumber { text: String, target: &'static str },
    #[error("field index {index} out of range for row of {len} fields")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("no column named {0:?}")]
    KeyNotFound(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CsvError>;
