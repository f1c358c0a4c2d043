//! Error types shared by the loaders, analyzers and emitters.

use std::io;
use std::num::ParseIntError;

use thiserror::Error;

/// Failures that abort a report run.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("malformed input '{path}': {reason}")]
    MalformedInput { path: String, reason: String },
    #[error("record '{id}': field '{field}' is not an integer: {value:?}")]
    FieldParse {
        id: String,
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("i/o failure on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("csv failure on '{path}': {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, ReportError>;
