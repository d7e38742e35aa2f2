use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Cannot open file {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed line {line_number} in {}: {source}", path.display())]
    MalformedLine {
        path: PathBuf,
        line_number: usize,
        #[source]
        source: ParseError,
    },

    #[error("Region capacity of {limit} exceeded by region '{region}'")]
    CapacityExceeded { limit: usize, region: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reasons a single TDV line is rejected by the parser.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("expected {expected} tab-separated fields, found {found}")]
    FieldCountMismatch { expected: usize, found: usize },

    #[error("invalid numeric value '{value}' in field '{field}'")]
    NumericFieldInvalid { field: &'static str, value: String },

    #[error("empty region code")]
    EmptyRegionCode,
}
