use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the roster analyzer.
#[derive(Error, Debug)]
pub enum RosterError {
    /// The grid does not match the expected layout (too few rows, no usable
    /// date row, and so on). Non-recoverable for the current file; no partial
    /// record set is ever published.
    #[error("Cannot process this file: {0}")]
    MalformedGrid(String),

    /// A date-column token could not be parsed or resolved to a real
    /// calendar date.
    #[error("Unparseable date token: {0}")]
    DateToken(String),

    /// A retrieval URL could not be translated to a downloadable form.
    #[error("Invalid roster URL: {0}")]
    InvalidUrl(String),

    /// An admin-hour config document is structurally unusable. Individual
    /// out-of-range entries are dropped and counted, not raised.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The spreadsheet reader rejected the workbook.
    #[error("Failed to read workbook: {0}")]
    Workbook(String),

    /// The CSV reader rejected the file.
    #[error("Failed to read CSV: {0}")]
    Csv(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the roster crates.
pub type Result<T> = std::result::Result<T, RosterError>;
