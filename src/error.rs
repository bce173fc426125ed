use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("Unexpected HTTP status {status} for URL: {url}")]
    TransportError {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Required document not found: {0}")]
    MissingDocument(String),

    #[error("Malformed document {}: {source}", path.display())]
    MalformedDocument {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}
