// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a run (or, for `MissingAnchor`, a section decode).
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("network error fetching {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} fetching {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("XML error: {0}")]
    Xml(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bad URL {url}: {detail}")]
    BadUrl { url: String, detail: String },

    #[error("entity name {0:?} is not a plain file name")]
    EntityName(String),

    #[error("{section}: {detail}")]
    MissingAnchor { section: &'static str, detail: String },

    #[error("{0}")]
    Usage(String),
}

impl ScrapeError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScrapeError::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
