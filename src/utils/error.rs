// src/utils/error.rs
use thiserror::Error;

// Errors raised while talking to etfdb.com or interpreting its responses
#[derive(Error, Debug)]
pub enum EtfdbError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Connection failures and timeouts from reqwest

    #[error("Connection failed: {0}")]
    Connection(String), // Transport-class failure from a non-reqwest transport

    #[error("response {}: {reason}", .status.as_u16())]
    Http {
        status: reqwest::StatusCode,
        reason: String,
    },

    #[error("{0} doesn't exist in ETF Database")]
    InvalidTicker(String),

    #[error("Invalid JSON in etfdb response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Screener page {page} failed: {source}")]
    PageFailed {
        page: u32,
        #[source]
        source: Box<EtfdbError>,
    },
}

impl EtfdbError {
    /// Builds an `Http` error, filling the reason from the canonical status text.
    pub fn http(status: reqwest::StatusCode) -> Self {
        EtfdbError::Http {
            status,
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }

    /// True for connection/timeout failures, as opposed to bad statuses or payloads.
    pub fn is_transport(&self) -> bool {
        matches!(self, EtfdbError::Network(_) | EtfdbError::Connection(_))
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Could not read symbol catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Symbol catalog is not a JSON array of objects with a `symbol` field: {0}")]
    Format(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("etfdb interaction failed: {0}")]
    Etfdb(#[from] EtfdbError),

    #[error("Symbol catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
