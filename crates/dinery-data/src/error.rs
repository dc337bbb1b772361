use polars::prelude::PolarsError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DataError>;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[cfg(feature = "remote")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[cfg(feature = "remote")]
    #[error("Blocking listings download called inside an async runtime; await `fetch_listings` instead")]
    InsideAsyncRuntime,
    #[error("No listings snapshot found in {0}")]
    ListingsFileNotFound(String),
    #[error("Unsupported listings format: {0}")]
    UnsupportedFormat(String),
    #[error("Remote listings source requested but the remote feature is disabled")]
    RemoteDisabled,
}
