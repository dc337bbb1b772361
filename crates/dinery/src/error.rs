use thiserror::Error;

#[derive(Error, Debug)]
pub enum DineryError {
    #[error("Data error: {0}")]
    Data(#[from] dinery_data::DataError),
    #[error("Search error: {0}")]
    SearchError(#[from] crate::search::SearchError),
    #[error("Session error: {0}")]
    SessionError(#[from] crate::session::SessionError),
    #[error("Listing error: {0}")]
    ListingError(#[from] crate::manage::ListingError),
    #[cfg(feature = "places")]
    #[error("Lookup error: {0}")]
    LookupError(#[from] crate::lookup::LookupError),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Init Logging error: {0}")]
    InitLoggingError(#[from] tracing_subscriber::filter::ParseError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, DineryError>;
