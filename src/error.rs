use thiserror::Error;

/// Errors raised while fetching a page or loading configuration.
///
/// These never cross the public `extract` boundary; the pipeline folds them
/// into `ExtractionOutcome::TransportError`.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Failed to fetch or read the page
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// Error parsing HTTP headers
    #[error("Header parse error: {0}")]
    HeaderError(#[from] reqwest::header::InvalidHeaderValue),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
