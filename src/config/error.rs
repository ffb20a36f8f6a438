use std::num::ParseIntError;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors raised while loading or validating [`Config`](super::Config).
pub enum ConfigError {
    /// `STRIAE_PAGE_SIZE` was not a number.
    #[error("invalid page size value '{value}': {source}")]
    PageSizeParseError {
        /// Raw environment value.
        value: String,
        /// Parse failure.
        source: ParseIntError,
    },

    /// Page size must be at least 1.
    #[error("invalid page size '{value}': must be > 0")]
    InvalidPageSize {
        /// Raw environment value.
        value: String,
    },

    /// `STRIAE_REQUEST_TIMEOUT_SECS` was not a number.
    #[error("invalid request timeout value '{value}': {source}")]
    TimeoutParseError {
        /// Raw environment value.
        value: String,
        /// Parse failure.
        source: ParseIntError,
    },

    /// Backend URL was empty.
    #[error("invalid signature backend url '{value}'")]
    InvalidBackendUrl {
        /// Offending value.
        value: String,
    },
}
