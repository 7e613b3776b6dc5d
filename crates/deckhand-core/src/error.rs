//! Error types for deckhand-core

use thiserror::Error;

/// Result type alias for aggregation operations
pub type Result<T> = std::result::Result<T, AggregateError>;

/// Failure of a single upstream table read.
///
/// Never caught or retried inside the aggregator; one failed read fails the
/// whole invocation.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (connect, timeout, TLS)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the data store (auth, rate limit, unknown table)
    #[error("airtable error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body was not a valid records page
    #[error("invalid records page: {0}")]
    Decode(#[from] serde_json::Error),

    /// Endpoint URL could not be built
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

/// Main error type for card aggregation
#[derive(Error, Debug)]
pub enum AggregateError {
    /// One of the four table reads failed
    #[error("upstream fetch failed: {0}")]
    Upstream(#[from] FetchError),

    /// A relational field was present but not a list of record ids
    #[error("field {field:?} on record {record_id} in {table} is not a list of record ids")]
    MalformedField {
        table: &'static str,
        record_id: String,
        field: &'static str,
    },
}
