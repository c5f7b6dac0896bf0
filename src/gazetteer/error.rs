use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by gazetteer index operations.
pub enum GazetteerError {
    /// Could not reach the index endpoint.
    #[error("failed to reach gazetteer index at '{url}': {message}")]
    ConnectionFailed {
        /// Endpoint URL.
        url: String,
        /// Error message.
        message: String,
    },

    /// The index answered with a non-success status.
    #[error("gazetteer query against '{index}' failed with status {status}: {message}")]
    QueryFailed {
        /// Index name.
        index: String,
        /// HTTP status code.
        status: u16,
        /// Response body or error message.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("invalid response from '{index}': {message}")]
    InvalidResponse {
        /// Index name.
        index: String,
        /// Error message.
        message: String,
    },

    /// Index creation or deletion failed.
    #[error("failed to prepare index '{index}': {message}")]
    CreateIndexFailed {
        /// Index name.
        index: String,
        /// Error message.
        message: String,
    },

    /// A `_bulk` request was rejected as a whole.
    #[error("bulk load into '{index}' failed: {message}")]
    BulkFailed {
        /// Index name.
        index: String,
        /// Error message.
        message: String,
    },

    /// Relevance weights rejected by [`QueryWeights::validate`](crate::constants::QueryWeights::validate).
    #[error("invalid query weights: {0}")]
    InvalidWeights(#[from] crate::constants::WeightsValidationError),

    /// The dump file could not be read.
    #[error("failed to read gazetteer rows: {0}")]
    Read(#[from] csv::Error),
}

pub type GazetteerResult<T> = Result<T, GazetteerError>;
