use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to reach content extractor at '{url}': {message}")]
    ConnectionFailed { url: String, message: String },

    #[error("content extraction for '{url}' failed with status {status}: {message}")]
    ExtractionFailed {
        url: String,
        status: u16,
        message: String,
    },

    #[error("invalid content response: {message}")]
    InvalidResponse { message: String },

    /// Extracted text was too short to count as article content.
    #[error("extracted text for '{url}' is too short ({length} <= {minimum} chars)")]
    TooShort {
        url: String,
        length: usize,
        minimum: usize,
    },
}

pub type ContentResult<T> = Result<T, ContentError>;
