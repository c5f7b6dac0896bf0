use thiserror::Error;

#[derive(Debug, Error)]
pub enum EntityError {
    /// The language code has no NER model behind it. Not retried.
    #[error("unknown language: '{code}'")]
    UnknownLanguage { code: String },

    #[error("failed to reach NER provider at '{url}': {message}")]
    ConnectionFailed { url: String, message: String },

    #[error("NER provider returned status {status}: {message}")]
    ProviderFailed { status: u16, message: String },

    #[error("invalid NER response: {message}")]
    InvalidResponse { message: String },
}

pub type EntityResult<T> = Result<T, EntityError>;
