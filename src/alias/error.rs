use std::path::PathBuf;
use thiserror::Error;

/// Alias table load failures. Fatal at startup.
#[derive(Debug, Error)]
pub enum AliasError {
    #[error("failed to read alias table {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("alias table {path} is missing column '{column}'")]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("alias table {path} contains no entries")]
    Empty { path: PathBuf },
}

pub type AliasResult<T> = Result<T, AliasError>;
