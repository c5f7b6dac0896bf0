use thiserror::Error;

use crate::gazetteer::GazetteerError;

/// Errors returned by [`Resolver::resolve`](super::Resolver::resolve).
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Candidate generation failed for at least one entity.
    #[error("candidate generation failed: {0}")]
    Gazetteer(#[from] GazetteerError),
}

pub type ResolveResult<T> = Result<T, ResolveError>;
