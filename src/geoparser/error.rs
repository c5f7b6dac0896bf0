use thiserror::Error;

use crate::content::ContentError;
use crate::entity::EntityError;
use crate::resolution::ResolveError;

#[derive(Debug, Error)]
pub enum GeoparseError {
    #[error(transparent)]
    Entity(#[from] EntityError),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

pub type GeoparseResult<T> = Result<T, GeoparseError>;
