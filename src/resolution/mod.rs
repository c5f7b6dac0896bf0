//! Resolution: the aggregated output of the pipeline and the end-to-end resolver.

pub mod aggregate;
pub mod error;
pub mod resolver;


pub use aggregate::{Attribution, ResolvedLocation, add_or_increment};
pub use error::{ResolveError, ResolveResult};
pub use resolver::Resolver;
