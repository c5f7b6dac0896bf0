//! Article content extractor boundary.

pub mod error;
pub mod extractor;


pub use error::{ContentError, ContentResult};
#[cfg(any(test, feature = "mock"))]
pub use extractor::MockContentExtractor;
pub use extractor::{ArticleContent, ContentExtractor, HttpContentExtractor};
