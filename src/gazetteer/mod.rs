//! GeoNames gazetteer: record model, search index access, and dump ingestion.

pub mod client;
pub mod error;
pub mod ingest;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;
pub mod query;


pub use client::{BulkOutcome, ElasticsearchIndex, GazetteerIndex, GazetteerWriter};
pub use error::{GazetteerError, GazetteerResult};
pub use ingest::{IngestReport, RecordReader, ingest, parse_row, read_records};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockGazetteerIndex;
pub use model::{GazetteerRecord, LocationCandidate, SearchHit, normalize_query};
