//! Geo-resolver library crate (used by the CLI and integration tests).
//!
//! Resolves place-name mentions extracted from text into single gazetteer
//! records: "Paris, France" rather than "Paris, Texas".
//!
//! # Public API Surface
//!
//! ## Resolution (Core)
//! - [`Resolver`] - Alias substitution, candidate generation, disambiguation
//! - [`CandidateGenerator`], [`CandidateSet`] - Ranked gazetteer lookups per entity
//! - [`Pipeline`], [`Pass`], [`PipelineOutcome`] - Ordered disambiguation passes
//! - [`ResolvedLocation`], [`add_or_increment`] - Deduplicated output with provenance
//!
//! ## Gazetteer
//! - [`GazetteerIndex`], [`ElasticsearchIndex`] - Search index access
//! - [`GazetteerRecord`], [`LocationCandidate`] - Row and candidate models
//! - [`ingest`], [`read_records`] - GeoNames dump ingestion
//!
//! ## Boundaries
//! - [`EntityExtractor`], [`HttpEntityExtractor`] - NER provider
//! - [`ContentExtractor`], [`HttpContentExtractor`] - Article text extraction
//! - [`Geoparser`] - Text/URL in, locations out
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod alias;
pub mod candidates;
pub mod config;
pub mod constants;
pub mod content;
pub mod disambiguation;
pub mod entity;
pub mod gazetteer;
pub mod geoparser;
pub mod resolution;

pub use alias::{AliasError, AliasResult, AliasTable};
pub use candidates::{CandidateGenerator, CandidateSet};
pub use config::{Config, ConfigError};
pub use constants::{QueryWeights, WeightsValidationError};
#[cfg(any(test, feature = "mock"))]
pub use content::MockContentExtractor;
pub use content::{
    ArticleContent, ContentError, ContentExtractor, ContentResult, HttpContentExtractor,
};
pub use disambiguation::{Pass, PassReport, Pipeline, PipelineOutcome, PipelineState};
#[cfg(any(test, feature = "mock"))]
pub use entity::MockEntityExtractor;
pub use entity::{
    EntityError, EntityExtractor, EntityResult, EntityType, GeoEntity, HttpEntityExtractor,
    Language, NamedEntity, geo_entities,
};
#[cfg(any(test, feature = "mock"))]
pub use gazetteer::MockGazetteerIndex;
pub use gazetteer::{
    BulkOutcome, ElasticsearchIndex, GazetteerError, GazetteerIndex, GazetteerRecord,
    GazetteerResult, GazetteerWriter, IngestReport, LocationCandidate, SearchHit, ingest,
    read_records,
};
pub use geoparser::{GeoparseError, GeoparseResult, Geoparser, TextLocations, UrlLocations};
pub use resolution::{
    Attribution, ResolveError, ResolveResult, ResolvedLocation, Resolver, add_or_increment,
};
