//! Place-name mentions and the NER provider boundary.

pub mod error;
pub mod provider;
pub mod types;


pub use error::{EntityError, EntityResult};
#[cfg(any(test, feature = "mock"))]
pub use provider::MockEntityExtractor;
pub use provider::{EntityExtractor, HttpEntityExtractor};
pub use types::{EntityType, GeoEntity, Language, NamedEntity};

/// Keeps only geographic spans, in input order.
pub fn geo_entities(entities: &[NamedEntity]) -> Vec<GeoEntity> {
    entities.iter().filter_map(GeoEntity::from_named).collect()
}
