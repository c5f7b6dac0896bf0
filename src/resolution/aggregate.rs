use serde::{Deserialize, Serialize};

use crate::disambiguation::Pass;
use crate::entity::GeoEntity;
use crate::gazetteer::LocationCandidate;

/// Which entity resolved to a location, and in which pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribution {
    pub entity: GeoEntity,
    pub pass: Pass,
}

/// A distinct gazetteer location picked for one or more entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    #[serde(flatten)]
    pub candidate: LocationCandidate,
    /// Always equal to `attributions.len()`.
    pub usage_count: usize,
    pub attributions: Vec<Attribution>,
}

impl ResolvedLocation {
    pub fn new(entity: GeoEntity, candidate: LocationCandidate, pass: Pass) -> Self {
        Self {
            candidate,
            usage_count: 1,
            attributions: vec![Attribution { entity, pass }],
        }
    }

    pub fn id(&self) -> u64 {
        self.candidate.id
    }

    pub fn country_code(&self) -> Option<&str> {
        self.candidate.country_code.as_deref()
    }

    pub fn admin1_code(&self) -> Option<&str> {
        self.candidate.admin1_code.as_deref()
    }
}

/// Records a pick. Increments the existing entry for the candidate's id, or
/// appends a new one. Returns `true` when a new entry was created.
///
/// This is the only place the resolved list grows.
pub fn add_or_increment(
    entity: GeoEntity,
    candidate: LocationCandidate,
    resolved: &mut Vec<ResolvedLocation>,
    pass: Pass,
) -> bool {
    match resolved.iter_mut().find(|r| r.id() == candidate.id) {
        Some(existing) => {
            existing.usage_count += 1;
            existing.attributions.push(Attribution { entity, pass });
            false
        }
        None => {
            resolved.push(ResolvedLocation::new(entity, candidate, pass));
            true
        }
    }
}
