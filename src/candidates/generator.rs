use futures_util::future::try_join_all;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::constants::DEFAULT_RESULT_LIMIT;
use crate::entity::GeoEntity;
use crate::gazetteer::{GazetteerIndex, GazetteerResult, LocationCandidate, normalize_query};

/// An entity paired with its ranked candidates, best first.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSet {
    pub entity: GeoEntity,
    pub candidates: Vec<LocationCandidate>,
}

impl CandidateSet {
    pub fn new(entity: GeoEntity, candidates: Vec<LocationCandidate>) -> Self {
        Self { entity, candidates }
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

pub struct CandidateGenerator<G: GazetteerIndex> {
    index: G,
    limit: usize,
}

impl<G: GazetteerIndex> std::fmt::Debug for CandidateGenerator<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateGenerator")
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

impl<G: GazetteerIndex> CandidateGenerator<G> {
    pub fn new(index: G) -> Self {
        Self::with_limit(index, DEFAULT_RESULT_LIMIT)
    }

    pub fn with_limit(index: G, limit: usize) -> Self {
        Self {
            index,
            limit: limit.max(1),
        }
    }

    pub fn from_config(index: G, config: &Config) -> Self {
        Self::with_limit(index, config.result_limit)
    }

    pub fn index(&self) -> &G {
        &self.index
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Ranked candidates for one entity. Blank text yields no candidates.
    #[instrument(skip(self, entity), fields(text = %entity.text))]
    pub async fn generate(&self, entity: &GeoEntity) -> GazetteerResult<Vec<LocationCandidate>> {
        let query = normalize_query(&entity.text);
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let hits = self.index.search(&query, self.limit).await?;
        let candidates: Vec<LocationCandidate> = hits
            .into_iter()
            .map(|hit| LocationCandidate::from_record(hit.record, &query, hit.score))
            .collect();

        debug!(
            candidates = candidates.len(),
            exact = candidates.iter().filter(|c| c.exact_match).count(),
            "Candidates generated"
        );
        Ok(candidates)
    }

    /// Generates candidates for every entity concurrently, preserving input order.
    pub async fn generate_all(&self, entities: Vec<GeoEntity>) -> GazetteerResult<Vec<CandidateSet>> {
        let lookups = entities.into_iter().map(|entity| async move {
            let candidates = self.generate(&entity).await?;
            Ok::<_, crate::gazetteer::GazetteerError>(CandidateSet::new(entity, candidates))
        });

        try_join_all(lookups).await
    }

    /// Fetches a single candidate by gazetteer id, with no query-dependent match flags.
    pub async fn lookup(&self, id: u64) -> GazetteerResult<Option<LocationCandidate>> {
        Ok(self
            .index
            .by_id(id)
            .await?
            .map(|record| LocationCandidate::from_record(record, "", 0.0)))
    }
}
