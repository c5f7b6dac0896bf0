use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::aggregate::ResolvedLocation;
use super::error::ResolveResult;
use crate::alias::AliasTable;
use crate::candidates::CandidateGenerator;
use crate::disambiguation::{Pipeline, PipelineOutcome};
use crate::entity::GeoEntity;
use crate::gazetteer::GazetteerIndex;

/// Entry point for turning place-name mentions into gazetteer locations.
///
/// Runs alias substitution, concurrent candidate generation, then the
/// disambiguation pipeline. The output is deterministic for a fixed index and
/// input order.
pub struct Resolver<G: GazetteerIndex> {
    generator: CandidateGenerator<G>,
    aliases: Arc<AliasTable>,
    pipeline: Pipeline,
}

impl<G: GazetteerIndex> std::fmt::Debug for Resolver<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("generator", &self.generator)
            .field("aliases", &self.aliases.len())
            .field("pipeline", &self.pipeline)
            .finish()
    }
}

impl<G: GazetteerIndex> Resolver<G> {
    pub fn new(generator: CandidateGenerator<G>, aliases: Arc<AliasTable>) -> Self {
        Self {
            generator,
            aliases,
            pipeline: Pipeline::default(),
        }
    }

    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn generator(&self) -> &CandidateGenerator<G> {
        &self.generator
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Resolves `entities` to distinct locations, in first-pick order.
    pub async fn resolve(&self, entities: Vec<GeoEntity>) -> ResolveResult<Vec<ResolvedLocation>> {
        Ok(self.resolve_detailed(entities).await?.resolved)
    }

    /// Like [`resolve`](Self::resolve), but also returns leftovers and per-pass counts.
    #[instrument(skip(self, entities), fields(entities = entities.len()))]
    pub async fn resolve_detailed(
        &self,
        mut entities: Vec<GeoEntity>,
    ) -> ResolveResult<PipelineOutcome> {
        let substituted = self.aliases.apply_all(&mut entities);
        debug!(substituted, "Aliases applied");

        let sets = self.generator.generate_all(entities).await?;
        let total = sets.len();
        let (sets, empty): (Vec<_>, Vec<_>) = sets.into_iter().partition(|s| !s.is_empty());
        if !empty.is_empty() {
            debug!(
                dropped = empty.len(),
                texts = ?empty.iter().map(|s| s.entity.text.as_str()).collect::<Vec<_>>(),
                "Entities without candidates dropped"
            );
        }

        let outcome = self.pipeline.run(sets);

        info!(
            entities = total,
            no_candidates = empty.len(),
            locations = outcome.resolved.len(),
            unresolved = outcome.unresolved.len(),
            "Resolution complete"
        );
        Ok(outcome)
    }
}
