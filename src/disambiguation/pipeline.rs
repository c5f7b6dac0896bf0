use serde::Serialize;
use tracing::debug;

use super::pass::Pass;
use crate::candidates::CandidateSet;
use crate::resolution::{ResolvedLocation, add_or_increment};

/// Entity counts around one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PassReport {
    pub pass: Pass,
    /// Unresolved entities going in.
    pub before: usize,
    /// Unresolved entities coming out. Never more than `before`.
    pub after: usize,
}

impl PassReport {
    pub fn resolved(&self) -> usize {
        self.before - self.after
    }
}

/// State handed from one pass to the next.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineState {
    pub unresolved: Vec<CandidateSet>,
    pub resolved: Vec<ResolvedLocation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutcome {
    pub resolved: Vec<ResolvedLocation>,
    /// Entities no pass picked for. Empty when the catch-all pass runs.
    pub unresolved: Vec<CandidateSet>,
    pub reports: Vec<PassReport>,
}

/// An ordered list of passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    passes: Vec<Pass>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            passes: Pass::ALL.to_vec(),
        }
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// A pipeline running only `passes`, in the given order.
    pub fn with_passes(passes: &[Pass]) -> Self {
        Self {
            passes: passes.to_vec(),
        }
    }

    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    /// Runs every pass in order. Sets without candidates are dropped up front.
    pub fn run(&self, sets: Vec<CandidateSet>) -> PipelineOutcome {
        let mut state = PipelineState {
            unresolved: sets.into_iter().filter(|s| !s.is_empty()).collect(),
            resolved: Vec::new(),
        };
        let mut reports = Vec::with_capacity(self.passes.len());

        for &pass in &self.passes {
            let before = state.unresolved.len();
            state = run_pass(pass, state);
            reports.push(PassReport {
                pass,
                before,
                after: state.unresolved.len(),
            });
        }

        PipelineOutcome {
            resolved: state.resolved,
            unresolved: state.unresolved,
            reports,
        }
    }
}

/// Runs one pass over every unresolved set in order. Picks made earlier in the
/// pass are visible to later entities.
pub fn run_pass(pass: Pass, state: PipelineState) -> PipelineState {
    let PipelineState {
        unresolved,
        mut resolved,
    } = state;
    let mut remaining = Vec::with_capacity(unresolved.len());

    for set in unresolved {
        let pick = pass.select(&set, &resolved).cloned();
        match pick {
            Some(candidate) => {
                debug!(
                    pass = pass.name(),
                    entity = %set.entity.text,
                    id = candidate.id,
                    name = %candidate.name,
                    country = candidate.country_code.as_deref().unwrap_or("-"),
                    "Picked"
                );
                add_or_increment(set.entity, candidate, &mut resolved, pass);
            }
            None => remaining.push(set),
        }
    }

    PipelineState {
        unresolved: remaining,
        resolved,
    }
}
