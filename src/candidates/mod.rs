//! Candidate generation: one ranked gazetteer lookup per entity.
//!
//! Lookups are read-only and independent, so [`CandidateGenerator::generate_all`]
//! issues them concurrently and joins every result before returning. Any index
//! failure fails the whole batch; an empty candidate list only ever means "no
//! match".

pub mod generator;


pub use generator::{CandidateGenerator, CandidateSet};
