//! Disambiguation: ordered heuristic passes over unresolved candidate sets.
//!
//! # Pass order
//!
//! 1. [`Pass::LargeArea`]
//! 2. [`Pass::FuzzyCountry`]
//! 3. [`Pass::ExactAdmin1`]
//! 4. [`Pass::ExactColocation`]
//! 5. [`Pass::TopColocation`]
//! 6. [`Pass::TopAdminCity`]
//! 7. [`Pass::TopPreferringColocated`]
//!
//! Each pass sees only the sets earlier passes left unresolved, plus every
//! location resolved so far. A set is removed as soon as a pass picks for it,
//! so no entity is resolved twice. Within a pass, entities are visited in input
//! order and earlier picks become context for later ones.

pub mod pass;
pub mod pipeline;
pub mod predicates;


pub use pass::Pass;
pub use pipeline::{PassReport, Pipeline, PipelineOutcome, PipelineState, run_pass};
