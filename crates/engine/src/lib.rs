//! # Recollect Engine
//!
//! The selection core: turns an unbounded, heterogeneous memory store
//! into a short, ordered text block that fits a character and line
//! budget.
//!
//! Pipeline per call (pure, single-pass, no persisted state):
//!
//! 1. **Policy gate** ([`policy`]) resolves which sources participate,
//!    their weight multipliers, and the output budget.
//! 2. **Normalizer** ([`normalize`]) tokenizes the query; an empty term
//!    set short-circuits to an empty result.
//! 3. **Collector** ([`collect`]) gathers cost-capped candidates from
//!    every allowed source, degrading gracefully per source.
//! 4. **Scorer** ([`score`]) computes a composite relevance score;
//!    non-positive scores are discarded.
//! 5. **Selector** ([`select`]) ranks, dedupes, and packs survivors
//!    into the bounded block.
//!
//! The entry point is [`ContextEngine::select_context`].

pub mod collect;
pub mod domain;
mod engine;
pub mod normalize;
pub mod policy;
pub mod score;
pub mod select;

pub use collect::CollectLimits;
pub use domain::{DomainClassifier, MarkerClassifier};
pub use engine::ContextEngine;
pub use policy::{Policy, SourceFilter, SourceWeights, PROFILE_ENV};
pub use score::ScoreParams;
pub use select::HEADER;
