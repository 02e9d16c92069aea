//! # Recollect Core
//!
//! Domain types, record types, and error definitions for the Recollect
//! context-retrieval engine. This crate has **zero framework dependencies**
//! — it defines the domain model that the store and engine crates
//! implement against.
//!
//! ## Design Philosophy
//!
//! Retrieval is a read-only, per-call pipeline: stores produce records,
//! the collector turns them into [`Fragment`]s, the scorer attaches a
//! relevance score, and the assembler packs the survivors into a bounded
//! text block. Everything that crosses a crate boundary is defined here,
//! so stores and the engine can be tested in isolation.

pub mod error;
pub mod fragment;
pub mod record;
pub mod state;

// Re-export key types at crate root for ergonomics
pub use error::StoreError;
pub use fragment::{Fragment, ScoredFragment, Source};
pub use record::{FactFile, FactValue, StateRecord, TurnRecord};
pub use state::StateSnapshot;
