//! # Recollect Stores
//!
//! Explicit store handles for the four retrieval sources. Each handle is
//! constructed with its path (or capacity) up front and passed into the
//! engine — no ambient globals, so tests can point the engine at
//! throwaway fixtures and concurrent calls never share mutable state.
//!
//! On-disk formats:
//! - Facts: one JSON document of categorized key→value entries.
//! - Archive: JSONL, one [`TurnRecord`] per line, append-only.
//! - State log: JSONL, one [`StateRecord`] per line, append-only.
//!
//! All reads are bounded (byte ceilings, line windows, tail limits) so
//! retrieval cost stays flat no matter how large the files grow.
//!
//! [`TurnRecord`]: recollect_core::TurnRecord
//! [`StateRecord`]: recollect_core::StateRecord

pub mod archive;
pub mod facts;
pub mod statelog;
pub mod window;

pub use archive::ConversationArchive;
pub use facts::FactStore;
pub use statelog::StateLog;
pub use window::RecentWindow;
