//! Fragments and their sources.
//!
//! A [`Fragment`] is one candidate unit of retrievable text, tagged with
//! the [`Source`] it came from and a source-defined base trust weight.
//! Fragments are produced fresh on every retrieval call; nothing here is
//! cached between calls.

use serde::{Deserialize, Serialize};

/// A named origin of fragments. The set is fixed: adding a source is a
/// code change, not configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Source {
    /// Durable categorized facts, including canonical domain documents.
    Facts,
    /// The on-disk conversation archive (older turns).
    Archive,
    /// The in-process rolling window of recent turns.
    Recent,
    /// The append-only log of derived affective/state records.
    StateLog,
}

impl Source {
    /// All sources, in collection order.
    pub const ALL: [Source; 4] = [
        Source::Facts,
        Source::StateLog,
        Source::Recent,
        Source::Archive,
    ];

    /// The stable string tag used in policies, logs, and output lines.
    pub fn tag(self) -> &'static str {
        match self {
            Source::Facts => "facts",
            Source::Archive => "archive",
            Source::Recent => "recent",
            Source::StateLog => "state-log",
        }
    }

    /// Tie-break priority when two fragments score identically.
    /// Lower is more trusted.
    pub fn priority(self) -> u8 {
        match self {
            Source::Facts => 0,
            Source::StateLog => 1,
            Source::Recent => 2,
            Source::Archive => 3,
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// One candidate unit of text pulled from a source.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    /// Where this text came from.
    pub source: Source,
    /// The raw candidate text.
    pub text: String,
    /// Source-defined base trust weight, 0.0–1.0, before any policy
    /// multiplier is applied.
    pub base_weight: f32,
}

impl Fragment {
    pub fn new(source: Source, text: impl Into<String>, base_weight: f32) -> Self {
        Self {
            source,
            text: text.into(),
            base_weight: base_weight.clamp(0.0, 1.0),
        }
    }
}

/// A fragment paired with its computed relevance score.
///
/// Only fragments with `score > 0` survive scoring; anything at or below
/// zero is discarded before ranking.
#[derive(Debug, Clone)]
pub struct ScoredFragment {
    pub fragment: Fragment,
    pub score: f32,
}
