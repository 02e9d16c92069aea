//! The policy gate — named retrieval profiles.
//!
//! A [`Policy`] decides which sources participate, how their base
//! weights are multiplied, and how large the assembled output may grow.
//! Profiles are fully specified at compile time; unknown names resolve
//! to the default with a warning rather than failing, and a source the
//! policy excludes is never queried at all (cost control, not an output
//! filter).
//!
//! Resolution precedence: explicit argument → `RECOLLECT_PROFILE`
//! environment variable → default (`chat`).

use recollect_core::Source;
use tracing::warn;

/// Environment variable consulted when no profile is passed explicitly.
pub const PROFILE_ENV: &str = "RECOLLECT_PROFILE";

/// Which sources a policy allows.
#[derive(Debug, Clone)]
pub enum SourceFilter {
    /// Wildcard: every source participates.
    All,
    /// Exactly these sources participate.
    Only(Vec<Source>),
}

impl SourceFilter {
    pub fn allows(&self, source: Source) -> bool {
        match self {
            SourceFilter::All => true,
            SourceFilter::Only(sources) => sources.contains(&source),
        }
    }
}

/// Per-source weight multipliers. Unspecified sources default to 1.0.
#[derive(Debug, Clone, Copy)]
pub struct SourceWeights {
    facts: f32,
    archive: f32,
    recent: f32,
    state_log: f32,
}

impl Default for SourceWeights {
    fn default() -> Self {
        Self {
            facts: 1.0,
            archive: 1.0,
            recent: 1.0,
            state_log: 1.0,
        }
    }
}

impl SourceWeights {
    pub fn uniform(weight: f32) -> Self {
        Self {
            facts: weight,
            archive: weight,
            recent: weight,
            state_log: weight,
        }
    }

    pub fn with(mut self, source: Source, weight: f32) -> Self {
        match source {
            Source::Facts => self.facts = weight,
            Source::Archive => self.archive = weight,
            Source::Recent => self.recent = weight,
            Source::StateLog => self.state_log = weight,
        }
        self
    }

    pub fn get(&self, source: Source) -> f32 {
        match source {
            Source::Facts => self.facts,
            Source::Archive => self.archive,
            Source::Recent => self.recent,
            Source::StateLog => self.state_log,
        }
    }
}

/// An immutable named retrieval configuration.
#[derive(Debug, Clone)]
pub struct Policy {
    /// Profile name, echoed in logs.
    pub id: &'static str,
    /// Sources allowed to produce candidates.
    pub sources: SourceFilter,
    /// Per-source base-weight multipliers.
    pub multipliers: SourceWeights,
    /// Maximum number of emitted fragment lines.
    pub top_k: usize,
    /// Maximum total characters in the assembled output.
    pub max_chars: usize,
    /// Treat every query as on-domain, skewing selection toward the
    /// specialist sources.
    pub domain_lock: bool,
    /// Prefix each output line with its raw score.
    pub debug: bool,
}

impl Policy {
    /// Isolation profile: only the highest-trust sources, sharply
    /// reduced budgets, every query treated as on-domain.
    pub fn focus() -> Self {
        Self {
            id: "focus",
            sources: SourceFilter::Only(vec![Source::Facts, Source::StateLog]),
            multipliers: SourceWeights::default()
                .with(Source::Facts, 1.0)
                .with(Source::StateLog, 0.7),
            top_k: 4,
            max_chars: 1400,
            domain_lock: true,
            debug: false,
        }
    }

    /// Guided exploration: facts plus state plus recent turns.
    pub fn explore() -> Self {
        Self {
            id: "explore",
            sources: SourceFilter::Only(vec![
                Source::Facts,
                Source::StateLog,
                Source::Recent,
            ]),
            multipliers: SourceWeights::default()
                .with(Source::Facts, 0.8)
                .with(Source::StateLog, 0.6)
                .with(Source::Recent, 0.4),
            top_k: 8,
            max_chars: 2200,
            domain_lock: false,
            debug: false,
        }
    }

    /// Fluid dialogue (the default): conversation-centric sources.
    pub fn chat() -> Self {
        Self {
            id: "chat",
            sources: SourceFilter::Only(vec![
                Source::Recent,
                Source::Archive,
                Source::StateLog,
            ]),
            multipliers: SourceWeights::default()
                .with(Source::Recent, 0.9)
                .with(Source::Archive, 0.9)
                .with(Source::StateLog, 0.6),
            top_k: 10,
            max_chars: 3000,
            domain_lock: false,
            debug: false,
        }
    }

    /// Audit profile: everything allowed, scores shown on every line.
    pub fn audit() -> Self {
        Self {
            id: "audit",
            sources: SourceFilter::All,
            multipliers: SourceWeights::uniform(0.5),
            top_k: 12,
            max_chars: 3500,
            domain_lock: false,
            debug: true,
        }
    }

    /// Look up a profile by name.
    pub fn named(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "focus" => Some(Self::focus()),
            "explore" => Some(Self::explore()),
            "chat" => Some(Self::chat()),
            "audit" => Some(Self::audit()),
            _ => None,
        }
    }

    /// Resolve a profile: explicit argument, then environment, then the
    /// default. Unknown names fall back to the default with a warning.
    pub fn resolve(requested: Option<&str>) -> Self {
        if let Some(name) = requested {
            if let Some(policy) = Self::named(name) {
                return policy;
            }
            warn!(profile = name, "Unknown profile requested, using default");
            return Self::default();
        }

        if let Ok(name) = std::env::var(PROFILE_ENV) {
            if let Some(policy) = Self::named(&name) {
                return policy;
            }
            if !name.trim().is_empty() {
                warn!(profile = %name, "Unknown profile in {PROFILE_ENV}, using default");
            }
        }

        Self::default()
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::chat()
    }
}
