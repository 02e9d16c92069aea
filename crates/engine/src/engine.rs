//! The engine façade — one call from query to assembled block.
//!
//! [`ContextEngine`] bundles the four store handles with a domain
//! classifier, scoring parameters, and collection limits. It holds no
//! mutable state of its own, so one engine can serve concurrent calls
//! from independent threads as long as the stores allow concurrent
//! reads (they do: files are opened read-only per call, the recent
//! window snapshots behind its own lock).

use recollect_core::{ScoredFragment, StateSnapshot};
use recollect_stores::{ConversationArchive, FactStore, RecentWindow, StateLog};
use std::sync::Arc;
use tracing::debug;

use crate::collect::{self, CollectLimits};
use crate::domain::{DomainClassifier, MarkerClassifier};
use crate::normalize;
use crate::policy::Policy;
use crate::score::{self, ScoreParams};
use crate::select;

/// The retrieval engine. Construct once with explicit store handles and
/// reuse across calls.
pub struct ContextEngine {
    facts: FactStore,
    archive: ConversationArchive,
    recent: Arc<RecentWindow>,
    state_log: StateLog,
    classifier: Box<dyn DomainClassifier>,
    params: ScoreParams,
    limits: CollectLimits,
}

impl ContextEngine {
    /// Create an engine with default scoring parameters, default
    /// collection limits, and no recognized specialist domain.
    pub fn new(
        facts: FactStore,
        archive: ConversationArchive,
        recent: Arc<RecentWindow>,
        state_log: StateLog,
    ) -> Self {
        Self {
            facts,
            archive,
            recent,
            state_log,
            classifier: Box::new(MarkerClassifier::default()),
            params: ScoreParams::default(),
            limits: CollectLimits::default(),
        }
    }

    /// Swap in a domain classifier.
    pub fn with_classifier(mut self, classifier: Box<dyn DomainClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Override the scoring constants.
    pub fn with_params(mut self, params: ScoreParams) -> Self {
        self.params = params;
        self
    }

    /// Override the collection cost bounds.
    pub fn with_limits(mut self, limits: CollectLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Select a budgeted context block for one query.
    ///
    /// Returns plain text ready for prompt inclusion; the empty string
    /// means "contribute nothing" and is a valid, expected result, not
    /// an error. There is no failure mode: unavailable sources degrade
    /// to zero candidates.
    pub fn select_context(
        &self,
        query: &str,
        state: Option<&StateSnapshot>,
        policy: &Policy,
    ) -> String {
        let query_terms = normalize::terms(query);
        if query_terms.is_empty() {
            debug!(profile = policy.id, "Query has no qualifying terms, contributing nothing");
            return String::new();
        }

        let domain_query = policy.domain_lock || self.classifier.is_domain(&query_terms);

        let pool = collect::collect(
            &self.facts,
            &self.archive,
            &self.recent,
            &self.state_log,
            policy,
            &self.limits,
        );
        let candidates = pool.len();

        let mut scored: Vec<ScoredFragment> = Vec::with_capacity(pool.len());
        for fragment in pool {
            let multiplier = policy.multipliers.get(fragment.source);
            let score = score::score_fragment(
                &fragment,
                &query_terms,
                state,
                multiplier,
                domain_query,
                self.classifier.as_ref(),
                &self.params,
            );
            if score > 0.0 {
                scored.push(ScoredFragment { fragment, score });
            }
        }

        debug!(
            profile = policy.id,
            candidates,
            positive = scored.len(),
            domain_query,
            "Scored candidate pool"
        );

        select::assemble(scored, policy)
    }
}
