//! Relevance scoring — a composite heuristic over lexical overlap,
//! source trust, state affinity, and length cost.
//!
//! Every fragment is scored independently against the tokenized query
//! and the optional state snapshot. A non-positive score means the
//! fragment is discarded before ranking.

use recollect_core::{Fragment, StateSnapshot};
use std::collections::BTreeSet;

use crate::domain::DomainClassifier;
use crate::normalize;

/// Scoring constants. These magnitudes were tuned empirically in the
/// original system; treat them as defaults to re-tune per deployment,
/// not as precise values.
#[derive(Debug, Clone)]
pub struct ScoreParams {
    /// Added when the state's mode tag appears verbatim in the fragment.
    pub state_tag_bonus: f32,
    /// Resonance bonus = resonance × scale, capped below.
    pub resonance_scale: f32,
    /// Ceiling for the resonance bonus.
    pub resonance_cap: f32,
    /// Added when both query and fragment are domain-marked.
    pub domain_bonus: f32,
    /// Subtracted when the query is domain-marked but the fragment is
    /// not — steers toward on-domain material without excluding the rest.
    pub domain_penalty: f32,
    /// Length cost coefficient.
    pub length_cost: f32,
    /// Reference length (characters) at which the cost saturates.
    pub length_ref: f32,
}

impl Default for ScoreParams {
    fn default() -> Self {
        Self {
            state_tag_bonus: 0.3,
            resonance_scale: 0.5,
            resonance_cap: 0.4,
            domain_bonus: 0.35,
            domain_penalty: 0.15,
            length_cost: 0.3,
            length_ref: 600.0,
        }
    }
}

/// Score one fragment. `multiplier` is the policy's weight multiplier
/// for the fragment's source; `domain_query` says whether the query was
/// classified (or policy-locked) as on-domain.
///
/// Returns a negative score for fragments with no qualifying terms or no
/// overlap, so callers can uniformly discard anything ≤ 0.
pub fn score_fragment(
    fragment: &Fragment,
    query_terms: &BTreeSet<String>,
    state: Option<&StateSnapshot>,
    multiplier: f32,
    domain_query: bool,
    classifier: &dyn DomainClassifier,
    params: &ScoreParams,
) -> f32 {
    let fragment_terms = normalize::terms(&fragment.text);
    if fragment_terms.is_empty() {
        return -1.0;
    }

    let overlap = query_terms.intersection(&fragment_terms).count();
    if overlap == 0 {
        return -1.0;
    }

    // Dense, on-topic fragments beat long rambling ones with the same
    // absolute overlap.
    let similarity = overlap as f32 / (fragment_terms.len() as f32).sqrt();

    let mut score = similarity + fragment.base_weight * multiplier;

    if let Some(state) = state {
        if let Some(mode) = &state.mode {
            if !mode.is_empty() && fragment.text.contains(mode.as_str()) {
                score += params.state_tag_bonus;
            }
        }
        if let Some(resonance) = state.resonance {
            if resonance > 0.0 {
                score += (resonance * params.resonance_scale).min(params.resonance_cap);
            }
        }
    }

    if domain_query {
        if classifier.is_domain(&fragment_terms) {
            score += params.domain_bonus;
        } else {
            score -= params.domain_penalty;
        }
    }

    let length = fragment.text.chars().count() as f32;
    score -= params.length_cost * (length / params.length_ref).min(1.0);

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MarkerClassifier;
    use recollect_core::Source;

    fn frag(text: &str, base_weight: f32) -> Fragment {
        Fragment::new(Source::Facts, text, base_weight)
    }

    fn score_plain(fragment: &Fragment, query: &str) -> f32 {
        score_fragment(
            fragment,
            &normalize::terms(query),
            None,
            1.0,
            false,
            &MarkerClassifier::default(),
            &ScoreParams::default(),
        )
    }

    #[test]
    fn no_overlap_discards() {
        let fragment = frag("I like pizza", 0.9);
        assert!(score_plain(&fragment, "what is the refund policy") < 0.0);
    }

    #[test]
    fn empty_fragment_discards() {
        let fragment = frag("?? !!", 0.9);
        assert!(score_plain(&fragment, "refund policy") < 0.0);
    }

    #[test]
    fn overlap_plus_weight_scores_positive() {
        let fragment = frag("refund policy: 30 days, full amount", 0.9);
        let score = score_plain(&fragment, "what is the refund policy");
        // similarity 2/sqrt(5) ≈ 0.894, plus base weight, minus small length cost
        assert!(score > 1.5, "score was {score}");
    }

    #[test]
    fn denser_fragment_outscores_rambling_one() {
        let dense = frag("refund policy summary", 0.5);
        let rambling = frag(
            "refund policy notes alongside many many unrelated words \
             covering shipping gift cards loyalty points catalog preferences",
            0.5,
        );
        assert!(score_plain(&dense, "refund policy") > score_plain(&rambling, "refund policy"));
    }

    #[test]
    fn multiplier_scales_base_weight() {
        let fragment = frag("refund policy details", 0.8);
        let terms = normalize::terms("refund policy");
        let classifier = MarkerClassifier::default();
        let params = ScoreParams::default();
        let full = score_fragment(&fragment, &terms, None, 1.0, false, &classifier, &params);
        let none = score_fragment(&fragment, &terms, None, 0.0, false, &classifier, &params);
        assert!((full - none - 0.8).abs() < 1e-5);
    }

    #[test]
    fn state_tag_bonus_applies_on_verbatim_match() {
        let fragment = frag("[R] deep resonant topic (resonance 0.50)", 0.5);
        let terms = normalize::terms("resonant topic");
        let classifier = MarkerClassifier::default();
        let params = ScoreParams::default();
        let with_state = score_fragment(
            &fragment,
            &terms,
            Some(&StateSnapshot::new("R", 0.0)),
            1.0,
            false,
            &classifier,
            &params,
        );
        let without = score_fragment(&fragment, &terms, None, 1.0, false, &classifier, &params);
        assert!((with_state - without - params.state_tag_bonus).abs() < 1e-5);
    }

    #[test]
    fn resonance_bonus_is_capped() {
        let fragment = frag("resonant topic", 0.5);
        let terms = normalize::terms("resonant topic");
        let classifier = MarkerClassifier::default();
        let params = ScoreParams::default();
        let state = StateSnapshot {
            mode: None,
            resonance: Some(1.0),
        };
        let boosted = score_fragment(
            &fragment,
            &terms,
            Some(&state),
            1.0,
            false,
            &classifier,
            &params,
        );
        let plain = score_fragment(&fragment, &terms, None, 1.0, false, &classifier, &params);
        assert!((boosted - plain - params.resonance_cap).abs() < 1e-5);
    }

    #[test]
    fn domain_query_rewards_marked_and_penalizes_unmarked() {
        let classifier = MarkerClassifier::new(["resonance", "convergence"]);
        let terms = normalize::terms("resonance and refund questions");
        let params = ScoreParams::default();
        let marked = frag("convergence notes about refund handling", 0.5);
        let unmarked = frag("plain refund handling notes", 0.5);

        let marked_on = score_fragment(&marked, &terms, None, 1.0, true, &classifier, &params);
        let marked_off = score_fragment(&marked, &terms, None, 1.0, false, &classifier, &params);
        assert!((marked_on - marked_off - params.domain_bonus).abs() < 1e-5);

        let unmarked_on = score_fragment(&unmarked, &terms, None, 1.0, true, &classifier, &params);
        let unmarked_off =
            score_fragment(&unmarked, &terms, None, 1.0, false, &classifier, &params);
        assert!((unmarked_off - unmarked_on - params.domain_penalty).abs() < 1e-5);
    }

    #[test]
    fn length_cost_saturates() {
        let params = ScoreParams::default();
        let terms = normalize::terms("refund policy");
        let classifier = MarkerClassifier::default();

        // Same term set and overlap; both texts are past the reference
        // length, so the saturated cost leaves their scores equal.
        let long = frag(&format!("refund policy {}", "filler ".repeat(90)), 0.5);
        let longer = frag(&format!("refund policy {}", "filler ".repeat(400)), 0.5);
        let long_score = score_fragment(&long, &terms, None, 1.0, false, &classifier, &params);
        let longer_score =
            score_fragment(&longer, &terms, None, 1.0, false, &classifier, &params);
        assert!((long_score - longer_score).abs() < 1e-5);

        // Against a short text with the same terms, the gap is exactly
        // the cost difference, bounded by the coefficient.
        let short = frag("refund policy filler", 0.5);
        let short_score = score_fragment(&short, &terms, None, 1.0, false, &classifier, &params);
        assert!(short_score > long_score);
        assert!(short_score - long_score <= params.length_cost + 1e-5);
    }
}
