//! Selection and assembly — rank, dedupe, and pack scored fragments
//! into the final bounded text block.
//!
//! # Determinism
//!
//! Assembly is deterministic: identical inputs always produce identical
//! output. Ties are broken by source priority and then by insertion
//! order, and the sort is stable.

use recollect_core::ScoredFragment;
use std::collections::BTreeSet;

use crate::normalize;
use crate::policy::Policy;

/// First line of every non-empty assembled block.
pub const HEADER: &str = "[Recalled context]";

/// Assemble the final text block from positively-scored fragments.
///
/// Walks the ranked list, skipping fragments whose dedup key has already
/// been emitted, and stops once `top_k` lines are out or the next line
/// would push the total character count past `max_chars`. Zero emitted
/// lines yield an empty string — a valid "contribute nothing" result.
pub fn assemble(scored: Vec<ScoredFragment>, policy: &Policy) -> String {
    let mut ranked: Vec<(usize, ScoredFragment)> = scored.into_iter().enumerate().collect();
    ranked.sort_by(|(ia, a), (ib, b)| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                a.fragment
                    .source
                    .priority()
                    .cmp(&b.fragment.source.priority())
            })
            .then_with(|| ia.cmp(ib))
    });

    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut lines: Vec<String> = Vec::new();
    let mut used = HEADER.chars().count();

    for (_, sf) in ranked {
        if lines.len() == policy.top_k {
            break;
        }
        let key = normalize::dedup_key(&sf.fragment.text);
        if !seen.insert(key) {
            continue;
        }

        let snippet = normalize::snippet(&sf.fragment.text, normalize::SNIPPET_LEN);
        let line = if policy.debug {
            format!("- [{:.2}] {}: {}", sf.score, sf.fragment.source.tag(), snippet)
        } else {
            format!("- {}: {}", sf.fragment.source.tag(), snippet)
        };

        // +1 for the joining newline
        let cost = 1 + line.chars().count();
        if used + cost > policy.max_chars {
            break;
        }
        used += cost;
        lines.push(line);
    }

    if lines.is_empty() {
        return String::new();
    }

    let mut out = String::from(HEADER);
    for line in &lines {
        out.push('\n');
        out.push_str(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use recollect_core::{Fragment, Source};

    fn sf(source: Source, text: &str, score: f32) -> ScoredFragment {
        ScoredFragment {
            fragment: Fragment::new(source, text, 0.5),
            score,
        }
    }

    fn policy(top_k: usize, max_chars: usize) -> Policy {
        Policy {
            top_k,
            max_chars,
            ..Policy::audit()
        }
    }

    fn plain_policy(top_k: usize, max_chars: usize) -> Policy {
        Policy {
            debug: false,
            ..policy(top_k, max_chars)
        }
    }

    #[test]
    fn empty_input_yields_empty_string() {
        assert_eq!(assemble(Vec::new(), &plain_policy(5, 1000)), "");
    }

    #[test]
    fn lines_are_ordered_by_descending_score() {
        let out = assemble(
            vec![
                sf(Source::Archive, "medium relevance", 0.5),
                sf(Source::Facts, "high relevance", 0.9),
                sf(Source::Recent, "low relevance", 0.2),
            ],
            &plain_policy(10, 1000),
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], HEADER);
        assert!(lines[1].contains("high relevance"));
        assert!(lines[2].contains("medium relevance"));
        assert!(lines[3].contains("low relevance"));
    }

    #[test]
    fn score_ties_break_by_source_priority_then_insertion() {
        let out = assemble(
            vec![
                sf(Source::Archive, "archive tie", 0.5),
                sf(Source::Facts, "facts tie", 0.5),
                sf(Source::Archive, "second archive tie", 0.5),
            ],
            &plain_policy(10, 1000),
        );
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[1].contains("facts tie"));
        assert!(lines[2].contains("archive tie"));
        assert!(lines[3].contains("second archive tie"));
    }

    #[test]
    fn top_k_caps_emitted_lines() {
        let scored = vec![
            sf(Source::Facts, "first fragment", 0.9),
            sf(Source::Facts, "second fragment", 0.5),
            sf(Source::Facts, "third fragment", 0.5),
            sf(Source::Facts, "fourth fragment", 0.4),
        ];
        let out = assemble(scored, &plain_policy(3, 10_000));
        assert_eq!(out.lines().count(), 1 + 3);
    }

    #[test]
    fn identical_fragments_from_different_sources_emit_once() {
        let out = assemble(
            vec![
                sf(Source::Facts, "The refund policy: 30 days", 0.9),
                sf(Source::Archive, "the REFUND policy 30 days!!", 0.5),
            ],
            &plain_policy(10, 1000),
        );
        assert_eq!(out.lines().count(), 2);
        assert_eq!(out.matches("refund").count() + out.matches("REFUND").count(), 1);
    }

    #[test]
    fn budget_stops_at_exact_boundary() {
        let scored: Vec<ScoredFragment> = (0..50)
            .map(|i| sf(Source::Facts, &format!("fragment number {i:02}"), 0.5))
            .collect();
        // "- facts: fragment number 00" = 27 chars, +1 newline = 28 each
        let line_cost = 28;
        let header_cost = HEADER.chars().count();
        let max_chars = header_cost + 3 * line_cost + line_cost - 1; // one short of a 4th line
        let out = assemble(scored, &plain_policy(50, max_chars));
        assert_eq!(out.lines().count(), 1 + 3);
        assert!(out.chars().count() <= max_chars);
    }

    #[test]
    fn budget_smaller_than_any_line_yields_empty_string() {
        let out = assemble(
            vec![sf(Source::Facts, "some fragment text", 0.9)],
            &plain_policy(10, 10),
        );
        assert_eq!(out, "");
    }

    #[test]
    fn debug_policy_prefixes_scores() {
        let out = assemble(
            vec![sf(Source::Facts, "scored fragment", 0.87)],
            &policy(10, 1000),
        );
        assert!(out.contains("- [0.87] facts: scored fragment"));
    }

    #[test]
    fn assembly_is_deterministic() {
        let build = || {
            assemble(
                vec![
                    sf(Source::Facts, "alpha fragment", 0.5),
                    sf(Source::Archive, "beta fragment", 0.5),
                    sf(Source::Recent, "gamma fragment", 0.3),
                ],
                &plain_policy(10, 1000),
            )
        };
        assert_eq!(build(), build());
    }
}
