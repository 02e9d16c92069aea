//! Candidate collection — pull raw fragments from every allowed source.
//!
//! Each gatherer is cost-capped so retrieval stays flat-cost no matter
//! how large the backing stores have grown, and each fails soft: an
//! unavailable or unreadable source contributes zero fragments and a
//! `warn!`, never an error for the whole call.

use recollect_core::record::{StateRecord, TurnRecord};
use recollect_core::{Fragment, Source};
use recollect_stores::{ConversationArchive, FactStore, RecentWindow, StateLog};
use tracing::{debug, warn};

use crate::policy::Policy;

/// Fact category holding canonical domain documents (highest trust).
pub const CANON_CATEGORY: &str = "canon";

/// Fact category holding user-specific facts (middle trust).
pub const USER_CATEGORY: &str = "user";

// Source-defined base weights.
const FACTS_CANON_WEIGHT: f32 = 0.9;
const FACTS_USER_WEIGHT: f32 = 0.6;
const FACTS_OTHER_WEIGHT: f32 = 0.4;
const STATE_WEIGHT: f32 = 0.6;
const RECENT_WEIGHT: f32 = 0.5;
const ARCHIVE_WEIGHT: f32 = 0.4;

/// Per-source collection cost bounds.
#[derive(Debug, Clone)]
pub struct CollectLimits {
    /// Paragraph cap when splitting long fact documents.
    pub max_doc_paragraphs: usize,
    /// How many archived turns to read from the tail.
    pub archive_tail: usize,
    /// Newest turns excluded from the recent window (already in the
    /// caller's own immediate context).
    pub recent_skip: usize,
}

impl Default for CollectLimits {
    fn default() -> Self {
        Self {
            max_doc_paragraphs: 6,
            archive_tail: 40,
            recent_skip: 4,
        }
    }
}

/// Gather the full candidate pool for one call. Sources excluded by the
/// policy are never queried.
pub fn collect(
    facts: &FactStore,
    archive: &ConversationArchive,
    recent: &RecentWindow,
    state_log: &StateLog,
    policy: &Policy,
    limits: &CollectLimits,
) -> Vec<Fragment> {
    let mut pool = Vec::new();

    for source in Source::ALL {
        if !policy.sources.allows(source) {
            continue;
        }
        let result = match source {
            Source::Facts => gather_facts(facts, limits, &mut pool),
            Source::StateLog => gather_state(state_log, &mut pool),
            Source::Recent => {
                gather_recent(recent, limits, &mut pool);
                Ok(())
            }
            Source::Archive => gather_archive(archive, limits, &mut pool),
        };
        if let Err(e) = result {
            warn!(source = source.tag(), error = %e, "Source unavailable, contributing no fragments");
        }
    }

    debug!(candidates = pool.len(), "Candidate pool collected");
    pool
}

fn gather_facts(
    facts: &FactStore,
    limits: &CollectLimits,
    pool: &mut Vec<Fragment>,
) -> Result<(), recollect_core::StoreError> {
    let file = facts.load()?;
    for (category, entries) in &file {
        let weight = category_weight(category);
        for (key, fact) in entries {
            for paragraph in split_paragraphs(&fact.value, limits.max_doc_paragraphs) {
                pool.push(Fragment::new(
                    Source::Facts,
                    format!("{key}: {paragraph}"),
                    weight,
                ));
            }
        }
    }
    Ok(())
}

fn gather_state(
    state_log: &StateLog,
    pool: &mut Vec<Fragment>,
) -> Result<(), recollect_core::StoreError> {
    for record in state_log.tail()? {
        pool.push(Fragment::new(
            Source::StateLog,
            render_state(&record),
            STATE_WEIGHT,
        ));
    }
    Ok(())
}

fn gather_recent(recent: &RecentWindow, limits: &CollectLimits, pool: &mut Vec<Fragment>) {
    for turn in recent.snapshot(limits.recent_skip) {
        pool.push(Fragment::new(
            Source::Recent,
            render_turn(&turn),
            RECENT_WEIGHT,
        ));
    }
}

fn gather_archive(
    archive: &ConversationArchive,
    limits: &CollectLimits,
    pool: &mut Vec<Fragment>,
) -> Result<(), recollect_core::StoreError> {
    for turn in archive.tail(limits.archive_tail)? {
        pool.push(Fragment::new(
            Source::Archive,
            render_turn(&turn),
            ARCHIVE_WEIGHT,
        ));
    }
    Ok(())
}

fn category_weight(category: &str) -> f32 {
    match category {
        CANON_CATEGORY => FACTS_CANON_WEIGHT,
        USER_CATEGORY => FACTS_USER_WEIGHT,
        _ => FACTS_OTHER_WEIGHT,
    }
}

fn render_turn(turn: &TurnRecord) -> String {
    format!("{}: {}", turn.speaker, turn.text)
}

fn render_state(record: &StateRecord) -> String {
    match &record.note {
        Some(note) => format!(
            "[{}] {} (resonance {:.2})",
            record.mode, note, record.resonance
        ),
        None => format!(
            "[{}] intensity {:.2}, resonance {:.2}",
            record.mode, record.intensity, record.resonance
        ),
    }
}

/// Split a long document into blank-line-separated paragraphs, capped.
/// Short values come back as a single fragment.
fn split_paragraphs(text: &str, max: usize) -> Vec<&str> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .take(max.max(1))
        .collect()
}
