//! On-disk record types read by the store layer.
//!
//! Every record is independently parseable: the archive and state log are
//! JSONL (one JSON object per line), the fact file is a single JSON
//! document of categorized key→value entries. Unknown fields are ignored
//! and optional fields default, so old files keep loading as the schema
//! grows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One conversation turn, as stored in the archive (and mirrored by the
/// in-process recent window).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Who spoke: a user name or the agent's own name.
    pub speaker: String,

    /// The turn text.
    pub text: String,

    /// When the turn happened.
    pub timestamp: DateTime<Utc>,
}

impl TurnRecord {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// One derived affective/state observation, as appended to the state log
/// by the upstream signal-derivation component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateRecord {
    /// Short mode tag (e.g. "R", "A", "N").
    pub mode: String,

    /// Signal intensity, 0.0–1.0.
    #[serde(default)]
    pub intensity: f32,

    /// Resonance/affinity with recent memory, 0.0–1.0.
    #[serde(default)]
    pub resonance: f32,

    /// When the state was derived.
    pub timestamp: DateTime<Utc>,

    /// Optional free-text annotation describing what triggered the state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl StateRecord {
    pub fn new(mode: impl Into<String>, intensity: f32, resonance: f32) -> Self {
        Self {
            mode: mode.into(),
            intensity,
            resonance,
            timestamp: Utc::now(),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// One durable fact value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactValue {
    /// The fact text. Long values are paragraph-split at collection time.
    pub value: String,

    /// When this fact was learned.
    pub learned_at: DateTime<Utc>,

    /// How many times this fact has been re-learned/confirmed.
    #[serde(default)]
    pub frequency: u32,
}

impl FactValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            learned_at: Utc::now(),
            frequency: 1,
        }
    }
}

/// The full durable-facts file: category → key → value.
///
/// `BTreeMap` keeps iteration order deterministic, which the retrieval
/// engine relies on for byte-identical repeated output.
pub type FactFile = BTreeMap<String, BTreeMap<String, FactValue>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_record_round_trips() {
        let turn = TurnRecord::new("alice", "hello there");
        let json = serde_json::to_string(&turn).unwrap();
        let back: TurnRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.speaker, "alice");
        assert_eq!(back.text, "hello there");
    }

    #[test]
    fn state_record_defaults_optional_fields() {
        let line = r#"{"mode":"R","timestamp":"2026-01-01T00:00:00Z"}"#;
        let rec: StateRecord = serde_json::from_str(line).unwrap();
        assert_eq!(rec.mode, "R");
        assert_eq!(rec.intensity, 0.0);
        assert_eq!(rec.resonance, 0.0);
        assert!(rec.note.is_none());
    }

    #[test]
    fn fact_file_iterates_in_key_order() {
        let mut facts: FactFile = FactFile::new();
        facts
            .entry("user".into())
            .or_default()
            .insert("name".into(), FactValue::new("Alice"));
        facts
            .entry("canon".into())
            .or_default()
            .insert("doc".into(), FactValue::new("The reference text"));

        let categories: Vec<&String> = facts.keys().collect();
        assert_eq!(categories, ["canon", "user"]);
    }
}
