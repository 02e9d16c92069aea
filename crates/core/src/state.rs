//! The per-call state snapshot.

use serde::{Deserialize, Serialize};

/// A small snapshot of derived signals supplied by the upstream
/// signal-derivation component, immutable for the duration of one
/// retrieval call.
///
/// The engine reads exactly two fields: the current mode tag and the
/// numeric resonance value. Absence of either simply disables the
/// corresponding scoring bonus.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Current mode tag (e.g. "R", "A", "N").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// Resonance/affinity value, expected in 0.0–1.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resonance: Option<f32>,
}

impl StateSnapshot {
    pub fn new(mode: impl Into<String>, resonance: f32) -> Self {
        Self {
            mode: Some(mode.into()),
            resonance: Some(resonance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_snapshot_is_empty() {
        let snap = StateSnapshot::default();
        assert!(snap.mode.is_none());
        assert!(snap.resonance.is_none());
        assert_eq!(serde_json::to_string(&snap).unwrap(), "{}");
    }

    #[test]
    fn snapshot_round_trips() {
        let snap = StateSnapshot::new("R", 0.8);
        let json = serde_json::to_string(&snap).unwrap();
        let back: StateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.mode.as_deref(), Some("R"));
        assert_eq!(back.resonance, Some(0.8));
    }
}
