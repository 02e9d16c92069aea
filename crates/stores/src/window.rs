//! Recent-turn window — a bounded in-process ring of the latest turns.
//!
//! The surrounding runtime pushes every exchange here; retrieval takes a
//! snapshot that *excludes the newest few turns*, because those are
//! already present in the caller's immediate prompt context and would
//! only duplicate it.

use recollect_core::record::TurnRecord;
use std::collections::VecDeque;
use std::sync::RwLock;

/// Default window capacity.
pub const DEFAULT_CAPACITY: usize = 200;

/// A bounded ring of recent turns, safe for concurrent push/snapshot.
#[derive(Debug)]
pub struct RecentWindow {
    capacity: usize,
    turns: RwLock<VecDeque<TurnRecord>>,
}

impl RecentWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            turns: RwLock::new(VecDeque::new()),
        }
    }

    /// Push one turn, evicting the oldest once at capacity.
    pub fn push(&self, turn: TurnRecord) {
        let mut turns = match self.turns.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if turns.len() == self.capacity {
            turns.pop_front();
        }
        turns.push_back(turn);
    }

    /// Snapshot the window oldest-first, excluding the newest
    /// `skip_newest` turns.
    pub fn snapshot(&self, skip_newest: usize) -> Vec<TurnRecord> {
        let turns = match self.turns.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let keep = turns.len().saturating_sub(skip_newest);
        turns.iter().take(keep).cloned().collect()
    }

    pub fn len(&self) -> usize {
        match self.turns.read() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RecentWindow {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
