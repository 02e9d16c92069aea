//! Conversation archive — append-only JSONL of past turns.
//!
//! Reads are double-bounded: the file is skipped entirely once it grows
//! past a hard byte ceiling, and only the last N parsed turns are
//! returned. Writes append one line per turn, truncating pathological
//! single messages at a character cap.

use recollect_core::error::StoreError;
use recollect_core::record::TurnRecord;
use std::io::Write;
use std::path::PathBuf;
use tracing::warn;

/// Default read ceiling: 4 MiB.
pub const DEFAULT_MAX_BYTES: u64 = 4 * 1024 * 1024;

/// Longest single turn accepted on write.
pub const MAX_CHARS_PER_TURN: usize = 100_000;

/// Handle to the on-disk conversation archive.
#[derive(Debug, Clone)]
pub struct ConversationArchive {
    path: PathBuf,
    max_bytes: u64,
}

impl ConversationArchive {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }

    /// Override the read ceiling (mostly for tests).
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Append one turn. Over-long text is truncated with a marker rather
    /// than rejected, so the archive keeps a trace of the exchange.
    pub fn append(&self, turn: &TurnRecord) -> Result<(), StoreError> {
        let path = self.path.display().to_string();
        let mut turn = turn.clone();
        if turn.text.chars().count() > MAX_CHARS_PER_TURN {
            warn!(len = turn.text.len(), "Truncating over-long turn before archiving");
            turn.text = turn
                .text
                .chars()
                .take(MAX_CHARS_PER_TURN)
                .collect::<String>()
                + "… [truncated]";
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(&path, e))?;
        }
        let line = serde_json::to_string(&turn)
            .map_err(|e| StoreError::malformed(&path, e.to_string()))?;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::io(&path, e))?;
        writeln!(file, "{line}").map_err(|e| StoreError::io(&path, e))?;
        Ok(())
    }

    /// Read the last `last` turns.
    ///
    /// A missing file yields no turns. A file over the byte ceiling is an
    /// [`StoreError::Oversized`] error — the caller treats it as an
    /// unavailable source. Malformed lines are skipped individually.
    pub fn tail(&self, last: usize) -> Result<Vec<TurnRecord>, StoreError> {
        let path = self.path.display().to_string();
        let size = match std::fs::metadata(&self.path) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(path, e)),
        };
        if size > self.max_bytes {
            return Err(StoreError::Oversized {
                path,
                size,
                limit: self.max_bytes,
            });
        }

        let content =
            std::fs::read_to_string(&self.path).map_err(|e| StoreError::io(&path, e))?;
        let mut turns: Vec<TurnRecord> = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match serde_json::from_str::<TurnRecord>(line) {
                Ok(turn) => Some(turn),
                Err(e) => {
                    warn!(error = %e, "Skipping corrupted archive line");
                    None
                }
            })
            .collect();

        if turns.len() > last {
            turns.drain(..turns.len() - last);
        }
        Ok(turns)
    }

    /// Total parseable turn count. Subject to the same read ceiling as
    /// [`tail`](Self::tail).
    pub fn count(&self) -> Result<usize, StoreError> {
        Ok(self.tail(usize::MAX)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn archive_in(dir: &TempDir) -> ConversationArchive {
        ConversationArchive::new(dir.path().join("archive.jsonl"))
    }

    #[test]
    fn append_then_tail_round_trips() {
        let dir = TempDir::new().unwrap();
        let archive = archive_in(&dir);
        archive.append(&TurnRecord::new("alice", "first")).unwrap();
        archive.append(&TurnRecord::new("agent", "second")).unwrap();

        let turns = archive.tail(10).unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].text, "first");
        assert_eq!(turns[1].speaker, "agent");
    }

    #[test]
    fn tail_returns_only_newest_turns() {
        let dir = TempDir::new().unwrap();
        let archive = archive_in(&dir);
        for i in 0..10 {
            archive
                .append(&TurnRecord::new("alice", format!("turn {i}")))
                .unwrap();
        }

        let turns = archive.tail(3).unwrap();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0].text, "turn 7");
        assert_eq!(turns[2].text, "turn 9");
    }

    #[test]
    fn missing_file_yields_no_turns() {
        let dir = TempDir::new().unwrap();
        assert!(archive_in(&dir).tail(10).unwrap().is_empty());
    }

    #[test]
    fn oversized_file_is_skipped_whole() {
        let dir = TempDir::new().unwrap();
        let archive = archive_in(&dir).with_max_bytes(64);
        for _ in 0..5 {
            archive
                .append(&TurnRecord::new("alice", "a reasonably long line of text"))
                .unwrap();
        }
        assert!(matches!(
            archive.tail(10),
            Err(StoreError::Oversized { .. })
        ));
    }

    #[test]
    fn corrupted_lines_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("archive.jsonl");
        let archive = ConversationArchive::new(&path);
        archive.append(&TurnRecord::new("alice", "valid")).unwrap();
        std::fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .unwrap()
            .write_all(b"this is not json\n")
            .unwrap();
        archive.append(&TurnRecord::new("alice", "also valid")).unwrap();

        let turns = archive.tail(10).unwrap();
        assert_eq!(turns.len(), 2);
    }

    #[test]
    fn over_long_turn_is_truncated_on_append() {
        let dir = TempDir::new().unwrap();
        let archive = archive_in(&dir);
        let long = "x".repeat(MAX_CHARS_PER_TURN + 500);
        archive.append(&TurnRecord::new("alice", long)).unwrap();

        let turns = archive.tail(1).unwrap();
        assert!(turns[0].text.ends_with("[truncated]"));
        assert!(turns[0].text.chars().count() < MAX_CHARS_PER_TURN + 50);
    }
}
