//! State log — append-only JSONL of derived affective/state records.
//!
//! Reads never touch more than the tail of the file: a fixed byte window
//! seeked from the end, then a fixed line window within it. Each line
//! parses independently; malformed lines are skipped without aborting
//! the scan.

use recollect_core::error::StoreError;
use recollect_core::record::StateRecord;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::PathBuf;
use tracing::warn;

/// Default tail window: 64 KiB.
pub const DEFAULT_TAIL_BYTES: u64 = 64 * 1024;

/// Default maximum records returned from one tail read.
pub const DEFAULT_TAIL_LINES: usize = 40;

/// Handle to the on-disk state log.
#[derive(Debug, Clone)]
pub struct StateLog {
    path: PathBuf,
    tail_bytes: u64,
    tail_lines: usize,
}

impl StateLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            tail_bytes: DEFAULT_TAIL_BYTES,
            tail_lines: DEFAULT_TAIL_LINES,
        }
    }

    /// Override the tail bounds (mostly for tests).
    pub fn with_tail(mut self, tail_bytes: u64, tail_lines: usize) -> Self {
        self.tail_bytes = tail_bytes;
        self.tail_lines = tail_lines;
        self
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Append one state record.
    pub fn append(&self, record: &StateRecord) -> Result<(), StoreError> {
        let path = self.path.display().to_string();
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(&path, e))?;
        }
        let line = serde_json::to_string(record)
            .map_err(|e| StoreError::malformed(&path, e.to_string()))?;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::io(&path, e))?;
        writeln!(file, "{line}").map_err(|e| StoreError::io(&path, e))?;
        Ok(())
    }

    /// Read the newest records from the bounded tail window.
    ///
    /// A missing file yields no records. The first line of the byte
    /// window is dropped when the window starts mid-file, since it is
    /// almost certainly a partial line.
    pub fn tail(&self) -> Result<Vec<StateRecord>, StoreError> {
        let path = self.path.display().to_string();
        let mut file = match std::fs::File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(path, e)),
        };

        let size = file
            .metadata()
            .map_err(|e| StoreError::io(&path, e))?
            .len();
        let start = size.saturating_sub(self.tail_bytes);
        file.seek(SeekFrom::Start(start))
            .map_err(|e| StoreError::io(&path, e))?;

        // The window start can land mid-character, so decode lossily
        // instead of failing the whole read; the damage is confined to
        // the partial first line, which is dropped below.
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)
            .map_err(|e| StoreError::io(&path, e))?;
        let text = String::from_utf8_lossy(&buf);

        let mut lines: Vec<&str> = text.lines().collect();
        if start > 0 && !lines.is_empty() {
            lines.remove(0); // partial first line
        }

        let mut records: Vec<StateRecord> = lines
            .iter()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match serde_json::from_str::<StateRecord>(line) {
                Ok(rec) => Some(rec),
                Err(e) => {
                    warn!(error = %e, "Skipping malformed state-log line");
                    None
                }
            })
            .collect();

        if records.len() > self.tail_lines {
            records.drain(..records.len() - self.tail_lines);
        }
        Ok(records)
    }
}
