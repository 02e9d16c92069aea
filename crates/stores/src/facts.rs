//! Durable facts store — categorized key→value records in one JSON file.
//!
//! Categories carry meaning for retrieval: the engine assigns canonical
//! domain documents the highest base trust weight, user-specific facts a
//! middle weight, and everything else a lower one. Long values are
//! paragraph-split by the collector, not here.

use recollect_core::error::StoreError;
use recollect_core::record::{FactFile, FactValue};
use std::path::PathBuf;
use tracing::debug;

/// Handle to the on-disk facts file. Reads happen per retrieval call;
/// the handle itself holds no cached entries.
#[derive(Debug, Clone)]
pub struct FactStore {
    path: PathBuf,
}

impl FactStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Load the full fact file. A missing file is an empty store, not an
    /// error; an unreadable or malformed file is.
    pub fn load(&self) -> Result<FactFile, StoreError> {
        let path = self.path.display().to_string();
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(FactFile::new());
            }
            Err(e) => return Err(StoreError::io(path, e)),
        };

        serde_json::from_str(&content)
            .map_err(|e| StoreError::malformed(path, e.to_string()))
    }

    /// Store (or re-confirm) a fact. Re-learning an existing key bumps
    /// its frequency counter and replaces the value.
    pub fn learn(
        &self,
        category: &str,
        key: &str,
        value: impl Into<String>,
    ) -> Result<(), StoreError> {
        let mut facts = self.load()?;
        let entry = facts.entry(category.to_string()).or_default();
        let frequency = entry.get(key).map_or(0, |v| v.frequency) + 1;
        let mut fact = FactValue::new(value);
        fact.frequency = frequency;
        entry.insert(key.to_string(), fact);
        self.flush(&facts)
    }

    /// Total fact count across all categories.
    pub fn count(&self) -> Result<usize, StoreError> {
        Ok(self.load()?.values().map(|cat| cat.len()).sum())
    }

    fn flush(&self, facts: &FactFile) -> Result<(), StoreError> {
        let path = self.path.display().to_string();
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(&path, e))?;
        }
        let content = serde_json::to_string_pretty(facts)
            .map_err(|e| StoreError::malformed(&path, e.to_string()))?;
        std::fs::write(&self.path, content).map_err(|e| StoreError::io(&path, e))?;
        debug!(path = %self.path.display(), "Fact file flushed");
        Ok(())
    }
}
