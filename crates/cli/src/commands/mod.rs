//! Subcommand implementations.

pub mod query;
pub mod seed;
pub mod stats;

use std::path::{Path, PathBuf};

/// Facts store file inside the data directory.
pub fn facts_path(data_dir: &Path) -> PathBuf {
    data_dir.join("facts.json")
}

/// Conversation archive file inside the data directory.
pub fn archive_path(data_dir: &Path) -> PathBuf {
    data_dir.join("archive.jsonl")
}

/// State log file inside the data directory.
pub fn state_path(data_dir: &Path) -> PathBuf {
    data_dir.join("state.jsonl")
}
