//! `recollect stats` — Show entry counts and file sizes for every store.

use std::path::Path;

use recollect_stores::{ConversationArchive, FactStore, StateLog};

pub fn run(data_dir: &Path) -> anyhow::Result<()> {
    println!("Recollect store statistics");
    println!("==========================");
    println!("  Data dir:   {}", data_dir.display());

    let facts = FactStore::new(super::facts_path(data_dir));
    match facts.count() {
        Ok(count) => println!(
            "  Facts:      {} entries ({})",
            count,
            size_of(facts.path())
        ),
        Err(err) => println!("  Facts:      unreadable ({err})"),
    }

    let archive = ConversationArchive::new(super::archive_path(data_dir));
    match archive.count() {
        Ok(count) => println!(
            "  Archive:    {} turns ({})",
            count,
            size_of(archive.path())
        ),
        Err(err) => println!("  Archive:    unreadable ({err})"),
    }

    let state_log = StateLog::new(super::state_path(data_dir));
    match state_log.tail() {
        Ok(records) => println!(
            "  State log:  {} records in tail window ({})",
            records.len(),
            size_of(state_log.path())
        ),
        Err(err) => println!("  State log:  unreadable ({err})"),
    }

    Ok(())
}

fn size_of(path: &Path) -> String {
    match std::fs::metadata(path) {
        Ok(meta) => format!("{:.1} KB", meta.len() as f64 / 1024.0),
        Err(_) => "not created yet".to_string(),
    }
}
