//! `recollect seed` — Populate a data directory with demo content.

use std::path::Path;

use anyhow::Context;
use recollect_core::{StateRecord, TurnRecord};
use recollect_stores::{ConversationArchive, FactStore, StateLog};
use tracing::info;

pub fn run(data_dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;

    let facts = FactStore::new(super::facts_path(data_dir));
    facts.learn("canon", "resonance", "Resonance measures how strongly the current exchange echoes earlier themes, on a 0 to 1 scale.")?;
    facts.learn(
        "canon",
        "mode tags",
        "Mode tags are short labels like R that mark the register a conversation is in.",
    )?;
    facts.learn("user", "name", "The user goes by Ada.")?;
    facts.learn("user", "coffee", "Ada drinks espresso, never filter coffee.")?;
    facts.learn("projects", "deadline", "The context engine ships at the end of the quarter.")?;

    let archive = ConversationArchive::new(super::archive_path(data_dir));
    for (speaker, text) in [
        ("ada", "Can you remind me how resonance is computed?"),
        (
            "assistant",
            "Resonance tracks thematic overlap with earlier turns and is capped at 1.0.",
        ),
        ("ada", "Good. And the deadline for the context engine?"),
        ("assistant", "End of the quarter, per the project notes."),
        ("ada", "One more espresso and I'll get back to it."),
    ] {
        archive.append(&TurnRecord::new(speaker, text))?;
    }

    let state_log = StateLog::new(super::state_path(data_dir));
    state_log.append(
        &StateRecord::new("R", 0.7, 0.55).with_note("settled into a focused working register"),
    )?;
    state_log.append(&StateRecord::new("R", 0.4, 0.3))?;

    info!(dir = %data_dir.display(), "Seeded demo corpus");
    println!("Seeded {} with demo facts, turns and state.", data_dir.display());
    Ok(())
}
