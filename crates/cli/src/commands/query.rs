//! `recollect query` — Run one retrieval against a data directory.

use std::path::Path;
use std::sync::Arc;

use recollect_core::StateSnapshot;
use recollect_engine::{ContextEngine, Policy};
use recollect_stores::{ConversationArchive, FactStore, RecentWindow, StateLog};
use tracing::{debug, warn};

pub fn run(
    data_dir: &Path,
    query: &str,
    profile: Option<&str>,
    mode: Option<String>,
    resonance: Option<f32>,
) -> anyhow::Result<()> {
    let policy = Policy::resolve(profile);
    debug!(profile = policy.id, "Resolved retrieval profile");

    let archive = ConversationArchive::new(super::archive_path(data_dir));
    let recent = Arc::new(RecentWindow::new(recollect_stores::window::DEFAULT_CAPACITY));

    // The window is an in-process buffer; hydrate it from the archive tail
    // so a one-shot invocation still has a recency signal.
    match archive.tail(20) {
        Ok(turns) => {
            for turn in turns {
                recent.push(turn);
            }
        }
        Err(err) => warn!(error = %err, "Could not hydrate recent window from archive"),
    }

    let engine = ContextEngine::new(
        FactStore::new(super::facts_path(data_dir)),
        archive,
        recent,
        StateLog::new(super::state_path(data_dir)),
    );

    let state = mode.map(|m| StateSnapshot::new(m, resonance.unwrap_or(0.0)));
    let block = engine.select_context(query, state.as_ref(), &policy);

    if block.is_empty() {
        println!("(no recalled context)");
    } else {
        println!("{block}");
    }
    Ok(())
}
