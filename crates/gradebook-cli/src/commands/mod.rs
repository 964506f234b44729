pub mod config;
pub mod grade;
pub mod report;
pub mod semester;
pub mod snapshot;
pub mod subject;
pub mod target;

use gradebook_core::storage::open_store;
use gradebook_core::{Config, Edit, GradebookSession, TreeStore};
use tracing::debug;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

pub type Session = GradebookSession<Box<dyn TreeStore>>;

/// Load config, open the configured store and read the persisted tree.
pub fn open_session() -> Result<(Session, Config), Box<dyn std::error::Error>> {
    let (session, config) = gradebook_core::storage::open_session()?;
    debug!(
        store = session.store().name(),
        semesters = session.tree().len(),
        "session opened"
    );
    Ok((session, config))
}

/// Open the configured store without reading it. The tree starts empty, so
/// a store holding an unreadable tree can still be overwritten.
pub fn open_unloaded_session() -> Result<Session, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = open_store(&config)?;
    debug!(store = store.name(), "store opened without loading");
    Ok(GradebookSession::new(store, config.edit_rules()))
}

/// Apply `edit`, print the recomputed semester, and fail if the save failed.
pub fn apply_and_print(session: &mut Session, edit: Edit) -> CliResult {
    let outcome = session.apply(edit)?;
    match &outcome.semester {
        Some(report) => println!("{}", serde_json::to_string_pretty(report)?),
        None => println!("{}", serde_json::to_string_pretty(&session.report())?),
    }
    outcome.saved?;
    Ok(())
}
