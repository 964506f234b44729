//! Snapshot persistence for the grade tree.
//!
//! The whole tree is loaded as one snapshot and saved as one snapshot.
//! Stores implement [`TreeStore`]; [`GradebookSession`] ties a store to an
//! in-memory tree and saves after every applied edit.

pub mod session;
pub mod snapshot;
pub mod store;
pub mod synchronizer;

#[cfg(test)]
mod snapshot_tests;

pub use session::{EditOutcome, GradebookSession};
pub use snapshot::{
    snapshot_from_json, snapshot_to_json, GradeSnapshot, SemesterSnapshot, SubjectSnapshot,
    TreeSnapshot,
};
pub use store::{MemoryStore, TreeStore};
pub use synchronizer::TreeSynchronizer;
