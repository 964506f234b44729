use super::snapshot::{SemesterSnapshot, TreeSnapshot};
use crate::error::PersistenceError;

/// Persistence collaborator for the grade tree.
///
/// Stores deal in whole snapshots only: `save_snapshot` replaces everything
/// previously stored. Concurrent writers resolve as last-write-wins.
pub trait TreeStore {
    /// Short identifier for logs (e.g. "sqlite", "json").
    fn name(&self) -> &str;

    /// Read the persisted tree. An empty store yields an empty snapshot.
    fn load_snapshot(&mut self) -> Result<TreeSnapshot, PersistenceError>;

    /// Replace the persisted tree with `snapshot`.
    fn save_snapshot(&mut self, snapshot: &[SemesterSnapshot]) -> Result<(), PersistenceError>;
}

impl<S: TreeStore + ?Sized> TreeStore for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn load_snapshot(&mut self) -> Result<TreeSnapshot, PersistenceError> {
        (**self).load_snapshot()
    }

    fn save_snapshot(&mut self, snapshot: &[SemesterSnapshot]) -> Result<(), PersistenceError> {
        (**self).save_snapshot(snapshot)
    }
}

/// In-memory store. Failure switches let callers exercise error paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: TreeSnapshot,
    pub fail_load: bool,
    pub fail_save: bool,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: TreeSnapshot) -> Self {
        Self {
            snapshot,
            ..Self::default()
        }
    }

    /// Last snapshot successfully saved (or the seed snapshot).
    pub fn snapshot(&self) -> &[SemesterSnapshot] {
        &self.snapshot
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl TreeStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn load_snapshot(&mut self) -> Result<TreeSnapshot, PersistenceError> {
        if self.fail_load {
            return Err(PersistenceError::LoadFailed {
                message: "memory store configured to fail".into(),
                source: None,
            });
        }
        Ok(self.snapshot.clone())
    }

    fn save_snapshot(&mut self, snapshot: &[SemesterSnapshot]) -> Result<(), PersistenceError> {
        if self.fail_save {
            return Err(PersistenceError::SaveFailed {
                message: "memory store configured to fail".into(),
                source: None,
            });
        }
        self.snapshot = snapshot.to_vec();
        self.saves += 1;
        Ok(())
    }
}
