//! Full-tree load/save over a [`TreeStore`].
//!
//! There is no diffing: every save resends the whole tree.

use tracing::{info, warn};

use super::store::TreeStore;
use crate::error::PersistenceError;
use crate::grades::GradeTree;

pub struct TreeSynchronizer<S> {
    store: S,
}

impl<S: TreeStore> TreeSynchronizer<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Load and validate the persisted tree.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or the snapshot violates
    /// a tree invariant. No partially built tree is ever returned.
    pub fn load_tree(&mut self) -> Result<GradeTree, PersistenceError> {
        let snapshot = self.store.load_snapshot().map_err(|e| {
            warn!(store = self.store.name(), error = %e, "failed to load grade tree");
            e
        })?;
        let tree = GradeTree::from_snapshot(&snapshot).map_err(|e| {
            warn!(store = self.store.name(), error = %e, "persisted grade tree is invalid");
            e
        })?;
        info!(
            store = self.store.name(),
            semesters = tree.len(),
            grades = tree.grade_count(),
            "loaded grade tree"
        );
        Ok(tree)
    }

    /// Persist `tree` as one snapshot, replacing whatever was stored.
    ///
    /// # Errors
    /// Returns an error if the store rejects the write.
    pub fn save_tree(&mut self, tree: &GradeTree) -> Result<(), PersistenceError> {
        let snapshot = tree.to_snapshot();
        match self.store.save_snapshot(&snapshot) {
            Ok(()) => {
                info!(
                    store = self.store.name(),
                    semesters = tree.len(),
                    grades = tree.grade_count(),
                    "saved grade tree"
                );
                Ok(())
            }
            Err(e) => {
                warn!(store = self.store.name(), error = %e, "failed to save grade tree");
                Err(e)
            }
        }
    }
}
