//! Editing session: in-memory tree + persistence collaborator.
//!
//! The in-memory tree is the source of truth. Each applied edit recomputes
//! the touched semester and then saves the full tree; a failed save is
//! reported but never rolls the edit back.

use tracing::{debug, warn};

use super::store::TreeStore;
use super::synchronizer::TreeSynchronizer;
use crate::error::{PersistenceError, ValidationError};
use crate::grades::{
    solve_target_grade, Edit, EditRules, GradeTree, SemesterReport, SubjectPath, TargetGrade,
    Touched, TreeReport,
};

/// Result of a successfully applied edit.
#[derive(Debug)]
pub struct EditOutcome {
    pub touched: Touched,
    /// Fresh figures for the touched semester; `None` if it was deleted.
    pub semester: Option<SemesterReport>,
    pub saved: Result<(), PersistenceError>,
}

impl EditOutcome {
    pub fn is_saved(&self) -> bool {
        self.saved.is_ok()
    }
}

pub struct GradebookSession<S> {
    tree: GradeTree,
    rules: EditRules,
    sync: TreeSynchronizer<S>,
}

impl<S: TreeStore> GradebookSession<S> {
    /// Start with an empty tree; call [`reload`](Self::reload) to read the store.
    pub fn new(store: S, rules: EditRules) -> Self {
        Self {
            tree: GradeTree::new(),
            rules,
            sync: TreeSynchronizer::new(store),
        }
    }

    /// Replace the in-memory tree with the persisted one.
    ///
    /// # Errors
    /// On failure the in-memory tree is left empty and the error is returned.
    pub fn reload(&mut self) -> Result<&GradeTree, PersistenceError> {
        match self.sync.load_tree() {
            Ok(tree) => {
                self.tree = tree;
                Ok(&self.tree)
            }
            Err(e) => {
                self.tree = GradeTree::new();
                Err(e)
            }
        }
    }

    pub fn tree(&self) -> &GradeTree {
        &self.tree
    }

    pub fn rules(&self) -> &EditRules {
        &self.rules
    }

    pub fn store(&self) -> &S {
        self.sync.store()
    }

    /// Validate and apply `edit`, recompute, then save the full tree.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] (and changes nothing) if the edit is
    /// rejected. Save failures are reported in [`EditOutcome::saved`].
    pub fn apply(&mut self, edit: Edit) -> Result<EditOutcome, ValidationError> {
        let touched = self.tree.apply(edit, &self.rules)?;
        let semester = match touched.semester() {
            Some(index) => Some(SemesterReport::of(self.tree.semester(index)?)),
            None => None,
        };
        if let Some(report) = &semester {
            debug!(
                semester = %report.name,
                average = report.average,
                plus_points = report.plus_points,
                "recomputed semester"
            );
        }

        let saved = self.sync.save_tree(&self.tree);
        if saved.is_err() {
            warn!("edit kept in memory but not persisted");
        }
        Ok(EditOutcome {
            touched,
            semester,
            saved,
        })
    }

    /// Replace the whole tree (e.g. from an imported snapshot) and save it.
    pub fn replace_tree(&mut self, tree: GradeTree) -> Result<(), PersistenceError> {
        self.tree = tree;
        self.sync.save_tree(&self.tree)
    }

    /// Save the current tree without editing it.
    pub fn save(&mut self) -> Result<(), PersistenceError> {
        self.sync.save_tree(&self.tree)
    }

    pub fn report(&self) -> TreeReport {
        TreeReport::of(&self.tree)
    }

    pub fn semester_report(&self, semester: usize) -> Result<SemesterReport, ValidationError> {
        Ok(SemesterReport::of(self.tree.semester(semester)?))
    }

    /// Grade needed on the next assessment of `subject` to reach `target`.
    pub fn solve_target(
        &self,
        subject: SubjectPath,
        target: f64,
        next_weight: f64,
    ) -> Result<TargetGrade, ValidationError> {
        solve_target_grade(self.tree.subject(subject)?, target, next_weight)
    }
}
