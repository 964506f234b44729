//! Persisted snapshot shape.
//!
//! This is the wire/storage contract:
//! `[{name, subjects: [{name, counts_average, grades: [{name, value, weight, counts}]}]}]`.
//! Older backends wrote `counts_towards_average` and per-node `id`s; the
//! former is accepted as an alias, the latter is ignored.

use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;
use crate::grades::{Grade, GradeInput, GradeTree, Semester, Subject};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeSnapshot {
    pub name: String,
    pub value: f64,
    pub weight: f64,
    #[serde(default = "default_true")]
    pub counts: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectSnapshot {
    pub name: String,
    #[serde(default = "default_true", alias = "counts_towards_average")]
    pub counts_average: bool,
    #[serde(default)]
    pub grades: Vec<GradeSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterSnapshot {
    pub name: String,
    #[serde(default)]
    pub subjects: Vec<SubjectSnapshot>,
}

/// A whole tree in persisted form.
pub type TreeSnapshot = Vec<SemesterSnapshot>;

impl GradeTree {
    /// Serialize the full tree in the persisted shape.
    pub fn to_snapshot(&self) -> TreeSnapshot {
        self.semesters()
            .iter()
            .map(|semester| SemesterSnapshot {
                name: semester.name().to_string(),
                subjects: semester
                    .subjects()
                    .iter()
                    .map(|subject| SubjectSnapshot {
                        name: subject.name().to_string(),
                        counts_average: subject.counts_average(),
                        grades: subject
                            .grades()
                            .iter()
                            .map(|grade| GradeSnapshot {
                                name: grade.name().to_string(),
                                value: grade.value(),
                                weight: grade.weight(),
                                counts: grade.counts(),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect()
    }

    /// Rebuild a tree from its persisted shape, validating every node.
    ///
    /// # Errors
    /// Returns [`PersistenceError::InvalidSnapshot`] naming the first node
    /// that violates a tree invariant.
    pub fn from_snapshot(snapshot: &[SemesterSnapshot]) -> Result<Self, PersistenceError> {
        let mut semesters = Vec::with_capacity(snapshot.len());
        for (si, sem) in snapshot.iter().enumerate() {
            let mut semester =
                Semester::new(&sem.name).map_err(|e| invalid(format!("semester[{si}]"), e))?;
            for (ji, subj) in sem.subjects.iter().enumerate() {
                let location = format!("semester[{si}].subject[{ji}]");
                let mut subject = Subject::new(&subj.name, subj.counts_average)
                    .map_err(|e| invalid(location.clone(), e))?;
                for (gi, grade) in subj.grades.iter().enumerate() {
                    let grade = Grade::new(GradeInput {
                        name: grade.name.clone(),
                        value: grade.value,
                        weight: grade.weight,
                        counts: grade.counts,
                    })
                    .map_err(|e| invalid(format!("{location}.grade[{gi}]"), e))?;
                    subject.push_grade(grade);
                }
                semester.push_subject(subject);
            }
            semesters.push(semester);
        }
        Ok(GradeTree::from_semesters(semesters))
    }
}

fn invalid(location: String, source: crate::error::ValidationError) -> PersistenceError {
    PersistenceError::InvalidSnapshot { location, source }
}

/// Decode a snapshot from JSON text.
pub fn snapshot_from_json(json: &str) -> Result<TreeSnapshot, PersistenceError> {
    serde_json::from_str(json).map_err(|e| PersistenceError::load("snapshot is not valid JSON", e))
}

/// Encode a snapshot as pretty-printed JSON.
pub fn snapshot_to_json(snapshot: &[SemesterSnapshot]) -> Result<String, PersistenceError> {
    serde_json::to_string_pretty(snapshot)
        .map_err(|e| PersistenceError::save("snapshot could not be encoded", e))
}
