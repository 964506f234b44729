//! Structural edits on a [`GradeTree`].
//!
//! Every edit names its target explicitly and is validated in full before
//! the tree is touched. A successful edit reports which semester needs its
//! averages recomputed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::catalog::Catalog;
use super::model::{
    out_of_bounds, Grade, GradeInput, GradePatch, GradePath, GradeTree, Semester, Subject,
    SubjectPath,
};
use crate::error::ValidationError;

/// Context an edit is validated against.
#[derive(Debug, Clone)]
pub struct EditRules {
    pub catalog: Catalog,
    /// Subjects created with one of these names default to not counting.
    pub non_graded_subjects: Vec<String>,
}

impl Default for EditRules {
    fn default() -> Self {
        Self {
            catalog: Catalog::standard(),
            non_graded_subjects: vec!["Sport".to_string()],
        }
    }
}

/// One structural mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Edit {
    /// Append the next semester from the catalog. The template is the one at
    /// the tree's current length. An explicit name overrides the template
    /// name, and allows adding past the end of the catalog.
    AddSemester { name: Option<String> },
    RenameSemester { semester: usize, name: String },
    DeleteSemester { semester: usize },
    /// `counts_average: None` derives the flag from the subject name.
    AddSubject {
        semester: usize,
        name: String,
        counts_average: Option<bool>,
    },
    RenameSubject { subject: SubjectPath, name: String },
    SetSubjectCounts {
        subject: SubjectPath,
        counts_average: bool,
    },
    DeleteSubject { subject: SubjectPath },
    MoveSubject {
        semester: usize,
        from: usize,
        to: usize,
    },
    AddGrade { subject: SubjectPath, grade: GradeInput },
    EditGrade { grade: GradePath, patch: GradePatch },
    DeleteGrade { grade: GradePath },
}

/// What an applied edit invalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Touched {
    /// A semester was removed; the remaining semesters are unaffected.
    SemesterRemoved(usize),
    /// The semester's name or subject list changed.
    Semester(usize),
    /// A subject (and therefore its semester) changed.
    Subject(SubjectPath),
}

impl Touched {
    /// Semester whose averages must be recomputed, if it still exists.
    pub fn semester(&self) -> Option<usize> {
        match self {
            Touched::SemesterRemoved(_) => None,
            Touched::Semester(index) => Some(*index),
            Touched::Subject(path) => Some(path.semester),
        }
    }
}

impl GradeTree {
    /// Apply `edit`, leaving the tree unchanged if it is rejected.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] for blank names, out-of-range values,
    /// non-positive weights, unknown paths, or an exhausted catalog.
    pub fn apply(&mut self, edit: Edit, rules: &EditRules) -> Result<Touched, ValidationError> {
        debug!(?edit, "applying edit");
        match edit {
            Edit::AddSemester { name } => self.add_semester(name.as_deref(), rules),
            Edit::RenameSemester { semester, name } => {
                self.semester_mut(semester)?.set_name(&name)?;
                Ok(Touched::Semester(semester))
            }
            Edit::DeleteSemester { semester } => {
                self.semester(semester)?;
                self.semesters_mut().remove(semester);
                Ok(Touched::SemesterRemoved(semester))
            }
            Edit::AddSubject {
                semester,
                name,
                counts_average,
            } => {
                let counts = match counts_average {
                    Some(flag) => flag,
                    None => super::model::default_counts_average(&name, &rules.non_graded_subjects),
                };
                let subject = Subject::new(&name, counts)?;
                let target = self.semester_mut(semester)?;
                target.push_subject(subject);
                let index = target.subjects().len() - 1;
                Ok(Touched::Subject(SubjectPath::new(semester, index)))
            }
            Edit::RenameSubject { subject, name } => {
                self.subject_mut(subject)?.set_name(&name)?;
                Ok(Touched::Subject(subject))
            }
            Edit::SetSubjectCounts {
                subject,
                counts_average,
            } => {
                self.subject_mut(subject)?.set_counts_average(counts_average);
                Ok(Touched::Subject(subject))
            }
            Edit::DeleteSubject { subject } => {
                self.subject(subject)?;
                self.semester_mut(subject.semester)?
                    .subjects_mut()
                    .remove(subject.subject);
                Ok(Touched::Semester(subject.semester))
            }
            Edit::MoveSubject { semester, from, to } => {
                let target = self.semester_mut(semester)?;
                let subjects = target.subjects_mut();
                let len = subjects.len();
                if from >= len {
                    return Err(out_of_bounds("subjects", from, len));
                }
                if to >= len {
                    return Err(out_of_bounds("subjects", to, len));
                }
                let moved = subjects.remove(from);
                subjects.insert(to, moved);
                Ok(Touched::Semester(semester))
            }
            Edit::AddGrade { subject, grade } => {
                let grade = Grade::new(grade)?;
                self.subject_mut(subject)?.push_grade(grade);
                Ok(Touched::Subject(subject))
            }
            Edit::EditGrade { grade, patch } => {
                let updated = self.grade(grade)?.patched(&patch)?;
                self.subject_mut(grade.subject_path())?.grades_mut()[grade.grade] = updated;
                Ok(Touched::Subject(grade.subject_path()))
            }
            Edit::DeleteGrade { grade } => {
                self.grade(grade)?;
                self.subject_mut(grade.subject_path())?
                    .grades_mut()
                    .remove(grade.grade);
                Ok(Touched::Subject(grade.subject_path()))
            }
        }
    }

    fn add_semester(
        &mut self,
        name: Option<&str>,
        rules: &EditRules,
    ) -> Result<Touched, ValidationError> {
        let position = self.len();
        let template = rules.catalog.template(position);

        let semester_name = match (name, template) {
            (Some(name), _) => name,
            (None, Some(template)) => template.name.as_str(),
            (None, None) => {
                return Err(ValidationError::CatalogExhausted {
                    len: rules.catalog.len(),
                })
            }
        };

        let mut semester = Semester::new(semester_name)?;
        if let Some(template) = template {
            for subject_name in &template.subjects {
                semester.push_subject(Subject::with_default_counting(
                    subject_name,
                    &rules.non_graded_subjects,
                )?);
            }
        }
        self.semesters_mut().push(semester);
        Ok(Touched::Semester(position))
    }
}
