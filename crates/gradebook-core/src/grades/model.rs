//! Grade tree entities: semester → subject → grade.
//!
//! Fields are private so every node in a [`GradeTree`] has passed validation.
//! Nothing here caches an average; see [`super::average`].

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Lowest mark on the Swiss scale.
pub const MIN_GRADE: f64 = 1.0;
/// Highest mark on the Swiss scale.
pub const MAX_GRADE: f64 = 6.0;

/// Raw, unvalidated grade fields as entered by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeInput {
    pub name: String,
    pub value: f64,
    pub weight: f64,
    pub counts: bool,
}

impl GradeInput {
    /// A counting grade with weight 1.
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            weight: 1.0,
            counts: true,
        }
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn counts(mut self, counts: bool) -> Self {
        self.counts = counts;
        self
    }
}

/// Partial update of a grade. `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GradePatch {
    pub name: Option<String>,
    pub value: Option<f64>,
    pub weight: Option<f64>,
    pub counts: Option<bool>,
}

impl GradePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.value.is_none() && self.weight.is_none() && self.counts.is_none()
    }
}

/// A single mark inside a subject.
#[derive(Debug, Clone, PartialEq)]
pub struct Grade {
    name: String,
    value: f64,
    weight: f64,
    counts: bool,
}

impl Grade {
    /// Validate and build a grade.
    ///
    /// # Errors
    /// Returns an error if the name is blank, the value lies outside
    /// [`MIN_GRADE`]..=[`MAX_GRADE`], or the weight is not strictly positive.
    pub fn new(input: GradeInput) -> Result<Self, ValidationError> {
        let name = validate_name(&input.name, "grade")?;
        validate_value(input.value)?;
        validate_weight(input.weight)?;
        Ok(Self {
            name,
            value: input.value,
            weight: input.weight,
            counts: input.counts,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn counts(&self) -> bool {
        self.counts
    }

    /// Produce the grade that results from applying `patch`.
    ///
    /// The receiver is left untouched, so a rejected patch changes nothing.
    pub fn patched(&self, patch: &GradePatch) -> Result<Self, ValidationError> {
        Self::new(GradeInput {
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            value: patch.value.unwrap_or(self.value),
            weight: patch.weight.unwrap_or(self.weight),
            counts: patch.counts.unwrap_or(self.counts),
        })
    }
}

/// A subject and its grades, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    name: String,
    counts_average: bool,
    grades: Vec<Grade>,
}

impl Subject {
    /// # Errors
    /// Returns an error if the name is blank.
    pub fn new(name: &str, counts_average: bool) -> Result<Self, ValidationError> {
        Ok(Self {
            name: validate_name(name, "subject")?,
            counts_average,
            grades: Vec::new(),
        })
    }

    /// Build a subject whose `counts_average` flag is derived from its name.
    pub fn with_default_counting(
        name: &str,
        non_graded_subjects: &[String],
    ) -> Result<Self, ValidationError> {
        Self::new(name, default_counts_average(name, non_graded_subjects))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn counts_average(&self) -> bool {
        self.counts_average
    }

    pub fn grades(&self) -> &[Grade] {
        &self.grades
    }

    /// Grades with `counts = true`.
    pub fn counting_grades(&self) -> impl Iterator<Item = &Grade> {
        self.grades.iter().filter(|g| g.counts)
    }

    pub(crate) fn set_name(&mut self, name: &str) -> Result<(), ValidationError> {
        self.name = validate_name(name, "subject")?;
        Ok(())
    }

    pub(crate) fn set_counts_average(&mut self, counts_average: bool) {
        self.counts_average = counts_average;
    }

    pub(crate) fn grades_mut(&mut self) -> &mut Vec<Grade> {
        &mut self.grades
    }

    pub fn push_grade(&mut self, grade: Grade) {
        self.grades.push(grade);
    }
}

/// A semester and its subjects; subject order is display order.
#[derive(Debug, Clone, PartialEq)]
pub struct Semester {
    name: String,
    subjects: Vec<Subject>,
}

impl Semester {
    /// # Errors
    /// Returns an error if the name is blank.
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            name: validate_name(name, "semester")?,
            subjects: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub(crate) fn set_name(&mut self, name: &str) -> Result<(), ValidationError> {
        self.name = validate_name(name, "semester")?;
        Ok(())
    }

    pub(crate) fn subjects_mut(&mut self) -> &mut Vec<Subject> {
        &mut self.subjects
    }

    pub fn push_subject(&mut self, subject: Subject) {
        self.subjects.push(subject);
    }
}

/// Position of a subject inside a [`GradeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectPath {
    pub semester: usize,
    pub subject: usize,
}

impl SubjectPath {
    pub fn new(semester: usize, subject: usize) -> Self {
        Self { semester, subject }
    }

    pub fn grade(self, grade: usize) -> GradePath {
        GradePath {
            semester: self.semester,
            subject: self.subject,
            grade,
        }
    }
}

/// Position of a grade inside a [`GradeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GradePath {
    pub semester: usize,
    pub subject: usize,
    pub grade: usize,
}

impl GradePath {
    pub fn subject_path(self) -> SubjectPath {
        SubjectPath::new(self.semester, self.subject)
    }
}

/// The whole ordered sequence of semesters; the unit of persistence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradeTree {
    semesters: Vec<Semester>,
}

impl GradeTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_semesters(semesters: Vec<Semester>) -> Self {
        Self { semesters }
    }

    pub fn semesters(&self) -> &[Semester] {
        &self.semesters
    }

    pub fn len(&self) -> usize {
        self.semesters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.semesters.is_empty()
    }

    pub fn semester(&self, index: usize) -> Result<&Semester, ValidationError> {
        self.semesters
            .get(index)
            .ok_or_else(|| out_of_bounds("semesters", index, self.semesters.len()))
    }

    pub fn subject(&self, path: SubjectPath) -> Result<&Subject, ValidationError> {
        let semester = self.semester(path.semester)?;
        semester
            .subjects
            .get(path.subject)
            .ok_or_else(|| out_of_bounds("subjects", path.subject, semester.subjects.len()))
    }

    pub fn grade(&self, path: GradePath) -> Result<&Grade, ValidationError> {
        let subject = self.subject(path.subject_path())?;
        subject
            .grades
            .get(path.grade)
            .ok_or_else(|| out_of_bounds("grades", path.grade, subject.grades.len()))
    }

    pub(crate) fn semesters_mut(&mut self) -> &mut Vec<Semester> {
        &mut self.semesters
    }

    pub(crate) fn semester_mut(&mut self, index: usize) -> Result<&mut Semester, ValidationError> {
        let len = self.semesters.len();
        self.semesters
            .get_mut(index)
            .ok_or_else(|| out_of_bounds("semesters", index, len))
    }

    pub(crate) fn subject_mut(&mut self, path: SubjectPath) -> Result<&mut Subject, ValidationError> {
        let semester = self.semester_mut(path.semester)?;
        let len = semester.subjects.len();
        semester
            .subjects
            .get_mut(path.subject)
            .ok_or_else(|| out_of_bounds("subjects", path.subject, len))
    }

    /// Total number of grades across all semesters.
    pub fn grade_count(&self) -> usize {
        self.semesters
            .iter()
            .flat_map(|s| &s.subjects)
            .map(|s| s.grades.len())
            .sum()
    }
}

/// `false` when `name` matches one of the non-graded subject names, ignoring case.
pub fn default_counts_average(name: &str, non_graded_subjects: &[String]) -> bool {
    let name = name.trim().to_lowercase();
    !non_graded_subjects
        .iter()
        .any(|candidate| candidate.trim().to_lowercase() == name)
}

pub(crate) fn out_of_bounds(collection: &'static str, index: usize, len: usize) -> ValidationError {
    ValidationError::OutOfBounds {
        collection,
        index,
        len,
    }
}

fn validate_name(name: &str, entity: &'static str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName(entity));
    }
    Ok(trimmed.to_string())
}

fn validate_value(value: f64) -> Result<(), ValidationError> {
    // NaN fails the range check too
    if !(MIN_GRADE..=MAX_GRADE).contains(&value) {
        return Err(ValidationError::GradeOutOfRange {
            value,
            min: MIN_GRADE,
            max: MAX_GRADE,
        });
    }
    Ok(())
}

fn validate_weight(weight: f64) -> Result<(), ValidationError> {
    if !(weight.is_finite() && weight > 0.0) {
        return Err(ValidationError::NonPositiveWeight(weight));
    }
    Ok(())
}
