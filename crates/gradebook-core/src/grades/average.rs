//! Average calculator.
//!
//! Pure functions from tree state to derived numbers. Nothing is cached:
//! every call recomputes from the current grades.
//!
//! Semester-level figures are built from each subject's two-decimal display
//! average, so a semester summary always agrees with the subject averages a
//! user sees next to it.

use serde::{Deserialize, Serialize};

use super::model::{Grade, GradeTree, Semester, Subject};

/// Grade at and above which plus-points are non-negative.
pub const PASSING_GRADE: f64 = 4.0;

/// Σ value·weight and Σ weight over a set of grades.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightedTotals {
    pub score: f64,
    pub weight: f64,
}

impl WeightedTotals {
    /// Totals over the counting grades in `grades`.
    pub fn of<'a>(grades: impl IntoIterator<Item = &'a Grade>) -> Self {
        grades
            .into_iter()
            .filter(|g| g.counts())
            .fold(Self::default(), |acc, g| Self {
                score: acc.score + g.value() * g.weight(),
                weight: acc.weight + g.weight(),
            })
    }

    /// `None` when no weight has been accumulated.
    pub fn average(&self) -> Option<f64> {
        if self.weight > 0.0 {
            Some(self.score / self.weight)
        } else {
            None
        }
    }
}

/// Unrounded weighted average of the counting grades, or `None` if none count.
pub fn compute_subject_average(subject: &Subject) -> Option<f64> {
    WeightedTotals::of(subject.grades()).average()
}

/// Two-decimal display value of [`compute_subject_average`]; 0 when undefined.
pub fn display_subject_average(subject: &Subject) -> f64 {
    compute_subject_average(subject).map(round2).unwrap_or(0.0)
}

pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Round to the nearest half grade.
pub fn round_to_half(x: f64) -> f64 {
    (x * 2.0).round() / 2.0
}

/// Swiss plus-points for a half-rounded average: one point per grade above
/// [`PASSING_GRADE`], two points deducted per grade below it.
pub fn plus_points(rounded_average: f64) -> f64 {
    let delta = rounded_average - PASSING_GRADE;
    if delta >= 0.0 {
        delta
    } else {
        2.0 * delta
    }
}

/// Display averages of the subjects that feed the semester figures.
fn counting_subject_averages(semester: &Semester) -> impl Iterator<Item = f64> + '_ {
    semester
        .subjects()
        .iter()
        .filter(|s| s.counts_average())
        .filter_map(|s| compute_subject_average(s).map(round2))
        .filter(|avg| *avg > 0.0)
}

/// Mean of the counting subjects' averages, rounded to 2 decimals; 0 if none count.
pub fn compute_semester_average(semester: &Semester) -> f64 {
    let (sum, count) = counting_subject_averages(semester)
        .fold((0.0, 0usize), |(sum, count), avg| (sum + avg, count + 1));
    if count == 0 {
        return 0.0;
    }
    round2(sum / count as f64)
}

/// Sum of plus-points over the counting subjects, rounded to 1 decimal.
pub fn compute_semester_plus_points(semester: &Semester) -> f64 {
    let total: f64 = counting_subject_averages(semester)
        .map(|avg| plus_points(round_to_half(avg)))
        .sum();
    round1(total)
}

/// Derived figures for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectReport {
    pub name: String,
    /// Unrounded weighted average; `None` when no grade counts.
    pub raw_average: Option<f64>,
    /// Two-decimal average, 0 when undefined.
    pub average: f64,
    /// Whether this subject feeds its semester's average and plus-points.
    pub contributes: bool,
    /// Plus-points this subject adds to its semester (0 when not contributing).
    pub plus_points: f64,
    pub grade_count: usize,
    pub counting_grade_count: usize,
}

impl SubjectReport {
    pub fn of(subject: &Subject) -> Self {
        let raw_average = compute_subject_average(subject);
        let average = raw_average.map(round2).unwrap_or(0.0);
        let contributes = subject.counts_average() && average > 0.0;
        let plus_points = if contributes {
            plus_points(round_to_half(average))
        } else {
            0.0
        };
        Self {
            name: subject.name().to_string(),
            raw_average,
            average,
            contributes,
            plus_points,
            grade_count: subject.grades().len(),
            counting_grade_count: subject.counting_grades().count(),
        }
    }
}

/// Derived figures for one semester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterReport {
    pub name: String,
    pub average: f64,
    pub plus_points: f64,
    pub subjects: Vec<SubjectReport>,
}

impl SemesterReport {
    pub fn of(semester: &Semester) -> Self {
        Self {
            name: semester.name().to_string(),
            average: compute_semester_average(semester),
            plus_points: compute_semester_plus_points(semester),
            subjects: semester.subjects().iter().map(SubjectReport::of).collect(),
        }
    }

    /// Number of subjects feeding the semester figures.
    pub fn contributing_subjects(&self) -> usize {
        self.subjects.iter().filter(|s| s.contributes).count()
    }
}

/// Derived figures for every semester of a tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeReport {
    pub semesters: Vec<SemesterReport>,
}

impl TreeReport {
    pub fn of(tree: &GradeTree) -> Self {
        Self {
            semesters: tree.semesters().iter().map(SemesterReport::of).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grades::model::GradeInput;

    fn subject(name: &str, counts_average: bool, grades: &[(f64, f64, bool)]) -> Subject {
        let mut subject = Subject::new(name, counts_average).unwrap();
        for (i, (value, weight, counts)) in grades.iter().enumerate() {
            subject.push_grade(
                Grade::new(
                    GradeInput::new(format!("G{i}"), *value)
                        .weight(*weight)
                        .counts(*counts),
                )
                .unwrap(),
            );
        }
        subject
    }

    fn semester(subjects: Vec<Subject>) -> Semester {
        let mut semester = Semester::new("S1").unwrap();
        for s in subjects {
            semester.push_subject(s);
        }
        semester
    }

    #[test]
    fn weighted_average_of_two_grades() {
        let s = subject("Math", true, &[(5.0, 1.0, true), (3.0, 2.0, true)]);
        let raw = compute_subject_average(&s).unwrap();
        assert!((raw - 11.0 / 3.0).abs() < 1e-12);
        assert_eq!(display_subject_average(&s), 3.67);
    }

    #[test]
    fn no_counting_grades_is_undefined_not_error() {
        let empty = subject("Empty", true, &[]);
        assert_eq!(compute_subject_average(&empty), None);
        assert_eq!(display_subject_average(&empty), 0.0);

        let excluded = subject("Excluded", true, &[(6.0, 1.0, false)]);
        assert_eq!(compute_subject_average(&excluded), None);
    }

    #[test]
    fn non_counting_grade_is_ignored() {
        let s = subject("Math", true, &[(5.0, 1.0, true), (1.0, 10.0, false)]);
        assert_eq!(compute_subject_average(&s), Some(5.0));
    }

    #[test]
    fn round_to_half_examples() {
        assert_eq!(round_to_half(4.24), 4.0);
        assert_eq!(round_to_half(4.25), 4.5);
        assert_eq!(round_to_half(4.74), 4.5);
        assert_eq!(round_to_half(4.75), 5.0);
        assert_eq!(round_to_half(6.0), 6.0);
    }

    #[test]
    fn plus_points_piecewise() {
        assert_eq!(plus_points(6.0), 2.0);
        assert_eq!(plus_points(4.5), 0.5);
        assert_eq!(plus_points(4.0), 0.0);
        assert_eq!(plus_points(3.5), -1.0);
        assert_eq!(plus_points(1.0), -6.0);
    }

    #[test]
    fn semester_excludes_empty_subject() {
        let sem = semester(vec![
            subject("A", true, &[(5.0, 1.0, true)]),
            subject("B", true, &[(4.0, 1.0, true)]),
            subject("C", true, &[]),
        ]);
        assert_eq!(compute_semester_average(&sem), 4.5);
        assert_eq!(compute_semester_plus_points(&sem), 1.0);
    }

    #[test]
    fn semester_excludes_non_counting_subject() {
        let sem = semester(vec![
            subject("Math", true, &[(4.0, 1.0, true)]),
            subject("Sport", false, &[(6.0, 1.0, true)]),
        ]);
        assert_eq!(compute_semester_average(&sem), 4.0);
        assert_eq!(compute_semester_plus_points(&sem), 0.0);

        let report = SemesterReport::of(&sem);
        assert_eq!(report.contributing_subjects(), 1);
        let sport = &report.subjects[1];
        assert_eq!(sport.average, 6.0);
        assert!(!sport.contributes);
        assert_eq!(sport.plus_points, 0.0);
    }

    #[test]
    fn semester_without_counting_subjects_is_zero() {
        let sem = semester(vec![subject("Sport", false, &[(5.0, 1.0, true)])]);
        assert_eq!(compute_semester_average(&sem), 0.0);
        assert_eq!(compute_semester_plus_points(&sem), 0.0);
        assert_eq!(compute_semester_average(&semester(vec![])), 0.0);
    }

    #[test]
    fn failing_subject_costs_double() {
        let sem = semester(vec![
            subject("A", true, &[(5.5, 1.0, true)]),
            subject("B", true, &[(3.0, 1.0, true)]),
        ]);
        // 1.5 - 2.0
        assert_eq!(compute_semester_plus_points(&sem), -0.5);
        assert_eq!(compute_semester_average(&sem), 4.25);
    }

    #[test]
    fn plus_points_round_quarter_up() {
        let sem = semester(vec![subject(
            "A",
            true,
            &[(4.5, 1.0, true), (4.0, 1.0, true)],
        )]);
        assert_eq!(compute_semester_average(&sem), 4.25);
        assert_eq!(compute_semester_plus_points(&sem), 0.5);
    }

    #[test]
    fn semester_average_is_idempotent() {
        let sem = semester(vec![
            subject("A", true, &[(4.7, 1.5, true), (5.2, 1.0, true)]),
            subject("B", true, &[(3.9, 2.0, true)]),
        ]);
        assert_eq!(compute_semester_average(&sem), compute_semester_average(&sem));
        assert_eq!(SemesterReport::of(&sem), SemesterReport::of(&sem));
    }
}
