//! Grade tree, averaging rules and target-grade solving.
//!
//! The tree is three levels deep: semester → subject → grade. Averages are
//! never stored on the tree; [`average`] derives them on every read.

pub mod average;
pub mod catalog;
pub mod editor;
pub mod model;
pub mod target;

pub use average::{
    compute_semester_average, compute_semester_plus_points, compute_subject_average,
    display_subject_average, plus_points, round_to_half, SemesterReport, SubjectReport,
    TreeReport, WeightedTotals,
};
pub use catalog::{Catalog, SemesterTemplate};
pub use editor::{Edit, EditRules, Touched};
pub use model::{
    Grade, GradeInput, GradePatch, GradePath, GradeTree, Semester, Subject, SubjectPath,
    MAX_GRADE, MIN_GRADE,
};
pub use target::{solve_target_grade, TargetGrade, TargetOutcome};
