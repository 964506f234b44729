//! # Gradebook Core Library
//!
//! This library provides the core business logic of the Gradebook grade
//! tracker. It follows a CLI-first philosophy: every operation is available
//! through the standalone `gradebook-cli` binary, which is a thin layer over
//! this crate.
//!
//! ## Architecture
//!
//! - **Grade Tree**: semesters → subjects → grades, validated on every edit
//! - **Average Calculator**: weighted subject averages, semester averages
//!   and Swiss plus-points, recomputed from the tree on every read
//! - **Target Solver**: the grade needed next to reach a target average
//! - **Sync**: whole-tree snapshot load/save through a [`TreeStore`]
//! - **Storage**: SQLite and JSON snapshot stores, TOML configuration
//!
//! ## Key Components
//!
//! - [`GradeTree`]: the in-memory tree and its [`Edit`] operations
//! - [`GradebookSession`]: tree + store, saving after every edit
//! - [`GradeDb`]: SQLite snapshot store
//! - [`Config`]: Application configuration management

pub mod error;
pub mod grades;
pub mod storage;
pub mod sync;

pub use error::{ConfigError, CoreError, PersistenceError, ValidationError};
pub use grades::{
    compute_semester_average, compute_semester_plus_points, compute_subject_average,
    solve_target_grade, Catalog, Edit, EditRules, Grade, GradeInput, GradePatch, GradePath,
    GradeTree, Semester, SemesterReport, SemesterTemplate, Subject, SubjectPath, SubjectReport,
    TargetGrade, TargetOutcome, Touched, TreeReport,
};
pub use storage::{Config, GradeDb, JsonFileStore, StorageBackend};
pub use sync::{
    EditOutcome, GradebookSession, MemoryStore, SemesterSnapshot, TreeSnapshot, TreeStore,
    TreeSynchronizer,
};
