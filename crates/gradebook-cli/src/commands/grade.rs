//! Grade management commands for CLI.

use clap::Subcommand;
use gradebook_core::{Edit, GradeInput, GradePatch, SubjectPath};

use super::{apply_and_print, open_session, CliResult};

#[derive(Subcommand)]
pub enum GradeAction {
    /// Add a grade to a subject
    Add {
        semester: usize,
        subject: usize,
        /// Grade label (e.g. "Midterm")
        name: String,
        /// Mark between 1 and 6
        value: f64,
        /// Weight in the subject average (default: 1)
        #[arg(long, default_value = "1")]
        weight: f64,
        /// Keep the grade but exclude it from the average
        #[arg(long)]
        no_count: bool,
    },
    /// Edit a grade
    Edit {
        semester: usize,
        subject: usize,
        /// Grade index within the subject
        grade: usize,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        value: Option<f64>,
        #[arg(long)]
        weight: Option<f64>,
        /// Whether the grade counts towards the average
        #[arg(long)]
        counts: Option<bool>,
    },
    /// Delete a grade
    Delete {
        semester: usize,
        subject: usize,
        grade: usize,
    },
}

pub fn run(action: GradeAction) -> CliResult {
    let (mut session, _config) = open_session()?;

    let edit = match action {
        GradeAction::Add {
            semester,
            subject,
            name,
            value,
            weight,
            no_count,
        } => Edit::AddGrade {
            subject: SubjectPath::new(semester, subject),
            grade: GradeInput::new(name, value).weight(weight).counts(!no_count),
        },
        GradeAction::Edit {
            semester,
            subject,
            grade,
            name,
            value,
            weight,
            counts,
        } => {
            let patch = GradePatch {
                name,
                value,
                weight,
                counts,
            };
            if patch.is_empty() {
                return Err("nothing to change: pass --name, --value, --weight or --counts".into());
            }
            Edit::EditGrade {
                grade: SubjectPath::new(semester, subject).grade(grade),
                patch,
            }
        }
        GradeAction::Delete {
            semester,
            subject,
            grade,
        } => Edit::DeleteGrade {
            grade: SubjectPath::new(semester, subject).grade(grade),
        },
    };
    apply_and_print(&mut session, edit)
}
