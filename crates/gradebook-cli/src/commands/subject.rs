//! Subject management commands for CLI.

use clap::Subcommand;
use gradebook_core::{Edit, SubjectPath};

use super::{apply_and_print, open_session, CliResult};

#[derive(Subcommand)]
pub enum SubjectAction {
    /// Add a subject to a semester
    Add {
        /// Semester index
        semester: usize,
        /// Subject name
        name: String,
        /// Force whether the subject counts towards the semester average
        #[arg(long)]
        counts: Option<bool>,
    },
    /// Rename a subject
    Rename {
        semester: usize,
        subject: usize,
        /// New name
        name: String,
    },
    /// Flip whether a subject counts towards the semester average
    Toggle { semester: usize, subject: usize },
    /// Move a subject to another position within its semester
    Move {
        semester: usize,
        from: usize,
        to: usize,
    },
    /// Delete a subject and its grades
    Delete { semester: usize, subject: usize },
}

pub fn run(action: SubjectAction) -> CliResult {
    let (mut session, _config) = open_session()?;

    let edit = match action {
        SubjectAction::Add {
            semester,
            name,
            counts,
        } => Edit::AddSubject {
            semester,
            name,
            counts_average: counts,
        },
        SubjectAction::Rename {
            semester,
            subject,
            name,
        } => Edit::RenameSubject {
            subject: SubjectPath::new(semester, subject),
            name,
        },
        SubjectAction::Toggle { semester, subject } => {
            let path = SubjectPath::new(semester, subject);
            let current = session.tree().subject(path)?.counts_average();
            Edit::SetSubjectCounts {
                subject: path,
                counts_average: !current,
            }
        }
        SubjectAction::Move { semester, from, to } => Edit::MoveSubject { semester, from, to },
        SubjectAction::Delete { semester, subject } => Edit::DeleteSubject {
            subject: SubjectPath::new(semester, subject),
        },
    };
    apply_and_print(&mut session, edit)
}
