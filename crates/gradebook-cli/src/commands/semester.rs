//! Semester management commands for CLI.

use clap::Subcommand;
use gradebook_core::Edit;
use serde_json::json;

use super::{apply_and_print, open_session, CliResult};

#[derive(Subcommand)]
pub enum SemesterAction {
    /// List semesters with their subjects
    List,
    /// Add the next semester from the catalog
    Add {
        /// Override the catalog name (required once the catalog is used up)
        #[arg(long)]
        name: Option<String>,
    },
    /// Rename a semester
    Rename {
        /// Semester index
        semester: usize,
        /// New name
        name: String,
    },
    /// Delete a semester with all its subjects and grades
    Delete {
        /// Semester index
        semester: usize,
    },
}

pub fn run(action: SemesterAction) -> CliResult {
    let (mut session, _config) = open_session()?;

    match action {
        SemesterAction::List => {
            let semesters: Vec<_> = session
                .tree()
                .semesters()
                .iter()
                .enumerate()
                .map(|(index, semester)| {
                    json!({
                        "index": index,
                        "name": semester.name(),
                        "subjects": semester
                            .subjects()
                            .iter()
                            .map(|s| s.name())
                            .collect::<Vec<_>>(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&semesters)?);
        }
        SemesterAction::Add { name } => apply_and_print(&mut session, Edit::AddSemester { name })?,
        SemesterAction::Rename { semester, name } => {
            apply_and_print(&mut session, Edit::RenameSemester { semester, name })?
        }
        SemesterAction::Delete { semester } => {
            apply_and_print(&mut session, Edit::DeleteSemester { semester })?
        }
    }
    Ok(())
}
