//! Whole-tree export/import.

use std::path::PathBuf;

use clap::Subcommand;
use gradebook_core::sync::{snapshot_from_json, snapshot_to_json};
use gradebook_core::GradeTree;
use tracing::info;

use super::{open_session, open_unloaded_session, CliResult};

#[derive(Subcommand)]
pub enum SnapshotAction {
    /// Print (or write) the full tree in its persisted JSON shape
    Export {
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Replace the full tree with a JSON snapshot
    Import {
        /// Snapshot file
        file: PathBuf,
    },
}

pub fn run(action: SnapshotAction) -> CliResult {
    match action {
        SnapshotAction::Export { output } => {
            let (session, _config) = open_session()?;
            let json = snapshot_to_json(&session.tree().to_snapshot())?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("exported to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        SnapshotAction::Import { file } => {
            let content = std::fs::read_to_string(&file)?;
            let tree = GradeTree::from_snapshot(&snapshot_from_json(&content)?)?;
            let semesters = tree.len();
            let mut session = open_unloaded_session()?;
            session.replace_tree(tree)?;
            info!(semesters, file = %file.display(), "snapshot imported");
            println!("imported {semesters} semester(s)");
        }
    }
    Ok(())
}
