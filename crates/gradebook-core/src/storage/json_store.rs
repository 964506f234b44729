//! JSON file snapshot store.
//!
//! The file holds the snapshot exactly in its wire shape. Writes go to a
//! sibling temp file which is then renamed over the target.

use std::path::{Path, PathBuf};

use crate::error::PersistenceError;
use crate::sync::{snapshot_from_json, snapshot_to_json, SemesterSnapshot, TreeSnapshot, TreeStore};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TreeStore for JsonFileStore {
    fn name(&self) -> &str {
        "json"
    }

    fn load_snapshot(&mut self) -> Result<TreeSnapshot, PersistenceError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(Vec::new()),
            Ok(content) => snapshot_from_json(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(PersistenceError::load(
                format!("cannot read {}", self.path.display()),
                e,
            )),
        }
    }

    fn save_snapshot(&mut self, snapshot: &[SemesterSnapshot]) -> Result<(), PersistenceError> {
        let json = snapshot_to_json(snapshot)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PersistenceError::save(format!("cannot create {}", parent.display()), e)
            })?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)
            .map_err(|e| PersistenceError::save(format!("cannot write {}", tmp.display()), e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            PersistenceError::save(format!("cannot replace {}", self.path.display()), e)
        })
    }
}
