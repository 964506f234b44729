//! SQLite-based snapshot storage.
//!
//! Provides persistent storage for:
//! - Semesters, subjects and grades (positions preserve display order)
//! - Key-value store for bookkeeping such as the last save time
//!
//! Saving is destructive: all rows are deleted and the full snapshot is
//! re-inserted inside a single transaction.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::PersistenceError;
use crate::sync::{GradeSnapshot, SemesterSnapshot, SubjectSnapshot, TreeSnapshot, TreeStore};

/// SQLite database holding the grade tree.
pub struct GradeDb {
    conn: Connection,
}

impl GradeDb {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open (creating if needed) the database at `path` and migrate its schema.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|e| {
            PersistenceError::load(format!("cannot open database at {}", path.display()), e)
        })?;
        Self::with_connection(conn)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self, PersistenceError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| PersistenceError::load("cannot open in-memory database", e))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, PersistenceError> {
        let db = Self { conn };
        db.migrate()
            .map_err(|e| PersistenceError::load("database migration failed", e))?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS semesters (
                id        INTEGER PRIMARY KEY AUTOINCREMENT,
                position  INTEGER NOT NULL,
                name      TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS subjects (
                id             INTEGER PRIMARY KEY AUTOINCREMENT,
                semester_id    INTEGER NOT NULL REFERENCES semesters(id) ON DELETE CASCADE,
                position       INTEGER NOT NULL,
                name           TEXT NOT NULL,
                counts_average INTEGER NOT NULL DEFAULT 1
            );

            CREATE TABLE IF NOT EXISTS grades (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                subject_id  INTEGER NOT NULL REFERENCES subjects(id) ON DELETE CASCADE,
                position    INTEGER NOT NULL,
                name        TEXT NOT NULL,
                value       REAL NOT NULL,
                weight      REAL NOT NULL,
                counts      INTEGER NOT NULL DEFAULT 1
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_subjects_semester ON subjects(semester_id, position);
            CREATE INDEX IF NOT EXISTS idx_grades_subject ON grades(subject_id, position);",
        )?;
        Ok(())
    }

    fn read_snapshot(&self) -> Result<TreeSnapshot, rusqlite::Error> {
        let mut semester_stmt = self
            .conn
            .prepare("SELECT id, name FROM semesters ORDER BY position")?;
        let mut subject_stmt = self.conn.prepare(
            "SELECT id, name, counts_average FROM subjects
             WHERE semester_id = ?1 ORDER BY position",
        )?;
        let mut grade_stmt = self.conn.prepare(
            "SELECT name, value, weight, counts FROM grades
             WHERE subject_id = ?1 ORDER BY position",
        )?;

        let semester_rows = semester_stmt
            .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut snapshot = Vec::with_capacity(semester_rows.len());
        for (semester_id, name) in semester_rows {
            let subject_rows = subject_stmt
                .query_map(params![semester_id], |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, bool>(2)?,
                    ))
                })?
                .collect::<Result<Vec<_>, _>>()?;

            let mut subjects = Vec::with_capacity(subject_rows.len());
            for (subject_id, subject_name, counts_average) in subject_rows {
                let grades = grade_stmt
                    .query_map(params![subject_id], |row| {
                        Ok(GradeSnapshot {
                            name: row.get(0)?,
                            value: row.get(1)?,
                            weight: row.get(2)?,
                            counts: row.get(3)?,
                        })
                    })?
                    .collect::<Result<Vec<_>, _>>()?;
                subjects.push(SubjectSnapshot {
                    name: subject_name,
                    counts_average,
                    grades,
                });
            }
            snapshot.push(SemesterSnapshot { name, subjects });
        }
        Ok(snapshot)
    }

    fn write_snapshot(&self, snapshot: &[SemesterSnapshot]) -> Result<(), rusqlite::Error> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute_batch(
            "DELETE FROM grades;
             DELETE FROM subjects;
             DELETE FROM semesters;",
        )?;

        {
            let mut insert_semester =
                tx.prepare("INSERT INTO semesters (position, name) VALUES (?1, ?2)")?;
            let mut insert_subject = tx.prepare(
                "INSERT INTO subjects (semester_id, position, name, counts_average)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            let mut insert_grade = tx.prepare(
                "INSERT INTO grades (subject_id, position, name, value, weight, counts)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;

            for (si, semester) in snapshot.iter().enumerate() {
                let semester_id = insert_semester.insert(params![si as i64, semester.name])?;
                for (ji, subject) in semester.subjects.iter().enumerate() {
                    let subject_id = insert_subject.insert(params![
                        semester_id,
                        ji as i64,
                        subject.name,
                        subject.counts_average
                    ])?;
                    for (gi, grade) in subject.grades.iter().enumerate() {
                        insert_grade.execute(params![
                            subject_id,
                            gi as i64,
                            grade.name,
                            grade.value,
                            grade.weight,
                            grade.counts
                        ])?;
                    }
                }
            }
        }

        tx.execute(
            "INSERT INTO kv (key, value) VALUES ('last_saved_at', ?1)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![Utc::now().to_rfc3339()],
        )?;
        tx.commit()
    }

    /// Time of the last successful snapshot save, if any.
    pub fn last_saved_at(&self) -> Result<Option<DateTime<Utc>>, PersistenceError> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv WHERE key = 'last_saved_at'",
                [],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| PersistenceError::load("cannot read last save time", e))?;
        raw.map(|value| {
            DateTime::parse_from_rfc3339(&value)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| PersistenceError::load("stored save time is malformed", e))
        })
        .transpose()
    }
}

impl TreeStore for GradeDb {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn load_snapshot(&mut self) -> Result<TreeSnapshot, PersistenceError> {
        self.read_snapshot()
            .map_err(|e| PersistenceError::load("cannot read grade tables", e))
    }

    fn save_snapshot(&mut self, snapshot: &[SemesterSnapshot]) -> Result<(), PersistenceError> {
        self.write_snapshot(snapshot)
            .map_err(|e| PersistenceError::save("cannot replace grade tables", e))
    }
}
