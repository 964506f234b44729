//! Opening a session from the data directory.
//!
//! Kept in its own test binary since it points `GRADEBOOK_HOME` at a
//! temporary directory for the whole process.

use gradebook_core::storage::open_session;
use gradebook_core::{CoreError, PersistenceError, TreeStore};

#[test]
fn open_session_separates_config_and_store_failures() {
    let home = tempfile::tempdir().unwrap();
    std::env::set_var("GRADEBOOK_HOME", home.path());

    std::fs::write(home.path().join("config.toml"), "storage = 5\n").unwrap();
    assert!(matches!(open_session(), Err(CoreError::Config(_))));

    std::fs::write(
        home.path().join("config.toml"),
        "[storage]\nbackend = \"json\"\n",
    )
    .unwrap();
    std::fs::write(
        home.path().join("grades.json"),
        r#"[{"name": "S1", "subjects": [{"name": "Math", "grades": [{"name": "Test", "value": 9.0, "weight": 1.0}]}]}]"#,
    )
    .unwrap();
    assert!(matches!(
        open_session(),
        Err(CoreError::Persistence(PersistenceError::InvalidSnapshot { .. }))
    ));

    std::fs::write(
        home.path().join("grades.json"),
        r#"[{"name": "S1", "subjects": [{"name": "Math", "grades": [{"name": "Test", "value": 5.0, "weight": 1.0}]}]}]"#,
    )
    .unwrap();
    let (session, config) = open_session().unwrap();
    assert_eq!(session.tree().len(), 1);
    assert_eq!(session.store().name(), "json");
    assert_eq!(config.grades.non_graded_subjects, vec!["Sport".to_string()]);
}
