//! Tests for the snapshot module.

#[cfg(test)]
mod tests {
    use super::super::snapshot::*;
    use crate::error::{PersistenceError, ValidationError};
    use crate::grades::{Edit, EditRules, GradeInput, GradeTree, SubjectPath};

    fn sample_tree() -> GradeTree {
        let rules = EditRules::default();
        let mut tree = GradeTree::new();
        tree.apply(Edit::AddSemester { name: None }, &rules).unwrap();
        tree.apply(
            Edit::AddGrade {
                subject: SubjectPath::new(0, 3),
                grade: GradeInput::new("Algebra", 5.5).weight(2.0),
            },
            &rules,
        )
        .unwrap();
        tree.apply(
            Edit::AddGrade {
                subject: SubjectPath::new(0, 3),
                grade: GradeInput::new("Quiz", 3.0).counts(false),
            },
            &rules,
        )
        .unwrap();
        tree
    }

    #[test]
    fn snapshot_uses_stable_field_names() {
        let json = serde_json::to_value(sample_tree().to_snapshot()).unwrap();
        let subject = &json[0]["subjects"][3];
        assert_eq!(subject["name"], "Mathematik");
        assert_eq!(subject["counts_average"], true);
        assert_eq!(subject["grades"][0]["name"], "Algebra");
        assert_eq!(subject["grades"][0]["value"], 5.5);
        assert_eq!(subject["grades"][0]["weight"], 2.0);
        assert_eq!(subject["grades"][1]["counts"], false);
    }

    #[test]
    fn snapshot_roundtrip_is_field_for_field() {
        let tree = sample_tree();
        let snapshot = tree.to_snapshot();
        let json = snapshot_to_json(&snapshot).unwrap();
        let decoded = snapshot_from_json(&json).unwrap();
        assert_eq!(decoded, snapshot);

        let rebuilt = GradeTree::from_snapshot(&decoded).unwrap();
        assert_eq!(rebuilt, tree);
        assert_eq!(rebuilt.to_snapshot(), snapshot);
    }

    #[test]
    fn legacy_backend_payload_is_accepted() {
        let json = r#"[{
            "id": 7,
            "name": "API Test Semester",
            "subjects": [{
                "id": 3,
                "name": "History",
                "counts_towards_average": false,
                "grades": [{"id": 1, "name": "Essay", "value": 4.5, "weight": 1.0, "counts": true}]
            }]
        }]"#;
        let snapshot = snapshot_from_json(json).unwrap();
        assert!(!snapshot[0].subjects[0].counts_average);

        let tree = GradeTree::from_snapshot(&snapshot).unwrap();
        assert_eq!(tree.grade_count(), 1);
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"[{"name": "S1", "subjects": [{"name": "Math"}]}, {"name": "S2"}]"#;
        let snapshot = snapshot_from_json(json).unwrap();
        assert!(snapshot[0].subjects[0].counts_average);
        assert!(snapshot[0].subjects[0].grades.is_empty());
        assert!(snapshot[1].subjects.is_empty());
    }

    #[test]
    fn invalid_grade_in_snapshot_is_located() {
        let json = r#"[{"name": "S1", "subjects": [{"name": "Math", "counts_average": true,
            "grades": [{"name": "Bad", "value": 8.0, "weight": 1.0, "counts": true}]}]}]"#;
        let snapshot = snapshot_from_json(json).unwrap();
        match GradeTree::from_snapshot(&snapshot) {
            Err(PersistenceError::InvalidSnapshot { location, source }) => {
                assert_eq!(location, "semester[0].subject[0].grade[0]");
                assert!(matches!(source, ValidationError::GradeOutOfRange { .. }));
            }
            other => panic!("expected InvalidSnapshot, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_a_load_failure() {
        assert!(matches!(
            snapshot_from_json("{not json"),
            Err(PersistenceError::LoadFailed { .. })
        ));
    }
}
