//! Fixed, ordered catalog of semester templates.
//!
//! The n-th semester added to a tree is pre-populated from the n-th
//! template. The catalog is static configuration; it can be replaced
//! through `custom_catalog` in `config.toml`.

use serde::{Deserialize, Serialize};

/// Name and default subject list for one position in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterTemplate {
    pub name: String,
    #[serde(default)]
    pub subjects: Vec<String>,
}

impl SemesterTemplate {
    fn new(name: &str, subjects: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            subjects: subjects.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    templates: Vec<SemesterTemplate>,
}

const CORE_SUBJECTS: &[&str] = &[
    "Deutsch",
    "Französisch",
    "Englisch",
    "Mathematik",
    "Biologie",
    "Chemie",
    "Physik",
    "Geschichte",
    "Geografie",
];

impl Catalog {
    pub fn new(templates: Vec<SemesterTemplate>) -> Self {
        Self { templates }
    }

    /// Four school years with two semesters each.
    pub fn standard() -> Self {
        let lower: Vec<&str> = CORE_SUBJECTS
            .iter()
            .copied()
            .chain(["Bildnerisches Gestalten", "Musik", "Sport"])
            .collect();
        let middle: Vec<&str> = CORE_SUBJECTS
            .iter()
            .copied()
            .chain(["Schwerpunktfach", "Bildnerisches Gestalten", "Sport"])
            .collect();
        let upper: Vec<&str> = CORE_SUBJECTS
            .iter()
            .copied()
            .chain(["Schwerpunktfach", "Ergänzungsfach", "Sport"])
            .collect();

        let mut templates = Vec::with_capacity(8);
        for year in 1..=4 {
            let subjects = match year {
                1 => &lower,
                2 => &middle,
                _ => &upper,
            };
            for semester in 1..=2 {
                templates.push(SemesterTemplate::new(
                    &format!("{year}. Klasse, {semester}. Semester"),
                    subjects,
                ));
            }
        }
        Self { templates }
    }

    pub fn templates(&self) -> &[SemesterTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Template for the semester at `position` (0-based), if the catalog reaches that far.
    pub fn template(&self, position: usize) -> Option<&SemesterTemplate> {
        self.templates.get(position)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
