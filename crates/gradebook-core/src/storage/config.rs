//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Which snapshot store backs the grade tree
//! - Subject names that default to not counting towards averages
//! - An optional replacement for the semester catalog
//!
//! Configuration is stored at `~/.config/gradebook/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::grades::{Catalog, EditRules, SemesterTemplate};

/// Snapshot store backing the grade tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Json,
}

/// Storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
}

/// Grade tree defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradesConfig {
    /// New subjects with one of these names (case-insensitive) start out
    /// not counting towards the semester average.
    #[serde(default = "default_non_graded_subjects")]
    pub non_graded_subjects: Vec<String>,
    /// Weight assumed for the next assessment when solving for a target.
    #[serde(default = "default_target_weight")]
    pub default_target_weight: f64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/gradebook/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub grades: GradesConfig,
    /// Replaces the built-in semester catalog when set.
    #[serde(default)]
    pub custom_catalog: Option<Vec<SemesterTemplate>>,
}

fn default_non_graded_subjects() -> Vec<String> {
    vec!["Sport".into()]
}
fn default_target_weight() -> f64 {
    1.0
}

impl Default for GradesConfig {
    fn default() -> Self {
        Self {
            non_graded_subjects: default_non_graded_subjects(),
            default_target_weight: default_target_weight(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<f64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Number::from_f64(n)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                    }
                    serde_json::Value::Object(_)
                    | serde_json::Value::Array(_)
                    | serde_json::Value::Null => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    serde_json::Value::String(_) => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing the defaults there if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// into the field's type.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Set a config value by key and save. Returns error if key is unknown.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.set_value(key, value)?;
        self.save()
    }

    /// Semester catalog in effect.
    pub fn catalog(&self) -> Catalog {
        match &self.custom_catalog {
            Some(templates) => Catalog::new(templates.clone()),
            None => Catalog::standard(),
        }
    }

    /// Edit rules derived from this configuration.
    pub fn edit_rules(&self) -> EditRules {
        EditRules {
            catalog: self.catalog(),
            non_graded_subjects: self.grades.non_graded_subjects.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.storage.backend, StorageBackend::Sqlite);
        assert_eq!(parsed.grades.non_graded_subjects, vec!["Sport".to_string()]);
        assert!(parsed.custom_catalog.is_none());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[storage]\nbackend = \"json\"\n").unwrap();
        assert_eq!(parsed.storage.backend, StorageBackend::Json);
        assert_eq!(parsed.grades.default_target_weight, 1.0);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("storage.backend").as_deref(), Some("sqlite"));
        assert_eq!(cfg.get("grades.default_target_weight").as_deref(), Some("1.0"));
        assert!(cfg.get("grades.missing_key").is_none());
    }

    #[test]
    fn set_value_updates_enum_and_list() {
        let mut cfg = Config::default();
        cfg.set_value("storage.backend", "json").unwrap();
        assert_eq!(cfg.storage.backend, StorageBackend::Json);

        cfg.set_value("grades.non_graded_subjects", r#"["Sport", "Chor"]"#)
            .unwrap();
        assert_eq!(cfg.grades.non_graded_subjects.len(), 2);
        assert!(!crate::grades::model::default_counts_average(
            "chor",
            &cfg.edit_rules().non_graded_subjects
        ));
    }

    #[test]
    fn set_value_updates_number() {
        let mut cfg = Config::default();
        cfg.set_value("grades.default_target_weight", "2").unwrap();
        assert_eq!(cfg.grades.default_target_weight, 2.0);
    }

    #[test]
    fn set_value_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set_value("grades.nonexistent_key", "value"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(cfg.set_value("", "value").is_err());
    }

    #[test]
    fn set_value_rejects_invalid_backend() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set_value("storage.backend", "postgres"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(cfg.storage.backend, StorageBackend::Sqlite);
    }

    #[test]
    fn custom_catalog_replaces_standard() {
        let mut cfg = Config::default();
        assert_eq!(cfg.catalog().len(), 8);
        cfg.set_value(
            "custom_catalog",
            r#"[{"name": "Vorkurs", "subjects": ["Mathematik"]}]"#,
        )
        .unwrap();
        let catalog = cfg.catalog();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.template(0).unwrap().name, "Vorkurs");
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.storage.backend, StorageBackend::Sqlite);
        assert!(path.exists());
    }

    #[test]
    fn load_from_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "storage = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }

    #[test]
    fn save_to_then_load_from() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.storage.backend = StorageBackend::Json;
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().storage.backend, StorageBackend::Json);
    }
}
