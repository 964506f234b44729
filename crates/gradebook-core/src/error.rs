//! Core error types for gradebook-core.
//!
//! Validation errors (rejected edits, bad solver input) and persistence
//! errors (snapshot load/save) are kept as distinct kinds so callers can
//! present them differently. A subject with no counting grades is not an
//! error; see [`crate::grades::average`].

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for gradebook-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Rejected input; the tree was not modified
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Snapshot load/save errors
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Validation errors.
///
/// Raised before any structural change, so the tree is left untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Grade value outside the Swiss scale
    #[error("Grade value {value} is outside the range {min}..={max}")]
    GradeOutOfRange { value: f64, min: f64, max: f64 },

    /// Weight must be strictly positive
    #[error("Weight must be greater than 0 (got {0})")]
    NonPositiveWeight(f64),

    /// Empty label
    #[error("Name of {0} must not be empty")]
    EmptyName(&'static str),

    /// Target average outside the Swiss scale
    #[error("Target average {value} is outside the range {min}..={max}")]
    TargetOutOfRange { value: f64, min: f64, max: f64 },

    /// Out of bounds
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: &'static str,
        index: usize,
        len: usize,
    },

    /// No template left for the next semester
    #[error("Semester catalog has only {len} entries; pass an explicit name to add more")]
    CatalogExhausted { len: usize },
}

/// Snapshot persistence errors.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Failed to read the persisted tree
    #[error("Failed to load grade tree: {message}")]
    LoadFailed {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to write the snapshot
    #[error("Failed to save grade tree: {message}")]
    SaveFailed {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Snapshot decoded but violates a tree invariant
    #[error("Invalid snapshot at {location}: {source}")]
    InvalidSnapshot {
        location: String,
        #[source]
        source: ValidationError,
    },
}

impl PersistenceError {
    pub fn load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        PersistenceError::LoadFailed {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn save<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        PersistenceError::SaveFailed {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Data directory could not be determined or created
    #[error("Data directory unavailable: {0}")]
    DataDir(#[from] std::io::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
