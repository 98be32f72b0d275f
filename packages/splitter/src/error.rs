//! Error types for the automation splitter.
//!
//! A single `SplitterError` covers every way a run can fail. Parse and
//! filesystem errors are fatal for the run; there is no partial recovery.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the splitter library.
#[derive(Debug, Error)]
pub enum SplitterError {
    /// IO error (missing directory, permissions, disk full).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML file could not be parsed.
    #[error("Failed to parse YAML in {}: {source}", .path.display())]
    YamlParse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),

    /// The aggregate file does not hold a sequence at its root.
    #[error("Expected a sequence of automations in {}, found {found}", .path.display())]
    InvalidAggregate { path: PathBuf, found: String },

    /// An aggregate entry is not a mapping.
    #[error("Automation #{index} is not a mapping (found {found})")]
    InvalidRule { index: usize, found: String },

    /// Schedule type or value could not be interpreted.
    #[error("Invalid {schedule_type} schedule '{value}': {reason}")]
    InvalidSchedule {
        schedule_type: String,
        value: String,
        reason: String,
    },

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for splitter operations.
pub type Result<T> = std::result::Result<T, SplitterError>;
