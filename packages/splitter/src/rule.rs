//! Automation rules as read from the aggregate file.

use std::path::{Path, PathBuf};

use serde_yaml_ng::{Mapping, Value};

use crate::config::{DEFAULT_ALIAS, SPLIT_FILE_EXTENSION};
use crate::error::{Result, SplitterError};
use crate::normalize::normalize_name;
use crate::yaml::describe;

/// Key holding the human-readable rule name.
pub const ALIAS_KEY: &str = "alias";

/// Key added to every split document.
pub const NAME_KEY: &str = "name";

/// A single automation: an arbitrary YAML mapping.
///
/// The content is never validated; only the `alias` field is interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    fields: Mapping,
}

impl Rule {
    #[must_use]
    pub fn new(fields: Mapping) -> Self {
        Self { fields }
    }

    /// Convert an aggregate entry into a rule.
    ///
    /// # Errors
    /// `SplitterError::InvalidRule` if the entry is not a mapping.
    pub fn from_value(index: usize, value: Value) -> Result<Self> {
        match value {
            Value::Mapping(fields) => Ok(Self::new(fields)),
            other => Err(SplitterError::InvalidRule {
                index,
                found: describe(&other).to_string(),
            }),
        }
    }

    /// The rule's alias, or the default alias when there is no usable one.
    ///
    /// Only a string `alias` counts; null, numbers, and nested values fall
    /// back to the default.
    #[must_use]
    pub fn alias(&self) -> &str {
        self.fields
            .get(ALIAS_KEY)
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_ALIAS)
    }

    #[must_use]
    pub fn normalized_name(&self) -> String {
        normalize_name(self.alias())
    }

    /// Path of this rule's split file inside `split_dir`.
    #[must_use]
    pub fn split_path(&self, split_dir: &Path) -> PathBuf {
        split_dir.join(format!("{}.{SPLIT_FILE_EXTENSION}", self.normalized_name()))
    }

    /// The document written to the rule's split file.
    ///
    /// `name` comes first and holds the alias; the rule's own fields follow.
    /// A rule that already has a `name` field keeps its own value, in the
    /// leading position.
    #[must_use]
    pub fn to_split_document(&self) -> Value {
        let mut document = Mapping::with_capacity(self.fields.len() + 1);
        document.insert(Value::from(NAME_KEY), Value::from(self.alias()));
        for (key, value) in &self.fields {
            document.insert(key.clone(), value.clone());
        }
        Value::Mapping(document)
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Mapping(self.fields)
    }
}
