//! YAML reader for aggregate and split files.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_yaml_ng::Value;

use crate::error::{Result, SplitterError};

/// Read and parse a YAML document.
///
/// Returns `Ok(None)` when the file does not exist or holds no document
/// (empty, whitespace only, or an explicit `null`).
///
/// # Errors
/// * `SplitterError::Io` if the file exists but cannot be read
/// * `SplitterError::YamlParse` if the content is not valid YAML
pub fn read_yaml_file(path: &Path) -> Result<Option<Value>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    if content.trim().is_empty() {
        return Ok(None);
    }

    let value: Value =
        serde_yaml_ng::from_str(&content).map_err(|source| SplitterError::YamlParse {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(match value {
        Value::Null => None,
        other => Some(other),
    })
}

/// Short name of a YAML value's kind, for error messages.
#[must_use]
pub fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
