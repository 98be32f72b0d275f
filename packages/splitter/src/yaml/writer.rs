//! YAML writer for aggregate and split files.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;

/// Serialize a value as a block-style YAML document.
///
/// Non-ASCII characters in values are emitted verbatim. Trailing whitespace
/// is stripped from every line.
pub fn to_yaml_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let yaml_string = serde_yaml_ng::to_string(value)?;

    let lines: Vec<&str> = yaml_string.lines().map(str::trim_end).collect();
    Ok(format!("{}\n", lines.join("\n")))
}

/// Hidden sibling used as the temporary target of an atomic write.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write a value as YAML, replacing the file wholesale.
///
/// Uses atomic write pattern: writes to temp file, syncs to disk, then renames.
/// This ensures partial writes don't corrupt existing files on crash.
///
/// The parent directory must already exist.
pub fn write_yaml_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let content = to_yaml_string(value)?;
    let temp_file = temp_path_for(path);

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote YAML file");
    Ok(())
}
