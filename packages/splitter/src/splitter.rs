//! Splits the aggregate automations file into one file per automation.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml_ng::Value;

use crate::error::{Result, SplitterError};
use crate::rule::Rule;
use crate::yaml::{describe, read_yaml_file, write_yaml_file};

/// What a single run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitReport {
    /// Normalized names whose split file was created or overwritten, in order.
    pub written: Vec<String>,
    /// Normalized names whose split file already matched.
    pub unchanged: Vec<String>,
    /// Normalized names seen more than once in this run (last one wins).
    pub collisions: Vec<String>,
    /// Rules left in the aggregate file.
    pub retained: usize,
    /// Whether the aggregate file was written.
    pub aggregate_rewritten: bool,
}

impl SplitReport {
    /// True when the run touched nothing on disk.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.written.is_empty() && !self.aggregate_rewritten
    }
}

/// Moves automations out of the aggregate file into per-automation files.
#[derive(Debug, Clone)]
pub struct RuleSplitter {
    aggregate_path: PathBuf,
    split_dir: PathBuf,
}

impl RuleSplitter {
    /// Create a splitter, creating `split_dir` if it does not exist yet.
    pub fn new(aggregate_path: impl Into<PathBuf>, split_dir: impl Into<PathBuf>) -> Result<Self> {
        let splitter = Self {
            aggregate_path: aggregate_path.into(),
            split_dir: split_dir.into(),
        };
        fs::create_dir_all(&splitter.split_dir)?;
        Ok(splitter)
    }

    #[must_use]
    pub fn aggregate_path(&self) -> &Path {
        &self.aggregate_path
    }

    #[must_use]
    pub fn split_dir(&self) -> &Path {
        &self.split_dir
    }

    /// Read the aggregate file as a list of rules.
    ///
    /// An absent or empty file is an empty list. Also returns the document as
    /// it was on disk so the rewrite can be skipped when nothing changed.
    fn read_aggregate(&self) -> Result<(Vec<Rule>, Option<Value>)> {
        let Some(document) = read_yaml_file(&self.aggregate_path)? else {
            return Ok((Vec::new(), None));
        };

        let Value::Sequence(entries) = &document else {
            return Err(SplitterError::InvalidAggregate {
                path: self.aggregate_path.clone(),
                found: describe(&document).to_string(),
            });
        };

        let rules = entries
            .iter()
            .cloned()
            .enumerate()
            .map(|(index, entry)| Rule::from_value(index, entry))
            .collect::<Result<Vec<_>>>()?;

        Ok((rules, Some(document)))
    }

    /// Run one split pass.
    ///
    /// Every rule is written to `<split_dir>/<normalized name>.yaml` unless an
    /// identical document is already there, and is then dropped from the
    /// aggregate file. Comparison is structural, so a second run without
    /// external changes writes nothing.
    ///
    /// Rules whose aliases normalize to the same name overwrite each other in
    /// order; the last one ends up on disk.
    ///
    /// # Errors
    /// Malformed YAML in any file and filesystem failures abort the run.
    /// Split files written before the failure are kept.
    pub fn run(&self) -> Result<SplitReport> {
        tracing::info!(
            aggregate = %self.aggregate_path.display(),
            split_dir = %self.split_dir.display(),
            "splitting automations"
        );

        let (rules, on_disk) = self.read_aggregate()?;
        let mut report = SplitReport::default();
        let mut split_out: HashSet<String> = HashSet::new();

        for rule in &rules {
            let name = rule.normalized_name();
            let path = rule.split_path(&self.split_dir);

            if split_out.contains(&name) {
                tracing::warn!(
                    name = %name,
                    alias = %rule.alias(),
                    "automation name collides with an earlier one in this run; last one wins"
                );
                report.collisions.push(name.clone());
            }

            let existing = read_yaml_file(&path)?;
            let candidate = rule.to_split_document();

            if existing.as_ref() == Some(&candidate) {
                tracing::debug!(name = %name, "split file up to date");
                report.unchanged.push(name.clone());
            } else {
                write_yaml_file(&path, &candidate)?;
                tracing::info!(name = %name, path = %path.display(), "wrote split file");
                report.written.push(name.clone());
            }

            split_out.insert(name);
        }

        let remaining: Vec<Value> = rules
            .into_iter()
            .filter(|rule| !split_out.contains(&rule.normalized_name()))
            .map(Rule::into_value)
            .collect();
        report.retained = remaining.len();

        let rebuilt = Value::Sequence(remaining);
        if on_disk.as_ref() == Some(&rebuilt) {
            tracing::debug!("aggregate file unchanged");
        } else {
            write_yaml_file(&self.aggregate_path, &rebuilt)?;
            report.aggregate_rewritten = true;
        }

        tracing::info!(
            written = report.written.len(),
            unchanged = report.unchanged.len(),
            collisions = report.collisions.len(),
            retained = report.retained,
            "automations split"
        );

        Ok(report)
    }
}
