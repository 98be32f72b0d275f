//! Configuration constants and loading for the splitter.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, SplitterError};
use crate::schedule::{Schedule, ScheduleType};

/// Aggregate file holding automations that have not been split yet.
pub const DEFAULT_AGGREGATE_PATH: &str = "/config/automations.yaml";

/// Directory receiving one file per automation.
pub const DEFAULT_SPLIT_DIR: &str = "/config/custom_configs/automations";

/// Alias used for automations without a usable `alias` field.
pub const DEFAULT_ALIAS: &str = "Unnamed_Automation";

/// Default time of day for the daily run.
pub const DEFAULT_SCHEDULE_VALUE: &str = "16:41";

/// Extension of split files.
pub const SPLIT_FILE_EXTENSION: &str = "yaml";

/// Splitter settings, as supplied by the host configuration file.
///
/// Every field is optional in the file; missing fields fall back to the
/// defaults above. Other keys are ignored, so an AppDaemon app block with
/// `module` and `class` can be used as is.
///
/// ```yaml
/// module: split_automations
/// class: SplitAutomation
/// schedule_type: cron
/// schedule_value: "30 16 * * *"
/// split_dir: /config/custom_configs/automations
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SplitterConfig {
    pub aggregate_path: PathBuf,
    pub split_dir: PathBuf,
    pub schedule_type: ScheduleType,
    pub schedule_value: String,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            aggregate_path: PathBuf::from(DEFAULT_AGGREGATE_PATH),
            split_dir: PathBuf::from(DEFAULT_SPLIT_DIR),
            schedule_type: ScheduleType::default(),
            schedule_value: DEFAULT_SCHEDULE_VALUE.to_string(),
        }
    }
}

impl SplitterConfig {
    /// Load configuration from a YAML file, or defaults when no file is given.
    ///
    /// An empty file yields the defaults.
    ///
    /// # Errors
    /// `SplitterError::Config` if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path).map_err(|e| {
            SplitterError::Config(format!("cannot read {}: {e}", path.display()))
        })?;

        Self::from_yaml_str(&content)
            .map_err(|e| SplitterError::Config(format!("{}: {e}", path.display())))
    }

    fn from_yaml_str(content: &str) -> std::result::Result<Self, serde_yaml_ng::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(content)
    }

    /// Override the aggregate path if one is given.
    #[must_use]
    pub fn with_aggregate_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.aggregate_path = path;
        }
        self
    }

    /// Override the split directory if one is given.
    #[must_use]
    pub fn with_split_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.split_dir = dir;
        }
        self
    }

    /// Override the schedule type and/or value.
    #[must_use]
    pub fn with_schedule(
        mut self,
        schedule_type: Option<ScheduleType>,
        schedule_value: Option<String>,
    ) -> Self {
        if let Some(schedule_type) = schedule_type {
            self.schedule_type = schedule_type;
        }
        if let Some(value) = schedule_value {
            self.schedule_value = value;
        }
        self
    }

    /// Validate and build the configured schedule.
    pub fn schedule(&self) -> Result<Schedule> {
        Schedule::parse(self.schedule_type, &self.schedule_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = SplitterConfig::load(None).unwrap();
        assert_eq!(config.aggregate_path, PathBuf::from("/config/automations.yaml"));
        assert_eq!(
            config.split_dir,
            PathBuf::from("/config/custom_configs/automations")
        );
        assert_eq!(config.schedule_type, ScheduleType::Time);
        assert_eq!(config.schedule_value, "16:41");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = SplitterConfig::from_yaml_str("schedule_value: \"06:15\"\n").unwrap();
        assert_eq!(config.schedule_value, "06:15");
        assert_eq!(config.schedule_type, ScheduleType::Time);
        assert_eq!(config.aggregate_path, PathBuf::from(DEFAULT_AGGREGATE_PATH));
    }

    #[test]
    fn test_cron_file() {
        let config = SplitterConfig::from_yaml_str(
            "schedule_type: cron\nschedule_value: \"30 16 * * *\"\nsplit_dir: /tmp/split\n",
        )
        .unwrap();
        assert_eq!(config.schedule_type, ScheduleType::Cron);
        assert_eq!(config.split_dir, PathBuf::from("/tmp/split"));
        assert!(config.schedule().is_ok());
    }

    #[test]
    fn test_empty_file_is_default() {
        let config = SplitterConfig::from_yaml_str("\n").unwrap();
        assert_eq!(config, SplitterConfig::default());
    }

    #[test]
    fn test_appdaemon_app_keys_are_ignored() {
        let config = SplitterConfig::from_yaml_str(
            "module: split_automations\nclass: SplitAutomation\nschedule_type: time\nschedule_value: \"16:30\"\n",
        )
        .unwrap();
        assert_eq!(config.schedule_type, ScheduleType::Time);
        assert_eq!(config.schedule_value, "16:30");
        assert_eq!(config.split_dir, PathBuf::from(DEFAULT_SPLIT_DIR));
    }

    #[test]
    fn test_unknown_schedule_type_rejected() {
        assert!(SplitterConfig::from_yaml_str("schedule_type: weekly\n").is_err());
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let dir = tempdir().unwrap();
        let err = SplitterConfig::load(Some(&dir.path().join("apps.yaml"))).unwrap_err();
        assert!(matches!(err, SplitterError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("apps.yaml");
        fs::write(&path, "aggregate_path: /data/automations.yaml\n").unwrap();

        let config = SplitterConfig::load(Some(&path)).unwrap();
        assert_eq!(config.aggregate_path, PathBuf::from("/data/automations.yaml"));
    }

    #[test]
    fn test_overrides() {
        let config = SplitterConfig::default()
            .with_aggregate_path(Some(PathBuf::from("a.yaml")))
            .with_split_dir(None)
            .with_schedule(Some(ScheduleType::Cron), Some("0 * * * *".to_string()));

        assert_eq!(config.aggregate_path, PathBuf::from("a.yaml"));
        assert_eq!(config.split_dir, PathBuf::from(DEFAULT_SPLIT_DIR));
        assert_eq!(config.schedule_type, ScheduleType::Cron);
        assert_eq!(config.schedule_value, "0 * * * *");
    }

    #[test]
    fn test_invalid_schedule_value() {
        let config = SplitterConfig::default().with_schedule(None, Some("noon".to_string()));
        assert!(matches!(
            config.schedule(),
            Err(SplitterError::InvalidSchedule { .. })
        ));
    }
}
