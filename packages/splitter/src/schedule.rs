//! Run schedules: a fixed time of day or a cron expression.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, Days, NaiveTime, TimeZone};
use regex::Regex;
use serde::Deserialize;

use crate::error::{Result, SplitterError};

/// Time of day pattern: H:MM or HH:MM.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TIME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}:\d{2}$").expect("valid regex"));

/// How `schedule_value` is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleType {
    /// Daily at a fixed `HH:MM`.
    #[default]
    Time,
    /// Cron expression (5 or 6 fields).
    Cron,
}

impl ScheduleType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Cron => "cron",
        }
    }
}

impl fmt::Display for ScheduleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated run schedule.
#[derive(Debug, Clone)]
pub enum Schedule {
    /// Once a day at the given local time.
    Daily(NaiveTime),
    /// Every tick of a cron expression.
    Cron {
        expression: String,
        schedule: Box<cron::Schedule>,
    },
}

/// Normalize a 5-field cron expression to 6-field by prepending "0 " for seconds.
///
/// The `cron` crate requires a seconds field; users usually write standard
/// 5-field cron.
fn normalize_cron(expression: &str) -> String {
    let trimmed = expression.trim();
    if trimmed.split_whitespace().count() == 5 {
        format!("0 {trimmed}")
    } else {
        trimmed.to_string()
    }
}

impl Schedule {
    /// Parse a schedule value according to its type.
    ///
    /// # Examples
    /// ```
    /// use automation_splitter::schedule::{Schedule, ScheduleType};
    ///
    /// assert!(Schedule::parse(ScheduleType::Time, "16:41").is_ok());
    /// assert!(Schedule::parse(ScheduleType::Time, "24:00").is_err());
    /// assert!(Schedule::parse(ScheduleType::Cron, "30 16 * * *").is_ok());
    /// ```
    pub fn parse(schedule_type: ScheduleType, value: &str) -> Result<Self> {
        let invalid = |reason: String| SplitterError::InvalidSchedule {
            schedule_type: schedule_type.to_string(),
            value: value.to_string(),
            reason,
        };

        match schedule_type {
            ScheduleType::Time => {
                if !TIME_PATTERN.is_match(value) {
                    return Err(invalid("expected HH:MM".to_string()));
                }
                let time = NaiveTime::parse_from_str(value, "%H:%M")
                    .map_err(|e| invalid(format!("not a valid time of day ({e})")))?;
                Ok(Self::Daily(time))
            }
            ScheduleType::Cron => {
                let expression = normalize_cron(value);
                let schedule = cron::Schedule::from_str(&expression)
                    .map_err(|e| invalid(e.to_string()))?;
                Ok(Self::Cron {
                    expression,
                    schedule: Box::new(schedule),
                })
            }
        }
    }

    #[must_use]
    pub fn schedule_type(&self) -> ScheduleType {
        match self {
            Self::Daily(_) => ScheduleType::Time,
            Self::Cron { .. } => ScheduleType::Cron,
        }
    }

    /// The schedule value as configured: `HH:MM` or the cron expression.
    #[must_use]
    pub fn value(&self) -> String {
        match self {
            Self::Daily(time) => time.format("%H:%M").to_string(),
            Self::Cron { expression, .. } => expression.clone(),
        }
    }

    /// Next fire time strictly after `now`, in `now`'s timezone.
    ///
    /// Returns `None` if the schedule never fires again.
    pub fn next_after<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        match self {
            Self::Daily(time) => {
                let tz = now.timezone();
                let today = now.date_naive();
                // A DST gap can swallow the configured time on one day; look a
                // couple of days ahead.
                (0..=2).find_map(|offset| {
                    let date = today.checked_add_days(Days::new(offset))?;
                    tz.from_local_datetime(&date.and_time(*time))
                        .earliest()
                        .filter(|candidate| candidate > now)
                })
            }
            Self::Cron { schedule, .. } => schedule.after(now).next(),
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily(_) => write!(f, "daily at {}", self.value()),
            Self::Cron { .. } => write!(f, "cron '{}'", self.value()),
        }
    }
}
