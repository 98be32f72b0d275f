//! Automation Splitter - one file per home-automation rule.
//!
//! Reads an aggregate `automations.yaml`, writes every automation to its own
//! file named after its normalized alias, and empties the aggregate file of
//! everything that was split out. Runs are idempotent: a second run without
//! external changes touches nothing on disk.
//!
//! # Example
//!
//! ```
//! use automation_splitter::normalize_name;
//!
//! assert_eq!(normalize_name("Café Lights"), "cafe_lights");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Default paths and the configuration file
//! - [`error`]: Error types and Result alias
//! - [`normalize`]: Alias to file name normalization
//! - [`rule`]: A single automation and its split document
//! - [`yaml`]: YAML reading and atomic writing
//! - [`splitter`]: The split pass
//! - [`schedule`]: Daily and cron schedules
//! - [`daemon`]: Scheduled run loop
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod daemon;
pub mod error;
pub mod normalize;
pub mod rule;
pub mod schedule;
pub mod splitter;
pub mod yaml;

pub use config::SplitterConfig;
pub use error::{Result, SplitterError};
pub use normalize::normalize_name;
pub use rule::Rule;
pub use schedule::{Schedule, ScheduleType};
pub use splitter::{RuleSplitter, SplitReport};
