//! Command-line interface for the splitter.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use console::style;

use crate::config::{SplitterConfig, SPLIT_FILE_EXTENSION};
use crate::daemon::run_scheduled;
use crate::error::Result;
use crate::normalize::normalize_name;
use crate::schedule::ScheduleType;
use crate::splitter::{RuleSplitter, SplitReport};

/// Automation Splitter - split automations.yaml into one file per automation.
#[derive(Parser)]
#[command(name = "automation-splitter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Location options shared by `run` and `schedule`.
#[derive(Args, Debug, Default)]
pub struct PathArgs {
    /// YAML configuration file (schedule_type, schedule_value, paths)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Aggregate automations file (default: /config/automations.yaml)
    #[arg(short, long)]
    pub aggregate: Option<PathBuf>,

    /// Directory for split files (default: /config/custom_configs/automations)
    #[arg(short, long)]
    pub split_dir: Option<PathBuf>,
}

impl PathArgs {
    fn load(self) -> Result<SplitterConfig> {
        Ok(SplitterConfig::load(self.config.as_deref())?
            .with_aggregate_path(self.aggregate)
            .with_split_dir(self.split_dir))
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split the aggregate file once and exit.
    Run {
        #[command(flatten)]
        paths: PathArgs,
    },

    /// Keep running and split on a daily time or cron schedule.
    Schedule {
        #[command(flatten)]
        paths: PathArgs,

        /// How to interpret --schedule-value (default: time)
        #[arg(long, value_enum)]
        schedule_type: Option<ScheduleType>,

        /// HH:MM time of day or cron expression (default: 16:41)
        #[arg(long)]
        schedule_value: Option<String>,
    },

    /// Print the split file name an alias maps to.
    Normalize {
        /// Automation alias
        alias: String,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { paths } => run_command(paths.load()?),
        Commands::Schedule {
            paths,
            schedule_type,
            schedule_value,
        } => schedule_command(paths.load()?.with_schedule(schedule_type, schedule_value)),
        Commands::Normalize { alias } => {
            normalize_command(&alias);
            Ok(())
        }
    }
}

/// Execute the run command.
fn run_command(config: SplitterConfig) -> Result<()> {
    let splitter = RuleSplitter::new(&config.aggregate_path, &config.split_dir)?;

    println!(
        "{} {} into {}",
        style("Splitting").bold(),
        style(config.aggregate_path.display()).cyan(),
        style(config.split_dir.display()).cyan()
    );

    let report = splitter.run()?;
    print_report(&report, splitter.aggregate_path());

    Ok(())
}

fn print_report(report: &SplitReport, aggregate_path: &Path) {
    println!("  Written: {}", style(report.written.len()).green());
    println!("  Unchanged: {}", report.unchanged.len());
    if !report.collisions.is_empty() {
        println!(
            "  Collisions: {} ({})",
            style(report.collisions.len()).yellow().bold(),
            report.collisions.join(", ")
        );
    }
    if report.aggregate_rewritten {
        println!(
            "{} {} ({} remaining)",
            style("Rewrote").green().bold(),
            aggregate_path.display(),
            report.retained
        );
    } else {
        println!("{}", style("Nothing to do.").dim());
    }
}

/// Execute the schedule command.
fn schedule_command(config: SplitterConfig) -> Result<()> {
    // Validate before touching the filesystem
    let schedule = config.schedule()?;
    let splitter = RuleSplitter::new(&config.aggregate_path, &config.split_dir)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_scheduled(splitter, schedule))
}

fn normalize_command(alias: &str) {
    let name = normalize_name(alias);
    println!("{name}");
    println!(
        "  file: {}",
        style(format!("{name}.{SPLIT_FILE_EXTENSION}")).cyan()
    );
}
