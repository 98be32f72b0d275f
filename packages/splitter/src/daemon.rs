//! Schedule loop that runs the splitter at every fire time.

use std::future::Future;

use chrono::Local;

use crate::error::{Result, SplitterError};
use crate::schedule::Schedule;
use crate::splitter::RuleSplitter;

/// Run counts of a finished schedule loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    /// Split passes started.
    pub runs: usize,
    /// Split passes that ended in an error.
    pub failures: usize,
}

/// Run the splitter on a schedule until SIGINT or SIGTERM.
///
/// SIGTERM is only listened for on Unix; Ctrl+C works everywhere.
pub async fn run_scheduled(splitter: RuleSplitter, schedule: Schedule) -> Result<()> {
    #[cfg(unix)]
    let shutdown = {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate()).map_err(|e| {
            SplitterError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to register SIGTERM handler: {e}"),
            ))
        })?;

        async move {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => tracing::info!("received SIGINT, stopping"),
                _ = sigterm.recv() => tracing::info!("received SIGTERM, stopping"),
            }
        }
    };

    #[cfg(not(unix))]
    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("received Ctrl+C, stopping");
    };

    run_scheduled_until(splitter, schedule, shutdown).await?;
    Ok(())
}

/// Run the splitter on a schedule until `shutdown` completes.
///
/// The split itself runs outside `select!` and always completes; shutdown is
/// only checked while waiting for the next fire time. A failed run is logged
/// and the loop waits for the next fire time.
///
/// # Errors
/// `SplitterError::InvalidSchedule` once the schedule has no upcoming fire time.
pub async fn run_scheduled_until<F>(
    splitter: RuleSplitter,
    schedule: Schedule,
    shutdown: F,
) -> Result<LoopStats>
where
    F: Future<Output = ()>,
{
    tracing::info!(
        schedule = %schedule,
        aggregate = %splitter.aggregate_path().display(),
        split_dir = %splitter.split_dir().display(),
        "starting automation splitter"
    );

    tokio::pin!(shutdown);
    let mut stats = LoopStats::default();

    loop {
        let now = Local::now();
        let Some(next) = schedule.next_after(&now) else {
            return Err(SplitterError::InvalidSchedule {
                schedule_type: schedule.schedule_type().to_string(),
                value: schedule.value(),
                reason: "no upcoming fire time".to_string(),
            });
        };
        let wait = (next - now).to_std().unwrap_or_default();
        tracing::debug!(next = %next, wait = ?wait, "waiting for next run");

        tokio::select! {
            biased;

            () = &mut shutdown => break,
            () = tokio::time::sleep(wait) => {}
        }

        stats.runs += 1;
        match splitter.run() {
            Ok(report) if report.collisions.is_empty() => {}
            Ok(report) => {
                tracing::warn!(
                    collisions = ?report.collisions,
                    "some automations share a normalized name"
                );
            }
            Err(e) => {
                stats.failures += 1;
                tracing::error!(error = %e, "automation split failed");
            }
        }
    }

    tracing::info!(runs = stats.runs, failures = stats.failures, "automation splitter stopped");
    Ok(stats)
}
