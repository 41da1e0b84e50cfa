//! Daily schedule computation and the recurring control loop.
//!
//! The scheduler owns the process's long-lived loop. Schedule state is an
//! explicit value recomputed from the wall clock on every iteration; clock
//! jumps (DST, manual adjustment) are not compensated for. Shutdown is
//! cooperative: a cancellation token ends the loop between passes, never
//! mid-write.

use std::time::Duration;

use chrono::{DateTime, Days, Local, NaiveTime, TimeZone};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::errors::Result;

use super::engine::SyncEngine;

/// Pause after each pass so a fast run cannot re-trigger within the same
/// clock resolution.
const RELOOP_PAUSE: Duration = Duration::from_secs(1);

/// Parse a daily schedule value in `HH:mm`.
///
/// Empty and unparseable values both yield `None`, which means "run once".
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveTime::parse_from_str(trimmed, "%H:%M").ok()
}

/// Compute the next occurrence of `time_of_day` strictly after `now`.
///
/// Today's instant is used if it is still in the future; otherwise the same
/// time tomorrow. A time that falls into a DST gap resolves to the next
/// representable occurrence.
pub fn compute_next_run<Tz: TimeZone>(now: DateTime<Tz>, time_of_day: NaiveTime) -> DateTime<Tz> {
    let tz = now.timezone();

    let today = now
        .date_naive()
        .and_time(time_of_day)
        .and_local_timezone(tz.clone())
        .earliest();

    match today {
        Some(candidate) if candidate > now => candidate,
        _ => (now.date_naive() + Days::new(1))
            .and_time(time_of_day)
            .and_local_timezone(tz)
            .earliest()
            .unwrap_or_else(|| now + chrono::Duration::days(1)),
    }
}

/// Schedule state for one loop iteration. Recomputed every cycle; nothing
/// survives a restart beyond what the wall clock provides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleState {
    /// The configured daily time of day.
    pub time_of_day: NaiveTime,

    /// The next run instant computed from the clock observed this iteration.
    pub next_run: DateTime<Local>,
}

impl ScheduleState {
    /// Compute the state for the iteration starting at `now`.
    pub fn next_from(now: DateTime<Local>, time_of_day: NaiveTime) -> Self {
        Self { time_of_day, next_run: compute_next_run(now, time_of_day) }
    }

    /// How long to wait from `now` until the next run. Saturates at zero.
    pub fn until_next_run(&self, now: DateTime<Local>) -> Duration {
        (self.next_run - now).to_std().unwrap_or(Duration::ZERO)
    }
}

/// Drives repeated engine invocations, or a single one when no schedule is
/// configured.
pub struct Scheduler {
    engine: SyncEngine,
    shutdown: CancellationToken,
}

impl Scheduler {
    /// Create a scheduler over the engine. The token ends the recurring loop
    /// cooperatively.
    pub fn new(engine: SyncEngine, shutdown: CancellationToken) -> Self {
        Self { engine, shutdown }
    }

    /// Run until completion (run-once mode) or cancellation (recurring mode).
    pub async fn run(&self) -> Result<()> {
        let raw = self.engine.config().sync.schedule.clone().unwrap_or_default();

        match parse_time_of_day(&raw) {
            None => {
                if !raw.trim().is_empty() {
                    warn!(schedule = %raw, "Schedule value is not valid HH:mm, running a single pass");
                }
                info!("No daily schedule configured, running a single pass");
                self.engine.run_once().await.map(|_| ())
            }
            Some(time_of_day) => self.run_recurring(time_of_day).await,
        }
    }

    async fn run_recurring(&self, time_of_day: NaiveTime) -> Result<()> {
        info!(time_of_day = %time_of_day.format("%H:%M"), "Entering daily sync loop");

        loop {
            let state = ScheduleState::next_from(Local::now(), time_of_day);
            let wait = state.until_next_run(Local::now());
            info!(next_run = %state.next_run, "Waiting for next scheduled sync");

            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("Shutdown requested, leaving sync loop");
                    return Ok(());
                }
                _ = tokio::time::sleep(wait) => {}
            }

            // A pass failure never ends the loop; the next cycle may succeed.
            if let Err(err) = self.engine.run_once().await {
                error!(error = %err, "Scheduled sync pass failed");
            }

            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("Shutdown requested, leaving sync loop");
                    return Ok(());
                }
                _ = tokio::time::sleep(RELOOP_PAUSE) => {}
            }
        }
    }
}
