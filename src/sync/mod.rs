//! The sync engine and its daily scheduler.
//!
//! One **pass** reads every secret from the source and then decides, secret
//! by secret, whether to write it to the destination. Per-secret failures
//! become [`TransferOutcome`] values and are aggregated into a
//! [`PassSummary`]; they never abort a pass. The [`Scheduler`] either runs a
//! single pass or repeats one daily at a configured local time.

pub mod engine;
pub mod outcome;
pub mod schedule;

pub use engine::{run_pass, write_if_allowed, SyncEngine};
pub use outcome::{PassSummary, TransferOutcome};
pub use schedule::{compute_next_run, parse_time_of_day, ScheduleState, Scheduler};
