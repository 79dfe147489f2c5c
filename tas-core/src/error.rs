//! Error types for the TAS core.
//!
//! Only schedule construction failures and internal invariant violations
//! are represented as `Err` returns. Capacity overflow, classifier
//! anomalies, and missing transmission-time inputs are locally recoverable
//! and never propagate — they surface through [`tracing`] events and
//! [`crate::stats::DiscStats`] instead, the way `knhk-validation` keeps
//! `thiserror` enums for things a caller must handle and uses plain
//! `tracing`/accumulator structs for everything else.

use thiserror::Error;

/// Fatal at configuration time: the [`crate::schedule::Schedule`] could not
/// be built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("window duration must be positive, got {0}")]
    NonPositiveDuration(i64),

    #[error(
        "window start_offset ({start_offset}) + stop_offset ({stop_offset}) \
         must be < duration ({duration})"
    )]
    GuardOffsetsExceedDuration {
        duration: i64,
        start_offset: i64,
        stop_offset: i64,
    },
}

/// Internal invariant violation. Indicates a bug in the core itself, not
/// bad input — callers should treat this as fatal and abort the run with
/// a diagnostic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TasError {
    #[error("schedule construction failed: {0}")]
    InvalidSchedule(#[from] ScheduleError),

    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}
