//! Read-only operational accumulator.
//!
//! Plain counters, no metrics backend — policing/metering are excluded as
//! *shaping* features, not basic operational visibility, the way
//! `knhk-validation::ValidationReport` is a plain accumulator rather than
//! a `prometheus`/`opentelemetry` pipeline.

use crate::schedule::TOTAL_QOS_TAGS;

/// Dispatched/dropped counters plus per-queue depth, polled by the CLI at
/// the end of a run.
#[derive(Debug, Clone, Default)]
pub struct DiscStats {
    pub dispatched: u64,
    pub dropped: u64,
    pub last_drop_reason: Option<&'static str>,
    per_queue_dispatched: [u64; TOTAL_QOS_TAGS],
    per_queue_dropped: [u64; TOTAL_QOS_TAGS],
}

impl DiscStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_dispatch(&mut self, q: usize) {
        self.dispatched += 1;
        self.per_queue_dispatched[q] += 1;
    }

    pub fn record_drop(&mut self, q: usize, reason: &'static str) {
        self.dropped += 1;
        self.per_queue_dropped[q] += 1;
        self.last_drop_reason = Some(reason);
        tracing::warn!(queue = q, reason, "frame dropped");
    }

    pub fn dispatched_on(&self, q: usize) -> u64 {
        self.per_queue_dispatched[q]
    }

    pub fn dropped_on(&self, q: usize) -> u64 {
        self.per_queue_dropped[q]
    }
}
