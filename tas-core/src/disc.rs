//! `TasQueueDisc`: the facade tying the schedule index, priority FIFOs,
//! classifier chain, wake-up table and stats into the enqueue/dequeue/peek
//! API a traffic-control framework actually calls.
//!
//! Grounded in `examples/original_source/.../tas-queue-disc.h`'s
//! `TasQueueDisc` class (`DoEnqueue`/`DoDequeue`/`DoPeek`/`GetTypeId`), kept
//! as a single owning struct the way the ns-3 original holds its member
//! fields, but built from the independently-testable pieces in this crate
//! rather than one monolithic method body.

use crate::classify::{classify, Filter, Frame};
use crate::index::QueueOpenIndex;
use crate::queue::{PriorityQueues, LIMIT_EXCEEDED_DROP};
use crate::schedule::Schedule;
use crate::selector::{self, Selection};
use crate::sim::{SimulatorKernel, TimeSourceCallback};
use crate::stats::DiscStats;
use crate::time::Nanos;
use crate::wakeup::WakeupTable;

/// Core configuration, immutable after construction.
pub struct TasConfig<F: Frame> {
    pub schedule: Schedule,
    pub filters: Vec<Box<dyn Filter<F>>>,
    pub trust_qostag: bool,
    pub max_size: usize,
    pub data_rate_bps: u64,
    pub time_source: Option<TimeSourceCallback>,
}

/// The assembled queue discipline: classifies on enqueue, serves strict
/// priority among open gates on dequeue, arms a wake-up when nothing can be
/// served immediately.
pub struct TasQueueDisc<F: Frame, H> {
    index: QueueOpenIndex,
    cycle_length: Nanos,
    queues: PriorityQueues<F>,
    filters: Vec<Box<dyn Filter<F>>>,
    trust_qostag: bool,
    data_rate_bps: u64,
    time_source: Option<TimeSourceCallback>,
    wakeups: WakeupTable<H>,
    stats: DiscStats,
}

impl<F: Frame, H: Copy + Eq> TasQueueDisc<F, H> {
    /// Build the schedule index and empty per-priority FIFOs once, from a
    /// validated [`TasConfig`]. The schedule and its index are never
    /// mutated again after this call.
    pub fn initialize(config: TasConfig<F>) -> Self {
        let index = QueueOpenIndex::build(&config.schedule);
        let cycle_length = config.schedule.cycle_length();
        Self {
            index,
            cycle_length,
            queues: PriorityQueues::new(config.max_size),
            filters: config.filters,
            trust_qostag: config.trust_qostag,
            data_rate_bps: config.data_rate_bps,
            time_source: config.time_source,
            wakeups: WakeupTable::new(),
            stats: DiscStats::new(),
        }
    }

    /// Resolve "now": the injected time-source callback if one was
    /// configured, otherwise the simulator kernel's own clock.
    fn current_time<K: SimulatorKernel<Handle = H>>(&self, kernel: &K) -> Nanos {
        match &self.time_source {
            Some(callback) => callback(),
            None => kernel.now(),
        }
    }

    /// Classify and enqueue one item. On capacity overflow the item is
    /// dropped and the reason recorded in [`DiscStats`].
    pub fn enqueue(&mut self, mut item: F) {
        let q = classify(&self.filters, &mut item, self.trust_qostag);
        if let Err(_dropped) = self.queues.enqueue(q, item) {
            self.stats.record_drop(q, LIMIT_EXCEEDED_DROP);
        }
    }

    /// Entry point a simulator event (an external enqueue, or a fired
    /// wake-up) invokes to try to serve a frame right now. Returns `Some`
    /// frame if one was open and fit before close; otherwise arms a
    /// wake-up for the nearest future opening (if any non-empty queue ever
    /// opens) and returns `None`.
    pub fn dequeue<K: SimulatorKernel<Handle = H>>(&mut self, kernel: &mut K) -> Option<F> {
        let now = self.current_time(kernel);
        match selector::pick(&self.queues, &self.index, now, self.data_rate_bps, self.cycle_length) {
            Selection::Dispatch(q) => {
                let item = self.queues.dequeue(q);
                if item.is_some() {
                    self.stats.record_dispatch(q);
                    self.wakeups.clear(q);
                }
                item
            }
            Selection::WakeAt { queue, at } => {
                self.wakeups.schedule_run(queue, at, kernel);
                None
            }
            Selection::Idle => None,
        }
    }

    /// Same selection logic as [`dequeue`](Self::dequeue) without removing
    /// anything or arming a wake-up.
    pub fn peek<K: SimulatorKernel<Handle = H>>(&self, kernel: &K) -> Option<&F> {
        let now = self.current_time(kernel);
        selector::peek(&self.queues, &self.index, now, self.data_rate_bps, self.cycle_length)
    }

    pub fn stats(&self) -> &DiscStats {
        &self.stats
    }

    /// Current backlog of priority `q`: how many items are sitting in its
    /// FIFO right now, as opposed to the historical dispatched/dropped
    /// counters in [`DiscStats`]. Polled by the CLI for its end-of-run
    /// summary.
    pub fn queue_len(&self, q: usize) -> usize {
        self.queues.len(q)
    }

    pub fn cycle_length(&self) -> Nanos {
        self.cycle_length
    }
}
