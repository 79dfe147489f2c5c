//! A minimal single-threaded discrete-event kernel: a binary-heap event
//! queue ordered by absolute fire time. Satisfies `tas_core::SimulatorKernel`
//! and nothing more — this driver's only job is to prove the core's wiring
//! end to end, not to model a real link.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use tas_core::{Nanos, SimulatorKernel};

pub struct EventKernel {
    now: Nanos,
    next_handle: u64,
    pending: BinaryHeap<Reverse<(Nanos, u64)>>,
    fired: HashSet<u64>,
}

impl EventKernel {
    pub fn new(start: Nanos) -> Self {
        Self {
            now: start,
            next_handle: 0,
            pending: BinaryHeap::new(),
            fired: HashSet::new(),
        }
    }

    /// Earliest pending wake-up time, if any.
    pub fn peek_next_wakeup(&self) -> Option<Nanos> {
        self.pending.peek().map(|Reverse((at, _))| *at)
    }

    /// Pop the earliest pending wake-up, advance `now` to it, and mark its
    /// handle fired.
    pub fn pop_next_wakeup(&mut self) -> Option<Nanos> {
        let Reverse((at, handle)) = self.pending.pop()?;
        self.now = at;
        self.fired.insert(handle);
        Some(at)
    }

    /// Advance the clock directly, used when the next thing to happen is an
    /// external arrival rather than a wake-up.
    pub fn advance_to(&mut self, at: Nanos) {
        self.now = at;
    }
}

impl SimulatorKernel for EventKernel {
    type Handle = u64;

    fn now(&self) -> Nanos {
        self.now
    }

    fn schedule_at(&mut self, at: Nanos) -> u64 {
        self.next_handle += 1;
        let handle = self.next_handle;
        self.pending.push(Reverse((at, handle)));
        handle
    }

    fn is_expired(&self, handle: u64) -> bool {
        self.fired.contains(&handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_time_order_regardless_of_post_order() {
        let mut kernel = EventKernel::new(0);
        kernel.schedule_at(300);
        kernel.schedule_at(100);
        kernel.schedule_at(200);

        assert_eq!(kernel.pop_next_wakeup(), Some(100));
        assert_eq!(kernel.pop_next_wakeup(), Some(200));
        assert_eq!(kernel.pop_next_wakeup(), Some(300));
        assert_eq!(kernel.pop_next_wakeup(), None);
    }

    #[test]
    fn handle_is_expired_only_after_firing() {
        let mut kernel = EventKernel::new(0);
        let handle = kernel.schedule_at(100);
        assert!(!kernel.is_expired(handle));
        kernel.pop_next_wakeup();
        assert!(kernel.is_expired(handle));
    }
}
