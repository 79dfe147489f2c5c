//! Per-queue wake-up scheduler: at most one outstanding future callback
//! per priority, idempotent re-arm.
//!
//! Each enqueue, each dequeue, and each timer firing may all race to
//! re-arm; without idempotence the event queue would grow unboundedly.
//! The ns-3 original does not police this at all (`Simulator::Schedule` is
//! called unconditionally in `DoDequeue`); this table is the redesign that
//! closes the gap.

use crate::schedule::TOTAL_QOS_TAGS;
use crate::sim::SimulatorKernel;
use crate::time::Nanos;

#[derive(Debug, Clone, Copy)]
enum Slot<H> {
    Idle,
    Pending { fire_at: Nanos, handle: H },
}

/// One optional future-event handle per priority. `idle -> pending(t) ->
/// idle` on fire or cancel; re-arming while pending is a no-op.
#[derive(Debug)]
pub struct WakeupTable<H> {
    slots: [Slot<H>; TOTAL_QOS_TAGS],
}

impl<H: Copy> Default for WakeupTable<H> {
    fn default() -> Self {
        Self {
            slots: [Slot::Idle; TOTAL_QOS_TAGS],
        }
    }
}

impl<H: Copy> WakeupTable<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a wake-up for queue `q` at absolute time `fire_at`, unless one
    /// is already pending and not yet expired — in which case this is a
    /// no-op (idempotent re-arm).
    pub fn schedule_run<K>(&mut self, q: usize, fire_at: Nanos, kernel: &mut K)
    where
        K: SimulatorKernel<Handle = H>,
    {
        if let Slot::Pending { handle, .. } = self.slots[q] {
            if !kernel.is_expired(handle) {
                tracing::trace!(queue = q, "wake-up already pending, ignoring re-arm");
                return;
            }
        }
        let handle = kernel.schedule_at(fire_at);
        tracing::trace!(queue = q, fire_at, "armed wake-up");
        self.slots[q] = Slot::Pending { fire_at, handle };
    }

    /// Return the entry to idle. Called when the callback fires, before
    /// the dequeue logic runs, or when the queue is otherwise known to no
    /// longer need the pending wake-up.
    pub fn clear(&mut self, q: usize) {
        self.slots[q] = Slot::Idle;
    }

    pub fn is_pending(&self, q: usize) -> bool {
        matches!(self.slots[q], Slot::Pending { .. })
    }

    /// Number of queues with a live pending wake-up. Never more than one
    /// live wake-up per queue is automatic here by construction; this is
    /// exposed for tests that want to assert it across a whole table.
    pub fn pending_count(&self) -> usize {
        self.slots.iter().filter(|s| matches!(s, Slot::Pending { .. })).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeKernel {
        next_handle: u32,
        now: Nanos,
        expired: std::collections::HashSet<u32>,
    }

    impl SimulatorKernel for FakeKernel {
        type Handle = u32;
        fn now(&self) -> Nanos {
            self.now
        }
        fn schedule_at(&mut self, _at: Nanos) -> u32 {
            self.next_handle += 1;
            self.next_handle
        }
        fn is_expired(&self, handle: u32) -> bool {
            self.expired.contains(&handle)
        }
    }

    #[test]
    fn re_arming_while_pending_is_a_no_op() {
        let mut table: WakeupTable<u32> = WakeupTable::new();
        let mut kernel = FakeKernel::default();
        table.schedule_run(3, 100, &mut kernel);
        table.schedule_run(3, 200, &mut kernel);
        assert_eq!(kernel.next_handle, 1, "second arm must not post a new event");
        assert_eq!(table.pending_count(), 1);
    }

    #[test]
    fn clearing_allows_a_fresh_arm() {
        let mut table: WakeupTable<u32> = WakeupTable::new();
        let mut kernel = FakeKernel::default();
        table.schedule_run(3, 100, &mut kernel);
        table.clear(3);
        assert!(!table.is_pending(3));
        table.schedule_run(3, 200, &mut kernel);
        assert_eq!(kernel.next_handle, 2);
    }

    #[test]
    fn expired_handle_allows_re_arm() {
        let mut table: WakeupTable<u32> = WakeupTable::new();
        let mut kernel = FakeKernel::default();
        table.schedule_run(3, 100, &mut kernel);
        kernel.expired.insert(1);
        table.schedule_run(3, 200, &mut kernel);
        assert_eq!(kernel.next_handle, 2);
    }

    #[test]
    fn independent_queues_do_not_interfere() {
        let mut table: WakeupTable<u32> = WakeupTable::new();
        let mut kernel = FakeKernel::default();
        table.schedule_run(0, 100, &mut kernel);
        table.schedule_run(7, 100, &mut kernel);
        assert_eq!(table.pending_count(), 2);
    }
}
