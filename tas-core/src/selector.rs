//! Dequeue selector: strict priority among currently-open queues, or the
//! nearest future opening otherwise.

use crate::classify::Frame;
use crate::index::QueueOpenIndex;
use crate::queue::PriorityQueues;
use crate::schedule::TOTAL_QOS_TAGS;
use crate::time::{transmission_time_ns, Nanos};

/// Outcome of a selection pass over the 8 priority queues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Dequeue the head of this queue now — its gate is open (or gating
    /// is disabled) and the head-of-line frame fits before close.
    Dispatch(usize),
    /// Nothing can be dispatched right now; arm a wake-up for `queue` at
    /// absolute time `at` and return no packet.
    WakeAt { queue: usize, at: Nanos },
    /// All queues are empty, or no non-empty queue ever opens in this
    /// cycle.
    Idle,
}

/// Run the selection algorithm over `queues`, consulting `index` for gate
/// timing. `rate_bps` and `cycle_length` come from the core configuration;
/// `cycle_length == 0` takes the "no schedule configured" branch without
/// ever calling into `index`.
pub fn pick<F: Frame>(
    queues: &PriorityQueues<F>,
    index: &QueueOpenIndex,
    now: Nanos,
    rate_bps: u64,
    cycle_length: Nanos,
) -> Selection {
    if !queues.any_non_empty() {
        return Selection::Idle;
    }

    if cycle_length == 0 {
        for q in (0..TOTAL_QOS_TAGS).rev() {
            if !queues.is_empty(q) {
                return Selection::Dispatch(q);
            }
        }
        unreachable!("any_non_empty() was true but no queue found non-empty");
    }

    let mut best: Option<(usize, Nanos)> = None;
    for q in (0..TOTAL_QOS_TAGS).rev() {
        if queues.is_empty(q) {
            continue;
        }
        let transmission_time = queues
            .peek(q)
            .and_then(|frame| frame.size_bytes())
            .map(|bytes| transmission_time_ns(bytes, rate_bps))
            .unwrap_or(0);
        let wait = index.time_until_open(q, now, transmission_time);
        if wait < 0 {
            // Queue never opens in this cycle (or invalid index) — it can
            // never be served by gating alone; skip it.
            continue;
        }
        match best {
            None => best = Some((q, wait)),
            // Strictly less: scanning high-to-low already favors higher
            // priority on ties, so only a strictly smaller wait displaces
            // the current winner.
            Some((_, best_wait)) if wait < best_wait => best = Some((q, wait)),
            _ => {}
        }
    }

    match best {
        None => Selection::Idle,
        Some((q, 0)) => Selection::Dispatch(q),
        Some((q, wait)) => Selection::WakeAt {
            queue: q,
            at: now + wait,
        },
    }
}

/// Identical selection logic, but never removes anything and returns
/// `None` unless some queue is open right now.
pub fn peek<'q, F: Frame>(
    queues: &'q PriorityQueues<F>,
    index: &QueueOpenIndex,
    now: Nanos,
    rate_bps: u64,
    cycle_length: Nanos,
) -> Option<&'q F> {
    match pick(queues, index, now, rate_bps, cycle_length) {
        Selection::Dispatch(q) => queues.peek(q),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{GateMask, Schedule, Window};

    #[derive(Debug, Clone)]
    struct TestFrame {
        size: u64,
    }
    impl Frame for TestFrame {
        fn size_bytes(&self) -> Option<u64> {
            Some(self.size)
        }
        fn priority_tag(&self) -> Option<u8> {
            None
        }
        fn set_priority_tag(&mut self, _priority: u8) {}
    }

    fn frame(size: u64) -> TestFrame {
        TestFrame { size }
    }

    const OPEN: GateMask = [true; 8];

    #[test]
    fn all_empty_is_idle() {
        let queues: PriorityQueues<TestFrame> = PriorityQueues::new(800);
        let index = QueueOpenIndex::build(&Schedule::empty());
        assert_eq!(pick(&queues, &index, 0, 5_000_000, 0), Selection::Idle);
    }

    #[test]
    fn empty_schedule_is_strict_priority() {
        // No schedule configured: strict priority with no gating.
        let mut queues: PriorityQueues<TestFrame> = PriorityQueues::new(800);
        queues.enqueue(2, frame(64)).unwrap();
        queues.enqueue(5, frame(64)).unwrap();
        let index = QueueOpenIndex::build(&Schedule::empty());

        assert_eq!(pick(&queues, &index, 0, 5_000_000, 0), Selection::Dispatch(5));
        queues.dequeue(5);
        assert_eq!(pick(&queues, &index, 0, 5_000_000, 0), Selection::Dispatch(2));
    }

    #[test]
    fn strict_priority_among_open_gates() {
        // Gates always open, no close: pure strict priority.
        let mut s = Schedule::empty();
        s.append(Window::full(1_000_000_000, OPEN).unwrap());
        let index = QueueOpenIndex::build(&s);

        let mut queues: PriorityQueues<TestFrame> = PriorityQueues::new(800);
        queues.enqueue(3, frame(64)).unwrap();
        queues.enqueue(7, frame(64)).unwrap();
        queues.enqueue(0, frame(64)).unwrap();

        assert_eq!(pick(&queues, &index, 0, 5_000_000, s.cycle_length()), Selection::Dispatch(7));
        queues.dequeue(7);
        assert_eq!(pick(&queues, &index, 0, 5_000_000, s.cycle_length()), Selection::Dispatch(3));
        queues.dequeue(3);
        assert_eq!(pick(&queues, &index, 0, 5_000_000, s.cycle_length()), Selection::Dispatch(0));
    }

    #[test]
    fn closed_queue_arms_a_wakeup() {
        // Gate closed at enqueue time: arm a wake-up for the next opening.
        let mut mask_closed = [false; 8];
        mask_closed[0] = false;
        let mut s = Schedule::empty();
        s.append(Window::full(1_000_000_000, OPEN).unwrap());
        s.append(Window::full(1_000_000_000, mask_closed).unwrap());
        let index = QueueOpenIndex::build(&s);

        let mut queues: PriorityQueues<TestFrame> = PriorityQueues::new(800);
        queues.enqueue(0, frame(64)).unwrap();

        let now = 1_100_000_000;
        match pick(&queues, &index, now, 5_000_000, s.cycle_length()) {
            Selection::WakeAt { queue, at } => {
                assert_eq!(queue, 0);
                assert_eq!(at, 2_000_000_000);
            }
            other => panic!("expected WakeAt, got {other:?}"),
        }
    }

    #[test]
    fn priority_specific_gate_scenario() {
        // One queue has a dedicated window, another opens later in the cycle.
        let mut mask_a = [false; 8];
        mask_a[3] = true;
        let mut mask_b = [true; 8];
        mask_b[3] = false;

        let mut s = Schedule::empty();
        s.append(Window::full(1_000_000_000, mask_a).unwrap());
        s.append(Window::full(1_000_000_000, mask_b).unwrap());
        let index = QueueOpenIndex::build(&s);

        let mut queues: PriorityQueues<TestFrame> = PriorityQueues::new(800);
        queues.enqueue(3, frame(64)).unwrap();
        queues.enqueue(5, frame(64)).unwrap();

        assert_eq!(
            pick(&queues, &index, 0, 5_000_000, s.cycle_length()),
            Selection::Dispatch(3)
        );

        queues.dequeue(3);
        match pick(&queues, &index, 0, 5_000_000, s.cycle_length()) {
            Selection::WakeAt { queue, at } => {
                assert_eq!(queue, 5);
                assert_eq!(at, 1_000_000_000);
            }
            other => panic!("expected WakeAt, got {other:?}"),
        }
    }

    #[test]
    fn peek_does_not_remove() {
        let mut s = Schedule::empty();
        s.append(Window::full(1_000_000_000, OPEN).unwrap());
        let index = QueueOpenIndex::build(&s);

        let mut queues: PriorityQueues<TestFrame> = PriorityQueues::new(800);
        queues.enqueue(0, frame(64)).unwrap();

        assert!(peek(&queues, &index, 0, 5_000_000, s.cycle_length()).is_some());
        assert_eq!(queues.len(0), 1);
    }
}
