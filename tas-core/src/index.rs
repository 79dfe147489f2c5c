//! Per-queue gate-open index: the O(log n) replacement for the original
//! `TasQueueDisc::TimeUntileQueueOpens`'s per-call linear scan over
//! `SchudlePlan::plan` (see `examples/original_source/.../tas-queue-disc.cc`).
//!
//! Built once at `initialize()` from a [`Schedule`](crate::schedule::Schedule)
//! and never mutated afterwards.

use crate::schedule::{Schedule, TOTAL_QOS_TAGS};
use crate::time::{cycle_position, Nanos};

/// Sentinel returned by [`QueueOpenIndex::time_until_open`] when the queue
/// index is out of range, or the queue has no open window anywhere in the
/// cycle.
pub const NO_OPEN_WINDOW: Nanos = -1;

/// For each of the 8 priority queues, the sorted `(open, close)` instants
/// within `[0, cycle_length)` at which that queue's gate opens and closes.
#[derive(Debug, Clone, Default)]
pub struct QueueOpenIndex {
    opens: [Vec<Nanos>; TOTAL_QOS_TAGS],
    closes: [Vec<Nanos>; TOTAL_QOS_TAGS],
    cycle_length: Nanos,
}

impl QueueOpenIndex {
    /// Scan `schedule` left to right once, recording for each window and
    /// each priority whose gate is open in that window the pair
    /// `(window_start + start_offset, window_start + duration - stop_offset)`.
    ///
    /// Windows are visited in schedule order, so `opens[q]`/`closes[q]` come
    /// out sorted without an extra sort pass, rather than needing to be
    /// re-established afterwards.
    pub fn build(schedule: &Schedule) -> Self {
        let mut opens: [Vec<Nanos>; TOTAL_QOS_TAGS] = Default::default();
        let mut closes: [Vec<Nanos>; TOTAL_QOS_TAGS] = Default::default();

        let mut window_start: Nanos = 0;
        for window in schedule.windows() {
            let (open_start, open_end) = window.open_region();
            for q in 0..TOTAL_QOS_TAGS {
                if window.gate_mask[q] {
                    opens[q].push(window_start + open_start);
                    closes[q].push(window_start + open_end);
                }
            }
            window_start += window.duration;
        }

        Self {
            opens,
            closes,
            cycle_length: schedule.cycle_length(),
        }
    }

    /// Whether queue `q` has at least one open window anywhere in the
    /// cycle (used for starvation reasoning: a queue with a recurring open
    /// window can never be starved beyond one cycle length).
    pub fn has_open_window(&self, q: usize) -> bool {
        q < TOTAL_QOS_TAGS && !self.opens[q].is_empty()
    }

    /// Returns `0` if the gate is open at `now` and the head-of-line frame
    /// (whose transmission time is `transmission_time`) fits before close;
    /// the strictly positive duration until the queue next opens with room
    /// for that frame otherwise; or [`NO_OPEN_WINDOW`] if `q` is out of
    /// range or never opens in this cycle.
    ///
    /// Requires `self.cycle_length > 0` — callers must branch on the
    /// empty-schedule case before reaching here; the dequeue selector does
    /// this.
    pub fn time_until_open(&self, q: usize, now: Nanos, transmission_time: Nanos) -> Nanos {
        if q >= TOTAL_QOS_TAGS {
            return NO_OPEN_WINDOW;
        }
        let closes = &self.closes[q];
        let opens = &self.opens[q];
        if opens.is_empty() {
            return NO_OPEN_WINDOW;
        }

        let r = cycle_position(now, self.cycle_length);
        let probe = r + transmission_time;

        // Smallest index i with closes[i] > probe: the one open interval
        // (if any) that could still admit this frame before it closes.
        let i = closes.partition_point(|&c| c <= probe);

        if i < closes.len() {
            if opens[i] <= r {
                // Open now, and closes[i] > probe means the frame fits.
                0
            } else {
                opens[i] - r
            }
        } else {
            // No interval in the remainder of this cycle admits the frame
            // (this also covers the guard-band case where the gate is open
            // at r but closes before r + transmission_time would finish:
            // closes[i] <= probe excludes that index from the search, so
            // it falls through to here rather than returning 0). Wrap to
            // the first opening of the next cycle.
            opens[0] + self.cycle_length - r
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{GateMask, Window};

    const OPEN: GateMask = [true; 8];
    const CLOSED: GateMask = [false; 8];

    fn two_window_alternation() -> Schedule {
        let mut s = Schedule::empty();
        s.append(Window::full(1_000_000_000, OPEN).unwrap());
        s.append(Window::full(1_000_000_000, CLOSED).unwrap());
        s
    }

    #[test]
    fn open_now_returns_zero() {
        let idx = QueueOpenIndex::build(&two_window_alternation());
        assert_eq!(idx.time_until_open(0, 0, 102_400), 0);
    }

    #[test]
    fn closed_queue_waits_until_next_open() {
        // Enqueue at t=1.1s, during the closed window; next open is at t=2.0s.
        let idx = QueueOpenIndex::build(&two_window_alternation());
        let now = 1_100_000_000;
        let wait = idx.time_until_open(0, now, 102_400);
        assert_eq!(now + wait, 2_000_000_000);
    }

    #[test]
    fn guard_band_pushes_to_next_cycle() {
        // 50ns before close, frame needs 102_400ns: guard band pushes to next cycle.
        let idx = QueueOpenIndex::build(&two_window_alternation());
        let now = 999_950_000;
        let wait = idx.time_until_open(0, now, 102_400);
        assert_eq!(now + wait, 2_000_000_000);
    }

    #[test]
    fn queue_never_open_returns_sentinel() {
        let mut s = Schedule::empty();
        s.append(Window::full(1_000_000_000, CLOSED).unwrap());
        let idx = QueueOpenIndex::build(&s);
        assert_eq!(idx.time_until_open(3, 0, 0), NO_OPEN_WINDOW);
        assert!(!idx.has_open_window(3));
    }

    #[test]
    fn out_of_range_queue_returns_sentinel() {
        let idx = QueueOpenIndex::build(&two_window_alternation());
        assert_eq!(idx.time_until_open(8, 0, 0), NO_OPEN_WINDOW);
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
        let idx = QueueOpenIndex::build(&s);

        assert_eq!(idx.time_until_open(3, 0, 0), 0);
        assert_eq!(idx.time_until_open(5, 0, 0), 1_000_000_000);
    }

    proptest::proptest! {
        #[test]
        fn modular_correctness(now: i64, k in 0i64..=5) {
            let s = two_window_alternation();
            let idx = QueueOpenIndex::build(&s);
            let cycle = s.cycle_length();
            let shifted = now.wrapping_add(k.wrapping_mul(cycle));
            let a = idx.time_until_open(0, now, 102_400);
            let b = idx.time_until_open(0, shifted, 102_400);
            proptest::prop_assert_eq!(a, b);
        }
    }
}
