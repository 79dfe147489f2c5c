//! Canonical representation of the cyclic gate schedule.
//!
//! Grounded in ns-3's `TasSchudle`/`SchudlePlan` pair (multiple
//! coexisting names across revisions for the same concept, settled here
//! as `Schedule` and `Window`) and given a typed constructor instead of
//! the original's unchecked struct literal.

use crate::error::ScheduleError;
use crate::time::Nanos;

/// Number of strict-priority queues. An IEEE 802.1Q invariant, not a
/// tuning knob — kept as a compile-time constant.
pub const TOTAL_QOS_TAGS: usize = 8;

/// A gate mask: which of the 8 priority queues may transmit during a
/// window. Indexed by priority 0..7.
pub type GateMask = [bool; TOTAL_QOS_TAGS];

/// One entry of the cyclic schedule.
///
/// Invariant: `start_offset + stop_offset < duration`. The effective open
/// region inside the window is `[start_offset, duration - stop_offset)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub duration: Nanos,
    pub gate_mask: GateMask,
    pub start_offset: Nanos,
    pub stop_offset: Nanos,
}

impl Window {
    /// Construct a window, rejecting a non-positive duration or guard
    /// offsets that consume the whole window.
    pub fn new(
        duration: Nanos,
        gate_mask: GateMask,
        start_offset: Nanos,
        stop_offset: Nanos,
    ) -> Result<Self, ScheduleError> {
        if duration <= 0 {
            return Err(ScheduleError::NonPositiveDuration(duration));
        }
        if start_offset + stop_offset >= duration {
            return Err(ScheduleError::GuardOffsetsExceedDuration {
                duration,
                start_offset,
                stop_offset,
            });
        }
        Ok(Self {
            duration,
            gate_mask,
            start_offset,
            stop_offset,
        })
    }

    /// A window with no guard band, open the whole duration for the given
    /// mask. Convenience for the common case.
    pub fn full(duration: Nanos, gate_mask: GateMask) -> Result<Self, ScheduleError> {
        Self::new(duration, gate_mask, 0, 0)
    }

    /// The effective open region within this window, relative to the
    /// window's own start: `[start_offset, duration - stop_offset)`.
    pub fn open_region(&self) -> (Nanos, Nanos) {
        (self.start_offset, self.duration - self.stop_offset)
    }
}

/// Ordered sequence of [`Window`]s. Windows are never reordered; their
/// position in the cycle is the prefix sum of the preceding durations.
///
/// An empty schedule means "no gating" — `cycle_length() == 0` is the
/// sentinel the rest of the core branches on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    windows: Vec<Window>,
    cycle_length: Nanos,
}

impl Schedule {
    /// An empty schedule: no gating, strict priority only.
    pub fn empty() -> Self {
        Self {
            windows: Vec::new(),
            cycle_length: 0,
        }
    }

    /// Build a schedule from an already-validated sequence of windows.
    pub fn new(windows: Vec<Window>) -> Self {
        let cycle_length = windows.iter().map(|w| w.duration).sum();
        Self {
            windows,
            cycle_length,
        }
    }

    /// Append a window to the end of the schedule. The schedule is
    /// monotone during a run — there is no removal or replacement API.
    pub fn append(&mut self, window: Window) {
        self.cycle_length += window.duration;
        self.windows.push(window);
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn cycle_length(&self) -> Nanos {
        self.cycle_length
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }
}
