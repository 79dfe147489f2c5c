//! The discrete-event simulator kernel collaborator: supplies "now" and
//! schedules future callbacks. Treated throughout `tas-core` as an
//! external capability, not something this crate implements.
//!
//! `tas-core` depends only on this trait. `tas-cli` supplies one concrete,
//! minimal implementation to make the demo driver runnable; that
//! implementation carries none of the core's own invariants beyond "fire
//! once, in time order".

use crate::time::Nanos;

/// `now()` / `schedule(at)` / `is_expired(handle)` — the simulator kernel
/// contract the core depends on.
pub trait SimulatorKernel {
    /// Opaque handle to a posted future event.
    type Handle: Copy + Eq;

    /// Current simulated time. Monotone non-decreasing across a run.
    fn now(&self) -> Nanos;

    /// Post a callback to fire at absolute time `at`. Returns a handle the
    /// wake-up table can later ask about via [`is_expired`].
    ///
    /// [`is_expired`]: SimulatorKernel::is_expired
    fn schedule_at(&mut self, at: Nanos) -> Self::Handle;

    /// Whether the event behind `handle` has already fired or been
    /// cancelled.
    fn is_expired(&self, handle: Self::Handle) -> bool;
}

/// An injected time-source callback: when present, used instead of the
/// simulator kernel's own `now()`. Kept as a plain callback type — not a
/// trait — so a deterministic fake clock can be swapped in for tests
/// independent of the event loop.
pub type TimeSourceCallback = std::sync::Arc<dyn Fn() -> Nanos + Send + Sync>;
