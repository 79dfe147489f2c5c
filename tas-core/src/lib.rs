//! Time-Aware Shaper core: IEEE 802.1Qbv gate-schedule index, strict-priority
//! dequeue selector and guard-band admission logic.
//!
//! This crate has no notion of sockets, links, or a real clock — it is the
//! pure decision core a traffic-control discipline wraps. The surrounding
//! driver supplies frames, a [`sim::SimulatorKernel`], and a priority-tagged
//! classifier chain; this crate answers two questions: "which queue goes
//! next" and "if none can go now, when should we be woken up".

pub mod classify;
pub mod disc;
pub mod error;
pub mod index;
pub mod queue;
pub mod schedule;
pub mod selector;
pub mod sim;
pub mod stats;
pub mod time;
pub mod wakeup;

pub use classify::{Filter, Frame, NO_MATCH};
pub use disc::{TasConfig, TasQueueDisc};
pub use error::{ScheduleError, TasError};
pub use index::{QueueOpenIndex, NO_OPEN_WINDOW};
pub use queue::{PriorityQueues, LIMIT_EXCEEDED_DROP};
pub use schedule::{GateMask, Schedule, Window, TOTAL_QOS_TAGS};
pub use selector::Selection;
pub use sim::{SimulatorKernel, TimeSourceCallback};
pub use stats::DiscStats;
pub use time::{cycle_position, transmission_time_ns, Nanos};
pub use wakeup::WakeupTable;
