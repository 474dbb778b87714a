//! Repeating timers driven by the host's game loop

mod runtime;
mod tick;

pub use runtime::TokioTimers;
pub use tick::TickScheduler;

use std::sync::Arc;
use std::time::Duration;

/// Server ticks per second
pub const TICKS_PER_SECOND: u64 = 20;
/// Server ticks per minute
pub const TICKS_PER_MINUTE: u64 = TICKS_PER_SECOND * 60;
/// Wall-clock length of one tick
pub const TICK_DURATION: Duration = Duration::from_millis(1000 / TICKS_PER_SECOND);

/// Callback invoked on every timer fire
pub type TimerCallback = Arc<dyn Fn() + Send + Sync>;

/// Handle identifying a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

impl std::fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// Facility for scheduling repeating callbacks.
///
/// Implementations never invoke a callback from inside
/// `schedule_repeating` or `cancel`. A cancelled timer does not fire again.
pub trait TimerFacility: Send + Sync {
    /// Run `callback` every `interval_ticks` ticks, starting one interval
    /// from now. An interval of zero is treated as one tick.
    fn schedule_repeating(&self, interval_ticks: u64, callback: TimerCallback) -> TimerHandle;

    /// Stop a timer. Returns `false` if it was not scheduled.
    fn cancel(&self, handle: TimerHandle) -> bool;
}
