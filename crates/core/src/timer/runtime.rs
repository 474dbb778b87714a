use super::{TimerCallback, TimerFacility, TimerHandle, TICK_DURATION};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Timer facility backed by tokio tasks, one task per timer.
///
/// Ticks are mapped to wall-clock time at 20 ticks per second.
pub struct TokioTimers {
    runtime: Handle,
    next_handle: AtomicU64,
    tasks: DashMap<TimerHandle, JoinHandle<()>>,
}

impl TokioTimers {
    /// Create timers on the given runtime
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            next_handle: AtomicU64::new(1),
            tasks: DashMap::new(),
        }
    }

    /// Create timers on the runtime of the calling task
    pub fn current() -> Self {
        Self::new(Handle::current())
    }

    /// Number of timers still scheduled
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }
}

/// Wall-clock period of `interval_ticks`, saturating for huge intervals
fn period_for(interval_ticks: u64) -> Duration {
    let ticks = u32::try_from(interval_ticks.max(1)).unwrap_or(u32::MAX);
    TICK_DURATION.saturating_mul(ticks)
}

impl TimerFacility for TokioTimers {
    fn schedule_repeating(&self, interval_ticks: u64, callback: TimerCallback) -> TimerHandle {
        let handle = TimerHandle(self.next_handle.fetch_add(1, Ordering::Relaxed));
        let period = period_for(interval_ticks);

        let task = self.runtime.spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            // Missed ticks are delayed, never replayed in a burst.
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                callback();
            }
        });

        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&self, handle: TimerHandle) -> bool {
        match self.tasks.remove(&handle) {
            Some((_, task)) => {
                task.abort();
                true
            }
            None => false,
        }
    }
}

impl Drop for TokioTimers {
    fn drop(&mut self) {
        for entry in self.tasks.iter() {
            entry.value().abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_fires_on_interval_until_cancelled() {
        let timers = TokioTimers::current();
        let count = Arc::new(AtomicUsize::new(0));
        let inner = count.clone();

        let handle = timers.schedule_repeating(
            2,
            Arc::new(move || {
                inner.fetch_add(1, Ordering::SeqCst);
            }),
        );

        // Two ticks are 100ms; wake up between the second and third fire.
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);

        assert!(timers.cancel(handle));
        assert_eq!(timers.pending(), 0);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_period_saturates() {
        assert_eq!(period_for(0), TICK_DURATION);
        assert_eq!(period_for(20), Duration::from_secs(1));
        assert_eq!(period_for(u64::from(u32::MAX) + 1), TICK_DURATION * u32::MAX);
        assert_eq!(period_for(u64::MAX), TICK_DURATION * u32::MAX);
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_interval_never_fires_early() {
        let timers = TokioTimers::current();
        let count = Arc::new(AtomicUsize::new(0));
        let inner = count.clone();

        let handle = timers.schedule_repeating(
            u64::from(u32::MAX) + 1,
            Arc::new(move || {
                inner.fetch_add(1, Ordering::SeqCst);
            }),
        );

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(timers.cancel(handle));
    }
}
