use super::{TimerCallback, TimerFacility, TimerHandle};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

struct ScheduledTask {
    interval: u64,
    next_due: u64,
    callback: TimerCallback,
}

/// Timer facility advanced manually, one game tick at a time.
///
/// Callbacks run outside the scheduler's lock, so they may schedule or
/// cancel timers themselves. Timers fire in handle order within a tick.
pub struct TickScheduler {
    current_tick: AtomicU64,
    next_handle: AtomicU64,
    tasks: Mutex<BTreeMap<TimerHandle, ScheduledTask>>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self {
            current_tick: AtomicU64::new(0),
            next_handle: AtomicU64::new(1),
            tasks: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn current_tick(&self) -> u64 {
        self.current_tick.load(Ordering::Acquire)
    }

    /// Number of timers still scheduled
    pub fn pending(&self) -> usize {
        self.tasks.lock().len()
    }

    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.tasks.lock().contains_key(&handle)
    }

    /// Run `ticks` game ticks, returning how many callbacks fired
    pub fn advance(&self, ticks: u64) -> usize {
        (0..ticks).map(|_| self.tick()).sum()
    }

    /// Run a single game tick
    pub fn tick(&self) -> usize {
        let now = self.current_tick.fetch_add(1, Ordering::AcqRel) + 1;

        let due: Vec<(TimerHandle, TimerCallback)> = {
            let mut tasks = self.tasks.lock();
            tasks
                .iter_mut()
                .filter(|(_, task)| task.next_due <= now)
                .map(|(handle, task)| {
                    task.next_due = now + task.interval;
                    (*handle, task.callback.clone())
                })
                .collect()
        };

        let mut fired = 0;
        for (handle, callback) in due {
            // An earlier callback in this tick may have cancelled this one.
            if !self.is_scheduled(handle) {
                continue;
            }
            callback();
            fired += 1;
        }
        fired
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerFacility for TickScheduler {
    fn schedule_repeating(&self, interval_ticks: u64, callback: TimerCallback) -> TimerHandle {
        let interval = interval_ticks.max(1);
        let handle = TimerHandle(self.next_handle.fetch_add(1, Ordering::Relaxed));

        self.tasks.lock().insert(
            handle,
            ScheduledTask {
                interval,
                next_due: self.current_tick() + interval,
                callback,
            },
        );

        tracing::trace!("Scheduled {} every {} tick(s)", handle, interval);
        handle
    }

    fn cancel(&self, handle: TimerHandle) -> bool {
        self.tasks.lock().remove(&handle).is_some()
    }
}
