//! Registry of growing mango trees

use super::growth::{GrowthProcess, GrowthSettings, ProcessId, TickOutcome};
use super::rng::RngSource;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use level::{Location, World};
use mango_core::timer::{TimerCallback, TimerFacility};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrowthError {
    #[error("A mango tree is already growing at {0}")]
    AlreadyGrowing(Location),
}

/// Owns every live [`GrowthProcess`] and the timer driving it.
///
/// At most one process exists per location. A process is removed, and its
/// timer cancelled, as soon as it completes or aborts.
pub struct GrowthScheduler {
    world: Arc<dyn World>,
    timers: Arc<dyn TimerFacility>,
    rng: Mutex<Box<dyn RngSource>>,
    processes: DashMap<Location, GrowthProcess>,
    next_id: AtomicU64,
}

impl GrowthScheduler {
    pub fn new(
        world: Arc<dyn World>,
        timers: Arc<dyn TimerFacility>,
        rng: Box<dyn RngSource>,
    ) -> Arc<Self> {
        Arc::new(Self {
            world,
            timers,
            rng: Mutex::new(rng),
            processes: DashMap::new(),
            next_id: AtomicU64::new(1),
        })
    }

    /// Start growing a tree at `location`.
    ///
    /// The caller places the sapling first. The process ticks every
    /// `settings.interval_ticks` until it completes or aborts.
    pub fn start(
        self: &Arc<Self>,
        location: Location,
        settings: GrowthSettings,
    ) -> Result<ProcessId, GrowthError> {
        match self.processes.entry(location) {
            Entry::Occupied(_) => {
                tracing::warn!("Ignoring second mango tree at {}", location);
                Err(GrowthError::AlreadyGrowing(location))
            }
            Entry::Vacant(vacant) => {
                let id = ProcessId(self.next_id.fetch_add(1, Ordering::Relaxed));
                let mut process = GrowthProcess::new(id, location, settings);

                let scheduler = Arc::downgrade(self);
                let callback: TimerCallback = Arc::new(move || {
                    if let Some(scheduler) = scheduler.upgrade() {
                        scheduler.tick(&location, id);
                    }
                });
                process.set_timer(self.timers.schedule_repeating(settings.interval_ticks, callback));

                vacant.insert(process);
                tracing::debug!(
                    "Mango tree {} planted at {}, {} tick(s) per stage",
                    id, location, settings.interval_ticks
                );
                Ok(id)
            }
        }
    }

    /// Deliver a timer tick to the process `id` at `location`.
    ///
    /// Ticks for a process that no longer exists, or for an older process at
    /// the same location, are ignored.
    pub fn tick(&self, location: &Location, id: ProcessId) -> TickOutcome {
        let Entry::Occupied(mut entry) = self.processes.entry(*location) else {
            return TickOutcome::Ignored;
        };
        if entry.get().id() != id {
            tracing::debug!("Discarding stale tick for {} at {}", id, location);
            return TickOutcome::Ignored;
        }

        let outcome = {
            let mut rng = self.rng.lock();
            entry.get_mut().advance(self.world.as_ref(), rng.as_mut())
        };

        if outcome.is_terminal() {
            let process = entry.remove();
            if let Some(timer) = process.timer() {
                self.timers.cancel(timer);
            }
        }
        outcome
    }

    /// Stop growth at `location` without growing the tree. The sapling stays.
    pub fn cancel(&self, location: &Location) -> bool {
        match self.processes.remove(location) {
            Some((_, process)) => {
                if let Some(timer) = process.timer() {
                    self.timers.cancel(timer);
                }
                tracing::debug!("Cancelled mango tree {} at {}", process.id(), location);
                true
            }
            None => false,
        }
    }

    /// Cancel every live process, returning how many were stopped
    pub fn cancel_all(&self) -> usize {
        let locations: Vec<Location> = self.processes.iter().map(|entry| *entry.key()).collect();
        let cancelled = locations.iter().filter(|location| self.cancel(location)).count();
        if cancelled > 0 {
            tracing::info!("Cancelled {} growing mango tree(s)", cancelled);
        }
        cancelled
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn is_growing(&self, location: &Location) -> bool {
        self.processes.contains_key(location)
    }

    /// Current stage of the process at `location`
    pub fn stage(&self, location: &Location) -> Option<u8> {
        self.processes.get(location).map(|process| process.stage())
    }

    /// Copy of the process at `location`
    pub fn process(&self, location: &Location) -> Option<GrowthProcess> {
        self.processes.get(location).map(|process| process.clone())
    }
}

impl Drop for GrowthScheduler {
    fn drop(&mut self) {
        for entry in self.processes.iter() {
            if let Some(timer) = entry.value().timer() {
                self.timers.cancel(timer);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mango::rng::ScriptedRng;
    use level::{BlockType, ChunkPos, MemoryWorld, WorldId};
    use mango_core::timer::TickScheduler;

    struct Fixture {
        world: Arc<MemoryWorld>,
        clock: Arc<TickScheduler>,
        scheduler: Arc<GrowthScheduler>,
    }

    fn fixture() -> Fixture {
        let world = Arc::new(MemoryWorld::new(WorldId::from_u128(5)));
        world.load_area(ChunkPos::new(0, 0), 2);
        let clock = Arc::new(TickScheduler::new());
        let scheduler = GrowthScheduler::new(
            world.clone(),
            clock.clone(),
            Box::new(ScriptedRng::default()),
        );
        Fixture { world, clock, scheduler }
    }

    fn plant(f: &Fixture, x: i32, y: i32, z: i32) -> Location {
        let location = f.world.location(x, y, z);
        f.world.set_block(&location, BlockType::JungleSapling).unwrap();
        location
    }

    #[test]
    fn test_duplicate_start_rejected() {
        let f = fixture();
        let location = plant(&f, 5, 70, 5);
        let settings = GrowthSettings::new(3, true);

        let first = f.scheduler.start(location, settings).unwrap();
        assert_eq!(
            f.scheduler.start(location, settings),
            Err(GrowthError::AlreadyGrowing(location))
        );
        assert_eq!(f.scheduler.len(), 1);
        assert_eq!(f.scheduler.process(&location).map(|p| p.id()), Some(first));
        assert_eq!(f.clock.pending(), 1);
    }

    #[test]
    fn test_timer_drives_growth() {
        let f = fixture();
        let location = plant(&f, 1, 64, 1);
        f.scheduler.start(location, GrowthSettings::new(0, true)).unwrap();

        f.clock.advance(1);
        assert_eq!(f.scheduler.stage(&location), Some(1));
        f.clock.advance(2);

        assert!(f.scheduler.is_empty());
        assert_eq!(f.clock.pending(), 0);
        assert_eq!(f.world.block_at(&location), Some(BlockType::JungleLog));
    }

    #[test]
    fn test_stale_tick_ignored() {
        let f = fixture();
        let location = plant(&f, 2, 64, 2);
        let id = f.scheduler.start(location, GrowthSettings::new(30, true)).unwrap();

        assert_eq!(f.scheduler.tick(&location, ProcessId(id.0 + 100)), TickOutcome::Ignored);
        assert_eq!(f.scheduler.stage(&location), Some(0));

        assert!(f.scheduler.cancel(&location));
        assert_eq!(f.scheduler.tick(&location, id), TickOutcome::Ignored);
    }

    #[test]
    fn test_cancel_all_keeps_saplings() {
        let f = fixture();
        let a = plant(&f, 0, 64, 0);
        let b = plant(&f, 4, 64, 4);
        f.scheduler.start(a, GrowthSettings::new(0, true)).unwrap();
        f.scheduler.start(b, GrowthSettings::new(0, true)).unwrap();

        assert_eq!(f.scheduler.cancel_all(), 2);
        assert!(f.scheduler.is_empty());
        assert_eq!(f.clock.pending(), 0);

        f.clock.advance(10);
        assert_eq!(f.world.block_at(&a), Some(BlockType::JungleSapling));
        assert_eq!(f.world.block_at(&b), Some(BlockType::JungleSapling));
        assert_eq!(f.scheduler.cancel_all(), 0);
    }

    #[test]
    fn test_dropping_scheduler_cancels_timers() {
        let f = fixture();
        let location = plant(&f, 0, 64, 0);
        f.scheduler.start(location, GrowthSettings::new(30, true)).unwrap();
        assert_eq!(f.clock.pending(), 1);

        let Fixture { clock, scheduler, .. } = f;
        drop(scheduler);
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn test_restart_after_abort_gets_new_id() {
        let f = fixture();
        let location = plant(&f, 3, 64, 3);
        let first = f.scheduler.start(location, GrowthSettings::new(0, true)).unwrap();

        f.world.set_block(&location, BlockType::Air).unwrap();
        f.clock.advance(1);
        assert!(f.scheduler.is_empty());

        plant(&f, 3, 64, 3);
        let second = f.scheduler.start(location, GrowthSettings::new(0, true)).unwrap();
        assert_ne!(first, second);
        assert_eq!(f.scheduler.tick(&location, first), TickOutcome::Ignored);
        assert_eq!(f.scheduler.stage(&location), Some(0));
    }
}
