//! Per-sapling growth state machine
//!
//! A [`GrowthProcess`] starts at stage zero and advances one stage per timer
//! tick while its sapling is still in place. Reaching [`MAX_STAGES`] clears
//! the sapling and grows the tree. A missing sapling or an unloaded region
//! aborts the process without touching the world.

use super::config::MechanicsConfig;
use super::rng::RngSource;
use super::tree;
use level::{BlockType, Effect, Location, TreeKind, World};
use mango_core::timer::{TimerHandle, TICKS_PER_MINUTE};
use std::fmt;

/// Stages between planting and a grown tree
pub const MAX_STAGES: u8 = 3;

/// Settings captured when a process starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthSettings {
    /// Ticks between stages, at least one
    pub interval_ticks: u64,
    /// Build the mango tree shape instead of a vanilla jungle tree
    pub custom_generation: bool,
}

impl GrowthSettings {
    /// Settings for a tree that takes `growth_time_minutes` to grow
    pub fn new(growth_time_minutes: u32, custom_generation: bool) -> Self {
        let total = u64::from(growth_time_minutes) * TICKS_PER_MINUTE;
        Self {
            interval_ticks: (total / u64::from(MAX_STAGES)).max(1),
            custom_generation,
        }
    }

    pub fn from_mechanics(mechanics: &MechanicsConfig) -> Self {
        Self::new(mechanics.growth_time, mechanics.use_custom_tree_generation)
    }
}

/// Identifies one growth process, so ticks from an earlier process at the
/// same location can be told apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessId(pub u64);

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Why a process stopped before the tree grew
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbortReason {
    /// The sapling was removed or replaced
    MarkerMissing,
    /// The region holding the sapling is not loaded
    Unloaded,
    /// The world rejected clearing the sapling
    WorldAccess,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MarkerMissing => write!(f, "sapling missing"),
            Self::Unloaded => write!(f, "region not loaded"),
            Self::WorldAccess => write!(f, "world access failed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthState {
    Growing,
    Completed,
    Aborted(AbortReason),
}

impl GrowthState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Growing)
    }
}

/// Result of delivering one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Moved to the given stage, still growing
    Advanced(u8),
    /// The tree grew. `height` is the trunk height of a generated mango tree,
    /// `None` for a vanilla tree.
    Completed { height: Option<u8>, placed: usize },
    Aborted(AbortReason),
    /// The tick did not belong to a live process
    Ignored,
}

impl TickOutcome {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed { .. } | Self::Aborted(_))
    }
}

/// Growth of one planted sapling
#[derive(Debug, Clone)]
pub struct GrowthProcess {
    id: ProcessId,
    location: Location,
    stage: u8,
    state: GrowthState,
    settings: GrowthSettings,
    timer: Option<TimerHandle>,
}

impl GrowthProcess {
    pub fn new(id: ProcessId, location: Location, settings: GrowthSettings) -> Self {
        Self {
            id,
            location,
            stage: 0,
            state: GrowthState::Growing,
            settings,
            timer: None,
        }
    }

    pub fn id(&self) -> ProcessId {
        self.id
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn stage(&self) -> u8 {
        self.stage
    }

    pub fn state(&self) -> GrowthState {
        self.state
    }

    pub fn settings(&self) -> GrowthSettings {
        self.settings
    }

    pub fn timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    pub(crate) fn set_timer(&mut self, timer: TimerHandle) {
        self.timer = Some(timer);
    }

    /// Deliver one tick. Terminal processes ignore further ticks.
    pub fn advance(&mut self, world: &dyn World, rng: &mut dyn RngSource) -> TickOutcome {
        if self.state.is_terminal() {
            return TickOutcome::Ignored;
        }

        if world.block_at(&self.location).is_none() {
            return self.abort(AbortReason::Unloaded);
        }
        if !world.is_marker_block(&self.location) {
            return self.abort(AbortReason::MarkerMissing);
        }

        self.stage += 1;
        let _ = world.emit_effect(&self.location, Effect::GrowthProgress { stage: self.stage });
        tracing::debug!(
            "Mango tree {} at {} reached stage {}/{}",
            self.id, self.location, self.stage, MAX_STAGES
        );

        if self.stage < MAX_STAGES {
            return TickOutcome::Advanced(self.stage);
        }
        self.grow(world, rng)
    }

    fn abort(&mut self, reason: AbortReason) -> TickOutcome {
        tracing::debug!(
            "Mango tree {} at {} stopped growing: {}",
            self.id, self.location, reason
        );
        self.state = GrowthState::Aborted(reason);
        TickOutcome::Aborted(reason)
    }

    fn grow(&mut self, world: &dyn World, rng: &mut dyn RngSource) -> TickOutcome {
        if let Err(e) = world.set_block(&self.location, BlockType::Air) {
            tracing::warn!("Failed to clear sapling at {}: {}", self.location, e);
            return self.abort(AbortReason::WorldAccess);
        }

        let (height, placed) = if self.settings.custom_generation {
            let (height, placed) = place_mango_tree(world, self.location, rng);
            (Some(height), placed)
        } else {
            match world.grow_vanilla_tree(&self.location, TreeKind::Jungle) {
                Ok(()) => (None, 1),
                Err(e) => {
                    tracing::warn!("Failed to grow jungle tree at {}: {}", self.location, e);
                    (None, 0)
                }
            }
        };

        let _ = world.emit_effect(&self.location, Effect::TreeGrown { height });
        self.state = GrowthState::Completed;
        tracing::info!("Mango tree {} grew at {}", self.id, self.location);
        TickOutcome::Completed { height, placed }
    }
}

/// Write a generated mango tree into the world, returning its trunk height
/// and the number of blocks placed
fn place_mango_tree(world: &dyn World, anchor: Location, rng: &mut dyn RngSource) -> (u8, usize) {
    let structure = tree::generate(anchor, rng);
    let height = u8::try_from(structure.height()).unwrap_or(u8::MAX);

    let mut placed = 0;
    for placement in structure {
        let location = placement.location(&anchor);
        match world.set_block(&location, placement.block) {
            Ok(()) => placed += 1,
            Err(e) => tracing::debug!("Skipped {} at {}: {}", placement.block, location, e),
        }
    }
    (height, placed)
}
