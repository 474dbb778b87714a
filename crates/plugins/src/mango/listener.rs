//! Reactions to host events: eating mangoes, planting seeds and breaking
//! leaves

use super::config::{MangoConfig, SharedConfig};
use super::growth::GrowthSettings;
use super::items::MangoItems;
use super::rng::{self, RngSource};
use super::scheduler::GrowthScheduler;
use level::{BlockType, Effect, World};
use mango_core::event::{
    BlockBreakEvent, Cancellable, Hand, InteractAction, PlayerInteractEvent,
    PlayerItemConsumeEvent,
};
use mango_core::player::{MAX_FOOD_LEVEL, MAX_SATURATION};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

/// Handles the host events the plugin subscribes to.
///
/// Cancelled events are left alone.
pub struct MangoListener {
    world: Arc<dyn World>,
    scheduler: Arc<GrowthScheduler>,
    config: SharedConfig,
    items: RwLock<MangoItems>,
    rng: Mutex<Box<dyn RngSource>>,
}

impl MangoListener {
    pub fn new(
        world: Arc<dyn World>,
        scheduler: Arc<GrowthScheduler>,
        config: SharedConfig,
        rng: Box<dyn RngSource>,
    ) -> Self {
        let items = MangoItems::new(&config.snapshot().items);
        Self {
            world,
            scheduler,
            config,
            items: RwLock::new(items),
            rng: Mutex::new(rng),
        }
    }

    pub fn scheduler(&self) -> &Arc<GrowthScheduler> {
        &self.scheduler
    }

    pub fn items(&self) -> MangoItems {
        self.items.read().clone()
    }

    /// Rebuild the item templates after the configuration changed
    pub fn reload(&self, config: &MangoConfig) {
        *self.items.write() = MangoItems::new(&config.items);
    }

    fn roll(&self, chance: f64) -> bool {
        let mut rng = self.rng.lock();
        rng::roll(rng.as_mut(), chance)
    }

    /// Eating a mango restores food and saturation and may drop a seed
    pub fn on_consume(&self, event: &mut PlayerItemConsumeEvent) {
        if event.is_cancelled() || !self.items.read().is_mango(&event.item) {
            return;
        }

        let config = self.config.snapshot();
        let player = &event.player;
        let mango = &config.items.mango;

        player.set_food_level(
            player
                .food_level()
                .saturating_add(mango.food_level)
                .min(MAX_FOOD_LEVEL),
        );
        player.set_saturation((player.saturation() + mango.saturation).min(MAX_SATURATION));

        let location = player.location();
        let _ = self.world.emit_effect(&location, Effect::MangoEaten);

        if self.roll(config.mechanics.seed_drop_chance) {
            let seed = self.items.read().seed();
            if let Err(e) = self.world.drop_item(&location, seed) {
                tracing::debug!("Could not drop mango seed at {}: {}", location, e);
            }
        }
    }

    /// Right-clicking soil with a mango seed plants a sapling and starts
    /// growing a tree
    pub fn on_interact(&self, event: &mut PlayerInteractEvent) {
        if event.is_cancelled()
            || event.action != InteractAction::RightClickBlock
            || event.hand != Hand::Main
        {
            return;
        }
        let Some(clicked) = event.clicked_block else {
            return;
        };

        let player = Arc::clone(&event.player);
        let Some(held) = player.main_hand() else {
            return;
        };
        if !self.items.read().is_seed(&held) {
            return;
        }

        if !self.world.block_at(&clicked).is_some_and(BlockType::is_plantable_soil) {
            return;
        }
        let sapling = clicked.above();
        if self.world.block_at(&sapling) != Some(BlockType::Air) {
            return;
        }

        event.set_cancelled(true);

        if let Err(e) = self.world.set_block(&sapling, BlockType::JungleSapling) {
            tracing::warn!("Failed to plant mango seed at {}: {}", sapling, e);
            return;
        }
        player.set_main_hand(held.take_one());

        let settings = GrowthSettings::from_mechanics(&self.config.mechanics());
        if let Ok(id) = self.scheduler.start(sapling, settings) {
            tracing::info!("{} planted mango tree {} at {}", player.name(), id, sapling);
        }
    }

    /// Breaking leaves may drop a mango
    pub fn on_block_break(&self, event: &mut BlockBreakEvent) {
        if event.is_cancelled() || !event.block.is_leaves() {
            return;
        }

        if self.roll(self.config.mechanics().leaf_drop_chance) {
            let mango = self.items.read().mango();
            if let Err(e) = self.world.drop_item(&event.location, mango) {
                tracing::debug!("Could not drop mango at {}: {}", event.location, e);
            }
        }
    }
}
