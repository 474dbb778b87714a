//! Plants a mango seed in an in-memory world and runs the game clock until
//! the tree has grown.
//!
//! Usage: `mango-demo [config.toml]`

use anyhow::Result;
use level::{BlockType, ChunkPos, MemoryWorld, World, WorldId};
use mango_core::event::{PlayerInteractEvent, PlayerItemConsumeEvent};
use mango_core::logging::{init_logging, LogConfig};
use mango_core::player::{MemoryPlayer, Player};
use mango_core::timer::TickScheduler;
use mango_plugins::{App, MangoPlugin};
use std::sync::Arc;

fn main() -> Result<()> {
    init_logging(&LogConfig::default())?;

    let plugin = match std::env::args().nth(1) {
        Some(path) => MangoPlugin::with_config_file(path),
        None => MangoPlugin::new(),
    };

    let world = Arc::new(MemoryWorld::new(WorldId::new()));
    world.load_area(ChunkPos::new(0, 0), 1);
    let clock = Arc::new(TickScheduler::new());

    let mut app = App::new(world.clone(), clock.clone());
    app.add_plugin(plugin.clone())?;

    let soil = world.location(0, 63, 0);
    world.set_block(&soil, BlockType::GrassBlock)?;

    let items = plugin.items();
    let player = Arc::new(
        MemoryPlayer::new("Demo", world.location(1, 64, 1)).with_main_hand(items.seed()),
    );

    player.set_food_level(12);
    app.dispatch(&mut PlayerItemConsumeEvent::new(player.clone(), items.mango()));
    tracing::info!(
        "{} ate a mango: food {}, saturation {}",
        player.name(),
        player.food_level(),
        player.saturation()
    );

    app.dispatch(&mut PlayerInteractEvent::right_click_block(player.clone(), soil));

    let scheduler = plugin
        .scheduler()
        .ok_or_else(|| anyhow::anyhow!("mango plugin was not built"))?;
    let sapling = soil.above();
    if !scheduler.is_growing(&sapling) {
        anyhow::bail!("seed was not planted at {}", sapling);
    }

    let interval = plugin_interval(&plugin);
    while scheduler.is_growing(&sapling) {
        clock.advance(interval);
        if let Some(stage) = scheduler.stage(&sapling) {
            tracing::info!("Tick {}: stage {}", clock.current_tick(), stage);
        }
    }

    tracing::info!(
        "Tree grown after {} ticks: {} log(s), {} leaf block(s)",
        clock.current_tick(),
        world.blocks_of(BlockType::JungleLog).len(),
        world.blocks_of(BlockType::JungleLeaves).len()
    );
    tracing::info!("Block at sapling is now {:?}", world.block_at(&sapling));

    app.shutdown()
}

fn plugin_interval(plugin: &MangoPlugin) -> u64 {
    mango_plugins::mango::GrowthSettings::from_mechanics(&plugin.config().mechanics).interval_ticks
}
