use level::{BlockType, ChunkPos, Effect, MemoryWorld, World, WorldId};
use mango_core::config::ConfigFile;
use mango_core::event::{BlockBreakEvent, Cancellable, PlayerInteractEvent, PlayerItemConsumeEvent};
use mango_core::player::{MemoryPlayer, Player};
use mango_core::timer::{TickScheduler, TICKS_PER_MINUTE};
use mango_plugins::mango::{MangoConfig, PLUGIN_NAME};
use mango_plugins::{App, MangoPlugin, PluginState};
use std::sync::Arc;

struct Server {
    app: App,
    world: Arc<MemoryWorld>,
    clock: Arc<TickScheduler>,
    plugin: MangoPlugin,
}

fn server(plugin: MangoPlugin) -> Server {
    let world = Arc::new(MemoryWorld::new(WorldId::from_u128(42)));
    world.load_area(ChunkPos::new(0, 0), 2);
    let clock = Arc::new(TickScheduler::new());
    let mut app = App::new(world.clone(), clock.clone());
    app.add_plugin(plugin.clone()).unwrap();
    Server { app, world, clock, plugin }
}

#[test]
fn planted_seed_grows_into_mango_tree() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let mut config = MangoConfig::default();
    config.mechanics.growth_time = 3;
    config.save_to_file(&path).unwrap();

    let mut s = server(MangoPlugin::with_config_file(&path).with_seed(11));
    assert_eq!(s.app.plugin_state(PLUGIN_NAME), Some(PluginState::Enabled));

    let soil = s.world.location(4, 63, 4);
    s.world.set_block(&soil, BlockType::Dirt).unwrap();
    let player = Arc::new(
        MemoryPlayer::new("Robin", s.world.location(0, 64, 0))
            .with_main_hand(s.plugin.items().seed()),
    );

    let mut event = PlayerInteractEvent::right_click_block(player.clone(), soil);
    s.app.dispatch(&mut event);
    assert!(event.is_cancelled());
    assert!(player.main_hand().is_none());

    let sapling = soil.above();
    s.clock.advance(3 * TICKS_PER_MINUTE);

    let scheduler = s.plugin.scheduler().unwrap();
    assert!(!scheduler.is_growing(&sapling));
    assert_eq!(s.world.block_at(&sapling), Some(BlockType::JungleLog));

    let logs = s.world.blocks_of(BlockType::JungleLog).len() as i32;
    assert!((5..=7).contains(&logs));
    assert!(s
        .world
        .effects()
        .iter()
        .any(|(at, effect)| *at == sapling && *effect == Effect::TreeGrown { height: Some(logs as u8) }));

    s.app.shutdown().unwrap();
}

#[test]
fn breaking_planted_sapling_stops_growth() {
    let s = server(MangoPlugin::new().with_seed(3));
    let soil = s.world.location(0, 63, 0);
    s.world.set_block(&soil, BlockType::GrassBlock).unwrap();
    let player = Arc::new(
        MemoryPlayer::new("Kai", s.world.location(1, 64, 1))
            .with_main_hand(s.plugin.items().seed()),
    );

    s.app
        .dispatch(&mut PlayerInteractEvent::right_click_block(player, soil));
    let sapling = soil.above();

    let interval = 30 * TICKS_PER_MINUTE / 3;
    s.clock.advance(interval);
    s.world.set_block(&sapling, BlockType::Air).unwrap();
    s.clock.advance(interval);

    let scheduler = s.plugin.scheduler().unwrap();
    assert!(scheduler.is_empty());
    assert_eq!(s.clock.pending(), 0);
    assert!(s.world.blocks_of(BlockType::JungleLog).is_empty());
}

#[test]
fn guaranteed_drops_from_config() {
    let mut s = server(MangoPlugin::new());
    let mut config = MangoConfig::default();
    config.mechanics.seed_drop_chance = 1.0;
    config.mechanics.leaf_drop_chance = 1.0;
    s.app
        .configure_plugin(PLUGIN_NAME, serde_json::to_value(&config).unwrap())
        .unwrap();

    let player = Arc::new(MemoryPlayer::new("Ash", s.world.location(2, 64, 2)));
    player.set_food_level(5);
    let items = s.plugin.items();

    s.app
        .dispatch(&mut PlayerItemConsumeEvent::new(player.clone(), items.mango()));
    assert_eq!(player.food_level(), 9);

    let leaves = s.world.location(3, 70, 3);
    s.app
        .dispatch(&mut BlockBreakEvent::new(Some(player), leaves, BlockType::JungleLeaves));

    let drops = s.world.drops();
    assert_eq!(drops.len(), 2);
    assert!(items.is_seed(&drops[0].1));
    assert!(items.is_mango(&drops[1].1));
    assert_eq!(drops[1].0, leaves);
}

#[test]
fn zero_chance_never_drops() {
    let mut s = server(MangoPlugin::new());
    let mut config = MangoConfig::default();
    config.mechanics.seed_drop_chance = 0.0;
    config.mechanics.leaf_drop_chance = 0.0;
    s.app
        .configure_plugin(PLUGIN_NAME, serde_json::to_value(&config).unwrap())
        .unwrap();

    let player = Arc::new(MemoryPlayer::new("Jo", s.world.location(0, 64, 0)));
    let items = s.plugin.items();
    for _ in 0..50 {
        s.app
            .dispatch(&mut PlayerItemConsumeEvent::new(player.clone(), items.mango()));
        s.app.dispatch(&mut BlockBreakEvent::new(
            None,
            s.world.location(0, 70, 0),
            BlockType::OakLeaves,
        ));
    }
    assert!(s.world.drops().is_empty());
}

#[test]
fn shutdown_leaves_saplings_in_place() {
    let mut s = server(MangoPlugin::new());
    let player = Arc::new(
        MemoryPlayer::new("Lee", s.world.location(0, 64, 0))
            .with_main_hand(s.plugin.items().seed().with_amount(4)),
    );

    let mut saplings = Vec::new();
    for x in [0, 3, 6] {
        let soil = s.world.location(x, 63, 0);
        s.world.set_block(&soil, BlockType::Farmland).unwrap();
        s.app
            .dispatch(&mut PlayerInteractEvent::right_click_block(player.clone(), soil));
        saplings.push(soil.above());
    }
    assert_eq!(s.plugin.scheduler().unwrap().len(), 3);
    assert_eq!(player.main_hand().map(|item| item.amount), Some(1));

    s.app.shutdown().unwrap();
    assert_eq!(s.clock.pending(), 0);
    for sapling in saplings {
        assert_eq!(s.world.block_at(&sapling), Some(BlockType::JungleSapling));
    }
}

#[test]
fn config_change_applies_to_new_trees_only() {
    let mut s = server(MangoPlugin::new());
    let player = Arc::new(
        MemoryPlayer::new("Max", s.world.location(0, 64, 0))
            .with_main_hand(s.plugin.items().seed().with_amount(2)),
    );

    let first = s.world.location(0, 63, 0);
    s.world.set_block(&first, BlockType::Dirt).unwrap();
    s.app
        .dispatch(&mut PlayerInteractEvent::right_click_block(player.clone(), first));

    let mut config = MangoConfig::default();
    config.mechanics.growth_time = 0;
    s.app
        .configure_plugin(PLUGIN_NAME, serde_json::to_value(&config).unwrap())
        .unwrap();

    let second = s.world.location(5, 63, 5);
    s.world.set_block(&second, BlockType::Dirt).unwrap();
    s.app
        .dispatch(&mut PlayerInteractEvent::right_click_block(player.clone(), second));

    s.clock.advance(3);
    let scheduler = s.plugin.scheduler().unwrap();
    assert!(scheduler.is_growing(&first.above()));
    assert!(!scheduler.is_growing(&second.above()));
    assert_eq!(
        scheduler.process(&first.above()).map(|p| p.settings().interval_ticks),
        Some(30 * TICKS_PER_MINUTE / 3)
    );
}
