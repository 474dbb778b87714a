//! Players as seen by plugins

use level::{ItemStack, Location};
use parking_lot::RwLock;

/// Highest food level a player can have
pub const MAX_FOOD_LEVEL: i32 = 20;
/// Highest saturation a player can have
pub const MAX_SATURATION: f32 = 20.0;

/// A connected player. State lives on the host, so every accessor reads the
/// current value and setters apply immediately.
pub trait Player: Send + Sync {
    fn name(&self) -> &str;

    fn location(&self) -> Location;

    fn food_level(&self) -> i32;

    fn set_food_level(&self, level: i32);

    fn saturation(&self) -> f32;

    fn set_saturation(&self, saturation: f32);

    /// Item held in the main hand
    fn main_hand(&self) -> Option<ItemStack>;

    fn set_main_hand(&self, item: Option<ItemStack>);
}

#[derive(Debug, Clone)]
struct PlayerState {
    location: Location,
    food_level: i32,
    saturation: f32,
    main_hand: Option<ItemStack>,
}

/// Player kept in memory, used by tests and the local simulation
#[derive(Debug)]
pub struct MemoryPlayer {
    name: String,
    state: RwLock<PlayerState>,
}

impl MemoryPlayer {
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            state: RwLock::new(PlayerState {
                location,
                food_level: MAX_FOOD_LEVEL,
                saturation: 5.0,
                main_hand: None,
            }),
        }
    }

    pub fn with_main_hand(self, item: ItemStack) -> Self {
        self.state.write().main_hand = Some(item);
        self
    }

    pub fn teleport(&self, location: Location) {
        self.state.write().location = location;
    }
}

impl Player for MemoryPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> Location {
        self.state.read().location
    }

    fn food_level(&self) -> i32 {
        self.state.read().food_level
    }

    fn set_food_level(&self, level: i32) {
        self.state.write().food_level = level.clamp(0, MAX_FOOD_LEVEL);
    }

    fn saturation(&self) -> f32 {
        self.state.read().saturation
    }

    fn set_saturation(&self, saturation: f32) {
        self.state.write().saturation = saturation.clamp(0.0, MAX_SATURATION);
    }

    fn main_hand(&self) -> Option<ItemStack> {
        self.state.read().main_hand.clone()
    }

    fn set_main_hand(&self, item: Option<ItemStack>) {
        self.state.write().main_hand = item;
    }
}
