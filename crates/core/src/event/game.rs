//! Gameplay events emitted by the host server

use super::{Cancellable, Event};
use crate::player::Player;
use level::{BlockType, ItemStack, Location};
use std::sync::Arc;

/// How a player interacted with the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractAction {
    LeftClickAir,
    LeftClickBlock,
    RightClickAir,
    RightClickBlock,
    Physical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hand {
    Main,
    Off,
}

/// A player clicked or stepped on something
pub struct PlayerInteractEvent {
    pub player: Arc<dyn Player>,
    pub action: InteractAction,
    pub hand: Hand,
    /// Block that was clicked, if any
    pub clicked_block: Option<Location>,
    cancelled: bool,
}

impl PlayerInteractEvent {
    pub fn new(
        player: Arc<dyn Player>,
        action: InteractAction,
        hand: Hand,
        clicked_block: Option<Location>,
    ) -> Self {
        Self {
            player,
            action,
            hand,
            clicked_block,
            cancelled: false,
        }
    }

    /// Right click on a block with the main hand
    pub fn right_click_block(player: Arc<dyn Player>, block: Location) -> Self {
        Self::new(player, InteractAction::RightClickBlock, Hand::Main, Some(block))
    }
}

impl Event for PlayerInteractEvent {}

impl Cancellable for PlayerInteractEvent {
    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

/// A player finished eating or drinking an item
pub struct PlayerItemConsumeEvent {
    pub player: Arc<dyn Player>,
    pub item: ItemStack,
    cancelled: bool,
}

impl PlayerItemConsumeEvent {
    pub fn new(player: Arc<dyn Player>, item: ItemStack) -> Self {
        Self {
            player,
            item,
            cancelled: false,
        }
    }
}

impl Event for PlayerItemConsumeEvent {}

impl Cancellable for PlayerItemConsumeEvent {
    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

/// A block was broken. `block` is the type it had before breaking.
pub struct BlockBreakEvent {
    pub player: Option<Arc<dyn Player>>,
    pub location: Location,
    pub block: BlockType,
    cancelled: bool,
}

impl BlockBreakEvent {
    pub fn new(player: Option<Arc<dyn Player>>, location: Location, block: BlockType) -> Self {
        Self {
            player,
            location,
            block,
            cancelled: false,
        }
    }
}

impl Event for BlockBreakEvent {}

impl Cancellable for BlockBreakEvent {
    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}
