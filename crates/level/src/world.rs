//! Host world interface consumed by plugins

use crate::{BlockType, ChunkPos, Effect, ItemStack, Location, TreeKind, WorldId};

/// Lowest block y-coordinate of a world
pub const MIN_BUILD_HEIGHT: i32 = -64;
/// Highest block y-coordinate of a world (exclusive)
pub const MAX_BUILD_HEIGHT: i32 = 320;

/// Errors raised by world access
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    #[error("chunk {0} is not loaded")]
    ChunkNotLoaded(ChunkPos),

    #[error("y-coordinate {y} is outside the build height")]
    OutOfBounds { y: i32 },

    #[error("world {0} does not exist")]
    UnknownWorld(WorldId),
}

/// Shared mutable world state owned by the host server.
///
/// The world can change between any two calls because of unrelated actors,
/// so callers re-read the blocks they depend on before mutating.
pub trait World: Send + Sync {
    /// Block at `location`, or `None` if its chunk is not loaded
    fn block_at(&self, location: &Location) -> Option<BlockType>;

    /// Replace the block at `location`
    fn set_block(&self, location: &Location, block: BlockType) -> Result<(), WorldError>;

    /// Show a cosmetic effect. Callers treat failure as a no-op.
    fn emit_effect(&self, location: &Location, effect: Effect) -> Result<(), WorldError>;

    /// Grow one of the host's built-in tree shapes rooted at `location`
    fn grow_vanilla_tree(&self, location: &Location, kind: TreeKind) -> Result<(), WorldError>;

    /// Drop an item entity at `location`
    fn drop_item(&self, location: &Location, item: ItemStack) -> Result<(), WorldError>;

    /// Whether the growth marker is still present at `location`.
    ///
    /// Growth aborts once this turns false. Hosts that tag planted saplings
    /// can override it; the default accepts any sapling.
    fn is_marker_block(&self, location: &Location) -> bool {
        self.block_at(location).is_some_and(BlockType::is_sapling)
    }
}

/// Check that a location lies within the build height
pub fn check_bounds(location: &Location) -> Result<(), WorldError> {
    let y = location.pos.y;
    if !(MIN_BUILD_HEIGHT..MAX_BUILD_HEIGHT).contains(&y) {
        return Err(WorldError::OutOfBounds { y });
    }
    Ok(())
}
