//! In-memory world backed by a concurrent chunk map

use crate::world::check_bounds;
use crate::{BlockPos, BlockType, ChunkPos, Effect, ItemStack, Location, TreeKind, World, WorldError, WorldId};
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Trunk height of the trees produced by [`MemoryWorld::grow_vanilla_tree`]
pub const VANILLA_TREE_HEIGHT: i32 = 4;

/// Blocks of a single loaded chunk. Missing entries are air.
#[derive(Debug, Default)]
pub struct MemoryChunk {
    blocks: HashMap<BlockPos, BlockType>,
}

impl MemoryChunk {
    pub fn get(&self, pos: BlockPos) -> BlockType {
        self.blocks.get(&pos).copied().unwrap_or(BlockType::Air)
    }

    pub fn set(&mut self, pos: BlockPos, block: BlockType) {
        if block.is_air() {
            self.blocks.remove(&pos);
        } else {
            self.blocks.insert(pos, block);
        }
    }

    /// Number of non-air blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// A world kept entirely in memory.
///
/// Chunks must be loaded before they can be read or written; access to an
/// unloaded chunk behaves like a host region that is not currently loaded.
/// Effects, drops and vanilla tree requests are recorded for inspection.
pub struct MemoryWorld {
    id: WorldId,
    chunks: DashMap<ChunkPos, Arc<RwLock<MemoryChunk>>>,
    effects: Mutex<Vec<(Location, Effect)>>,
    drops: Mutex<Vec<(Location, ItemStack)>>,
    vanilla_trees: Mutex<Vec<(Location, TreeKind)>>,
    block_writes: AtomicUsize,
    fail_effects: AtomicBool,
}

impl MemoryWorld {
    pub fn new(id: WorldId) -> Self {
        Self {
            id,
            chunks: DashMap::new(),
            effects: Mutex::new(Vec::new()),
            drops: Mutex::new(Vec::new()),
            vanilla_trees: Mutex::new(Vec::new()),
            block_writes: AtomicUsize::new(0),
            fail_effects: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> WorldId {
        self.id
    }

    /// Location in this world
    pub fn location(&self, x: i32, y: i32, z: i32) -> Location {
        Location::at(self.id, x, y, z)
    }

    /// Load a chunk (or keep the existing one)
    pub fn load_chunk(&self, pos: ChunkPos) {
        self.chunks.entry(pos).or_default();
    }

    /// Load every chunk in the square of `radius` chunks around `center`
    pub fn load_area(&self, center: ChunkPos, radius: i32) {
        for x in (center.x - radius)..=(center.x + radius) {
            for z in (center.z - radius)..=(center.z + radius) {
                self.load_chunk(ChunkPos::new(x, z));
            }
        }
    }

    /// Unload a chunk, discarding its blocks
    pub fn unload_chunk(&self, pos: ChunkPos) -> bool {
        let removed = self.chunks.remove(&pos).is_some();
        if removed {
            tracing::debug!("Unloaded chunk {}", pos);
        }
        removed
    }

    /// Make every subsequent `emit_effect` call fail
    pub fn set_fail_effects(&self, fail: bool) {
        self.fail_effects.store(fail, Ordering::Relaxed);
    }

    pub fn effects(&self) -> Vec<(Location, Effect)> {
        self.effects.lock().clone()
    }

    pub fn drops(&self) -> Vec<(Location, ItemStack)> {
        self.drops.lock().clone()
    }

    pub fn vanilla_trees(&self) -> Vec<(Location, TreeKind)> {
        self.vanilla_trees.lock().clone()
    }

    /// Number of successful `set_block` calls so far
    pub fn block_writes(&self) -> usize {
        self.block_writes.load(Ordering::Relaxed)
    }

    /// All non-air blocks of the given type
    pub fn blocks_of(&self, block: BlockType) -> Vec<BlockPos> {
        let mut found: Vec<BlockPos> = self
            .chunks
            .iter()
            .flat_map(|entry| {
                let chunk = entry.value().read();
                chunk
                    .blocks
                    .iter()
                    .filter(|(_, b)| **b == block)
                    .map(|(pos, _)| *pos)
                    .collect::<Vec<_>>()
            })
            .collect();
        found.sort();
        found
    }

    fn chunk(&self, location: &Location) -> Result<Arc<RwLock<MemoryChunk>>, WorldError> {
        if location.world != self.id {
            return Err(WorldError::UnknownWorld(location.world));
        }
        check_bounds(location)?;

        let pos = location.chunk();
        self.chunks
            .get(&pos)
            .map(|entry| entry.value().clone())
            .ok_or(WorldError::ChunkNotLoaded(pos))
    }
}

impl World for MemoryWorld {
    fn block_at(&self, location: &Location) -> Option<BlockType> {
        let chunk = self.chunk(location).ok()?;
        let block = chunk.read().get(location.pos);
        Some(block)
    }

    fn set_block(&self, location: &Location, block: BlockType) -> Result<(), WorldError> {
        let chunk = self.chunk(location)?;
        chunk.write().set(location.pos, block);
        self.block_writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn emit_effect(&self, location: &Location, effect: Effect) -> Result<(), WorldError> {
        self.chunk(location)?;
        if self.fail_effects.load(Ordering::Relaxed) {
            return Err(WorldError::ChunkNotLoaded(location.chunk()));
        }
        self.effects.lock().push((*location, effect));
        Ok(())
    }

    fn grow_vanilla_tree(&self, location: &Location, kind: TreeKind) -> Result<(), WorldError> {
        let log = match kind {
            TreeKind::Oak => BlockType::OakLog,
            TreeKind::Jungle => BlockType::JungleLog,
        };
        for y in 0..VANILLA_TREE_HEIGHT {
            self.set_block(&location.offset(crate::BlockOffset::new(0, y, 0)), log)?;
        }
        self.vanilla_trees.lock().push((*location, kind));
        Ok(())
    }

    fn drop_item(&self, location: &Location, item: ItemStack) -> Result<(), WorldError> {
        self.chunk(location)?;
        self.drops.lock().push((*location, item));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Material;

    fn world() -> MemoryWorld {
        let world = MemoryWorld::new(WorldId::from_u128(1));
        world.load_area(ChunkPos::new(0, 0), 1);
        world
    }

    #[test]
    fn test_unloaded_chunk_reads_as_none() {
        let world = world();
        let far = world.location(1000, 64, 1000);
        assert_eq!(world.block_at(&far), None);
        assert_eq!(
            world.set_block(&far, BlockType::Dirt),
            Err(WorldError::ChunkNotLoaded(ChunkPos::new(62, 62)))
        );
        assert!(!world.is_marker_block(&far));
    }

    #[test]
    fn test_set_and_get() {
        let world = world();
        let loc = world.location(3, 64, -3);
        assert_eq!(world.block_at(&loc), Some(BlockType::Air));

        world.set_block(&loc, BlockType::JungleSapling).unwrap();
        assert_eq!(world.block_at(&loc), Some(BlockType::JungleSapling));
        assert!(world.is_marker_block(&loc));

        world.set_block(&loc, BlockType::Air).unwrap();
        assert!(!world.is_marker_block(&loc));
        assert_eq!(world.block_writes(), 2);
    }

    #[test]
    fn test_out_of_bounds_and_foreign_world() {
        let world = world();
        assert_eq!(
            world.set_block(&world.location(0, 400, 0), BlockType::Stone),
            Err(WorldError::OutOfBounds { y: 400 })
        );

        let foreign = Location::at(WorldId::from_u128(2), 0, 64, 0);
        assert_eq!(world.block_at(&foreign), None);
    }

    #[test]
    fn test_unload_discards_blocks() {
        let world = world();
        let loc = world.location(0, 64, 0);
        world.set_block(&loc, BlockType::Stone).unwrap();

        assert!(world.unload_chunk(ChunkPos::new(0, 0)));
        assert_eq!(world.block_at(&loc), None);

        world.load_chunk(ChunkPos::new(0, 0));
        assert_eq!(world.block_at(&loc), Some(BlockType::Air));
    }

    #[test]
    fn test_recorders() {
        let world = world();
        let loc = world.location(1, 64, 1);

        world.emit_effect(&loc, Effect::MangoEaten).unwrap();
        world.set_fail_effects(true);
        assert!(world.emit_effect(&loc, Effect::MangoEaten).is_err());
        assert_eq!(world.effects().len(), 1);

        world.drop_item(&loc, ItemStack::new(Material::Apple, 1)).unwrap();
        assert_eq!(world.drops().len(), 1);

        world.grow_vanilla_tree(&loc, TreeKind::Jungle).unwrap();
        assert_eq!(world.vanilla_trees(), vec![(loc, TreeKind::Jungle)]);
        assert_eq!(world.blocks_of(BlockType::JungleLog).len(), VANILLA_TREE_HEIGHT as usize);
    }
}
