//! Block coordinates and world locations

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a loaded world (dimension) on the host server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorldId(pub uuid::Uuid);

impl WorldId {
    /// Create a fresh random world id
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Create a world id from a fixed value
    pub const fn from_u128(value: u128) -> Self {
        Self(uuid::Uuid::from_u128(value))
    }
}

impl Default for WorldId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Block position (integer coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Position shifted by the given offset
    pub fn offset(self, offset: BlockOffset) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.z + offset.z)
    }

    pub fn above(self) -> Self {
        self.offset(BlockOffset::UP)
    }

    pub fn below(self) -> Self {
        self.offset(BlockOffset::DOWN)
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Relative offset between two block positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockOffset {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockOffset {
    pub const UP: Self = Self::new(0, 1, 0);
    pub const DOWN: Self = Self::new(0, -1, 0);

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Chunk coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    pub fn from_block_pos(block_pos: BlockPos) -> Self {
        Self::new(block_pos.x >> 4, block_pos.z >> 4)
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.z)
    }
}

/// A block position inside a specific world.
///
/// Equality and hashing are by value, so a `Location` can key maps of
/// per-block state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub world: WorldId,
    pub pos: BlockPos,
}

impl Location {
    pub const fn new(world: WorldId, pos: BlockPos) -> Self {
        Self { world, pos }
    }

    pub fn at(world: WorldId, x: i32, y: i32, z: i32) -> Self {
        Self::new(world, BlockPos::new(x, y, z))
    }

    pub fn offset(self, offset: BlockOffset) -> Self {
        Self::new(self.world, self.pos.offset(offset))
    }

    pub fn above(self) -> Self {
        Self::new(self.world, self.pos.above())
    }

    pub fn chunk(&self) -> ChunkPos {
        ChunkPos::from_block_pos(self.pos)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.pos, self.world)
    }
}
