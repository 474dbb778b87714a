//! World model shared between the host server and plugins.
//!
//! Contains block coordinates, block types, item stacks, the [`World`]
//! interface plugins use to read and mutate the host world, and an
//! in-memory implementation of it.

pub mod block;
pub mod item;
pub mod memory;
pub mod pos;
pub mod world;

pub use block::{BlockType, Effect, TreeKind};
pub use item::{ItemStack, Material, NamespacedKey, MAX_STACK_SIZE};
pub use memory::MemoryWorld;
pub use pos::{BlockOffset, BlockPos, ChunkPos, Location, WorldId};
pub use world::{World, WorldError};
