//! World access for the movement simulator: block identities and their
//! movement attributes, collision shapes, and an in-memory chunked world.

pub mod block;
pub mod block_hash;
pub mod block_registry;
pub mod chunk;
pub mod memory;
pub mod shape;
pub mod world;

pub use block::{Block, BlockInfo, BlockKind};
pub use block_registry::{registry, BlockRegistry};
pub use memory::MemoryWorld;
pub use shape::Shape;
pub use world::{NearbyBlock, World};
