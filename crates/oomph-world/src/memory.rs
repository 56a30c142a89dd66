//! In-memory chunked world.

use std::collections::HashMap;

use oomph_math::{BBox, BlockPos, ChunkPos};
use tracing::{debug, trace};

use crate::block::Block;
use crate::block_registry::registry;
use crate::chunk::ChunkColumn;
use crate::shape::collision_boxes;
use crate::world::World;

/// Chunk columns keyed by chunk position.
///
/// Blocks in chunks that are not loaded read as air.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorld {
    chunks: HashMap<ChunkPos, ChunkColumn>,
}

impl MemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Square of loaded chunks `-radius..=radius` with a single layer of
    /// `floor` at `floor_y` and air elsewhere.
    pub fn flat(floor_y: i32, floor: Block, radius: i32) -> Self {
        let mut world = Self::new();
        for cx in -radius..=radius {
            for cz in -radius..=radius {
                let pos = ChunkPos::new(cx, cz);
                world.load_chunk(pos);
                for x in pos.block_x_range() {
                    for z in pos.block_z_range() {
                        world.set_block(BlockPos::new(x, floor_y, z), floor);
                    }
                }
            }
        }
        debug!(floor_y, floor = %floor, radius, "Built flat world");
        world
    }

    /// Load an all-air column at `pos`, replacing any existing one.
    pub fn load_chunk(&mut self, pos: ChunkPos) {
        let air = registry().air().runtime_id();
        self.chunks.insert(pos, ChunkColumn::new_filled(pos, air));
        trace!(chunk = %pos, "Chunk loaded");
    }

    /// Insert a prepared column.
    pub fn insert_chunk(&mut self, column: ChunkColumn) {
        trace!(chunk = %column.pos, "Chunk inserted");
        self.chunks.insert(column.pos, column);
    }

    /// Drop the column at `pos`. Returns whether one was loaded.
    pub fn unload_chunk(&mut self, pos: ChunkPos) -> bool {
        let removed = self.chunks.remove(&pos).is_some();
        if removed {
            trace!(chunk = %pos, "Chunk unloaded");
        }
        removed
    }

    pub fn loaded_chunks(&self) -> usize {
        self.chunks.len()
    }

    /// Set the block at `pos`. Returns false if its chunk is not loaded or
    /// `pos.y` is out of range.
    pub fn set_block(&mut self, pos: BlockPos, block: Block) -> bool {
        let Some(column) = self.chunks.get_mut(&pos.chunk_pos()) else {
            return false;
        };
        column.set_block(
            (pos.x & 15) as usize,
            pos.y,
            (pos.z & 15) as usize,
            block.runtime_id(),
        )
    }

    /// Fill the inclusive box between `a` and `b`. Returns how many blocks
    /// were written.
    pub fn fill(&mut self, a: BlockPos, b: BlockPos, block: Block) -> usize {
        let mut written = 0;
        for y in a.y.min(b.y)..=a.y.max(b.y) {
            for z in a.z.min(b.z)..=a.z.max(b.z) {
                for x in a.x.min(b.x)..=a.x.max(b.x) {
                    if self.set_block(BlockPos::new(x, y, z), block) {
                        written += 1;
                    }
                }
            }
        }
        written
    }
}

impl World for MemoryWorld {
    fn block(&self, pos: BlockPos) -> Block {
        let reg = registry();
        self.chunks
            .get(&pos.chunk_pos())
            .and_then(|column| column.get_block((pos.x & 15) as usize, pos.y, (pos.z & 15) as usize))
            .map(|id| reg.get_or_unknown(id))
            .unwrap_or_else(|| reg.air())
    }

    fn block_collisions(&self, pos: BlockPos) -> Vec<BBox> {
        collision_boxes(self.block(pos), pos, |p| self.block(p))
    }

    fn is_chunk_loaded(&self, cx: i32, cz: i32) -> bool {
        self.chunks.contains_key(&ChunkPos::new(cx, cz))
    }
}
