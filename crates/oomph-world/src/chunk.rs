//! Chunk and sub-chunk block storage.

use oomph_math::ChunkPos;

/// Sub-chunks per column: Y range [-64, 319] = 384 blocks / 16 = 24.
pub const SUB_CHUNK_COUNT: usize = 24;

/// Minimum Y coordinate in the Overworld.
pub const MIN_Y: i32 = -64;

/// One past the maximum Y coordinate in the Overworld.
pub const MAX_Y: i32 = MIN_Y + SUB_CHUNK_COUNT as i32 * 16;

/// A 16x16x16 sub-chunk with a single palette of block runtime ids.
#[derive(Debug, Clone)]
pub struct SubChunk {
    /// Palette indices for each block, stored in XZY order: `(x*16 + z)*16 + y`.
    blocks: Box<[u16; 4096]>,
    /// Palette of block runtime ids.
    palette: Vec<u32>,
}

impl SubChunk {
    /// Create a sub-chunk filled entirely with a single block.
    pub fn new_single(runtime_id: u32) -> Self {
        Self {
            blocks: Box::new([0; 4096]),
            palette: vec![runtime_id],
        }
    }

    fn index(x: usize, y: usize, z: usize) -> usize {
        debug_assert!(x < 16 && y < 16 && z < 16);
        (x * 16 + z) * 16 + y
    }

    /// Set a block at local coordinates. Each coordinate must be in `[0, 15]`.
    pub fn set_block(&mut self, x: usize, y: usize, z: usize, runtime_id: u32) {
        let palette_index = match self.palette.iter().position(|&id| id == runtime_id) {
            Some(idx) => idx,
            None => {
                self.palette.push(runtime_id);
                self.palette.len() - 1
            }
        };
        self.blocks[Self::index(x, y, z)] = palette_index as u16;
    }

    /// Runtime id of the block at local coordinates.
    pub fn get_block(&self, x: usize, y: usize, z: usize) -> u32 {
        self.palette[self.blocks[Self::index(x, y, z)] as usize]
    }

    pub fn palette_len(&self) -> usize {
        self.palette.len()
    }

    /// True when every entry still points at the first palette entry.
    pub fn is_uniform(&self) -> bool {
        self.palette.len() == 1
    }
}

/// A full chunk column (16x384x16).
#[derive(Debug, Clone)]
pub struct ChunkColumn {
    pub pos: ChunkPos,
    sub_chunks: Vec<SubChunk>,
}

impl ChunkColumn {
    /// Column filled with a single block.
    pub fn new_filled(pos: ChunkPos, runtime_id: u32) -> Self {
        Self {
            pos,
            sub_chunks: (0..SUB_CHUNK_COUNT)
                .map(|_| SubChunk::new_single(runtime_id))
                .collect(),
        }
    }

    /// Split a world Y into (sub-chunk index, local y). `None` out of range.
    fn locate(y: i32) -> Option<(usize, usize)> {
        if !(MIN_Y..MAX_Y).contains(&y) {
            return None;
        }
        let rel = (y - MIN_Y) as usize;
        Some((rel / 16, rel % 16))
    }

    /// Runtime id at column-local `x`, `z` and world `y`. `None` when `y` is
    /// outside the column.
    pub fn get_block(&self, x: usize, y: i32, z: usize) -> Option<u32> {
        let (sub, ly) = Self::locate(y)?;
        Some(self.sub_chunks[sub].get_block(x, ly, z))
    }

    /// Set the runtime id at column-local `x`, `z` and world `y`. Returns
    /// false when `y` is outside the column.
    pub fn set_block(&mut self, x: usize, y: i32, z: usize, runtime_id: u32) -> bool {
        match Self::locate(y) {
            Some((sub, ly)) => {
                self.sub_chunks[sub].set_block(x, ly, z, runtime_id);
                true
            }
            None => false,
        }
    }

    pub fn sub_chunk(&self, index: usize) -> Option<&SubChunk> {
        self.sub_chunks.get(index)
    }
}
