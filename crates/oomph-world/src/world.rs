//! The world view the simulator reads from.

use oomph_math::{BBox, BlockPos};

use crate::block::Block;

/// A block collision box found near a query box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyBlock {
    pub pos: BlockPos,
    pub block: Block,
    /// World-space collision box.
    pub bbox: BBox,
}

/// Read-only block access.
///
/// Implementations must be cheap non-blocking reads; the simulator calls
/// these many times per tick.
pub trait World {
    /// The block at `pos`. Unloaded or out-of-range positions read as air.
    fn block(&self, pos: BlockPos) -> Block;

    /// Collision boxes of the block at `pos`, in block-local coordinates.
    fn block_collisions(&self, pos: BlockPos) -> Vec<BBox>;

    fn is_chunk_loaded(&self, cx: i32, cz: i32) -> bool;

    /// World-space collision boxes intersecting `aabb`.
    fn nearby_bboxes(&self, aabb: &BBox) -> Vec<BBox> {
        self.nearby_blocks(aabb).into_iter().map(|b| b.bbox).collect()
    }

    /// Every collision box intersecting `aabb`, tagged with its block.
    ///
    /// Ordered by Y, then Z, then X, and by box order within a block. The
    /// scan starts one cell below `aabb` since fences and walls reach above
    /// their own cell.
    fn nearby_blocks(&self, aabb: &BBox) -> Vec<NearbyBlock> {
        let min_x = aabb.min.x.floor() as i32;
        let max_x = aabb.max.x.floor() as i32;
        let min_y = aabb.min.y.floor() as i32 - 1;
        let max_y = aabb.max.y.floor() as i32;
        let min_z = aabb.min.z.floor() as i32;
        let max_z = aabb.max.z.floor() as i32;

        let mut found = Vec::new();
        for y in min_y..=max_y {
            for z in min_z..=max_z {
                for x in min_x..=max_x {
                    let pos = BlockPos::new(x, y, z);
                    let boxes = self.block_collisions(pos);
                    if boxes.is_empty() {
                        continue;
                    }
                    let block = self.block(pos);
                    let origin = pos.to_vec3();
                    for local in boxes {
                        let bbox = local.translate(origin);
                        if bbox.intersects(aabb) {
                            found.push(NearbyBlock { pos, block, bbox });
                        }
                    }
                }
            }
        }
        found
    }
}
