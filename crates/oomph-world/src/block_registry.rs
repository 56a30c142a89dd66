//! Block registry mapping runtime ids (FNV-1a hashes of names) to block info.
//!
//! The table below is compiled into a process-wide registry the first time it
//! is needed. Unknown blocks resolve to `minecraft:unknown`, a solid cube.

use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::debug;

use crate::block::{Block, BlockInfo, BlockKind};
use crate::block_hash::block_runtime_id;
use crate::shape::Shape;

/// Registry mapping block runtime ids to block info.
pub struct BlockRegistry {
    blocks: HashMap<u32, &'static BlockInfo>,
}

static REGISTRY: OnceLock<BlockRegistry> = OnceLock::new();

/// The shared registry. Built once; later calls return the same instance.
pub fn registry() -> &'static BlockRegistry {
    REGISTRY.get_or_init(|| {
        let registry = BlockRegistry::new();
        debug!(blocks = registry.len(), "Block registry built");
        registry
    })
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockRegistry {
    /// Build the registry by hashing each block name and mapping to its info.
    pub fn new() -> Self {
        let mut blocks = HashMap::with_capacity(BLOCK_DATA.len() + 2);
        blocks.insert(AIR.runtime_id, &AIR);
        blocks.insert(UNKNOWN.runtime_id, &UNKNOWN);
        for info in BLOCK_DATA {
            blocks.insert(info.runtime_id, info);
        }
        Self { blocks }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Look up a block by runtime id.
    pub fn get(&self, runtime_id: u32) -> Option<Block> {
        self.blocks.get(&runtime_id).copied().map(Block::from_info)
    }

    /// Look up a block by runtime id, falling back to the unknown block.
    pub fn get_or_unknown(&self, runtime_id: u32) -> Block {
        self.get(runtime_id).unwrap_or_else(|| Block::from_info(&UNKNOWN))
    }

    /// Look up a block by canonical name, falling back to the unknown block.
    pub fn by_name(&self, name: &str) -> Block {
        self.get_or_unknown(block_runtime_id(name))
    }

    pub fn air(&self) -> Block {
        Block::from_info(&AIR)
    }

    pub fn unknown(&self) -> Block {
        Block::from_info(&UNKNOWN)
    }
}

// Helper macro to reduce boilerplate in the data array.
macro_rules! block {
    ($name:expr, $kind:ident, $shape:expr) => {
        BlockInfo {
            name: $name,
            runtime_id: block_runtime_id($name),
            kind: BlockKind::$kind,
            shape: $shape,
            friction: None,
            one_way: false,
        }
    };
    ($name:expr, $kind:ident, $shape:expr, friction = $friction:expr) => {
        BlockInfo {
            name: $name,
            runtime_id: block_runtime_id($name),
            kind: BlockKind::$kind,
            shape: $shape,
            friction: Some($friction),
            one_way: false,
        }
    };
    ($name:expr, $kind:ident, $shape:expr, one_way) => {
        BlockInfo {
            name: $name,
            runtime_id: block_runtime_id($name),
            kind: BlockKind::$kind,
            shape: $shape,
            friction: None,
            one_way: true,
        }
    };
}

static AIR: BlockInfo = block!("minecraft:air", Air, Shape::Empty);
static UNKNOWN: BlockInfo = block!("minecraft:unknown", Solid, Shape::Full);

const FULL: Shape = Shape::Full;
const EMPTY: Shape = Shape::Empty;
const PX: f32 = 1.0 / 16.0;

/// Static table of every block with movement-relevant behaviour, plus common
/// full cubes.
static BLOCK_DATA: &[BlockInfo] = &[
    // ===== Plain solids =====
    block!("minecraft:stone", Solid, FULL),
    block!("minecraft:cobblestone", Solid, FULL),
    block!("minecraft:dirt", Solid, FULL),
    block!("minecraft:grass_block", Solid, FULL),
    block!("minecraft:sand", Solid, FULL),
    block!("minecraft:gravel", Solid, FULL),
    block!("minecraft:bedrock", Solid, FULL),
    block!("minecraft:barrier", Solid, FULL),
    block!("minecraft:deepslate", Solid, FULL),
    block!("minecraft:oak_planks", Solid, FULL),
    block!("minecraft:oak_log", Solid, FULL),
    block!("minecraft:glass", Solid, FULL),
    block!("minecraft:obsidian", Solid, FULL),
    block!("minecraft:netherrack", Solid, FULL),
    block!("minecraft:end_stone", Solid, FULL),
    block!("minecraft:snow", Solid, FULL),
    block!("minecraft:frosted_ice", Solid, FULL, friction = 0.98),
    // ===== Special ground =====
    block!("minecraft:slime", Slime, FULL),
    block!("minecraft:ice", Ice, FULL),
    block!("minecraft:packed_ice", Ice, FULL),
    block!("minecraft:blue_ice", BlueIce, FULL),
    block!("minecraft:soul_sand", SoulSand, Shape::cuboid([0.0, 0.0, 0.0], [1.0, 14.0 * PX, 1.0])),
    block!("minecraft:bed", Bed, Shape::cuboid([0.0, 0.0, 0.0], [1.0, 9.0 * PX, 1.0])),
    block!("minecraft:farmland", Solid, Shape::cuboid([0.0, 0.0, 0.0], [1.0, 15.0 * PX, 1.0])),
    block!("minecraft:snow_layer", Solid, Shape::cuboid([0.0, 0.0, 0.0], [1.0, 2.0 * PX, 1.0])),
    block!("minecraft:cactus", Solid, Shape::cuboid([PX, 0.0, PX], [15.0 * PX, 1.0, 15.0 * PX])),
    block!("minecraft:chest", Solid, Shape::cuboid([PX, 0.0, PX], [15.0 * PX, 14.0 * PX, 15.0 * PX])),
    block!("minecraft:trapped_chest", Solid, Shape::cuboid([PX, 0.0, PX], [15.0 * PX, 14.0 * PX, 15.0 * PX])),
    block!("minecraft:ender_chest", Solid, Shape::cuboid([PX, 0.0, PX], [15.0 * PX, 14.0 * PX, 15.0 * PX])),
    // ===== Slabs (bottom half) =====
    block!("minecraft:oak_slab", Solid, Shape::cuboid([0.0, 0.0, 0.0], [1.0, 0.5, 1.0])),
    block!("minecraft:stone_block_slab", Solid, Shape::cuboid([0.0, 0.0, 0.0], [1.0, 0.5, 1.0])),
    block!("minecraft:smooth_stone_slab", Solid, Shape::cuboid([0.0, 0.0, 0.0], [1.0, 0.5, 1.0])),
    block!("minecraft:cobblestone_slab", Solid, Shape::cuboid([0.0, 0.0, 0.0], [1.0, 0.5, 1.0])),
    // ===== Slowing =====
    block!("minecraft:web", Web, EMPTY),
    block!("minecraft:sweet_berry_bush", SweetBerryBush, EMPTY),
    // ===== Bamboo =====
    block!("minecraft:bamboo", Bamboo, Shape::cuboid([6.5 * PX, 0.0, 6.5 * PX], [9.5 * PX, 1.0, 9.5 * PX])),
    // ===== Climbable =====
    block!("minecraft:ladder", Climbable, EMPTY),
    block!("minecraft:vine", Climbable, EMPTY),
    block!("minecraft:cave_vines", Climbable, EMPTY),
    block!("minecraft:cave_vines_body_with_berries", Climbable, EMPTY),
    block!("minecraft:cave_vines_head_with_berries", Climbable, EMPTY),
    block!("minecraft:twisting_vines", Climbable, EMPTY),
    block!("minecraft:weeping_vines", Climbable, EMPTY),
    // ===== Fences =====
    block!("minecraft:oak_fence", Fence, Shape::Fence),
    block!("minecraft:spruce_fence", Fence, Shape::Fence),
    block!("minecraft:birch_fence", Fence, Shape::Fence),
    block!("minecraft:jungle_fence", Fence, Shape::Fence),
    block!("minecraft:acacia_fence", Fence, Shape::Fence),
    block!("minecraft:dark_oak_fence", Fence, Shape::Fence),
    block!("minecraft:mangrove_fence", Fence, Shape::Fence),
    block!("minecraft:cherry_fence", Fence, Shape::Fence),
    block!("minecraft:crimson_fence", Fence, Shape::Fence),
    block!("minecraft:warped_fence", Fence, Shape::Fence),
    block!("minecraft:nether_brick_fence", Fence, Shape::Fence),
    // ===== Walls =====
    block!("minecraft:cobblestone_wall", Wall, Shape::Wall),
    block!("minecraft:mossy_cobblestone_wall", Wall, Shape::Wall),
    block!("minecraft:stone_brick_wall", Wall, Shape::Wall),
    block!("minecraft:brick_wall", Wall, Shape::Wall),
    block!("minecraft:andesite_wall", Wall, Shape::Wall),
    block!("minecraft:diorite_wall", Wall, Shape::Wall),
    block!("minecraft:granite_wall", Wall, Shape::Wall),
    block!("minecraft:blackstone_wall", Wall, Shape::Wall),
    block!("minecraft:cobbled_deepslate_wall", Wall, Shape::Wall),
    // ===== Fence gates (closed, facing north/south) =====
    block!("minecraft:fence_gate", FenceGate, Shape::cuboid([0.0, 0.0, 6.0 * PX], [1.0, 1.5, 10.0 * PX])),
    block!("minecraft:spruce_fence_gate", FenceGate, Shape::cuboid([0.0, 0.0, 6.0 * PX], [1.0, 1.5, 10.0 * PX])),
    block!("minecraft:birch_fence_gate", FenceGate, Shape::cuboid([0.0, 0.0, 6.0 * PX], [1.0, 1.5, 10.0 * PX])),
    block!("minecraft:dark_oak_fence_gate", FenceGate, Shape::cuboid([0.0, 0.0, 6.0 * PX], [1.0, 1.5, 10.0 * PX])),
    // ===== Liquids =====
    block!("minecraft:water", Liquid, EMPTY),
    block!("minecraft:flowing_water", Liquid, EMPTY),
    block!("minecraft:lava", Liquid, EMPTY),
    block!("minecraft:flowing_lava", Liquid, EMPTY),
    // ===== One-way =====
    block!("minecraft:scaffolding", Scaffolding, Shape::cuboid([0.0, 14.0 * PX, 0.0], [1.0, 1.0, 1.0]), one_way),
    // ===== Passable decoration =====
    block!("minecraft:short_grass", Passable, EMPTY),
    block!("minecraft:tall_grass", Passable, EMPTY),
    block!("minecraft:dandelion", Passable, EMPTY),
    block!("minecraft:poppy", Passable, EMPTY),
    block!("minecraft:torch", Passable, EMPTY),
];
