//! Block identities and the attribute oracle the simulator queries.

use std::fmt;

use crate::block_registry::registry;
use crate::shape::Shape;

/// Movement-relevant category of a block.
///
/// Behaviour dispatches on this tag; the canonical name is kept for display
/// and for callers that match on names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Air,
    Solid,
    Slime,
    /// `ice` and `packed_ice`.
    Ice,
    BlueIce,
    SoulSand,
    Bed,
    Web,
    SweetBerryBush,
    Bamboo,
    /// Ladders and the vine family.
    Climbable,
    Fence,
    Wall,
    FenceGate,
    Liquid,
    /// Scaffolding: collides from above but never pushes a player out.
    Scaffolding,
    /// Walk-through decoration (grass, flowers).
    Passable,
}

/// Static properties of a single block type.
#[derive(Debug)]
pub struct BlockInfo {
    /// Namespaced block identifier, e.g. `"minecraft:stone"`.
    pub name: &'static str,
    /// FNV-1a hash of `name`.
    pub runtime_id: u32,
    pub kind: BlockKind,
    pub shape: Shape,
    /// Friction that replaces the per-kind value.
    pub friction: Option<f32>,
    /// Boxes of this block only ever clip; they are never depenetrated.
    pub one_way: bool,
}

/// Default ground friction.
pub const DEFAULT_FRICTION: f32 = 0.6;

/// Handle to a registered block type. Cheap to copy and compare.
#[derive(Clone, Copy)]
pub struct Block(&'static BlockInfo);

impl Block {
    pub(crate) const fn from_info(info: &'static BlockInfo) -> Self {
        Self(info)
    }

    /// Resolve a canonical name. Unknown names map to `minecraft:unknown`, a
    /// solid full cube.
    pub fn named(name: &str) -> Self {
        registry().by_name(name)
    }

    pub fn air() -> Self {
        registry().air()
    }

    pub fn info(&self) -> &'static BlockInfo {
        self.0
    }

    pub fn name(&self) -> &'static str {
        self.0.name
    }

    pub fn runtime_id(&self) -> u32 {
        self.0.runtime_id
    }

    pub fn kind(&self) -> BlockKind {
        self.0.kind
    }

    pub fn shape(&self) -> Shape {
        self.0.shape
    }

    /// Ground friction: the per-block override if any, else by kind.
    pub fn friction(&self) -> f32 {
        if let Some(f) = self.0.friction {
            return f;
        }
        match self.0.kind {
            BlockKind::Slime => 0.8,
            BlockKind::Ice => 0.98,
            BlockKind::BlueIce => 0.99,
            _ => DEFAULT_FRICTION,
        }
    }

    pub fn is_air(&self) -> bool {
        self.0.kind == BlockKind::Air
    }

    pub fn climbable(&self) -> bool {
        self.0.kind == BlockKind::Climbable
    }

    pub fn is_fence(&self) -> bool {
        self.0.kind == BlockKind::Fence
    }

    pub fn is_wall(&self) -> bool {
        self.0.kind == BlockKind::Wall
    }

    pub fn is_fence_gate(&self) -> bool {
        self.0.kind == BlockKind::FenceGate
    }

    pub fn is_liquid(&self) -> bool {
        self.0.kind == BlockKind::Liquid
    }

    pub fn is_one_way(&self) -> bool {
        self.0.one_way
    }

    pub fn is_slime(&self) -> bool {
        self.0.kind == BlockKind::Slime
    }

    pub fn is_bed(&self) -> bool {
        self.0.kind == BlockKind::Bed
    }

    pub fn is_soul_sand(&self) -> bool {
        self.0.kind == BlockKind::SoulSand
    }

    pub fn is_web(&self) -> bool {
        self.0.kind == BlockKind::Web
    }

    pub fn is_sweet_berry_bush(&self) -> bool {
        self.0.kind == BlockKind::SweetBerryBush
    }

    pub fn is_bamboo(&self) -> bool {
        self.0.kind == BlockKind::Bamboo
    }
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.0.runtime_id == other.0.runtime_id
    }
}

impl Eq for Block {}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block({})", self.0.name)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.name)
    }
}
