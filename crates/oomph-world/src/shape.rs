//! Block collision shapes in block-local coordinates.

use oomph_math::{BBox, BlockPos, Vec3};

use crate::block::{Block, BlockKind};

/// Height of fence, wall and fence gate collision boxes.
pub const FENCE_HEIGHT: f32 = 1.5;

/// Collision geometry of a block type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// No collision (air, liquids, plants, climbables).
    Empty,
    /// Unit cube.
    Full,
    /// A single fixed box.
    Cuboid { min: [f32; 3], max: [f32; 3] },
    /// Center post plus an arm toward each connecting neighbour.
    Fence,
    /// Thicker post plus arms, as for fences.
    Wall,
}

impl Shape {
    pub const fn cuboid(min: [f32; 3], max: [f32; 3]) -> Self {
        Self::Cuboid { min, max }
    }

    /// True when the shape is exactly the unit cube.
    pub fn is_full(&self) -> bool {
        matches!(self, Shape::Full)
    }
}

fn local(min: [f32; 3], max: [f32; 3]) -> BBox {
    BBox::new(
        Vec3::new(min[0], min[1], min[2]),
        Vec3::new(max[0], max[1], max[2]),
    )
}

/// Whether a fence or wall of `kind` extends an arm toward `neighbor`.
fn connects_to(kind: BlockKind, neighbor: Block) -> bool {
    match neighbor.kind() {
        BlockKind::Air | BlockKind::Liquid => false,
        BlockKind::FenceGate => true,
        other if other == kind => true,
        _ => neighbor.shape().is_full(),
    }
}

/// Block-local collision boxes of `block` at `pos`.
///
/// `lookup` is only consulted for fences and walls, whose arms depend on the
/// four horizontal neighbours.
pub fn collision_boxes(block: Block, pos: BlockPos, lookup: impl Fn(BlockPos) -> Block) -> Vec<BBox> {
    match block.shape() {
        Shape::Empty => Vec::new(),
        Shape::Full => vec![local([0.0; 3], [1.0; 3])],
        Shape::Cuboid { min, max } => vec![local(min, max)],
        Shape::Fence => connected_boxes(block.kind(), pos, &lookup, 0.375, 0.4375),
        Shape::Wall => connected_boxes(block.kind(), pos, &lookup, 0.25, 0.3125),
    }
}

/// Post of half-width `0.5 - post` and arms of half-width `0.5 - arm`.
fn connected_boxes(
    kind: BlockKind,
    pos: BlockPos,
    lookup: &impl Fn(BlockPos) -> Block,
    post: f32,
    arm: f32,
) -> Vec<BBox> {
    let h = FENCE_HEIGHT;
    let (lo, hi) = (post, 1.0 - post);
    let (alo, ahi) = (arm, 1.0 - arm);

    let mut boxes = vec![local([lo, 0.0, lo], [hi, h, hi])];
    if connects_to(kind, lookup(pos.offset(0, 0, -1))) {
        boxes.push(local([alo, 0.0, 0.0], [ahi, h, 0.5]));
    }
    if connects_to(kind, lookup(pos.offset(0, 0, 1))) {
        boxes.push(local([alo, 0.0, 0.5], [ahi, h, 1.0]));
    }
    if connects_to(kind, lookup(pos.offset(-1, 0, 0))) {
        boxes.push(local([0.0, 0.0, alo], [0.5, h, ahi]));
    }
    if connects_to(kind, lookup(pos.offset(1, 0, 0))) {
        boxes.push(local([0.5, 0.0, alo], [1.0, h, ahi]));
    }
    boxes
}
