//! Fixtures shared by the simulator tests.

use oomph_math::{Vec2, Vec3};
use oomph_world::{Block, MemoryWorld};

use crate::effects::Nothing;
use crate::input::InputState;
use crate::simulator::SimContext;
use crate::state::MovementState;

pub fn block(name: &str) -> Block {
    Block::named(name)
}

/// Stone at y = -1 over chunks -2..=2, air above.
pub fn stone_floor() -> MemoryWorld {
    MemoryWorld::flat(-1, block("minecraft:stone"), 2)
}

/// Loaded chunks with no blocks at all.
pub fn void_world() -> MemoryWorld {
    MemoryWorld::flat(-1, Block::air(), 2)
}

/// Ready survival player standing at `pos`, with the client agreeing.
pub fn grounded_state(pos: Vec3) -> MovementState {
    let mut s = MovementState::new();
    s.ready = true;
    s.on_ground = true;
    s.pos = pos;
    s.last_pos = pos;
    s.client.pos = pos;
    s.client.last_pos = pos;
    s
}

pub fn ctx(world: &MemoryWorld) -> SimContext<'_> {
    SimContext {
        world,
        effects: &Nothing,
        inventory: &Nothing,
    }
}

/// Input at `tick` with the client claiming `pos`.
pub fn input_at(tick: u64, pos: Vec3) -> InputState {
    InputState {
        tick,
        position: pos,
        ..InputState::default()
    }
}

/// Forward walk input.
pub fn walk_forward(tick: u64, pos: Vec3) -> InputState {
    InputState {
        move_vector: Vec2::new(0.0, 1.0),
        ..input_at(tick, pos)
    }
}
