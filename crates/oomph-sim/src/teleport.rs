//! Server teleports, instant and smoothed.

use oomph_math::Vec3;
use oomph_world::World;
use tracing::trace;

use crate::jump;
use crate::state::MovementState;

/// Move straight to the pending teleport target.
pub fn apply_instant(state: &mut MovementState, world: &dyn World) {
    let target = state.teleport_pos;
    trace!(%target, "Instant teleport");
    state.set_pos(target);
    state.jump_delay = 0;

    let mut vel = Vec3::ZERO;
    jump::try_jump(state, &mut vel, world, false);
    state.set_vel(vel);
    state.set_mov(vel);
}

/// Step toward a smoothed teleport target. Returns whether the teleport is
/// still in progress after this step.
pub fn apply_smoothed(state: &mut MovementState) -> bool {
    let remaining =
        state.teleport_completion_ticks as i64 - state.ticks_since_teleport as i64 + 1;
    if remaining > 0 {
        let step = (state.teleport_pos - state.pos) / remaining as f32;
        state.set_pos(state.pos + step);
        state.set_vel(Vec3::ZERO);
        state.set_mov(step);
    }
    remaining > 1
}
