//! Jumping, including detection of jumps the client itself would not take.

use oomph_math::{bb_clip_collide, mc_cos, mc_sin, Axis, BBox, Vec3, DEG_TO_RAD};
use oomph_world::{NearbyBlock, World};
use tracing::trace;

use crate::state::MovementState;

/// Ticks before another jump is allowed while jump stays held.
pub const JUMP_DELAY: u64 = 10;
/// Horizontal boost of a sprint jump.
const SPRINT_JUMP_BOOST: f32 = 0.2;
const EPSILON: f32 = 1e-5;

/// Jump if the player asked to and can. When `detect_rejection` is set, also
/// flags jumps the client's own collision order would have blocked.
pub fn try_jump(state: &mut MovementState, vel: &mut Vec3, world: &dyn World, detect_rejection: bool) {
    if !(state.jumping && state.on_ground && state.jump_delay == 0) {
        return;
    }

    vel.y = vel.y.max(state.jump_height);
    state.jump_delay = JUMP_DELAY;
    if state.sprinting {
        let yaw = state.yaw() * DEG_TO_RAD;
        vel.x -= mc_sin(yaw) * SPRINT_JUMP_BOOST;
        vel.z += mc_cos(yaw) * SPRINT_JUMP_BOOST;
    }

    if detect_rejection && client_rejects_jump(state.bounding_box(), *vel, world) {
        trace!("Client would not have jumped here");
        state.client_jump_prevented = true;
    }
}

fn clip_axis(boxes: &[NearbyBlock], bb: BBox, axis: Axis, v: f32) -> (f32, BBox) {
    let mut axis_vel = Vec3::on_axis(axis, v);
    for nb in boxes.iter().rev() {
        axis_vel = bb_clip_collide(&nb.bbox, &bb, axis_vel, true, None);
    }
    (axis_vel[axis], bb.translate(axis_vel))
}

fn blocked(wanted: f32, got: f32) -> bool {
    (wanted - got).abs() >= EPSILON
}

/// Replays the jump as Y,X,Z and as X,Z,Y. The client rejects the jump when
/// the first order is blocked only horizontally and the second only
/// vertically.
fn client_rejects_jump(bb: BBox, vel: Vec3, world: &dyn World) -> bool {
    let boxes = world.nearby_blocks(&bb.extend(vel));
    if boxes.is_empty() {
        return false;
    }

    let (y1, b) = clip_axis(&boxes, bb, Axis::Y, vel.y);
    let (x1, b) = clip_axis(&boxes, b, Axis::X, vel.x);
    let (z1, _) = clip_axis(&boxes, b, Axis::Z, vel.z);
    let first = (blocked(vel.x, x1) || blocked(vel.z, z1)) && !blocked(vel.y, y1);

    let (x2, b) = clip_axis(&boxes, bb, Axis::X, vel.x);
    let (z2, b) = clip_axis(&boxes, b, Axis::Z, vel.z);
    let (y2, _) = clip_axis(&boxes, b, Axis::Y, vel.y);
    let second = blocked(vel.y, y2) && !blocked(vel.x, x2) && !blocked(vel.z, z2);

    first && second
}
