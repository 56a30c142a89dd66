//! Swept collision against world blocks, with auto-step.
//!
//! Motion is resolved one axis at a time in the order Y, X, Z. Each axis is
//! clipped against every nearby block box, in reverse query order, before the
//! box is moved and the next axis begins.

use oomph_math::{bb_clip_collide, Axis, BBox, BlockPos, Vec2, Vec3};
use oomph_world::{NearbyBlock, World};
use tracing::trace;

use crate::config::SimulationOptions;
use crate::state::MovementState;

/// Highest ledge a grounded player walks up without jumping.
pub const STEP_HEIGHT: f32 = 0.6;
/// Velocity change per axis that counts as a collision.
const COLLISION_EPSILON: f32 = 1e-5;
/// Squared penetration that counts as being inside a block.
const PENETRATION_EPSILON: f32 = 1e-11;
/// Depth of the probe under the feet used to find the supporting block.
const SUPPORT_PROBE: f32 = 1e-3;
/// Per-tick decay of the legacy slide offset.
const SLIDE_DECAY: f32 = 0.4;

const SWEEP_ORDER: [Axis; 3] = [Axis::Y, Axis::X, Axis::Z];

/// Sweep `bb` by `vel` through `boxes`. Returns the achieved velocity and the
/// moved box.
fn sweep(
    boxes: &[NearbyBlock],
    mut bb: BBox,
    vel: Vec3,
    stuck: bool,
    mut penetration: Option<&mut Vec3>,
) -> (Vec3, BBox) {
    let mut total = Vec3::ZERO;
    for axis in SWEEP_ORDER {
        let mut axis_vel = Vec3::on_axis(axis, vel[axis]);
        for nb in boxes.iter().rev() {
            let one_way = nb.block.is_one_way() || !stuck;
            axis_vel = bb_clip_collide(&nb.bbox, &bb, axis_vel, one_way, penetration.as_deref_mut());
        }
        bb = bb.translate(axis_vel);
        total += axis_vel;
    }
    (total, bb)
}

fn collided(wanted: f32, got: f32) -> bool {
    (wanted - got).abs() >= COLLISION_EPSILON
}

/// Move the player by `vel` through the world, committing the new position
/// and collision flags. Returns the velocity that was actually achieved.
pub fn collide(
    state: &mut MovementState,
    world: &dyn World,
    options: &SimulationOptions,
    vel: Vec3,
) -> Vec3 {
    let slide_y = if options.use_slide_offset {
        state.slide_offset.y
    } else {
        0.0
    };
    let start_bb = state
        .bounding_box()
        .translate(Vec3::new(0.0, slide_y, 0.0));
    if options.use_slide_offset {
        state.slide_offset = state.slide_offset * SLIDE_DECAY;
    }

    let jump_prevented = state.client_jump_prevented;
    state.client_jump_prevented = false;

    let stuck = state.stuck_in_collider;
    let swept_vel = Vec3::new(vel.x, if jump_prevented { 0.0 } else { vel.y }, vel.z);
    let boxes = world.nearby_blocks(&start_bb.extend(swept_vel));

    let mut penetration = Vec3::ZERO;
    let (mut result, mut bb) = sweep(&boxes, start_bb, swept_vel, stuck, Some(&mut penetration));

    let has_pen = penetration.length_squared() >= PENETRATION_EPSILON;
    state.stuck_in_collider = state.penetrated_last_frame && has_pen;
    state.penetrated_last_frame = has_pen;

    state.collide_x = collided(vel.x, result.x);
    state.collide_y = collided(vel.y, result.y) || jump_prevented;
    state.collide_z = collided(vel.z, result.z);
    let was_on_ground = state.on_ground;
    state.on_ground = (state.collide_y && vel.y < 0.0)
        || (was_on_ground && !state.collide_y && vel.y.abs() <= COLLISION_EPSILON);

    let mut stepped = false;
    if state.on_ground && (state.collide_x || state.collide_z) {
        if let Some((step_vel, step_bb)) = try_step(world, start_bb, vel, stuck) {
            let step_pos = step_bb.bottom_center();
            let flat_pos = bb.bottom_center();
            let client = state.client.pos;
            let flat_off = flat_pos.distance(&client);
            if step_vel.horizontal_distance_squared() > result.horizontal_distance_squared()
                && (flat_off > options.position_correction_threshold
                    || step_pos.distance(&client) < flat_off)
            {
                trace!(rise = step_vel.y, "Auto-step");
                result = step_vel;
                bb = step_bb;
                state.collide_x = collided(vel.x, result.x);
                state.collide_z = collided(vel.z, result.z);
                stepped = true;
            }
        }
    }

    if options.use_slide_offset {
        if stepped {
            state.slide_offset.y += result.y;
        } else {
            state.slide_offset = Vec2::ZERO;
        }
    }

    let commit_slide = if options.use_slide_offset {
        state.slide_offset.y
    } else {
        0.0
    };
    state.set_pos(bb.bottom_center() - Vec3::new(0.0, commit_slide, 0.0));

    state.supporting_block_pos = if state.on_ground {
        find_supporting_block(world, &bb, result)
    } else {
        None
    };

    result
}

/// Retry the move lifted by [`STEP_HEIGHT`], then settle back down. Returns
/// the stepped velocity and box if the stepped box is free of blocks.
fn try_step(world: &dyn World, start_bb: BBox, vel: Vec3, stuck: bool) -> Option<(Vec3, BBox)> {
    let up = Vec3::new(vel.x, STEP_HEIGHT, vel.z);
    let boxes = world.nearby_blocks(&start_bb.extend(up));
    let (mut step_vel, mut step_bb) = sweep(&boxes, start_bb, up, stuck, None);

    let mut down = Vec3::new(0.0, -step_vel.y, 0.0);
    for nb in boxes.iter().rev() {
        down = bb_clip_collide(&nb.bbox, &step_bb, down, true, None);
    }
    step_bb = step_bb.translate(down);
    step_vel.y += down.y;

    if world.nearby_bboxes(&step_bb).is_empty() {
        Some((step_vel, step_bb))
    } else {
        None
    }
}

/// The block under `bb` whose center is closest to the entity's center.
fn find_supporting_block(world: &dyn World, bb: &BBox, vel: Vec3) -> Option<BlockPos> {
    let probe = bb.below(SUPPORT_PROBE);
    let mut candidates = world.nearby_blocks(&probe);
    if candidates.is_empty() {
        candidates = world.nearby_blocks(&probe.translate(Vec3::new(-vel.x, 0.0, -vel.z)));
    }

    let center = bb.center();
    let mut best: Option<(f32, BlockPos)> = None;
    for nb in candidates {
        let d = nb.pos.center().distance(&center);
        match best {
            Some((best_d, _)) if d >= best_d => {}
            _ => best = Some((d, nb.pos)),
        }
    }
    best.map(|(_, pos)| pos)
}
