//! The movement integrator: one simulated tick of walking, jumping, falling
//! and gliding.
//!
//! Velocity is accumulated locally and committed once at the end, so
//! `last_vel` and `last_mov` always describe the previous tick.

use oomph_math::{mc_cos, mc_sin, BBox, BlockPos, Vec3, DEG_TO_RAD};
use oomph_world::{Block, World};
use tracing::trace;

use crate::collision::{self, STEP_HEIGHT};
use crate::config::SimulationOptions;
use crate::effects::effect_id;
use crate::glide;
use crate::jump;
use crate::simulator::SimContext;
use crate::state::MovementState;

/// Air drag applied to horizontal velocity every tick.
const AIR_FRICTION: f32 = 0.91;
/// Ground acceleration constant, 0.6 * 0.91 cubed.
const GROUND_ACCEL: f32 = 0.162_771_36;
const SOUL_SAND_SPEED: f32 = 0.543;
const CLIMB_SPEED: f32 = 0.2;
const COBWEB_SLOWDOWN: Vec3 = Vec3::new(0.25, 0.05, 0.25);
const BERRY_BUSH_SLOWDOWN: Vec3 = Vec3::new(0.8, 0.75, 0.8);
const SNEAK_EDGE_STEP: f32 = 0.05;
const LEVITATION_PER_LEVEL: f32 = 0.05;
const VERTICAL_DRAG: f32 = 0.98;

/// Simulate one tick of movement for a player the world can predict.
pub fn simulate(state: &mut MovementState, ctx: &SimContext<'_>, options: &SimulationOptions) {
    let world = ctx.world;
    let mut vel = state.vel;
    if vel.length_squared() < 1e-12 {
        vel = Vec3::ZERO;
    }

    let mut friction = AIR_FRICTION;
    let move_speed = if state.on_ground {
        let under = block_under(state, world);
        let mut speed = state.movement_speed;
        if under.is_soul_sand() {
            speed *= SOUL_SAND_SPEED;
        }
        friction *= under.friction();
        speed * (GROUND_ACCEL / (friction * friction * friction))
    } else {
        state.air_speed
    };

    if state.gliding {
        if ctx.inventory.has_elytra() && !state.on_ground {
            simulate_glide(state, world, options, vel);
            return;
        }
        state.gliding = false;
    }

    if state.ticks_since_knockback == 0 {
        vel = state.knockback;
    }

    move_relative(state, &mut vel, move_speed);
    jump::try_jump(state, &mut vel, world, options.detect_rejected_jumps);
    climb(state, world, &mut vel);
    let in_cobweb = block_slowdown(state, world, &mut vel);
    if state.sneaking && state.on_ground && vel.y <= 0.0 {
        avoid_edge(state, world, &mut vel);
    }

    let old_vel = vel;
    let old_on_ground = state.on_ground;
    vel = collision::collide(state, world, options, vel);

    let mut under = block_under(state, world);
    if under.is_air() {
        let below = world.block(under_pos(state).below());
        if below.is_fence() || below.is_wall() {
            under = below;
        }
    }

    if state.on_ground
        && !state.sneaking
        && !state.pressing_sneak
        && under.is_slime()
        && vel.y.abs() < 0.1
    {
        let factor = 0.4 + vel.y.abs() * 0.2;
        vel.x *= factor;
        vel.z *= factor;
    }

    state.set_mov(vel);
    if state.on_ground {
        state.fall_distance = 0.0;
    } else if vel.y < 0.0 {
        state.fall_distance -= vel.y;
    }

    if !old_on_ground && state.collide_y {
        vel.y = land_on(state, under, old_vel.y);
    } else if state.collide_y {
        vel.y = 0.0;
    }
    if state.collide_x {
        vel.x = 0.0;
    }
    if state.collide_z {
        vel.z = 0.0;
    }

    if in_cobweb {
        vel = Vec3::ZERO;
    }

    if let Some(level) = ctx.effects.get_effect(effect_id::LEVITATION) {
        vel.y += (LEVITATION_PER_LEVEL * level as f32 - vel.y) * 0.2;
    } else if state.has_gravity {
        vel.y -= state.gravity;
        vel.y *= VERTICAL_DRAG;
    }
    vel.x *= friction;
    vel.z *= friction;

    state.set_vel(vel);
}

fn simulate_glide(
    state: &mut MovementState,
    world: &dyn World,
    options: &SimulationOptions,
    vel: Vec3,
) {
    let vel = glide::glide_velocity(state, vel);
    let moved = collision::collide(state, world, options, vel);
    trace!(%moved, "Glide tick");
    state.set_mov(moved);
    state.set_vel(moved);
}

fn under_pos(state: &MovementState) -> BlockPos {
    BlockPos::from_vec3(&(state.pos - Vec3::new(0.0, 0.5, 0.0)))
}

/// Block the player walks on: the supporting block when known, else the one
/// half a block under the feet.
fn block_under(state: &MovementState, world: &dyn World) -> Block {
    let pos = state.supporting_block_pos.unwrap_or_else(|| under_pos(state));
    world.block(pos)
}

fn move_relative(state: &MovementState, vel: &mut Vec3, speed: f32) {
    let impulse = state.impulse;
    let force = impulse.length_squared();
    if force < 1e-4 {
        return;
    }
    let scale = speed / force.sqrt().max(1.0);
    let strafe = impulse.x * scale;
    let forward = impulse.y * scale;

    let yaw = state.yaw() * DEG_TO_RAD;
    let (sin, cos) = (mc_sin(yaw), mc_cos(yaw));
    vel.x += strafe * cos - forward * sin;
    vel.z += forward * cos + strafe * sin;
}

fn climb(state: &MovementState, world: &dyn World, vel: &mut Vec3) {
    if !world.block(BlockPos::from_vec3(&state.pos)).climbable() {
        return;
    }
    vel.y = vel.y.max(-CLIMB_SPEED);
    if state.pressing_jump || state.collide_x || state.collide_z {
        vel.y = CLIMB_SPEED;
    }
    if state.sneaking && vel.y < 0.0 {
        vel.y = 0.0;
    }
}

/// Cobweb and berry bush slowdown. Returns whether the player is in a web.
fn block_slowdown(state: &MovementState, world: &dyn World, vel: &mut Vec3) -> bool {
    let bb = state.bounding_box();
    let mut web = false;
    let mut bush = false;
    for pos in bb.block_positions() {
        let block = world.block(pos);
        if !(block.is_web() || block.is_sweet_berry_bush()) || !BBox::unit(pos).intersects(&bb) {
            continue;
        }
        web |= block.is_web();
        bush |= block.is_sweet_berry_bush();
    }

    let factor = if web {
        COBWEB_SLOWDOWN
    } else if bush {
        BERRY_BUSH_SLOWDOWN
    } else {
        return false;
    };
    vel.x *= factor.x;
    vel.y *= factor.y;
    vel.z *= factor.z;
    web
}

fn toward_zero(v: f32) -> f32 {
    if v.abs() < SNEAK_EDGE_STEP {
        0.0
    } else {
        v - SNEAK_EDGE_STEP * v.signum()
    }
}

/// Shrink horizontal velocity so a sneaking player does not walk off a ledge.
fn avoid_edge(state: &MovementState, world: &dyn World, vel: &mut Vec3) {
    let bb = state.bounding_box().grow_xyz(Vec3::new(-0.025, 0.0, -0.025));
    let drop = -STEP_HEIGHT * 1.01;
    let supported = |dx: f32, dz: f32| {
        !world
            .nearby_bboxes(&bb.translate(Vec3::new(dx, drop, dz)))
            .is_empty()
    };

    let (mut dx, mut dz) = (vel.x, vel.z);
    while dx != 0.0 && !supported(dx, 0.0) {
        dx = toward_zero(dx);
    }
    while dz != 0.0 && !supported(0.0, dz) {
        dz = toward_zero(dz);
    }
    while dx != 0.0 && dz != 0.0 && !supported(dx, dz) {
        dx = toward_zero(dx);
        dz = toward_zero(dz);
    }
    vel.x = dx;
    vel.z = dz;
}

/// Vertical velocity after landing on `block` with `falling` speed.
fn land_on(state: &MovementState, block: Block, falling: f32) -> f32 {
    if falling >= 0.0 {
        return 0.0;
    }
    if block.is_slime() {
        if state.pressing_sneak {
            return 0.0;
        }
        let bounce = -falling;
        return if bounce < 1e-4 { 0.0 } else { bounce };
    }
    if block.is_bed() {
        if state.pressing_sneak {
            return 0.0;
        }
        return (-falling * 0.66).min(1.0);
    }
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{EffectSet, Equipment, Nothing};
    use crate::test_util::{block, ctx, grounded_state, stone_floor};
    use oomph_math::Vec2;

    fn step(state: &mut MovementState, world: &oomph_world::MemoryWorld) {
        simulate(state, &ctx(world), &SimulationOptions::default());
    }

    #[test]
    fn standing_still_stays_put() {
        let world = stone_floor();
        let mut s = grounded_state(Vec3::new(0.5, 0.0, 0.5));
        for _ in 0..5 {
            step(&mut s, &world);
        }
        assert_eq!(s.pos, Vec3::new(0.5, 0.0, 0.5));
        assert!(s.on_ground);
        assert_eq!(s.mov, Vec3::ZERO);
    }

    #[test]
    fn ground_walk_accelerates_along_yaw() {
        let world = stone_floor();
        let mut s = grounded_state(Vec3::new(0.5, 0.0, 0.5));
        s.impulse = Vec2::new(0.0, 0.98);
        step(&mut s, &world);
        // 0.1 * 0.16277136 / 0.546^3 is 0.1.
        assert!((s.mov.z - 0.098).abs() < 1e-4);
        assert!(s.mov.x.abs() < 1e-6);
        assert!((s.vel.z - 0.098 * 0.546).abs() < 1e-4);
    }

    #[test]
    fn ice_keeps_momentum() {
        let mut world = stone_floor();
        world.fill(BlockPos::new(-2, -1, -2), BlockPos::new(2, -1, 2), block("minecraft:ice"));
        let mut s = grounded_state(Vec3::new(0.5, 0.0, 0.5));
        s.vel = Vec3::new(0.0, 0.0, 0.2);
        step(&mut s, &world);
        assert!((s.vel.z - 0.2 * 0.98 * 0.91).abs() < 1e-4);
    }

    #[test]
    fn soul_sand_slows_acceleration() {
        let mut world = stone_floor();
        world.fill(BlockPos::new(-2, -1, -2), BlockPos::new(2, -1, 2), block("minecraft:soul_sand"));
        let mut s = grounded_state(Vec3::new(0.5, -0.125, 0.5));
        s.impulse = Vec2::new(0.0, 0.98);
        step(&mut s, &world);
        assert!((s.mov.z - 0.098 * 0.543).abs() < 1e-4);
    }

    #[test]
    fn air_uses_air_speed() {
        let world = stone_floor();
        let mut s = grounded_state(Vec3::new(0.5, 5.0, 0.5));
        s.on_ground = false;
        s.impulse = Vec2::new(0.98, 0.0);
        step(&mut s, &world);
        // Yaw 0: strafe +X.
        assert!((s.mov.x - 0.98 * 0.02).abs() < 1e-5);
        assert!((s.vel.y + 0.08 * 0.98).abs() < 1e-5);
    }

    #[test]
    fn knockback_replaces_velocity() {
        let world = stone_floor();
        let mut s = grounded_state(Vec3::new(0.5, 0.0, 0.5));
        s.vel = Vec3::new(1.0, 0.0, 1.0);
        s.apply_knockback(Vec3::new(0.4, 0.36, 0.0));
        step(&mut s, &world);
        assert_eq!(s.mov, Vec3::new(0.4, 0.36, 0.0));
        assert!(!s.on_ground);
    }

    #[test]
    fn ladder_climb_and_hold() {
        let mut world = stone_floor();
        world.set_block(BlockPos::new(0, 0, 0), block("minecraft:ladder"));
        let mut s = grounded_state(Vec3::new(0.5, 0.0, 0.5));
        s.pressing_jump = true;
        step(&mut s, &world);
        assert!((s.mov.y - 0.2).abs() < 1e-6);

        let mut s = grounded_state(Vec3::new(0.5, 0.5, 0.5));
        s.on_ground = false;
        s.vel = Vec3::new(0.0, -1.0, 0.0);
        step(&mut s, &world);
        assert!((s.mov.y + 0.2).abs() < 1e-6);

        let mut s = grounded_state(Vec3::new(0.5, 0.5, 0.5));
        s.on_ground = false;
        s.sneaking = true;
        s.vel = Vec3::new(0.0, -1.0, 0.0);
        step(&mut s, &world);
        assert_eq!(s.mov.y, 0.0);
    }

    #[test]
    fn berry_bush_slows() {
        let mut world = stone_floor();
        world.set_block(BlockPos::new(0, 0, 0), block("minecraft:sweet_berry_bush"));
        let mut s = grounded_state(Vec3::new(0.5, 0.0, 0.5));
        s.vel = Vec3::new(0.2, 0.0, 0.0);
        step(&mut s, &world);
        assert!((s.mov.x - 0.16).abs() < 1e-6);
        assert!(s.vel.x > 0.0);
    }

    #[test]
    fn sneaking_stops_at_ledge() {
        let world = stone_floor();
        // Floor ends at x = 48; the shrunk box starts at 47.825.
        let mut s = grounded_state(Vec3::new(48.1, 0.0, 0.5));
        s.sneaking = true;
        s.vel = Vec3::new(0.3, 0.0, 0.0);
        step(&mut s, &world);
        assert!((s.pos.x - 48.25).abs() < 1e-4);
        assert!(s.on_ground);

        let mut s = grounded_state(Vec3::new(48.1, 0.0, 0.5));
        s.vel = Vec3::new(0.3, 0.0, 0.0);
        step(&mut s, &world);
        assert!((s.pos.x - 48.4).abs() < 1e-4);
    }

    #[test]
    fn landing_on_bed_bounces_less() {
        let mut world = stone_floor();
        world.set_block(BlockPos::new(0, 0, 0), block("minecraft:bed"));
        let mut s = grounded_state(Vec3::new(0.5, 0.6, 0.5));
        s.on_ground = false;
        s.vel = Vec3::new(0.0, -0.5, 0.0);
        step(&mut s, &world);
        assert!(s.on_ground);
        assert!((s.vel.y - (0.33 - 0.08) * 0.98).abs() < 1e-5);
    }

    #[test]
    fn slime_bounce_below_threshold_is_dropped() {
        let mut world = stone_floor();
        world.set_block(BlockPos::new(0, -1, 0), block("minecraft:slime"));

        let mut s = grounded_state(Vec3::new(0.5, 0.00001, 0.5));
        s.on_ground = false;
        s.vel = Vec3::new(0.0, -0.00009, 0.0);
        step(&mut s, &world);
        assert!(s.collide_y && s.on_ground);
        assert!((s.vel.y + 0.08 * 0.98).abs() < 1e-6);

        let mut s = grounded_state(Vec3::new(0.5, 0.2, 0.5));
        s.on_ground = false;
        s.vel = Vec3::new(0.0, -0.5, 0.0);
        step(&mut s, &world);
        assert!((s.vel.y - (0.5 - 0.08) * 0.98).abs() < 1e-5);
    }

    #[test]
    fn rejected_jump_detection_follows_options() {
        let mut world = stone_floor();
        world.fill(BlockPos::new(1, 2, -1), BlockPos::new(2, 2, 1), block("minecraft:stone"));
        let jumper = || {
            let mut s = grounded_state(Vec3::new(0.65, 0.0, 0.5));
            s.jumping = true;
            s.pressing_jump = true;
            s.vel = Vec3::new(0.3, 0.0, 0.0);
            s
        };

        let mut s = jumper();
        step(&mut s, &world);
        assert_eq!(s.pos.y, 0.0);

        let mut s = jumper();
        let options = SimulationOptions {
            detect_rejected_jumps: false,
            ..SimulationOptions::default()
        };
        simulate(&mut s, &ctx(&world), &options);
        assert!((s.pos.y - 0.42).abs() < 1e-5);
    }

    #[test]
    fn sneaking_on_bed_does_not_bounce() {
        let mut world = stone_floor();
        world.set_block(BlockPos::new(0, 0, 0), block("minecraft:bed"));
        let mut s = grounded_state(Vec3::new(0.5, 0.6, 0.5));
        s.on_ground = false;
        s.pressing_sneak = true;
        s.vel = Vec3::new(0.0, -0.5, 0.0);
        step(&mut s, &world);
        assert!(s.on_ground);
        assert!((s.vel.y + 0.08 * 0.98).abs() < 1e-5);
    }

    #[test]
    fn sneaking_on_slime_does_not_bounce() {
        let mut world = stone_floor();
        world.set_block(BlockPos::new(0, -1, 0), block("minecraft:slime"));
        let mut s = grounded_state(Vec3::new(0.5, 0.2, 0.5));
        s.on_ground = false;
        s.pressing_sneak = true;
        s.vel = Vec3::new(0.0, -0.5, 0.0);
        step(&mut s, &world);
        assert!((s.vel.y + 0.08 * 0.98).abs() < 1e-5);
    }

    #[test]
    fn levitation_lifts() {
        let world = stone_floor();
        let mut effects = EffectSet::new();
        effects.add(effect_id::LEVITATION, 0);
        let context = SimContext {
            world: &world,
            effects: &effects,
            inventory: &Nothing,
        };
        let mut s = grounded_state(Vec3::new(0.5, 0.0, 0.5));
        simulate(&mut s, &context, &SimulationOptions::default());
        assert!((s.vel.y - 0.01).abs() < 1e-6);
    }

    #[test]
    fn no_gravity_entity_floats() {
        let world = stone_floor();
        let mut s = grounded_state(Vec3::new(0.5, 5.0, 0.5));
        s.on_ground = false;
        s.set_has_gravity(false);
        step(&mut s, &world);
        assert_eq!(s.vel.y, 0.0);
    }

    #[test]
    fn glide_needs_elytra() {
        let world = stone_floor();
        let mut s = grounded_state(Vec3::new(0.5, 10.0, 0.5));
        s.on_ground = false;
        s.gliding = true;
        s.vel = Vec3::new(0.0, 0.0, 1.0);
        step(&mut s, &world);
        assert!(!s.gliding);

        let elytra = Equipment::with_elytra();
        let context = SimContext {
            world: &world,
            effects: &Nothing,
            inventory: &elytra,
        };
        let mut s = grounded_state(Vec3::new(0.5, 10.0, 0.5));
        s.on_ground = false;
        s.gliding = true;
        s.vel = Vec3::new(0.0, 0.0, 1.0);
        simulate(&mut s, &context, &SimulationOptions::default());
        assert!(s.gliding);
        assert_eq!(s.mov, s.vel);
        assert!(s.vel.z > 0.9);
    }

    #[test]
    fn fall_distance_accumulates_and_resets() {
        let world = stone_floor();
        let mut s = grounded_state(Vec3::new(0.5, 3.0, 0.5));
        s.on_ground = false;
        for _ in 0..3 {
            step(&mut s, &world);
        }
        assert!(s.fall_distance > 0.0);
        for _ in 0..20 {
            step(&mut s, &world);
        }
        assert!(s.on_ground);
        assert_eq!(s.fall_distance, 0.0);
    }
}
