//! Folding one tick of client input into the movement state.

use oomph_math::{Vec2, Vec3};
use tracing::trace;

use crate::config::{SimulationOptions, SprintTiming};
use crate::effects::{effect_id, Effects};
use crate::input::InputState;
use crate::state::{
    MovementState, DEFAULT_AIR_SPEED, DEFAULT_GRAVITY, DEFAULT_JUMP_HEIGHT, SLOW_FALLING_GRAVITY,
    SPRINT_AIR_SPEED, SPRINT_SPEED_MULTIPLIER,
};

/// Move vector scale while eating or drinking.
const CONSUMABLE_IMPULSE: f32 = 0.1225;
/// Move vector scale while sneaking.
const SNEAK_IMPULSE: f32 = 0.3;
/// Applied to the clamped move vector.
const IMPULSE_DAMPING: f32 = 0.98;
/// Jump height added per level of Jump Boost.
const JUMP_BOOST_PER_LEVEL: f32 = 0.1;

/// Apply `input` to `state` ahead of simulation.
pub fn apply_input(
    state: &mut MovementState,
    input: &InputState,
    effects: &dyn Effects,
    options: &SimulationOptions,
) {
    update_client_mirror(state, input);

    if input.start_flying {
        state.client.toggled_fly = true;
        if state.trust_fly_status {
            state.flying = true;
        }
    }
    if input.stop_flying {
        state.just_disabled_flight = true;
        state.flying = false;
        state.client.toggled_fly = false;
    }

    state.set_rotation(Vec3::new(input.pitch, input.head_yaw, input.yaw));

    state.pressing_sneak = input.sneaking;
    state.pressing_sprint = input.sprint_down;

    update_sprint(state, input, options);

    state.sneaking = if input.stop_sneaking {
        false
    } else if input.start_sneaking {
        true
    } else {
        input.sneak_down
    };

    state.impulse = clamp_impulse(input.move_vector, input.using_consumable, state.sneaking);

    state.jumping = input.start_jumping;
    state.pressing_jump = input.jumping;
    state.jump_height = DEFAULT_JUMP_HEIGHT;
    if let Some(level) = effects.get_effect(effect_id::JUMP_BOOST) {
        state.jump_height += JUMP_BOOST_PER_LEVEL * level as f32;
    }
    if !state.pressing_jump {
        state.jump_delay = 0;
    }

    state.gravity = DEFAULT_GRAVITY;
    if effects.get_effect(effect_id::SLOW_FALLING).is_some() && state.vel.y <= 0.0 {
        state.gravity = SLOW_FALLING_GRAVITY;
    }

    if input.stop_gliding {
        state.gliding = false;
        state.glide_boost_ticks = 0;
    }
    if input.start_gliding {
        state.gliding = true;
    }
}

fn update_client_mirror(state: &mut MovementState, input: &InputState) {
    let client = &mut state.client;
    client.last_pos = client.pos;
    client.pos = input.position;
    client.last_vel = client.vel;
    client.vel = input.velocity;
    client.last_mov = client.mov;
    client.mov = client.pos - client.last_pos;
    client.horizontal_collision = input.horizontal_collision;
    client.vertical_collision = input.vertical_collision;
}

fn update_sprint(state: &mut MovementState, input: &InputState, options: &SimulationOptions) {
    let was_sprinting = state.sprinting;
    if input.stop_sprinting {
        // Both edges in one tick resolve to a stop.
        state.sprinting = false;
    } else if input.start_sprinting {
        state.sprinting = true;
    } else if state.server_sprint != state.sprinting && !state.server_sprint_applied {
        state.sprinting = state.server_sprint;
    }
    state.server_sprint_applied = true;

    state.needs_speed_adjusted = state.sprinting != was_sprinting;
    state.air_speed = if state.sprinting {
        SPRINT_AIR_SPEED
    } else {
        DEFAULT_AIR_SPEED
    };

    if state.needs_speed_adjusted {
        trace!(sprinting = state.sprinting, "Sprint transition");
        if options.sprint_timing == SprintTiming::Modern {
            adjust_speed_for_sprint(state);
        }
    }
}

/// Recompute movement speed after a sprint transition, unless the server
/// already dictated this tick's speed.
pub fn adjust_speed_for_sprint(state: &mut MovementState) {
    if state.server_updated_speed {
        return;
    }
    state.movement_speed = state.default_movement_speed;
    if state.sprinting {
        state.movement_speed *= SPRINT_SPEED_MULTIPLIER;
    }
}

fn clamp_impulse(move_vector: Vec2, using_consumable: bool, sneaking: bool) -> Vec2 {
    let mut max = 1.0;
    if using_consumable {
        max *= CONSUMABLE_IMPULSE;
    }
    if sneaking {
        max *= SNEAK_IMPULSE;
    }
    Vec2::new(
        move_vector.x.clamp(-max, max),
        move_vector.y.clamp(-max, max),
    ) * IMPULSE_DAMPING
}
