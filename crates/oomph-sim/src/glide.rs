//! Elytra flight.

use std::f32::consts::PI;

use oomph_math::{mc_cos, mc_sin, Vec3, DEG_TO_RAD};

use crate::state::MovementState;

/// One tick of elytra velocity, from the current look direction.
pub fn glide_velocity(state: &MovementState, mut vel: Vec3) -> Vec3 {
    let pitch = state.pitch() * DEG_TO_RAD;
    let yaw = state.yaw() * DEG_TO_RAD;

    let yaw_cos = mc_cos(-yaw - PI);
    let yaw_sin = mc_sin(-yaw - PI);
    let pitch_cos = mc_cos(pitch);
    let pitch_sin = mc_sin(pitch);
    let look = Vec3::new(yaw_sin * -pitch_cos, -pitch_sin, yaw_cos * -pitch_cos);

    let look_horizontal = pitch_cos;
    let horizontal_speed = (vel.x * vel.x + vel.z * vel.z).sqrt();
    let pitch_cos_sq = pitch_cos * pitch_cos;

    vel.y += -0.08 + pitch_cos_sq * 0.06;

    if vel.y < 0.0 && look_horizontal > 0.0 {
        let lift = vel.y * -0.1 * pitch_cos_sq;
        vel.y += lift;
        vel.x += look.x * lift / look_horizontal;
        vel.z += look.z * lift / look_horizontal;
    }

    if pitch < 0.0 && look_horizontal > 0.0 {
        let climb = horizontal_speed * -pitch_sin * 0.04;
        vel.y += climb * 3.2;
        vel.x -= look.x * climb / look_horizontal;
        vel.z -= look.z * climb / look_horizontal;
    }

    if look_horizontal > 0.0 {
        vel.x += (look.x / look_horizontal * horizontal_speed - vel.x) * 0.1;
        vel.z += (look.z / look_horizontal * horizontal_speed - vel.z) * 0.1;
    }

    if state.glide_boost_ticks > 0 {
        vel.x += look.x * 0.1 + (look.x * 1.5 - vel.x) * 0.5;
        vel.y += look.y * 0.1 + (look.y * 1.5 - vel.y) * 0.5;
        vel.z += look.z * 0.1 + (look.z * 1.5 - vel.z) * 0.5;
    }

    Vec3::new(vel.x * 0.99, vel.y * 0.98, vel.z * 0.99)
}
