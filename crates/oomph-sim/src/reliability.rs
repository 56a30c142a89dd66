//! Whether a tick can be simulated, and the fallback when it cannot.

use oomph_math::BBox;
use oomph_world::World;
use tracing::debug;

use crate::config::SimulationOptions;
use crate::state::{game_mode, MovementState};

/// Whether the simulator can be trusted to predict this tick.
pub fn is_reliable(state: &MovementState, world: &dyn World) -> bool {
    if state.remaining_teleport_ticks() > 0 {
        return true;
    }

    let bb = state.bounding_box();
    for pos in bb.grow(1.0).block_positions() {
        if world.block(pos).is_bamboo() {
            return false;
        }
    }
    for pos in bb.block_positions() {
        if world.block(pos).is_liquid() && BBox::unit(pos).intersects(&bb) {
            return false;
        }
    }

    matches!(state.game_mode, game_mode::SURVIVAL | game_mode::ADVENTURE)
        && !state.flying
        && !state.just_disabled_flight
        && !state.no_clip
        && state.alive
}

/// Adopt the client's claim wholesale.
pub fn reset_to_client(state: &mut MovementState, options: &SimulationOptions) {
    let mut vel = state.client.vel;
    let mut mov = state.client.mov;
    if options.limit_all_velocity {
        let limit = options.limit_all_velocity_threshold;
        vel = vel.clamp_components(limit);
        mov = mov.clamp_components(limit);
    }
    debug!(pos = %state.client.pos, %vel, "Unreliable tick, using client values");

    state.set_pos(state.client.pos);
    state.set_vel(vel);
    state.set_mov(mov);

    state.collide_x = state.client.horizontal_collision;
    state.collide_z = state.client.horizontal_collision;
    state.collide_y = state.client.vertical_collision;
    state.on_ground = state.client.vertical_collision && state.client.mov.y <= 0.0;
    state.supporting_block_pos = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{block, grounded_state, stone_floor};
    use oomph_math::{BlockPos, Vec3};

    fn standing() -> MovementState {
        grounded_state(Vec3::new(0.5, 0.0, 0.5))
    }

    #[test]
    fn plain_survival_is_reliable() {
        assert!(is_reliable(&standing(), &stone_floor()));
    }

    #[test]
    fn bamboo_nearby_is_unreliable() {
        let mut world = stone_floor();
        world.set_block(BlockPos::new(1, 0, 0), block("minecraft:bamboo"));
        assert!(!is_reliable(&standing(), &world));

        let mut far = stone_floor();
        far.set_block(BlockPos::new(3, 0, 0), block("minecraft:bamboo"));
        assert!(is_reliable(&standing(), &far));
    }

    #[test]
    fn standing_in_water_is_unreliable() {
        let mut world = stone_floor();
        world.set_block(BlockPos::new(0, 0, 0), block("minecraft:water"));
        assert!(!is_reliable(&standing(), &world));
    }

    #[test]
    fn flags_that_disable_simulation() {
        let world = stone_floor();
        let cases: [fn(&mut MovementState); 5] = [
            |s| s.flying = true,
            |s| s.just_disabled_flight = true,
            |s| s.no_clip = true,
            |s| s.alive = false,
            |s| s.game_mode = game_mode::CREATIVE,
        ];
        for case in cases {
            let mut s = standing();
            case(&mut s);
            assert!(!is_reliable(&s, &world));
        }
        let mut s = standing();
        s.game_mode = game_mode::ADVENTURE;
        assert!(is_reliable(&s, &world));
    }

    #[test]
    fn active_smoothed_teleport_forces_reliable() {
        let world = stone_floor();
        let mut s = standing();
        s.flying = true;
        s.teleport(Vec3::new(5.0, 0.0, 5.0), true, 3);
        assert!(is_reliable(&s, &world));
    }

    #[test]
    fn reset_copies_client() {
        let mut s = standing();
        s.client.pos = Vec3::new(3.0, 1.0, 3.0);
        s.client.vel = Vec3::new(0.2, -0.1, 0.0);
        s.client.mov = Vec3::new(0.2, -0.1, 0.0);
        s.client.horizontal_collision = true;
        reset_to_client(&mut s, &SimulationOptions::default());
        assert_eq!(s.pos, Vec3::new(3.0, 1.0, 3.0));
        assert_eq!(s.vel, Vec3::new(0.2, -0.1, 0.0));
        assert!(s.collide_x && s.collide_z && !s.collide_y);
        assert!(!s.on_ground);
    }

    #[test]
    fn reset_leaves_client_mirror_alone() {
        let mut s = standing();
        s.client.pos = Vec3::new(3.0, 1.0, 3.0);
        s.client.last_pos = Vec3::new(2.5, 1.0, 3.0);
        s.client.vel = Vec3::new(9.0, -9.0, 0.5);
        s.client.mov = Vec3::new(0.5, 0.0, 0.0);
        s.client.vertical_collision = true;
        let before = s.client.clone();
        let options = SimulationOptions {
            limit_all_velocity: true,
            ..SimulationOptions::default()
        };
        reset_to_client(&mut s, &options);
        assert_eq!(s.client, before);
        assert_eq!(s.vel, Vec3::new(4.0, -4.0, 0.5));
    }

    #[test]
    fn reset_limits_velocity_when_enabled() {
        let mut s = standing();
        s.client.vel = Vec3::new(9.0, -9.0, 1.0);
        let options = SimulationOptions {
            limit_all_velocity: true,
            ..SimulationOptions::default()
        };
        reset_to_client(&mut s, &options);
        assert_eq!(s.vel, Vec3::new(4.0, -4.0, 1.0));
    }
}
