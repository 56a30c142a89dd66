//! Whole-tick scenarios driven through [`Simulator::tick`].

use oomph_math::{BlockPos, Vec2, Vec3};
use oomph_world::MemoryWorld;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::config::SimulationOptions;
use crate::input::InputState;
use crate::result::{Outcome, SimulationResult};
use crate::simulator::Simulator;
use crate::test_util::{block, ctx, grounded_state, input_at, stone_floor, void_world, walk_forward};

fn simulator_at(pos: Vec3) -> Simulator {
    Simulator::with_state(grounded_state(pos), SimulationOptions::default())
}

#[test]
fn flat_ground_forward_walk() {
    let world = stone_floor();
    let mut sim = simulator_at(Vec3::ZERO);
    let mut last_z = 0.0;
    for tick in 1..=5 {
        let r = sim.tick(&ctx(&world), &walk_forward(tick, sim.state().pos)).unwrap();
        assert_eq!(r.outcome, Outcome::Normal);
        assert!(r.velocity.z > 0.0);
        assert_eq!(r.movement.y, 0.0);
        assert!(r.on_ground);
        if tick > 1 {
            assert!(r.collide_y);
        }
        assert!(r.position.z > last_z);
        last_z = r.position.z;
    }
    // First step is the full ground acceleration.
    let mut first = simulator_at(Vec3::ZERO);
    let r = first.tick(&ctx(&world), &walk_forward(1, Vec3::ZERO)).unwrap();
    assert!((r.movement.z - 0.098).abs() < 1e-4);
}

#[test]
fn gravity_in_void() {
    let world = void_world();
    let mut state = grounded_state(Vec3::ZERO);
    state.on_ground = false;
    let mut sim = Simulator::with_state(state, SimulationOptions::default());
    let r = sim.tick(&ctx(&world), &input_at(1, Vec3::ZERO)).unwrap();
    assert!((r.velocity.y + 0.0784).abs() < 1e-6);
    assert_eq!(r.velocity.x, 0.0);
    assert_eq!(r.velocity.z, 0.0);
    assert!(!r.on_ground);
}

#[test]
fn jump_then_land() {
    let world = stone_floor();
    let start = Vec3::new(0.5, 0.0, 0.5);
    let mut sim = simulator_at(start);

    let first = InputState {
        start_jumping: true,
        jumping: true,
        ..input_at(1, start)
    };
    let r = sim.tick(&ctx(&world), &first).unwrap();
    assert_eq!(r.movement.y, 0.42);
    assert!(!r.on_ground);
    // Set to 10 by the jump, then counted down once at the end of the tick.
    assert_eq!(sim.state().jump_delay, 9);

    let mut peak = (0, r.position.y);
    let mut landed = None;
    for tick in 2..30 {
        let held = InputState {
            jumping: true,
            ..input_at(tick, sim.state().pos)
        };
        let r = sim.tick(&ctx(&world), &held).unwrap();
        if r.position.y > peak.1 {
            peak = (tick, r.position.y);
        }
        if r.on_ground {
            landed = Some((tick, r));
            break;
        }
    }

    assert!((5..=7).contains(&peak.0), "peak at tick {}", peak.0);
    assert!((peak.1 - 1.25).abs() < 0.01);
    let (tick, r): (u64, SimulationResult) = landed.expect("never landed");
    assert!(tick < 16);
    assert!(r.collide_y);
    assert!(r.position.y.abs() < 1e-5);

    let r = sim
        .tick(&ctx(&world), &input_at(tick + 1, sim.state().pos))
        .unwrap();
    assert_eq!(r.movement.y, 0.0);
    assert!(r.on_ground);
}

#[test]
fn slime_bounce() {
    let mut world = stone_floor();
    world.set_block(BlockPos::new(0, -1, 0), block("minecraft:slime"));
    let mut state = grounded_state(Vec3::new(0.5, 2.0, 0.5));
    state.on_ground = false;
    state.vel = Vec3::new(0.0, -0.5, 0.0);
    let mut sim = Simulator::with_state(state, SimulationOptions::default());

    let mut tick = 1;
    let landing_speed = loop {
        let falling = sim.state().vel.y;
        let r = sim.tick(&ctx(&world), &input_at(tick, sim.state().pos)).unwrap();
        tick += 1;
        if r.collide_y {
            break falling;
        }
        assert!(tick < 20, "never landed");
    };

    assert!(landing_speed < 0.0);
    let bounced = -landing_speed;
    let expected = (bounced - 0.08) * 0.98;
    assert!((sim.state().vel.y - expected).abs() < 1e-4);

    let r = sim.tick(&ctx(&world), &input_at(tick, sim.state().pos)).unwrap();
    assert!(!r.on_ground);
    assert!(r.movement.y > 0.0);
}

#[test]
fn cobweb_ingress() {
    let mut world = stone_floor();
    world.set_block(BlockPos::new(1, 0, 0), block("minecraft:web"));
    let start = Vec3::new(1.5, 0.0, 0.5);
    let mut state = grounded_state(start);
    state.vel = Vec3::new(0.2, 0.0, 0.1);
    let mut sim = Simulator::with_state(state, SimulationOptions::default());

    let r = sim.tick(&ctx(&world), &input_at(1, start)).unwrap();
    assert!((r.movement.x - 0.05).abs() < 1e-6);
    assert!((r.movement.z - 0.025).abs() < 1e-6);
    assert_eq!(r.movement.y, 0.0);
    assert_eq!(r.velocity.x, 0.0);
    assert_eq!(r.velocity.z, 0.0);
    assert!(sim.state().vel.y <= 0.0);

    let r = sim.tick(&ctx(&world), &input_at(2, sim.state().pos)).unwrap();
    assert_eq!(r.velocity.x, 0.0);
    assert_eq!(r.velocity.z, 0.0);
    assert!(r.on_ground);
}

#[test]
fn bamboo_makes_tick_unreliable() {
    let mut world = stone_floor();
    world.set_block(BlockPos::new(1, 0, 0), block("minecraft:bamboo"));
    let mut sim = simulator_at(Vec3::new(0.5, 0.0, 0.5));

    let claimed = Vec3::new(0.5, 0.0, 0.7);
    let input = InputState {
        velocity: Vec3::new(0.0, 0.0, 0.1),
        ..walk_forward(1, claimed)
    };
    let r = sim.tick(&ctx(&world), &input).unwrap();
    assert_eq!(r.outcome, Outcome::Unreliable);
    assert_eq!(r.position, claimed);
    assert_eq!(r.velocity, Vec3::new(0.0, 0.0, 0.1));
    assert!(!r.needs_correction);
    assert_eq!(sim.state().pending_corrections, 0);

    // Only the input step writes the client mirror.
    let client = &sim.state().client;
    assert_eq!(client.pos, claimed);
    assert_eq!(client.last_pos, Vec3::new(0.5, 0.0, 0.5));
    assert_eq!(client.vel, Vec3::new(0.0, 0.0, 0.1));
    assert_eq!(client.mov, claimed - Vec3::new(0.5, 0.0, 0.5));
}

fn obstacle_course() -> MemoryWorld {
    let mut world = stone_floor();
    world.fill(BlockPos::new(4, 0, -3), BlockPos::new(4, 1, 3), block("minecraft:stone"));
    world.fill(BlockPos::new(-3, 0, 4), BlockPos::new(3, 0, 4), block("minecraft:stone_block_slab"));
    world.set_block(BlockPos::new(-3, 0, -3), block("minecraft:slime"));
    world.set_block(BlockPos::new(-2, 0, 2), block("minecraft:oak_fence"));
    world.set_block(BlockPos::new(2, 0, -2), block("minecraft:ladder"));
    world
}

fn random_inputs(seed: u64, count: u64) -> Vec<InputState> {
    let mut rng = StdRng::seed_from_u64(seed);
    (1..=count)
        .map(|tick| InputState {
            tick,
            move_vector: Vec2::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0)),
            yaw: rng.gen_range(-180.0..180.0),
            pitch: rng.gen_range(-90.0..=90.0),
            start_jumping: rng.gen_bool(0.15),
            jumping: rng.gen_bool(0.3),
            start_sprinting: rng.gen_bool(0.1),
            stop_sprinting: rng.gen_bool(0.05),
            sneak_down: rng.gen_bool(0.1),
            position: Vec3::new(
                rng.gen_range(-0.5..0.5),
                rng.gen_range(0.0..0.5),
                rng.gen_range(-0.5..0.5),
            ),
            ..InputState::default()
        })
        .collect()
}

fn run(world: &MemoryWorld, inputs: &[InputState]) -> Vec<SimulationResult> {
    let mut sim = simulator_at(Vec3::new(0.5, 0.0, 0.5));
    inputs
        .iter()
        .map(|input| sim.tick(&ctx(world), input).unwrap())
        .collect()
}

#[test]
fn simulation_is_deterministic() {
    let world = obstacle_course();
    for seed in [1, 7, 42] {
        let inputs = random_inputs(seed, 80);
        assert_eq!(run(&world, &inputs), run(&world, &inputs));
    }
}

#[test]
fn invariants_hold_over_random_play() {
    let world = obstacle_course();
    let options = SimulationOptions::default();
    for seed in [3, 11, 99] {
        let mut sim = simulator_at(Vec3::new(0.5, 0.0, 0.5));
        for input in random_inputs(seed, 120) {
            let pos_before = sim.state().pos;
            let vel_before = sim.state().vel;
            let r = sim.tick(&ctx(&world), &input).unwrap();
            let s = sim.state();

            assert!(s.pos.is_finite() && s.vel.is_finite());
            if r.outcome == Outcome::Normal {
                assert_eq!(s.last_pos, pos_before);
                assert_eq!(s.last_vel, vel_before);
            }
            assert!(!s.stuck_in_collider || s.penetrated_last_frame);
            if r.needs_correction {
                assert!(r.position_delta.length() > options.position_correction_threshold);
            }
            assert!(s.jump_delay <= 9);
        }
    }
}

#[test]
fn held_jump_delay_counts_down() {
    let world = stone_floor();
    let start = Vec3::new(0.5, 0.0, 0.5);
    let mut sim = simulator_at(start);
    let jump = InputState {
        start_jumping: true,
        jumping: true,
        ..input_at(1, start)
    };
    sim.tick(&ctx(&world), &jump).unwrap();
    let mut last = sim.state().jump_delay;
    for tick in 2..=9 {
        let held = InputState {
            jumping: true,
            ..input_at(tick, sim.state().pos)
        };
        sim.tick(&ctx(&world), &held).unwrap();
        assert!(sim.state().jump_delay < last);
        last = sim.state().jump_delay;
    }
}
