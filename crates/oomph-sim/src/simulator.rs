//! The per-player tick driver.

use oomph_math::{ChunkPos, Vec3};
use oomph_world::World;
use tracing::{debug, trace, warn};

use crate::apply::{adjust_speed_for_sprint, apply_input};
use crate::config::{SimulationOptions, SprintTiming};
use crate::effects::{Effects, Inventory};
use crate::error::SimError;
use crate::input::InputState;
use crate::physics;
use crate::reliability;
use crate::result::{Outcome, SimulationResult};
use crate::state::MovementState;
use crate::teleport;

/// Everything outside the movement state a tick reads from.
#[derive(Clone, Copy)]
pub struct SimContext<'a> {
    pub world: &'a dyn World,
    pub effects: &'a dyn Effects,
    pub inventory: &'a dyn Inventory,
}

/// Simulates one player's movement, tick by tick.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    state: MovementState,
    options: SimulationOptions,
    last_tick: Option<u64>,
}

impl Simulator {
    pub fn new(options: SimulationOptions) -> Self {
        Self::with_state(MovementState::new(), options)
    }

    pub fn with_state(state: MovementState, options: SimulationOptions) -> Self {
        Self {
            state,
            options,
            last_tick: None,
        }
    }

    pub fn state(&self) -> &MovementState {
        &self.state
    }

    /// Mutable access for server-driven writes between ticks.
    pub fn state_mut(&mut self) -> &mut MovementState {
        &mut self.state
    }

    pub fn options(&self) -> &SimulationOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: SimulationOptions) {
        self.options = options;
    }

    pub fn last_tick(&self) -> Option<u64> {
        self.last_tick
    }

    /// Advance the simulation by one client input.
    ///
    /// Inputs are checked before anything is touched: an input older than
    /// the last accepted one, or carrying non-finite values, is rejected and
    /// leaves the state unchanged.
    pub fn tick(
        &mut self,
        ctx: &SimContext<'_>,
        input: &InputState,
    ) -> Result<SimulationResult, SimError> {
        if let Some(last) = self.last_tick {
            if input.tick < last {
                warn!(last, got = input.tick, "Tick went backwards");
                return Err(SimError::TickRegression {
                    last,
                    got: input.tick,
                });
            }
        }
        input.validate()?;
        self.last_tick = Some(input.tick);

        apply_input(&mut self.state, input, ctx.effects, &self.options);
        let outcome = self.run(ctx);

        if self.options.sprint_timing == SprintTiming::Legacy && self.state.needs_speed_adjusted {
            adjust_speed_for_sprint(&mut self.state);
        }
        self.advance_counters();

        let result = SimulationResult::from_state(
            input.tick,
            outcome,
            &self.state,
            self.options.position_correction_threshold,
            self.options.velocity_correction_threshold,
        );

        if self.options.debug {
            debug!(
                tick = result.tick,
                outcome = ?result.outcome,
                pos = %result.position,
                vel = %result.velocity,
                pos_delta = %result.position_delta,
                vel_delta = %result.velocity_delta,
                on_ground = result.on_ground,
                "Simulated tick"
            );
        } else {
            trace!(tick = result.tick, outcome = ?result.outcome, "Simulated tick");
        }
        if result.needs_correction {
            trace!(tick = result.tick, delta = %result.position_delta, "Client diverged");
        }

        Ok(result)
    }

    fn run(&mut self, ctx: &SimContext<'_>) -> Outcome {
        let state = &mut self.state;

        if state.has_teleport() {
            if !state.teleport_is_smoothed {
                teleport::apply_instant(state, ctx.world);
                return Outcome::Teleport;
            }
            if teleport::apply_smoothed(state) {
                return Outcome::Teleport;
            }
        }

        if !reliability::is_reliable(state, ctx.world) {
            reliability::reset_to_client(state, &self.options);
            return Outcome::Unreliable;
        }

        let chunk = ChunkPos::from_vec3(&state.pos);
        if !ctx.world.is_chunk_loaded(chunk.x, chunk.z) {
            trace!(%chunk, "Player in unloaded chunk");
            hold(state);
            return Outcome::UnloadedChunk;
        }

        if state.immobile || !state.ready {
            hold(state);
            return Outcome::ImmobileOrNotReady;
        }

        physics::simulate(state, ctx, &self.options);
        Outcome::Normal
    }

    fn advance_counters(&mut self) {
        let state = &mut self.state;
        if state.glide_boost_ticks > 0 {
            state.glide_boost_ticks -= 1;
        }
        state.ticks_since_knockback = state.ticks_since_knockback.saturating_add(1);
        state.ticks_since_teleport = state.ticks_since_teleport.saturating_add(1);
        if state.jump_delay > 0 {
            state.jump_delay -= 1;
        }
        state.just_disabled_flight = false;
        state.server_updated_speed = false;
    }
}

/// Position stays, motion stops.
fn hold(state: &mut MovementState) {
    state.set_vel(Vec3::ZERO);
    state.set_mov(Vec3::ZERO);
}
