//! Per-tick simulation output.

use oomph_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::Mode;
use crate::state::MovementState;

/// Which path a tick took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Normal,
    Teleport,
    /// Not simulable; the client's values were adopted.
    Unreliable,
    UnloadedChunk,
    ImmobileOrNotReady,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub tick: u64,
    pub outcome: Outcome,
    pub position: Vec3,
    pub velocity: Vec3,
    pub movement: Vec3,
    pub on_ground: bool,
    pub collide_x: bool,
    pub collide_y: bool,
    pub collide_z: bool,
    /// Predicted minus client position.
    pub position_delta: Vec3,
    /// Predicted minus client velocity.
    pub velocity_delta: Vec3,
    pub needs_correction: bool,
}

impl SimulationResult {
    /// Snapshot `state` after a tick. A threshold of 0 disables that check.
    pub fn from_state(
        tick: u64,
        outcome: Outcome,
        state: &MovementState,
        position_threshold: f32,
        velocity_threshold: f32,
    ) -> Self {
        let position_delta = state.pos - state.client.pos;
        let velocity_delta = state.vel - state.client.vel;
        let pos_off = position_threshold > 0.0 && position_delta.length() > position_threshold;
        let vel_off = velocity_threshold > 0.0 && velocity_delta.length() > velocity_threshold;
        Self {
            tick,
            outcome,
            position: state.pos,
            velocity: state.vel,
            movement: state.mov,
            on_ground: state.on_ground,
            collide_x: state.collide_x,
            collide_y: state.collide_y,
            collide_z: state.collide_z,
            position_delta,
            velocity_delta,
            needs_correction: pos_off || vel_off,
        }
    }

    /// Whether the caller should send a correction under `mode`.
    pub fn wants_correction(&self, mode: Mode) -> bool {
        match mode {
            Mode::Authoritative => self.needs_correction,
            Mode::Permissive => self.needs_correction && self.outcome == Outcome::Normal,
            Mode::Passive => false,
        }
    }
}
