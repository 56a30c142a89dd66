//! Authoritative per-tick movement simulation for Bedrock players.
//!
//! [`Simulator::tick`] folds one client input into a [`MovementState`],
//! predicts where the client should be, and reports how far the client's own
//! claim is from that prediction.

pub mod apply;
pub mod collision;
pub mod config;
pub mod effects;
pub mod error;
pub mod glide;
pub mod input;
pub mod jump;
pub mod physics;
pub mod reliability;
pub mod result;
pub mod simulator;
pub mod state;
pub mod teleport;

#[cfg(test)]
mod scenarios;
#[cfg(test)]
mod test_util;

pub use config::{Mode, SimulationOptions, SprintTiming};
pub use effects::{effect_id, EffectSet, Effects, Equipment, Inventory, Nothing};
pub use error::SimError;
pub use input::{input_flags, AuthInput, InputState};
pub use result::{Outcome, SimulationResult};
pub use simulator::{SimContext, Simulator};
pub use state::{game_mode, ClientMirror, MovementState};
