//! Per-tick client input.
//!
//! [`AuthInput`] carries the core fields of the client's `PlayerAuthInput`
//! packet as they arrive; [`InputState`] is the normalized form the simulator
//! consumes (feet-level position, decoded flags).

use oomph_math::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Height of the player's eyes above the feet. Wire positions are at eye level.
pub const EYE_HEIGHT: f32 = 1.62;

/// Bitflags for the `input_data` field of `PlayerAuthInput`.
pub mod input_flags {
    pub const ASCEND: u64 = 1 << 0;
    pub const DESCEND: u64 = 1 << 1;
    pub const NORTH_JUMP: u64 = 1 << 2;
    pub const JUMP_DOWN: u64 = 1 << 3;
    pub const SPRINT_DOWN: u64 = 1 << 4;
    pub const CHANGE_HEIGHT: u64 = 1 << 5;
    pub const JUMPING: u64 = 1 << 6;
    pub const AUTO_JUMPING_IN_WATER: u64 = 1 << 7;
    pub const SNEAKING: u64 = 1 << 8;
    pub const SNEAK_DOWN: u64 = 1 << 9;
    pub const UP: u64 = 1 << 10;
    pub const DOWN: u64 = 1 << 11;
    pub const LEFT: u64 = 1 << 12;
    pub const RIGHT: u64 = 1 << 13;
    pub const UP_LEFT: u64 = 1 << 14;
    pub const UP_RIGHT: u64 = 1 << 15;
    pub const WANT_UP: u64 = 1 << 16;
    pub const WANT_DOWN: u64 = 1 << 17;
    pub const WANT_DOWN_SLOW: u64 = 1 << 18;
    pub const WANT_UP_SLOW: u64 = 1 << 19;
    pub const SPRINTING: u64 = 1 << 20;
    pub const ASCEND_BLOCK: u64 = 1 << 21;
    pub const DESCEND_BLOCK: u64 = 1 << 22;
    pub const SNEAK_TOGGLE_DOWN: u64 = 1 << 23;
    pub const PERSIST_SNEAK: u64 = 1 << 24;
    pub const START_SPRINTING: u64 = 1 << 25;
    pub const STOP_SPRINTING: u64 = 1 << 26;
    pub const START_SNEAKING: u64 = 1 << 27;
    pub const STOP_SNEAKING: u64 = 1 << 28;
    pub const START_SWIMMING: u64 = 1 << 29;
    pub const STOP_SWIMMING: u64 = 1 << 30;
    pub const START_JUMPING: u64 = 1 << 31;
    pub const START_GLIDING: u64 = 1 << 32;
    pub const STOP_GLIDING: u64 = 1 << 33;
    pub const PERFORM_ITEM_INTERACTION: u64 = 1 << 34;
    pub const PERFORM_BLOCK_ACTIONS: u64 = 1 << 35;
    pub const PERFORM_ITEM_STACK_REQUEST: u64 = 1 << 36;
    pub const HANDLED_TELEPORT: u64 = 1 << 37;
    pub const EMOTING: u64 = 1 << 38;
    pub const MISSED_SWING: u64 = 1 << 39;
    pub const START_CRAWLING: u64 = 1 << 40;
    pub const STOP_CRAWLING: u64 = 1 << 41;
    pub const START_FLYING: u64 = 1 << 42;
    pub const STOP_FLYING: u64 = 1 << 43;
    pub const RECEIVED_SERVER_DATA: u64 = 1 << 44;
    pub const CLIENT_PREDICTED_VEHICLE: u64 = 1 << 45;
    pub const PADDLING_LEFT: u64 = 1 << 46;
    pub const PADDLING_RIGHT: u64 = 1 << 47;
    pub const BLOCK_BREAKING_DELAY_ENABLED: u64 = 1 << 48;
    pub const HORIZONTAL_COLLISION: u64 = 1 << 49;
    pub const VERTICAL_COLLISION: u64 = 1 << 50;
}

/// Core fields of a `PlayerAuthInput` packet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthInput {
    pub pitch: f32,
    pub yaw: f32,
    /// Eye-level position.
    pub position: Vec3,
    pub move_vector: Vec2,
    pub head_yaw: f32,
    pub input_data: u64,
    pub tick: u64,
    /// Client velocity for this tick.
    pub delta: Vec3,
}

impl AuthInput {
    /// Check whether a specific input flag is set.
    pub fn has_flag(&self, flag: u64) -> bool {
        self.input_data & flag != 0
    }
}

/// One tick of client input, normalized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputState {
    /// Client tick counter.
    pub tick: u64,
    /// Raw move vector: `x` strafe, `y` forward.
    pub move_vector: Vec2,
    pub pitch: f32,
    pub yaw: f32,
    pub head_yaw: f32,
    /// Client-reported feet position.
    pub position: Vec3,
    /// Client-reported velocity.
    pub velocity: Vec3,
    pub horizontal_collision: bool,
    pub vertical_collision: bool,

    // Edge-triggered.
    pub start_flying: bool,
    pub stop_flying: bool,
    pub start_sprinting: bool,
    pub stop_sprinting: bool,
    pub start_sneaking: bool,
    pub stop_sneaking: bool,
    pub start_jumping: bool,
    pub start_gliding: bool,
    pub stop_gliding: bool,

    // Level-triggered.
    pub sprint_down: bool,
    pub sneak_down: bool,
    pub sneaking: bool,
    pub jumping: bool,
    pub using_consumable: bool,
}

impl InputState {
    /// Decode a wire input. `using_consumable` comes from the item-use
    /// tracking, not from the packet flags.
    pub fn from_auth_input(pk: &AuthInput, using_consumable: bool) -> Self {
        use input_flags as f;
        Self {
            tick: pk.tick,
            move_vector: pk.move_vector,
            pitch: pk.pitch,
            yaw: pk.yaw,
            head_yaw: pk.head_yaw,
            position: pk.position - Vec3::new(0.0, EYE_HEIGHT, 0.0),
            velocity: pk.delta,
            horizontal_collision: pk.has_flag(f::HORIZONTAL_COLLISION),
            vertical_collision: pk.has_flag(f::VERTICAL_COLLISION),
            start_flying: pk.has_flag(f::START_FLYING),
            stop_flying: pk.has_flag(f::STOP_FLYING),
            start_sprinting: pk.has_flag(f::START_SPRINTING),
            stop_sprinting: pk.has_flag(f::STOP_SPRINTING),
            start_sneaking: pk.has_flag(f::START_SNEAKING),
            stop_sneaking: pk.has_flag(f::STOP_SNEAKING),
            start_jumping: pk.has_flag(f::START_JUMPING),
            start_gliding: pk.has_flag(f::START_GLIDING),
            stop_gliding: pk.has_flag(f::STOP_GLIDING),
            sprint_down: pk.has_flag(f::SPRINT_DOWN),
            sneak_down: pk.has_flag(f::SNEAK_DOWN),
            sneaking: pk.has_flag(f::SNEAKING),
            jumping: pk.has_flag(f::JUMPING),
            using_consumable,
        }
    }

    /// Reject NaN or infinite values before they reach the state.
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.position.is_finite() {
            return Err(SimError::NonFinite { field: "position" });
        }
        if !self.velocity.is_finite() {
            return Err(SimError::NonFinite { field: "velocity" });
        }
        if !self.move_vector.is_finite() {
            return Err(SimError::NonFinite {
                field: "move_vector",
            });
        }
        if !(self.pitch.is_finite() && self.yaw.is_finite() && self.head_yaw.is_finite()) {
            return Err(SimError::NonFinite { field: "rotation" });
        }
        Ok(())
    }
}
