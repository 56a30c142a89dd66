//! Simulator options.

use serde::{Deserialize, Serialize};

/// How aggressively the caller should act on prediction mismatches.
///
/// The simulator always predicts; the mode only feeds
/// [`SimulationResult::wants_correction`](crate::SimulationResult::wants_correction).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Authoritative,
    Permissive,
    Passive,
}

/// When a sprint transition recomputes movement speed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SprintTiming {
    /// Before the tick is simulated.
    #[default]
    Modern,
    /// After the tick is simulated, as older clients do.
    Legacy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOptions {
    #[serde(default)]
    pub mode: Mode,
    /// Position delta above which a correction is needed. 0 disables.
    #[serde(default = "default_position_correction_threshold")]
    pub position_correction_threshold: f32,
    /// Velocity delta above which a correction is needed. 0 disables.
    #[serde(default)]
    pub velocity_correction_threshold: f32,
    /// Legacy step smoothing, for clients that still use it.
    #[serde(default)]
    pub use_slide_offset: bool,
    #[serde(default)]
    pub sprint_timing: SprintTiming,
    /// Clamp adopted client velocity on unreliable ticks.
    #[serde(default)]
    pub limit_all_velocity: bool,
    #[serde(default = "default_limit_all_velocity_threshold")]
    pub limit_all_velocity_threshold: f32,
    /// Replay jumps in the client's collision order and drop the ones it
    /// would not have taken.
    #[serde(default = "default_detect_rejected_jumps")]
    pub detect_rejected_jumps: bool,
    /// Log every tick's prediction at debug level.
    #[serde(default)]
    pub debug: bool,
}

fn default_position_correction_threshold() -> f32 {
    0.3
}

fn default_limit_all_velocity_threshold() -> f32 {
    4.0
}

fn default_detect_rejected_jumps() -> bool {
    true
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            position_correction_threshold: default_position_correction_threshold(),
            velocity_correction_threshold: 0.0,
            use_slide_offset: false,
            sprint_timing: SprintTiming::default(),
            limit_all_velocity: false,
            limit_all_velocity_threshold: default_limit_all_velocity_threshold(),
            detect_rejected_jumps: default_detect_rejected_jumps(),
            debug: false,
        }
    }
}
