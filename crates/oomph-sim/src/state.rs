//! The authoritative per-player movement record.

use oomph_math::{BBox, BlockPos, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Bedrock game mode ids.
pub mod game_mode {
    pub const SURVIVAL: i32 = 0;
    pub const CREATIVE: i32 = 1;
    pub const ADVENTURE: i32 = 2;
    pub const SPECTATOR: i32 = 3;
}

/// Base air acceleration.
pub const DEFAULT_AIR_SPEED: f32 = 0.02;
/// Air acceleration while sprinting.
pub const SPRINT_AIR_SPEED: f32 = 0.026;
pub const DEFAULT_GRAVITY: f32 = 0.08;
pub const SLOW_FALLING_GRAVITY: f32 = 0.01;
pub const DEFAULT_JUMP_HEIGHT: f32 = 0.42;
pub const DEFAULT_MOVEMENT_SPEED: f32 = 0.1;
pub const SPRINT_SPEED_MULTIPLIER: f32 = 1.3;

/// What the client claimed about itself this tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientMirror {
    pub pos: Vec3,
    pub last_pos: Vec3,
    pub vel: Vec3,
    pub last_vel: Vec3,
    pub mov: Vec3,
    pub last_mov: Vec3,
    pub horizontal_collision: bool,
    pub vertical_collision: bool,
    pub toggled_fly: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementState {
    pub pos: Vec3,
    pub last_pos: Vec3,
    pub vel: Vec3,
    pub last_vel: Vec3,
    /// Displacement applied this tick.
    pub mov: Vec3,
    pub last_mov: Vec3,
    /// `(pitch, head_yaw, yaw)` in degrees.
    pub rotation: Vec3,
    pub last_rotation: Vec3,

    pub client: ClientMirror,

    /// `(width, height, scale)`.
    pub size: Vec3,
    pub slide_offset: Vec2,
    /// Clamped move vector: `x` strafe, `y` forward.
    pub impulse: Vec2,
    pub supporting_block_pos: Option<BlockPos>,

    pub gravity: f32,
    pub jump_height: f32,
    pub fall_distance: f32,
    pub movement_speed: f32,
    pub default_movement_speed: f32,
    pub air_speed: f32,
    pub server_updated_speed: bool,

    pub knockback: Vec3,
    pub ticks_since_knockback: u64,

    pub teleport_pos: Vec3,
    pub pending_teleport_pos: Vec3,
    pub ticks_since_teleport: u64,
    pub teleport_completion_ticks: u64,
    pub teleport_is_smoothed: bool,
    pub pending_teleports: i32,

    pub sprinting: bool,
    pub pressing_sprint: bool,
    pub server_sprint: bool,
    pub server_sprint_applied: bool,
    /// A sprint transition happened this tick and speed must follow it.
    pub needs_speed_adjusted: bool,

    pub sneaking: bool,
    pub pressing_sneak: bool,

    pub jumping: bool,
    pub pressing_jump: bool,
    pub jump_delay: u64,
    /// Set by the jump check, consumed by the next collision pass.
    pub client_jump_prevented: bool,

    pub collide_x: bool,
    pub collide_y: bool,
    pub collide_z: bool,
    pub on_ground: bool,

    pub penetrated_last_frame: bool,
    pub stuck_in_collider: bool,

    pub immobile: bool,
    pub no_clip: bool,

    pub gliding: bool,
    pub glide_boost_ticks: i64,

    pub has_gravity: bool,

    pub flying: bool,
    pub may_fly: bool,
    pub trust_fly_status: bool,
    pub just_disabled_flight: bool,

    pub ready: bool,
    pub alive: bool,
    pub game_mode: i32,

    // Owned by correction logic outside the simulator.
    pub pending_corrections: i32,
    pub in_correction_cooldown: bool,
}

impl Default for MovementState {
    fn default() -> Self {
        Self::new()
    }
}

impl MovementState {
    /// State of a freshly joined player.
    pub fn new() -> Self {
        Self {
            pos: Vec3::ZERO,
            last_pos: Vec3::ZERO,
            vel: Vec3::ZERO,
            last_vel: Vec3::ZERO,
            mov: Vec3::ZERO,
            last_mov: Vec3::ZERO,
            rotation: Vec3::ZERO,
            last_rotation: Vec3::ZERO,
            client: ClientMirror::default(),
            size: Vec3::new(0.6, 1.8, 1.0),
            slide_offset: Vec2::ZERO,
            impulse: Vec2::ZERO,
            supporting_block_pos: None,
            gravity: DEFAULT_GRAVITY,
            jump_height: DEFAULT_JUMP_HEIGHT,
            fall_distance: 0.0,
            movement_speed: DEFAULT_MOVEMENT_SPEED,
            default_movement_speed: DEFAULT_MOVEMENT_SPEED,
            air_speed: DEFAULT_AIR_SPEED,
            server_updated_speed: false,
            knockback: Vec3::ZERO,
            ticks_since_knockback: u64::MAX,
            teleport_pos: Vec3::ZERO,
            pending_teleport_pos: Vec3::ZERO,
            ticks_since_teleport: u64::MAX,
            teleport_completion_ticks: 0,
            teleport_is_smoothed: false,
            pending_teleports: 0,
            sprinting: false,
            pressing_sprint: false,
            server_sprint: false,
            server_sprint_applied: true,
            needs_speed_adjusted: false,
            sneaking: false,
            pressing_sneak: false,
            jumping: false,
            pressing_jump: false,
            jump_delay: 0,
            client_jump_prevented: false,
            collide_x: false,
            collide_y: false,
            collide_z: false,
            on_ground: false,
            penetrated_last_frame: false,
            stuck_in_collider: false,
            immobile: false,
            no_clip: false,
            gliding: false,
            glide_boost_ticks: 0,
            has_gravity: true,
            flying: false,
            may_fly: false,
            trust_fly_status: false,
            just_disabled_flight: false,
            ready: false,
            alive: true,
            game_mode: game_mode::SURVIVAL,
            pending_corrections: 0,
            in_correction_cooldown: false,
        }
    }

    // ----- Setters that keep the previous value -----

    pub fn set_pos(&mut self, pos: Vec3) {
        self.last_pos = self.pos;
        self.pos = pos;
    }

    pub fn set_vel(&mut self, vel: Vec3) {
        self.last_vel = self.vel;
        self.vel = vel;
    }

    pub fn set_mov(&mut self, mov: Vec3) {
        self.last_mov = self.mov;
        self.mov = mov;
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.last_rotation = self.rotation;
        self.rotation = rotation;
    }

    pub fn pitch(&self) -> f32 {
        self.rotation.x
    }

    pub fn head_yaw(&self) -> f32 {
        self.rotation.y
    }

    pub fn yaw(&self) -> f32 {
        self.rotation.z
    }

    pub fn width(&self) -> f32 {
        self.size.x * self.size.z
    }

    pub fn height(&self) -> f32 {
        self.size.y * self.size.z
    }

    /// Collision box at the current position.
    pub fn bounding_box(&self) -> BBox {
        self.bounding_box_at(self.pos)
    }

    pub fn bounding_box_at(&self, pos: Vec3) -> BBox {
        BBox::from_feet(pos, self.width(), self.height())
    }

    // ----- Teleport bookkeeping -----

    /// True while a teleport is in progress.
    pub fn has_teleport(&self) -> bool {
        self.ticks_since_teleport <= self.teleport_completion_ticks
    }

    /// Ticks left before a smoothed teleport completes; 0 when none is active.
    pub fn remaining_teleport_ticks(&self) -> i64 {
        if self.has_teleport() {
            (self.teleport_completion_ticks - self.ticks_since_teleport) as i64
        } else {
            0
        }
    }

    // ----- Server-driven writes -----

    /// Knockback to apply on the next simulated tick.
    pub fn apply_knockback(&mut self, knockback: Vec3) {
        self.knockback = knockback;
        self.ticks_since_knockback = 0;
        trace!(%knockback, "Knockback queued");
    }

    /// Start a teleport. Instant teleports complete on the next tick;
    /// smoothed ones interpolate over `completion_ticks`.
    pub fn teleport(&mut self, pos: Vec3, smoothed: bool, completion_ticks: u64) {
        self.teleport_pos = pos;
        self.ticks_since_teleport = 0;
        self.teleport_is_smoothed = smoothed;
        self.teleport_completion_ticks = if smoothed { completion_ticks } else { 0 };
        trace!(%pos, smoothed, completion_ticks, "Teleport started");
    }

    /// Record a teleport sent to the client that it has not acknowledged yet.
    pub fn queue_teleport(&mut self, pos: Vec3) {
        self.pending_teleport_pos = pos;
        self.pending_teleports += 1;
    }

    /// The client acknowledged a queued teleport; start it. Returns false if
    /// none was pending.
    pub fn acknowledge_teleport(&mut self) -> bool {
        if self.pending_teleports <= 0 {
            return false;
        }
        self.pending_teleports -= 1;
        self.teleport(self.pending_teleport_pos, false, 0);
        true
    }

    /// Sprint state as dictated by the server. Applied on the next input that
    /// carries no sprint edge of its own.
    pub fn set_server_sprint(&mut self, sprinting: bool) {
        self.server_sprint = sprinting;
        self.server_sprint_applied = false;
    }

    /// Movement speed attribute sent by the server. Used as-is for the next
    /// tick instead of the sprint-derived speed.
    pub fn set_server_movement_speed(&mut self, speed: f32) {
        self.movement_speed = speed;
        self.server_updated_speed = true;
    }

    pub fn set_default_movement_speed(&mut self, speed: f32) {
        self.default_movement_speed = speed;
    }

    pub fn set_abilities(&mut self, may_fly: bool, flying: bool, no_clip: bool) {
        self.may_fly = may_fly;
        self.flying = flying;
        self.no_clip = no_clip;
    }

    pub fn set_trust_fly_status(&mut self, trust: bool) {
        self.trust_fly_status = trust;
    }

    pub fn set_game_mode(&mut self, mode: i32) {
        self.game_mode = mode;
    }

    /// Firework boost while gliding.
    pub fn boost_glide(&mut self, ticks: i64) {
        self.glide_boost_ticks = ticks;
    }

    pub fn set_size(&mut self, width: f32, height: f32, scale: f32) {
        self.size = Vec3::new(width, height, scale);
    }

    pub fn set_alive(&mut self, alive: bool) {
        self.alive = alive;
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub fn set_immobile(&mut self, immobile: bool) {
        self.immobile = immobile;
    }

    pub fn set_has_gravity(&mut self, has_gravity: bool) {
        self.has_gravity = has_gravity;
    }
}
