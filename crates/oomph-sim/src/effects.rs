//! Status effects and equipment as seen by the simulator.

use std::collections::HashMap;

/// Well-known Bedrock effect IDs.
pub mod effect_id {
    pub const SPEED: i32 = 1;
    pub const SLOWNESS: i32 = 2;
    pub const JUMP_BOOST: i32 = 8;
    pub const LEVITATION: i32 = 24;
    pub const SLOW_FALLING: i32 = 27;
}

/// Active status effects of the simulated player.
pub trait Effects {
    /// Level of the effect (wire amplifier + 1) if active.
    fn get_effect(&self, id: i32) -> Option<i32>;
}

/// Equipment of the simulated player.
pub trait Inventory {
    /// Whether the chestplate slot holds an elytra.
    fn has_elytra(&self) -> bool;
}

/// Effects keyed by id, fed from MobEffect add/modify/remove operations.
#[derive(Debug, Clone, Default)]
pub struct EffectSet {
    levels: HashMap<i32, i32>,
}

impl EffectSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or modify an effect. `amplifier` is the wire value (0 = level I).
    pub fn add(&mut self, id: i32, amplifier: i32) {
        self.levels.insert(id, amplifier + 1);
    }

    pub fn remove(&mut self, id: i32) -> bool {
        self.levels.remove(&id).is_some()
    }

    pub fn clear(&mut self) {
        self.levels.clear();
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl Effects for EffectSet {
    fn get_effect(&self, id: i32) -> Option<i32> {
        self.levels.get(&id).copied()
    }
}

/// The one equipment slot movement depends on.
#[derive(Debug, Clone, Default)]
pub struct Equipment {
    /// Item name in the chestplate slot, if any.
    pub chestplate: Option<String>,
}

impl Equipment {
    pub const ELYTRA: &'static str = "minecraft:elytra";

    pub fn with_elytra() -> Self {
        Self {
            chestplate: Some(Self::ELYTRA.to_string()),
        }
    }
}

impl Inventory for Equipment {
    fn has_elytra(&self) -> bool {
        self.chestplate.as_deref() == Some(Self::ELYTRA)
    }
}

/// No effects and no equipment.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nothing;

impl Effects for Nothing {
    fn get_effect(&self, _id: i32) -> Option<i32> {
        None
    }
}

impl Inventory for Nothing {
    fn has_elytra(&self) -> bool {
        false
    }
}
