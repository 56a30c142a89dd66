use oomph_sim::SimulationOptions;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct OomphConfig {
    #[serde(default)]
    pub logging: LoggingSection,
    #[serde(default)]
    pub movement: SimulationOptions,
    #[serde(default)]
    pub world: WorldSection,
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// The flat test world the harness simulates in.
#[derive(Debug, Deserialize)]
pub struct WorldSection {
    #[serde(default = "default_floor_y")]
    pub floor_y: i32,
    #[serde(default = "default_floor_block")]
    pub floor_block: String,
    /// Chunks loaded in each direction around the origin.
    #[serde(default = "default_radius_chunks")]
    pub radius_chunks: i32,
}

fn default_floor_y() -> i32 {
    -1
}

fn default_floor_block() -> String {
    "minecraft:stone".into()
}

fn default_radius_chunks() -> i32 {
    4
}

impl Default for WorldSection {
    fn default() -> Self {
        Self {
            floor_y: default_floor_y(),
            floor_block: default_floor_block(),
            radius_chunks: default_radius_chunks(),
        }
    }
}

impl OomphConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }
}
