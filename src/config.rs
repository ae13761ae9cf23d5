//! # Configuration
//!
//! Explicit configuration values handed to the world and the engine at
//! construction. Nothing in the crate reads configuration from global state.
//!
//! Both structs deserialize from partial JSON; missing fields fall back to
//! their defaults.
//!
//! ```
//! use voxel_world::config::EngineConfig;
//!
//! let config = EngineConfig::from_json_str(r#"{ "world": { "seed": 7 } }"#).unwrap();
//! assert_eq!(config.world.seed, 7);
//! assert_eq!(config.world.load_radius, 4);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;

/// Smallest streaming radius, in chunks.
pub const MIN_LOAD_RADIUS: i32 = 2;
/// Largest streaming radius, in chunks.
pub const MAX_LOAD_RADIUS: i32 = 8;
/// Streaming radius used when none is configured.
pub const DEFAULT_LOAD_RADIUS: i32 = 4;
/// Seed used when none is configured.
pub const DEFAULT_SEED: i32 = 1942;
/// Landmark probe distance used by the engine when none is configured.
pub const DEFAULT_LANDMARK_PROBE_DISTANCE: f32 = 20.0;

/// Clamps a requested streaming radius into `[MIN_LOAD_RADIUS, MAX_LOAD_RADIUS]`.
pub fn clamp_load_radius(radius: i32) -> i32 {
    radius.clamp(MIN_LOAD_RADIUS, MAX_LOAD_RADIUS)
}

/// Settings consumed by the world manager.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed mixed into the terrain noise.
    pub seed: i32,
    /// Requested streaming radius in chunks. Clamped when applied.
    pub load_radius: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            load_radius: DEFAULT_LOAD_RADIUS,
        }
    }
}

/// Top-level configuration for an `EngineState`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub world: WorldConfig,
    /// Maximum XZ distance at which a landmark counts as nearby.
    pub landmark_probe_distance: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            landmark_probe_distance: DEFAULT_LANDMARK_PROBE_DISTANCE,
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from a JSON document.
    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json_string(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn empty_document_uses_defaults() {
        let config = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn partial_world_section_keeps_other_defaults() {
        let config = EngineConfig::from_json_str(r#"{"world":{"load_radius":6}}"#).unwrap();
        assert_eq!(config.world.load_radius, 6);
        assert_eq!(config.world.seed, DEFAULT_SEED);
        assert_eq!(config.landmark_probe_distance, DEFAULT_LANDMARK_PROBE_DISTANCE);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let error = EngineConfig::from_json_str("{ world: ").unwrap_err();
        assert!(matches!(error, EngineError::Config(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let error = EngineConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(error, EngineError::Io(_)));
    }

    #[test]
    fn serialized_config_parses_back() {
        let config = EngineConfig {
            world: WorldConfig { seed: -3, load_radius: 8 },
            landmark_probe_distance: 12.5,
        };
        let json = config.to_json_string().unwrap();
        assert_eq!(EngineConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn radius_clamps_to_bounds() {
        assert_eq!(clamp_load_radius(0), 2);
        assert_eq!(clamp_load_radius(5), 5);
        assert_eq!(clamp_load_radius(40), 8);
    }
}
