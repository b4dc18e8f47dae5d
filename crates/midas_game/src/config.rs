//! # Stage Configuration
//!
//! TOML-backed tuning for a Gold Rush stage. Everything here is read
//! once at startup; nothing reloads mid-run. Any field left out of the
//! file keeps its built-in default, and a file that names an unknown
//! field is rejected outright.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::coin::{COIN_CAPACITY, COIN_LIFETIME_TICKS, TICKS_PER_SECOND};

/// Stage configuration failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read stage config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for this schema.
    #[error("failed to parse stage config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config parsed but the values make no sense.
    #[error("invalid stage config: {0}")]
    Invalid(String),
}

/// Top-level stage tuning.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StageConfig {
    /// Pool capacity. Fixed for the whole run.
    pub pool_capacity: usize,
    /// Coin lifetime in ticks.
    pub coin_lifetime_ticks: u64,
    /// Simulation rate in ticks per second.
    pub tick_rate: u32,
    /// Stage length in ticks.
    pub duration_ticks: u64,
    /// Seed for the spawn RNG. Same seed, same stage.
    pub seed: u64,
    /// Capacity of the gameplay event channel.
    pub event_capacity: usize,
    /// Spawn system tuning.
    pub spawn: SpawnConfig,
    /// Pickup system tuning.
    pub pickup: PickupConfig,
}

/// Coin spawn tuning.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpawnConfig {
    /// Upper bound on enemy deaths resolved per tick.
    pub max_destroyed_per_tick: u32,
    /// Smallest coin burst an enemy death can produce.
    pub burst_min: u32,
    /// Largest coin burst an enemy death can produce.
    pub burst_max: u32,
    /// Enemy deaths land anywhere in `[-extent, extent]` on X and Z.
    pub arena_half_extent: f32,
}

/// Coin pickup tuning.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PickupConfig {
    /// Collection radius around the player, in world units.
    pub radius: f32,
    /// Radius of the player's scripted orbit around the arena center.
    pub orbit_radius: f32,
    /// Player orbit speed in radians per tick.
    pub angular_speed: f32,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            pool_capacity: COIN_CAPACITY,
            coin_lifetime_ticks: COIN_LIFETIME_TICKS,
            tick_rate: TICKS_PER_SECOND,
            duration_ticks: 3_600,
            seed: 0x601D,
            event_capacity: 4_096,
            spawn: SpawnConfig::default(),
            pickup: PickupConfig::default(),
        }
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            max_destroyed_per_tick: 3,
            burst_min: 1,
            burst_max: 8,
            arena_half_extent: 100.0,
        }
    }
}

impl Default for PickupConfig {
    fn default() -> Self {
        Self {
            radius: 12.0,
            orbit_radius: 60.0,
            angular_speed: 0.02,
        }
    }
}

impl StageConfig {
    /// Loads and validates a stage config from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, and the
    /// same errors as [`from_toml`](Self::from_toml) after that.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Parses and validates a stage config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML or unknown
    /// fields, and [`ConfigError::Invalid`] when values are out of
    /// range.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configs the stage cannot run with.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_capacity == 0 {
            return Err(ConfigError::Invalid(
                "pool_capacity must be greater than zero".into(),
            ));
        }
        if self.pool_capacity > u32::MAX as usize {
            return Err(ConfigError::Invalid(
                "pool_capacity cannot exceed u32::MAX".into(),
            ));
        }
        if self.coin_lifetime_ticks == 0 {
            return Err(ConfigError::Invalid(
                "coin_lifetime_ticks must be greater than zero".into(),
            ));
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::Invalid(
                "tick_rate must be greater than zero".into(),
            ));
        }
        if self.event_capacity == 0 {
            return Err(ConfigError::Invalid(
                "event_capacity must be greater than zero".into(),
            ));
        }
        if self.spawn.burst_min > self.spawn.burst_max {
            return Err(ConfigError::Invalid(format!(
                "burst_min ({}) cannot exceed burst_max ({})",
                self.spawn.burst_min, self.spawn.burst_max
            )));
        }
        if !self.spawn.arena_half_extent.is_finite() || self.spawn.arena_half_extent < 0.0 {
            return Err(ConfigError::Invalid(
                "arena_half_extent must be finite and non-negative".into(),
            ));
        }
        Ok(())
    }
}
