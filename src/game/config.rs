use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Configuration for the game
///
/// The board itself is fixed (see [`crate::game::grid`]); everything here tunes
/// what is placed on it and how the rival behaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Initial length of the player snake
    pub player_length: usize,
    /// Initial length of the rival snake
    pub enemy_length: usize,
    /// Number of food items placed when a session starts
    pub initial_food: usize,
    /// Fewest obstacle shapes per session
    pub min_obstacles: usize,
    /// Most obstacle shapes per session
    pub max_obstacles: usize,

    /// The rival rescores its heading on a 1-in-N roll each tick
    pub enemy_reevaluate_one_in: u32,
    /// Food the rival eats is not replaced on a 1-in-N roll...
    pub scarcity_one_in: u32,
    /// ...as long as more than this many items are still on the board
    pub scarcity_min_remaining: usize,

    /// Simulation ticks per second
    pub tick_rate_hz: u32,
    /// Retry cap when looking for a free food cell
    pub max_spawn_attempts: u32,
    /// Fixed RNG seed; fresh entropy when unset
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_length: 3,
            enemy_length: 7,
            initial_food: 5,
            min_obstacles: 5,
            max_obstacles: 10,
            enemy_reevaluate_one_in: 8,
            scarcity_one_in: 3,
            scarcity_min_remaining: 2,
            tick_rate_hz: 12,
            max_spawn_attempts: 10_000,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Default configuration with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Open board: no obstacles, handy for scripted games
    pub fn open() -> Self {
        Self {
            min_obstacles: 0,
            max_obstacles: 0,
            ..Default::default()
        }
    }

    /// Load from a JSON file. Missing fields fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to deserialize config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.player_length == 0 || self.enemy_length == 0 {
            return Err(GameError::InvalidConfig(
                "snake lengths must be at least 1".to_string(),
            ));
        }
        if self.min_obstacles > self.max_obstacles {
            return Err(GameError::InvalidConfig(format!(
                "min_obstacles ({}) exceeds max_obstacles ({})",
                self.min_obstacles, self.max_obstacles
            )));
        }
        if self.enemy_reevaluate_one_in == 0 || self.scarcity_one_in == 0 {
            return Err(GameError::InvalidConfig(
                "1-in-N odds need N >= 1".to_string(),
            ));
        }
        if self.tick_rate_hz == 0 {
            return Err(GameError::InvalidConfig(
                "tick_rate_hz must be positive".to_string(),
            ));
        }
        if self.max_spawn_attempts == 0 {
            return Err(GameError::InvalidConfig(
                "max_spawn_attempts must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
