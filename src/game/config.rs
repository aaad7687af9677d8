use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::pathfinding::StrategyKind;

/// Reasons a [`GameConfig`] cannot be used to start a game
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid must be at least 2x2, got {width}x{height}")]
    GridTooSmall { width: usize, height: usize },

    #[error("initial_snake_length must be at least 1")]
    EmptySnake,

    #[error("initial snake of length {length} does not fit left of column {center} on a {width}-wide grid")]
    SnakeTooLong {
        length: usize,
        center: usize,
        width: usize,
    },

    #[error("tick_rate_ms must be positive")]
    ZeroTickRate,
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Milliseconds between simulation ticks
    pub tick_rate_ms: u64,
    /// Route search used by the autopilot
    pub strategy: StrategyKind,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 17,
            initial_snake_length: 3,
            tick_rate_ms: 100,
            strategy: StrategyKind::Bfs,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Create a large grid
    pub fn large() -> Self {
        Self::new(30, 30)
    }

    /// Load a configuration from a JSON file; absent fields keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config in {:?}", path))
    }

    /// Column the snake's head starts in
    pub fn start_column(&self) -> usize {
        self.grid_width / 2
    }

    /// Check that a game can be started with this configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width < 2 || self.grid_height < 2 {
            return Err(ConfigError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        if self.initial_snake_length == 0 {
            return Err(ConfigError::EmptySnake);
        }

        // Body trails left of the head, so it needs start_column free cells
        if self.initial_snake_length > self.start_column() + 1 {
            return Err(ConfigError::SnakeTooLong {
                length: self.initial_snake_length,
                center: self.start_column(),
                width: self.grid_width,
            });
        }

        if self.tick_rate_ms == 0 {
            return Err(ConfigError::ZeroTickRate);
        }

        Ok(())
    }
}
