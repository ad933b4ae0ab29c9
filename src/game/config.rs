use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// What happens when the head leaves the grid sideways
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Every wall is fatal
    #[default]
    Solid,
    /// Left and right edges wrap around; top and bottom are still fatal
    WrapHorizontal,
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Horizontal edge behaviour
    pub boundary: BoundaryPolicy,
    /// Score gained per food eaten
    pub points_per_food: u32,
    /// Score at which the high-contrast palette switches on
    pub high_contrast_threshold: u32,
    /// Milliseconds between game ticks
    pub tick_interval_ms: u64,
    /// Start on the title menu instead of straight into play
    pub show_menu: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            initial_snake_length: 3,
            boundary: BoundaryPolicy::Solid,
            points_per_food: 10,
            high_contrast_threshold: 100,
            tick_interval_ms: 150,
            show_menu: true,
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

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        config
            .validate()
            .map_err(|e| anyhow!(e))
            .with_context(|| format!("Invalid config in {:?}", path))?;
        Ok(config)
    }

    /// Check the configuration, reporting the first invalid field
    pub fn validate(&self) -> Result<(), String> {
        if !(5..=200).contains(&self.grid_width) {
            return Err(format!(
                "grid_width must be in [5, 200], got {}",
                self.grid_width
            ));
        }

        if !(5..=200).contains(&self.grid_height) {
            return Err(format!(
                "grid_height must be in [5, 200], got {}",
                self.grid_height
            ));
        }

        if self.initial_snake_length == 0 {
            return Err("initial_snake_length must be at least 1".to_string());
        }

        // The head spawns at x = length + 2 and needs room to move right.
        if self.initial_snake_length + 3 > self.grid_width {
            return Err(format!(
                "initial_snake_length ({}) does not fit a grid {} cells wide",
                self.initial_snake_length, self.grid_width
            ));
        }

        if self.points_per_food == 0 {
            return Err("points_per_food must be at least 1".to_string());
        }

        if !(20..=2000).contains(&self.tick_interval_ms) {
            return Err(format!(
                "tick_interval_ms must be in [20, 2000], got {}",
                self.tick_interval_ms
            ));
        }

        Ok(())
    }
}
