use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::grid::Grid;

/// Configuration for a game session.
///
/// Grid dimensions are not set directly: they derive from the canvas size
/// and cell size the rendering surface supplies, as
/// `floor(canvas / cell_size)` per axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Canvas width in pixels
    pub canvas_width: u32,
    /// Canvas height in pixels
    pub canvas_height: u32,
    /// Edge of one square cell in pixels
    pub cell_size: u32,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Points awarded per food item
    pub food_points: u32,
    /// Tick interval at the start of a game, in milliseconds
    pub start_interval_ms: u64,
    /// Interval reduction per food item, in milliseconds
    pub speed_step_ms: u64,
    /// Smallest allowed tick interval, in milliseconds
    pub min_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 400,
            canvas_height: 400,
            cell_size: 20,
            initial_snake_length: 3,
            food_points: 10,
            start_interval_ms: 150,
            speed_step_ms: 2,
            min_interval_ms: 50,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom canvas dimensions
    pub fn new(canvas_width: u32, canvas_height: u32, cell_size: u32) -> Self {
        Self {
            canvas_width,
            canvas_height,
            cell_size,
            ..Default::default()
        }
    }

    /// Create a small 10x10 grid for testing
    pub fn small() -> Self {
        Self::new(200, 200, 20)
    }

    pub fn grid_width(&self) -> u32 {
        self.canvas_width / self.cell_size
    }

    pub fn grid_height(&self) -> u32 {
        self.canvas_height / self.cell_size
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width() as i32, self.grid_height() as i32)
    }

    pub fn start_interval(&self) -> Duration {
        Duration::from_millis(self.start_interval_ms)
    }

    pub fn speed_step(&self) -> Duration {
        Duration::from_millis(self.speed_step_ms)
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    /// Reject configurations the simulation cannot run on. Called once at
    /// session construction; per-tick code assumes these hold.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.cell_size > 0, "cell size must be positive");
        ensure!(
            self.canvas_width >= self.cell_size && self.canvas_height >= self.cell_size,
            "canvas {}x{} is smaller than one {}px cell",
            self.canvas_width,
            self.canvas_height,
            self.cell_size
        );
        ensure!(
            self.initial_snake_length >= 3,
            "initial snake length must be at least 3, got {}",
            self.initial_snake_length
        );

        // The snake spawns at the grid center extending left, so the tail
        // must not reach past the left edge, and the grid needs at least one
        // free cell for food.
        let width = self.grid_width() as usize;
        let height = self.grid_height() as usize;
        ensure!(
            self.initial_snake_length <= width / 2 + 1,
            "initial snake of length {} does not fit a {}-cell-wide grid",
            self.initial_snake_length,
            width
        );
        ensure!(
            width * height > self.initial_snake_length,
            "a {}x{} grid has no room for food",
            width,
            height
        );

        ensure!(
            self.min_interval_ms > 0,
            "minimum tick interval must be positive"
        );
        ensure!(
            self.start_interval_ms >= self.min_interval_ms,
            "start interval {}ms is below the {}ms floor",
            self.start_interval_ms,
            self.min_interval_ms
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width(), 20);
        assert_eq!(config.grid_height(), 20);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.start_interval(), Duration::from_millis(150));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_grid_dimensions_round_down() {
        let config = GameConfig::new(410, 395, 20);
        assert_eq!(config.grid_width(), 20);
        assert_eq!(config.grid_height(), 19);
    }

    #[test]
    fn test_zero_cell_size_is_rejected() {
        let mut config = GameConfig::default();
        config.cell_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_degenerate_canvas_is_rejected() {
        assert!(GameConfig::new(10, 400, 20).validate().is_err());
        assert!(GameConfig::new(400, 10, 20).validate().is_err());
    }

    #[test]
    fn test_snake_must_fit_grid() {
        // A 4x4 grid fits the default snake, but not one of length 4
        let mut config = GameConfig::new(80, 80, 20);
        assert!(config.validate().is_ok());
        config.initial_snake_length = 4;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_start_interval_below_floor_is_rejected() {
        let mut config = GameConfig::default();
        config.start_interval_ms = 40;
        assert!(config.validate().is_err());
    }
}
