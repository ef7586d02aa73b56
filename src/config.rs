use std::time::Duration;

use crate::GridInt;
use crossterm::style::Color;

/// Immutable game configuration, passed by reference to whoever needs it.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Number of cells per row/column of the square playing field.
    pub grid_size: GridInt,
    /// Time between snake moves at score 0.
    pub base_interval: Duration,
    /// How much the move interval shrinks per food eaten.
    pub speedup_step: Duration,
    /// Lower bound for the move interval once speed-ups accumulate.
    pub min_interval: Duration,
    pub snake_color: Color,
    pub food_color: Color,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            grid_size: 25,
            base_interval: Duration::from_millis(200),
            speedup_step: Duration::from_millis(10),
            min_interval: Duration::from_millis(50),
            snake_color: Color::Rgb { r: 220, g: 222, b: 220 },
            food_color: Color::Rgb { r: 200, g: 50, b: 50 },
        }
    }
}

impl Config {
    pub fn cell_count(&self) -> usize {
        self.grid_size as usize * self.grid_size as usize
    }

    pub fn in_bounds(&self, (x, y): crate::Cell) -> bool {
        x >= 0 && y >= 0 && x < self.grid_size && y < self.grid_size
    }
}
