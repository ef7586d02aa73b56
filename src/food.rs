use rand::Rng;

use crate::config::Config;
use crate::snake::Snake;
use crate::Cell;

pub struct Food {
    position: Cell,
}

impl Food {
    /// Samples a uniformly random free cell. Returns `None` when the snake
    /// covers the whole grid, which is the win condition: the retry loop
    /// would otherwise never terminate.
    pub fn spawn<R: Rng>(rng: &mut R, config: &Config, snake: &Snake) -> Option<Food> {
        if snake.len() >= config.cell_count() {
            return None;
        }

        loop {
            let pos = (
                rng.gen_range(0..config.grid_size),
                rng.gen_range(0..config.grid_size),
            );
            if !snake.occupies(pos) {
                return Some(Food { position: pos });
            }
        }
    }

    #[cfg(test)]
    pub fn at(position: Cell) -> Food {
        Food { position }
    }

    pub fn position(&self) -> Cell {
        self.position
    }
}
