use std::cmp::max;
use std::time::Duration;

use rand::rngs::ThreadRng;

use crate::config::Config;
use crate::food::Food;
use crate::snake::{Direction, Snake};

/// What a single gated tick did to the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickResult {
    /// Frozen after a death or win; nothing changed.
    Idle,
    Moved,
    Ate,
    Died,
    /// The snake filled the grid; there was nowhere left to put food.
    Won,
}

/// The game-state aggregate: snake, food, score, and the current move
/// interval as a single owned field rather than a value threaded by
/// mutable reference through the collision checks.
pub struct GameState {
    config: Config,
    snake: Snake,
    food: Food,
    score: u32,
    high_score: u32,
    running: bool,
    move_interval: Duration,
    rng: ThreadRng,
}

impl GameState {
    pub fn new(config: Config) -> Self {
        let mut rng = rand::thread_rng();
        let snake = Snake::new();
        let food = Food::spawn(&mut rng, &config, &snake).unwrap();

        GameState {
            config,
            snake,
            food,
            score: 0,
            high_score: 0,
            running: true,
            move_interval: config.base_interval,
            rng,
        }
    }

    /// Runs one tick: move, then food / wall / self checks, in that order.
    pub fn update(&mut self) -> TickResult {
        if !self.running {
            return TickResult::Idle;
        }

        self.snake.advance();
        let head = self.snake.head();
        let mut result = TickResult::Moved;

        if head == self.food.position() {
            self.score += 1;
            self.high_score = max(self.high_score, self.score);

            match Food::spawn(&mut self.rng, &self.config, &self.snake) {
                Some(food) => {
                    self.food = food;
                    self.snake.grow();
                    // Speed up, but keep the tick gate strictly positive
                    self.move_interval = max(
                        self.move_interval.saturating_sub(self.config.speedup_step),
                        self.config.min_interval,
                    );
                    result = TickResult::Ate;
                }
                None => {
                    self.game_over();
                    return TickResult::Won;
                }
            }
        }

        if !self.config.in_bounds(head) {
            self.game_over();
            return TickResult::Died;
        }

        if self.snake.contains_excluding_head(head) {
            self.game_over();
            return TickResult::Died;
        }

        result
    }

    /// Applies a directional input. Exact reversals are rejected so the
    /// snake can't fold onto its own neck; an accepted steer also resumes
    /// a board frozen by a previous death or win.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if direction.is_opposite(self.snake.direction()) {
            return false;
        }

        self.snake.set_direction(direction);
        self.running = true;
        true
    }

    // Resets everything but the high score and leaves the board frozen
    // until the next accepted steer.
    fn game_over(&mut self) {
        self.running = false;
        self.snake.reset();
        self.move_interval = self.config.base_interval;
        self.food = Food::spawn(&mut self.rng, &self.config, &self.snake).unwrap();
        self.score = 0;
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> crate::Cell {
        self.food.position()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn move_interval(&self) -> Duration {
        self.move_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cell;
    use Direction::*;

    fn state() -> GameState {
        GameState::new(Config::default())
    }

    #[test]
    fn eating_grows_scores_and_speeds_up() {
        let mut st = state();
        st.food = Food::at((10, 10)); // directly in front of the head

        assert_eq!(st.update(), TickResult::Ate);
        assert_eq!(st.snake.head(), (10, 10));
        assert_eq!(st.score(), 1);
        assert_eq!(st.high_score(), 1);
        assert_eq!(st.move_interval(), Duration::from_millis(190));
        // Growth is pending, not applied yet
        assert_eq!(st.snake.len(), 3);

        st.update();
        assert_eq!(st.snake.len(), 4);

        // The respawned food avoids every segment
        let food = st.food();
        assert!(!st.snake.occupies(food));
    }

    #[test]
    fn length_is_constant_on_foodless_ticks() {
        let mut st = state();
        st.food = Food::at((0, 0)); // out of the snake's path

        for _ in 0..5 {
            st.update();
            assert_eq!(st.snake.len(), 3);
        }
    }

    #[test]
    fn wall_exit_resets_the_board() {
        let mut st = state();
        st.snake = Snake::with_body(&[(24, 10), (23, 10), (22, 10)], Right);
        st.food = Food::at((0, 0));
        st.score = 3;
        st.high_score = 3;
        st.move_interval = Duration::from_millis(170);

        assert_eq!(st.update(), TickResult::Died);
        assert!(!st.running());
        assert_eq!(st.score(), 0);
        assert_eq!(st.high_score(), 3);
        assert_eq!(st.move_interval(), Duration::from_millis(200));

        let body: Vec<Cell> = st.snake.body().collect();
        assert_eq!(body, vec![(9, 10), (8, 10), (7, 10)]);
        assert!(!st.snake.occupies(st.food()));
    }

    #[test]
    fn self_collision_kills_on_the_entry_tick() {
        // U-turn: the head comes back onto the second segment
        let mut st = state();
        st.snake = Snake::with_body(&[(5, 6), (6, 6), (6, 5), (5, 5), (4, 5)], Up);
        st.food = Food::at((0, 0));

        assert_eq!(st.update(), TickResult::Died);
        assert!(!st.running());
    }

    #[test]
    fn frozen_board_resumes_on_steer_but_not_before_a_tick() {
        let mut st = state();
        st.snake = Snake::with_body(&[(24, 10), (23, 10), (22, 10)], Right);
        st.food = Food::at((0, 0));
        st.update(); // dies on the wall
        st.food = Food::at((0, 0)); // keep the respawned food out of the way

        assert_eq!(st.update(), TickResult::Idle);
        let frozen: Vec<Cell> = st.snake.body().collect();

        assert!(st.steer(Down));
        assert!(st.running());
        // Steering alone never moves the snake
        let after_steer: Vec<Cell> = st.snake.body().collect();
        assert_eq!(frozen, after_steer);

        assert_eq!(st.update(), TickResult::Moved);
        assert_eq!(st.snake.head(), (9, 11));
    }

    #[test]
    fn reversals_are_rejected_and_do_not_resume() {
        let mut st = state();
        st.snake = Snake::with_body(&[(24, 10), (23, 10), (22, 10)], Right);
        st.food = Food::at((0, 0));
        st.update(); // dies, direction back to Right

        assert!(!st.steer(Left));
        assert!(!st.running());
        assert_eq!(st.snake.direction(), Right);
    }

    #[test]
    fn high_score_is_monotone_across_resets() {
        let mut st = state();
        st.food = Food::at((10, 10));
        st.update();
        assert_eq!(st.high_score(), 1);

        st.snake = Snake::with_body(&[(24, 10), (23, 10), (22, 10)], Right);
        st.food = Food::at((0, 0));
        st.update(); // death resets the score only
        assert_eq!(st.score(), 0);
        assert_eq!(st.high_score(), 1);
    }

    #[test]
    fn filling_the_grid_wins() {
        // 2x2 grid, snake on 3 cells with a growth pending, food on the
        // last free cell: eating it leaves no room for a respawn
        let config = Config { grid_size: 2, ..Config::default() };
        let mut st = GameState::new(config);
        st.snake = Snake::with_body(&[(0, 1), (0, 0), (1, 0)], Right);
        st.snake.grow();
        st.food = Food::at((1, 1));

        assert_eq!(st.update(), TickResult::Won);
        assert!(!st.running());
        assert_eq!(st.high_score(), 1);
        assert_eq!(st.score(), 0);
    }

    #[test]
    fn eat_then_die_then_resume_full_round() {
        // One full round: eat, grow, crash into the wall, un-freeze
        let mut st = state();
        st.food = Food::at((10, 10));

        assert_eq!(st.update(), TickResult::Ate);
        assert_eq!(st.score(), 1);
        assert_eq!(st.move_interval(), Duration::from_millis(190));
        st.update();
        assert_eq!(st.snake.len(), 4);

        st.snake = Snake::with_body(&[(24, 10), (23, 10), (22, 10)], Right);
        st.food = Food::at((0, 0));
        assert_eq!(st.update(), TickResult::Died);
        st.food = Food::at((0, 0));

        assert_eq!(st.update(), TickResult::Idle);
        assert!(st.steer(Down));
        assert_eq!(st.snake.head(), (9, 10)); // steering alone moved nothing
        assert_eq!(st.update(), TickResult::Moved);
        assert_eq!(st.snake.head(), (9, 11));
        assert_eq!(st.high_score(), 1);
    }

    #[test]
    fn interval_clamps_at_the_floor() {
        let mut st = state();
        st.move_interval = Duration::from_millis(55);
        st.food = Food::at((10, 10));
        st.update();
        assert_eq!(st.move_interval(), Duration::from_millis(50));
    }
}
