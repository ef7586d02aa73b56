use std::collections::VecDeque;

use crate::{Cell, GridInt};
use Direction::*;

const INITIAL_BODY: [Cell; 3] = [(9, 10), (8, 10), (7, 10)];
const INITIAL_DIRECTION: Direction = Right;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (GridInt, GridInt) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        matches!((self, other), (Up, Down) | (Down, Up) | (Left, Right) | (Right, Left))
    }
}

pub struct Snake {
    body: VecDeque<Cell>, // front = head
    direction: Direction,
    grow_next_move: bool,
}

impl Snake {
    pub fn new() -> Self {
        Snake {
            body: INITIAL_BODY.iter().copied().collect(),
            direction: INITIAL_DIRECTION,
            grow_next_move: false,
        }
    }

    #[cfg(test)]
    pub fn with_body(cells: &[Cell], direction: Direction) -> Self {
        Snake { body: cells.iter().copied().collect(), direction, grow_next_move: false }
    }

    pub fn body(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn head(&self) -> Cell {
        // Never empty: the body starts at 3 segments and only grows
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Moves the snake one cell along its current direction. The tail is
    /// kept when a growth is pending, consuming the pending flag.
    pub fn advance(&mut self) {
        let (dx, dy) = self.direction.delta();
        let head = self.head();
        self.body.push_front((head.0 + dx, head.1 + dy));

        if self.grow_next_move {
            self.grow_next_move = false;
        } else {
            self.body.pop_back();
        }
    }

    /// Sets the direction unconditionally; reversal filtering happens at
    /// the input boundary, see `GameState::steer`.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Marks the snake to keep its tail on the next `advance`.
    pub fn grow(&mut self) {
        self.grow_next_move = true;
    }

    /// Restores the fixed starting body and direction.
    pub fn reset(&mut self) {
        *self = Snake::new();
    }

    /// Self-collision test: whether `pos` occurs anywhere behind the head.
    pub fn contains_excluding_head(&self, pos: Cell) -> bool {
        self.body.iter().skip(1).any(|&c| c == pos)
    }

    pub fn occupies(&self, pos: Cell) -> bool {
        self.body.contains(&pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_fixed_body() {
        let snake = Snake::new();
        let body: Vec<Cell> = snake.body().collect();
        assert_eq!(body, vec![(9, 10), (8, 10), (7, 10)]);
        assert_eq!(snake.direction(), Right);
    }

    #[test]
    fn advance_moves_head_by_direction_delta() {
        for &dir in &[Up, Down, Left, Right] {
            let mut snake = Snake::new();
            snake.set_direction(dir);
            let (hx, hy) = snake.head();
            let (dx, dy) = dir.delta();
            snake.advance();
            assert_eq!(snake.head(), (hx + dx, hy + dy));
        }
    }

    #[test]
    fn advance_keeps_length_unless_growing() {
        let mut snake = Snake::new();
        snake.advance();
        assert_eq!(snake.len(), 3);

        snake.grow();
        snake.advance();
        assert_eq!(snake.len(), 4);

        // The grow flag is consumed by a single advance
        snake.advance();
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut snake = Snake::new();
        snake.grow();
        snake.advance();
        snake.set_direction(Down);
        snake.advance();

        snake.reset();
        let once: Vec<Cell> = snake.body().collect();
        snake.reset();
        let twice: Vec<Cell> = snake.body().collect();

        assert_eq!(once, twice);
        assert_eq!(once, vec![(9, 10), (8, 10), (7, 10)]);
        assert_eq!(snake.direction(), Right);
    }

    #[test]
    fn membership_scans() {
        let snake = Snake::with_body(&[(5, 5), (4, 5), (3, 5)], Right);
        assert!(!snake.contains_excluding_head((5, 5))); // head excluded
        assert!(snake.contains_excluding_head((4, 5)));
        assert!(snake.occupies((5, 5)));
        assert!(snake.occupies((3, 5)));
        assert!(!snake.occupies((10, 10)));
    }

    #[test]
    fn opposite_directions() {
        assert!(Up.is_opposite(Down));
        assert!(Left.is_opposite(Right));
        assert!(!Up.is_opposite(Left));
        assert!(!Down.is_opposite(Down));
    }
}
