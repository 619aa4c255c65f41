use std::collections::VecDeque;

use serde::Serialize;

use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring cell in `direction`, which may lie off the grid.
    #[must_use]
    pub fn shifted(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns the neighbouring cell in `direction`, held against the grid edges.
    #[must_use]
    pub fn shifted_clamped(self, direction: Direction, bounds: GridSize) -> Self {
        let shifted = self.shifted(direction);
        Self {
            x: clamp_axis(shifted.x, i32::from(bounds.width)),
            y: clamp_axis(shifted.y, i32::from(bounds.height)),
        }
    }
}

fn clamp_axis(value: i32, upper_bound: i32) -> i32 {
    value.clamp(0, (upper_bound - 1).max(0))
}

/// Snake body, head first. Heading is derived from the head and neck.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Creates a one-cell snake at `start`.
    #[must_use]
    pub fn new(start: Position) -> Self {
        let mut body = VecDeque::new();
        body.push_front(start);

        Self { body }
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Position>) -> Self {
        let snake = Self {
            body: VecDeque::from(segments),
        };
        snake.debug_check();
        snake
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        debug_assert!(!self.body.is_empty(), "snake body must never be empty");
        self.body.front().copied().unwrap_or(Position { x: 0, y: 0 })
    }

    /// Returns the segment right behind the head, if any.
    #[must_use]
    pub fn neck(&self) -> Option<Position> {
        self.body.get(1).copied()
    }

    /// Infers the current travel direction from head and neck.
    ///
    /// A single-cell snake has no neck and heads up.
    #[must_use]
    pub fn heading(&self) -> Direction {
        let Some(neck) = self.neck() else {
            return Direction::Up;
        };
        let head = self.head();

        if head.y < neck.y {
            Direction::Up
        } else if head.x > neck.x {
            Direction::Right
        } else if head.y > neck.y {
            Direction::Down
        } else if head.x < neck.x {
            Direction::Left
        } else {
            debug_assert!(false, "head and neck share a cell");
            Direction::Up
        }
    }

    /// Pushes `new_head` and drops the tail unless `grow` is set.
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            let _ = self.body.pop_back();
        }
        self.debug_check();
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    fn debug_check(&self) {
        debug_assert!(!self.body.is_empty(), "snake body must never be empty");
        debug_assert!(
            self.body
                .iter()
                .enumerate()
                .all(|(i, cell)| !self.body.iter().skip(i + 1).any(|other| other == cell)),
            "snake body cells must be distinct"
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::input::Direction;

    use super::{Position, Snake};

    fn p(x: i32, y: i32) -> Position {
        Position { x, y }
    }

    #[test]
    fn clamped_shift_holds_at_every_edge() {
        let bounds = GridSize::square(10);

        assert_eq!(p(4, 0).shifted_clamped(Direction::Up, bounds), p(4, 0));
        assert_eq!(p(9, 4).shifted_clamped(Direction::Right, bounds), p(9, 4));
        assert_eq!(p(4, 9).shifted_clamped(Direction::Down, bounds), p(4, 9));
        assert_eq!(p(0, 4).shifted_clamped(Direction::Left, bounds), p(0, 4));
        assert_eq!(p(4, 4).shifted_clamped(Direction::Left, bounds), p(3, 4));
    }

    #[test]
    fn shift_may_leave_the_grid() {
        let bounds = GridSize::square(10);
        let off = p(0, 0).shifted(Direction::Up);

        assert_eq!(off, p(0, -1));
        assert!(!off.is_within_bounds(bounds));
        assert!(!p(10, 3).is_within_bounds(bounds));
        assert!(p(9, 9).is_within_bounds(bounds));
    }

    #[test]
    fn single_cell_snake_heads_up() {
        assert_eq!(Snake::new(p(5, 5)).heading(), Direction::Up);
    }

    #[test]
    fn heading_follows_head_relative_to_neck() {
        assert_eq!(
            Snake::from_segments(vec![p(0, 0), p(0, 1)]).heading(),
            Direction::Up
        );
        assert_eq!(
            Snake::from_segments(vec![p(3, 2), p(2, 2)]).heading(),
            Direction::Right
        );
        assert_eq!(
            Snake::from_segments(vec![p(2, 3), p(2, 2)]).heading(),
            Direction::Down
        );
        assert_eq!(
            Snake::from_segments(vec![p(0, 5), p(1, 5)]).heading(),
            Direction::Left
        );
    }

    #[test]
    fn advance_moves_or_grows() {
        let mut snake = Snake::new(p(5, 5));

        snake.advance(p(5, 4), false);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), p(5, 4));

        snake.advance(p(5, 3), true);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.segments().copied().collect::<Vec<_>>(), vec![p(5, 3), p(5, 4)]);
        assert!(!snake.occupies(p(5, 5)));
    }
}
