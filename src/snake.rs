use std::collections::VecDeque;

use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
///
/// Coordinates are signed so a head stepping off the board can be
/// represented; that out-of-bounds value is the wall-collision signal.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    /// Returns true when the cell lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring cell one unit away in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self {
                x: self.x,
                y: self.y - 1,
            },
            Direction::Down => Self {
                x: self.x,
                y: self.y + 1,
            },
            Direction::Left => Self {
                x: self.x - 1,
                y: self.y,
            },
            Direction::Right => Self {
                x: self.x + 1,
                y: self.y,
            },
        }
    }
}

/// Ordered snake body, head first.
///
/// The body only changes through the primitive edits below; the tick in
/// [`crate::game::GameState::tick`] decides which of them to apply.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// Creates a one-cell snake at `start`.
    #[must_use]
    pub fn new(start: Cell) -> Self {
        let mut body = VecDeque::new();
        body.push_front(start);

        Self { body }
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Cell>) -> Self {
        debug_assert!(!segments.is_empty());

        Self {
            body: VecDeque::from(segments),
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the current tail position.
    #[must_use]
    pub fn tail(&self) -> Option<Cell> {
        self.body.back().copied()
    }

    /// Places a new head in front of the body.
    pub fn push_head(&mut self, cell: Cell) {
        self.body.push_front(cell);
    }

    /// Drops the tail segment and returns the cell it vacated.
    pub fn pop_tail(&mut self) -> Option<Cell> {
        self.body.pop_back()
    }

    /// Re-attaches a previously popped tail segment.
    pub fn push_tail(&mut self, cell: Cell) {
        self.body.push_back(cell);
    }

    /// Appends `count` copies of the current tail cell.
    ///
    /// The copies stack on the tail and unfold one per tick as the snake moves.
    pub fn grow_from_tail(&mut self, count: usize) {
        let Some(tail) = self.tail() else {
            return;
        };

        for _ in 0..count {
            self.body.push_back(tail);
        }
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
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
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::input::Direction;

    use super::{Cell, Snake};

    const BOUNDS: GridSize = GridSize {
        width: 10,
        height: 8,
    };

    #[test]
    fn bounds_check_rejects_every_edge() {
        assert!(Cell { x: 0, y: 0 }.is_within_bounds(BOUNDS));
        assert!(Cell { x: 9, y: 7 }.is_within_bounds(BOUNDS));

        assert!(!Cell { x: -1, y: 3 }.is_within_bounds(BOUNDS));
        assert!(!Cell { x: 10, y: 3 }.is_within_bounds(BOUNDS));
        assert!(!Cell { x: 3, y: -1 }.is_within_bounds(BOUNDS));
        assert!(!Cell { x: 3, y: 8 }.is_within_bounds(BOUNDS));
    }

    #[test]
    fn step_moves_one_unit() {
        let origin = Cell { x: 5, y: 5 };

        assert_eq!(origin.step(Direction::Up), Cell { x: 5, y: 4 });
        assert_eq!(origin.step(Direction::Down), Cell { x: 5, y: 6 });
        assert_eq!(origin.step(Direction::Left), Cell { x: 4, y: 5 });
        assert_eq!(origin.step(Direction::Right), Cell { x: 6, y: 5 });
    }

    #[test]
    fn grow_from_tail_duplicates_tail_value() {
        let mut snake = Snake::from_segments(vec![Cell { x: 3, y: 1 }, Cell { x: 2, y: 1 }]);

        snake.grow_from_tail(2);

        assert_eq!(snake.len(), 4);
        let segments: Vec<Cell> = snake.segments().copied().collect();
        assert_eq!(
            segments,
            vec![
                Cell { x: 3, y: 1 },
                Cell { x: 2, y: 1 },
                Cell { x: 2, y: 1 },
                Cell { x: 2, y: 1 },
            ]
        );
    }

    #[test]
    fn pop_then_push_tail_restores_body() {
        let mut snake = Snake::from_segments(vec![Cell { x: 1, y: 1 }, Cell { x: 0, y: 1 }]);

        let vacated = snake.pop_tail().expect("two-segment snake has a tail");
        assert!(!snake.occupies(vacated));

        snake.push_tail(vacated);
        assert_eq!(snake.tail(), Some(Cell { x: 0, y: 1 }));
        assert_eq!(snake.len(), 2);
    }
}
