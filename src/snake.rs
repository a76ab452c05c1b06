use std::collections::{HashSet, VecDeque};

use rand::Rng;

use crate::grid::{GridSize, Position};
use crate::input::{Direction, direction_change_is_valid};

/// Mutable snake state and movement buffering behavior.
///
/// Segments are stored head first. The body only gets longer when
/// `target_length` exceeds the current segment count at the moment the snake
/// advances.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
    target_length: usize,
    direction: Direction,
    pending_direction: Option<Direction>,
}

impl Snake {
    /// Creates a one-cell snake at `start` with the provided direction.
    #[must_use]
    pub fn new(start: Position, direction: Direction) -> Self {
        let mut body = VecDeque::new();
        body.push_front(start);

        Self {
            body,
            target_length: 1,
            direction,
            pending_direction: None,
        }
    }

    /// Creates a snake from explicit body segments (front is head). The target
    /// length matches the number of segments.
    ///
    /// # Panics
    ///
    /// Panics if `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        assert!(!segments.is_empty(), "snake needs at least one segment");
        let target_length = segments.len();

        Self {
            body: VecDeque::from(segments),
            target_length,
            direction,
            pending_direction: None,
        }
    }

    /// Buffers a direction change for the next tick.
    ///
    /// Requests that reverse the current direction are dropped. A later
    /// accepted request replaces an earlier one.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        if direction_change_is_valid(self.direction, direction) {
            self.pending_direction = Some(direction);
        }
    }

    /// Applies one movement step.
    pub fn advance(&mut self, bounds: GridSize) {
        debug_assert!(bounds.width > 0 && bounds.height > 0);

        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }

        let next_head = self.head().step(self.direction, bounds);
        self.body.push_front(next_head);
        if self.body.len() > self.target_length {
            let _ = self.body.pop_back();
        }
    }

    /// Raises the target length by one; the extra segment appears on the
    /// next advance.
    pub fn grow(&mut self) {
        self.target_length += 1;
    }

    /// Shrinks back to a single segment at `center`, facing a random direction.
    pub fn reset<R: Rng + ?Sized>(&mut self, center: Position, rng: &mut R) {
        self.body.clear();
        self.body.push_front(center);
        self.target_length = 1;
        self.direction = Direction::random(rng);
        self.pending_direction = None;
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        // `new`, `from_segments` and `reset` all leave at least one segment.
        self.body[0]
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns every occupied cell as a set.
    #[must_use]
    pub fn occupied_cells(&self) -> HashSet<Position> {
        self.body.iter().copied().collect()
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

    /// Returns the length the snake is growing towards.
    #[must_use]
    pub fn target_length(&self) -> usize {
        self.target_length
    }

    /// Returns the current movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the buffered direction, if any.
    #[must_use]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
