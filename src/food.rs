use std::collections::HashSet;

use rand::Rng;

use crate::grid::{GridSize, Position};

/// The single collectible currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    /// Creates food at `position`.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Spawns food in a cell not contained in `occupied`.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: GridSize,
        occupied: &HashSet<Position>,
    ) -> Self {
        Self::new(random_free_position(rng, bounds, occupied))
    }

    /// Moves the food to a uniformly random cell outside `occupied` and
    /// returns the new position.
    ///
    /// Keeps drawing cells until it hits a free one, so this never returns
    /// when `occupied` covers the whole grid.
    pub fn relocate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        bounds: GridSize,
        occupied: &HashSet<Position>,
    ) -> Position {
        self.position = random_free_position(rng, bounds, occupied);
        self.position
    }

    /// Like [`Food::relocate`], but draws exactly once from the list of free
    /// cells. Returns `None` and leaves the food in place when the grid is
    /// full.
    pub fn relocate_bounded<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        bounds: GridSize,
        occupied: &HashSet<Position>,
    ) -> Option<Position> {
        let candidates: Vec<Position> = bounds
            .cells()
            .filter(|position| !occupied.contains(position))
            .collect();

        if candidates.is_empty() {
            return None;
        }

        let index = rng.gen_range(0..candidates.len());
        self.position = candidates[index];
        Some(self.position)
    }
}

/// Rejection-samples a cell that is not in `occupied`.
fn random_free_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    occupied: &HashSet<Position>,
) -> Position {
    debug_assert!(
        occupied.len() < bounds.total_cells(),
        "no free cells on the board ({}×{})",
        bounds.width,
        bounds.height,
    );

    loop {
        let candidate = Position {
            x: rng.gen_range(0..i32::from(bounds.width)),
            y: rng.gen_range(0..i32::from(bounds.height)),
        };
        if !occupied.contains(&candidate) {
            return candidate;
        }
    }
}
