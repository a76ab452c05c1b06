use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::food::Food;
use crate::grid::GridSize;
use crate::input::{Direction, GameInput};
use crate::snake::Snake;

/// What happened during one tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The snake moved without touching anything.
    Moved,
    /// The head reached the food; the snake will grow.
    Consumed,
    /// The head ran into the body; the snake was reset.
    Collided,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState<R = StdRng> {
    pub snake: Snake,
    pub food: Food,
    pub tick_count: u64,
    pub collectibles_eaten: u32,
    pub resets: u32,
    bounds: GridSize,
    rng: R,
}

impl GameState<StdRng> {
    /// Creates a state seeded from the operating system.
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        Self::with_rng(bounds, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, seed: u64) -> Self {
        Self::with_rng(bounds, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameState<R> {
    /// Places a one-cell snake in the center, facing right, and food on a
    /// random free cell.
    pub fn with_rng(bounds: GridSize, mut rng: R) -> Self {
        let snake = Snake::new(bounds.center(), Direction::Right);
        let food = Food::spawn(&mut rng, bounds, &snake.occupied_cells());

        Self {
            snake,
            food,
            tick_count: 0,
            collectibles_eaten: 0,
            resets: 0,
            bounds,
            rng,
        }
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) -> TickOutcome {
        self.tick_count += 1;
        self.snake.advance(self.bounds);
        trace!(
            "tick {}: head at {:?}",
            self.tick_count,
            self.snake.head()
        );

        let outcome =
            apply_collision_rule(&mut self.snake, &mut self.food, self.bounds, &mut self.rng);
        match outcome {
            TickOutcome::Consumed => self.collectibles_eaten += 1,
            TickOutcome::Collided => self.resets += 1,
            TickOutcome::Moved => {}
        }
        outcome
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => self.snake.set_pending_direction(direction),
            GameInput::Quit => {}
        }
    }
}

impl<R> GameState<R> {
    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }
}

/// Resolves food and self-collisions after the snake has advanced.
///
/// The food check runs before the body check, and both run every tick. The
/// returned outcome reports the last one that fired.
pub fn apply_collision_rule<R: Rng + ?Sized>(
    snake: &mut Snake,
    food: &mut Food,
    bounds: GridSize,
    rng: &mut R,
) -> TickOutcome {
    let mut outcome = TickOutcome::Moved;

    if snake.head() == food.position {
        snake.grow();
        let position = food.relocate(rng, bounds, &snake.occupied_cells());
        debug!(
            "food eaten at {:?}, target length {}, food moved to {position:?}",
            snake.head(),
            snake.target_length()
        );
        outcome = TickOutcome::Consumed;
    }

    if snake.head_overlaps_body() {
        let length = snake.len();
        snake.reset(bounds.center(), rng);
        let position = food.relocate(rng, bounds, &snake.occupied_cells());
        info!(
            "self-collision at length {length}; reset facing {:?}, food moved to {position:?}",
            snake.direction()
        );
        outcome = TickOutcome::Collided;
    }

    outcome
}
