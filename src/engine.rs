use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{GridSize, SimulationConfig};
use crate::food::spawn_position;
use crate::input::{direction_change_is_valid, Direction};
use crate::snake::{Position, Snake};

/// Whether the simulation is still advancing.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Running,
    Ended,
}

/// Why a simulation ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    WallCollision,
    SelfCollision,
    /// The snake covers every cell, so no target can be placed.
    BoardFilled,
}

/// Result of one [`SimulationEngine::step`] call.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StepOutcome {
    /// The simulation had already ended; nothing changed.
    Idle,
    Moved,
    Ate,
    Ended(EndReason),
}

/// Read-only copy of the simulation state for rendering.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Snapshot {
    pub grid: GridSize,
    /// Body cells, head first.
    pub body: Vec<Position>,
    pub target: Position,
    pub score: u32,
    pub terminal: bool,
    pub status: Status,
    pub end_reason: Option<EndReason>,
    pub heading: Direction,
    pub tick_count: u64,
}

impl Snapshot {
    #[must_use]
    pub fn head(&self) -> Option<Position> {
        self.body.first().copied()
    }
}

/// Tick-driven simulation of a snake greedily chasing a player-steered target.
///
/// Axis priority is fixed: vertical desire is checked before horizontal.
#[derive(Debug, Clone)]
pub struct SimulationEngine<R = StdRng> {
    grid: GridSize,
    snake: Snake,
    target: Position,
    score: u32,
    status: Status,
    end_reason: Option<EndReason>,
    tick_count: u64,
    rng: R,
}

impl SimulationEngine<StdRng> {
    /// Creates an engine from validated settings, seeding from the config when set.
    #[must_use]
    pub fn from_config(config: &SimulationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config.grid, rng)
    }

    /// Creates a deterministic engine for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(grid: GridSize, seed: u64) -> Self {
        Self::with_rng(grid, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SimulationEngine<R> {
    /// Creates an engine in its start state using `rng` for target placement.
    #[must_use]
    pub fn with_rng(grid: GridSize, rng: R) -> Self {
        debug_assert!(
            grid.start_body() != grid.start_target(),
            "grid {}x{} cannot separate start body and target",
            grid.width,
            grid.height
        );

        Self {
            grid,
            snake: Snake::new(grid.start_body()),
            target: grid.start_target(),
            score: 0,
            status: Status::Running,
            end_reason: None,
            tick_count: 0,
            rng,
        }
    }

    /// Replaces a fresh state with an explicit body and target.
    #[must_use]
    pub fn with_state(mut self, snake: Snake, target: Position) -> Self {
        self.snake = snake;
        self.target = target;
        self
    }

    /// Replaces the whole state with the start state. The random source is kept.
    pub fn reset(&mut self) {
        self.snake = Snake::new(self.grid.start_body());
        self.target = self.grid.start_target();
        self.score = 0;
        self.status = Status::Running;
        self.end_reason = None;
        self.tick_count = 0;
        debug!("simulation reset");
    }

    /// Nudges the target one cell, clamped to the grid. No-op once ended.
    ///
    /// The target may land on the snake; that is resolved on the next step.
    pub fn relocate_target(&mut self, direction: Direction) {
        if self.is_terminal() {
            return;
        }

        self.target = self.target.shifted_clamped(direction, self.grid);
    }

    /// Advances the simulation by one tick.
    pub fn step(&mut self) -> StepOutcome {
        if self.is_terminal() {
            return StepOutcome::Idle;
        }

        self.tick_count += 1;
        let head = self.snake.head();
        let heading = self.snake.heading();
        let next_move = choose_move(head, heading, self.target);
        let new_head = head.shifted(next_move);

        if !new_head.is_within_bounds(self.grid) {
            return self.end(EndReason::WallCollision);
        }
        // Checked against the pre-move body, tail included.
        if self.snake.occupies(new_head) {
            return self.end(EndReason::SelfCollision);
        }

        let ate = new_head == self.target;
        self.snake.advance(new_head, ate);

        if !ate {
            debug!(tick = self.tick_count, ?next_move, x = new_head.x, y = new_head.y, "moved");
            return StepOutcome::Moved;
        }

        self.score += 1;
        info!(score = self.score, length = self.snake.len(), "target consumed");

        match spawn_position(&mut self.rng, self.grid, &self.snake) {
            Ok(target) => {
                self.target = target;
                StepOutcome::Ate
            }
            Err(error) => {
                debug!(%error, "target placement failed");
                self.end(EndReason::BoardFilled)
            }
        }
    }

    /// Returns a detached copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.grid,
            body: self.snake.segments().copied().collect(),
            target: self.target,
            score: self.score,
            terminal: self.is_terminal(),
            status: self.status,
            end_reason: self.end_reason,
            heading: self.snake.heading(),
            tick_count: self.tick_count,
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status == Status::Ended
    }

    fn end(&mut self, reason: EndReason) -> StepOutcome {
        self.status = Status::Ended;
        self.end_reason = Some(reason);
        info!(
            ?reason,
            score = self.score,
            length = self.snake.len(),
            tick = self.tick_count,
            "simulation ended"
        );
        StepOutcome::Ended(reason)
    }
}

/// Greedy, non-reversing move toward `target`: vertical first, then horizontal.
#[must_use]
pub fn choose_move(head: Position, heading: Direction, target: Position) -> Direction {
    let wants = [
        (Direction::Up, target.y < head.y),
        (Direction::Right, target.x > head.x),
        (Direction::Down, target.y > head.y),
        (Direction::Left, target.x < head.x),
    ];

    wants
        .into_iter()
        .find(|&(direction, wanted)| wanted && direction_change_is_valid(heading, direction))
        .map_or(heading, |(direction, _)| direction)
}
