use anyhow::{Context, Result};
use rand::rngs::ThreadRng;
use std::time::Duration;

use super::collision::{self, CollisionKind};
use super::config::GameConfig;
use super::direction::Direction;
use super::food;
use super::grid::{Cell, Grid};
use super::policy;
use super::snake::Snake;
use crate::highscore::ScoreStore;

/// Top-level lifecycle of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Initialized and waiting for start
    Ready,
    /// Ticking
    Running,
    /// Frozen mid-game, timer stopped
    Paused,
    /// Terminal: the snake collided, or filled the grid
    Over,
}

/// Directive for the external tick timer.
///
/// The session never owns the timer; every mutating entry point hands back
/// the command the scheduler must apply, so that rescheduling stays an
/// explicit, idempotent operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// (Re)arm the timer at the given period
    Start(Duration),
    /// Keep ticking, but at a new period measured from now
    Reschedule(Duration),
    /// Disarm the timer
    Stop,
}

/// What one tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// The collision that ended the game, if one occurred
    pub collision: Option<CollisionKind>,
    /// Timer directive to apply, if the tick changed the schedule
    pub timer: Option<TimerCommand>,
}

impl TickOutcome {
    fn idle() -> Self {
        Self {
            ate_food: false,
            collision: None,
            timer: None,
        }
    }
}

/// Everything the rendering layer needs for one frame. The session hands
/// this snapshot out and never touches drawing primitives itself.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub grid_width: i32,
    pub grid_height: i32,
    /// Snake cells, head first
    pub snake: Vec<Cell>,
    pub food: Cell,
    pub score: u32,
    pub high_score: u32,
    pub phase: GamePhase,
}

/// A single owned game: snake, food, score, speed and phase, advanced one
/// step at a time by an external timer through `tick`.
///
/// Input handlers may only call `set_pending_direction`, `start`,
/// `toggle_pause` and `reset`; the snake body is mutated exclusively inside
/// `tick`, so ticks always observe a consistent pre-tick state.
pub struct GameSession {
    config: GameConfig,
    grid: Grid,
    snake: Snake,
    food: Cell,
    score: u32,
    high_score: u32,
    interval: Duration,
    phase: GamePhase,
    rng: ThreadRng,
    store: Box<dyn ScoreStore>,
}

impl GameSession {
    /// Build a session in the `Ready` phase. Reads the persisted high score
    /// once; fails fast on an invalid configuration.
    pub fn new(config: GameConfig, mut store: Box<dyn ScoreStore>) -> Result<Self> {
        config.validate()?;

        let high_score = store
            .load()
            .context("failed to load high score")?
            .unwrap_or(0);

        let grid = config.grid();
        let snake = Self::initial_snake(&grid, config.initial_snake_length);
        let mut rng = rand::thread_rng();
        let food = food::spawn(&mut rng, &grid, snake.cells())
            .expect("validated grid has room for food");
        let interval = config.start_interval();

        Ok(Self {
            config,
            grid,
            snake,
            food,
            score: 0,
            high_score,
            interval,
            phase: GamePhase::Ready,
            rng,
            store,
        })
    }

    fn initial_snake(grid: &Grid, length: usize) -> Snake {
        Snake::new(grid.center(), Direction::Right, length)
    }

    /// Restore snake, food, score and speed to their initial values. The
    /// high score survives; the phase is the caller's business.
    fn reinit(&mut self) {
        self.snake = Self::initial_snake(&self.grid, self.config.initial_snake_length);
        self.score = 0;
        self.interval = self.config.start_interval();
        self.food = food::spawn(&mut self.rng, &self.grid, self.snake.cells())
            .expect("validated grid has room for food");
    }

    /// Advance the simulation one step. Outside `Running` this is a no-op,
    /// so a straggling timer fire after pause or game over is harmless.
    ///
    /// Order within a tick is fixed: commit-free direction resolution,
    /// candidate head, food (score, high score, respawn, speed-up), then
    /// collision against the post-move body. On collision the snake is left
    /// untouched and the phase flips to `Over`.
    pub fn tick(&mut self) -> Result<TickOutcome> {
        if self.phase != GamePhase::Running {
            return Ok(TickOutcome::idle());
        }

        let candidate = self.snake.next_head();
        let ate_food = candidate == self.food;
        let mut timer = None;

        if ate_food {
            self.score += self.config.food_points;
            if self.score > self.high_score {
                self.high_score = self.score;
                self.store
                    .save(self.high_score)
                    .context("failed to persist high score")?;
            }

            // The head lands on the food cell as part of this same tick, so
            // exclude it from the respawn along with the current body.
            let mut occupied = self.snake.cells().to_vec();
            occupied.push(candidate);
            match food::spawn(&mut self.rng, &self.grid, &occupied) {
                Some(cell) => self.food = cell,
                None => {
                    // The snake fills the whole grid: nowhere left to place
                    // food, and the game is won.
                    self.snake.advance(true);
                    self.phase = GamePhase::Over;
                    return Ok(TickOutcome {
                        ate_food: true,
                        collision: None,
                        timer: Some(TimerCommand::Stop),
                    });
                }
            }

            let next = policy::next_interval(
                self.interval,
                self.config.speed_step(),
                self.config.min_interval(),
            );
            if next != self.interval {
                self.interval = next;
                timer = Some(TimerCommand::Reschedule(next));
            }
        }

        if let Some(kind) = collision::detect(&self.grid, self.snake.cells(), candidate, ate_food) {
            self.phase = GamePhase::Over;
            return Ok(TickOutcome {
                ate_food,
                collision: Some(kind),
                timer: Some(TimerCommand::Stop),
            });
        }

        self.snake.advance(ate_food);

        Ok(TickOutcome {
            ate_food,
            collision: None,
            timer,
        })
    }

    /// Buffer a steering request for the next tick. Reversal requests are
    /// silently ignored.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        self.snake.set_pending(direction);
    }

    /// Begin ticking. From `Over` the whole game state is reinitialized
    /// first; from `Ready` or `Paused` play resumes at the current speed;
    /// already `Running` is a no-op.
    pub fn start(&mut self) -> Option<TimerCommand> {
        match self.phase {
            GamePhase::Over => {
                self.reinit();
                self.phase = GamePhase::Running;
                Some(TimerCommand::Start(self.interval))
            }
            GamePhase::Ready | GamePhase::Paused => {
                self.phase = GamePhase::Running;
                Some(TimerCommand::Start(self.interval))
            }
            GamePhase::Running => None,
        }
    }

    /// Flip between `Running` and `Paused`; a no-op in any other phase.
    pub fn toggle_pause(&mut self) -> Option<TimerCommand> {
        match self.phase {
            GamePhase::Running => {
                self.phase = GamePhase::Paused;
                Some(TimerCommand::Stop)
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Running;
                Some(TimerCommand::Start(self.interval))
            }
            GamePhase::Ready | GamePhase::Over => None,
        }
    }

    /// Return to the initial `Ready` state from any phase. Does not start
    /// the timer.
    pub fn reset(&mut self) -> TimerCommand {
        self.reinit();
        self.phase = GamePhase::Ready;
        TimerCommand::Stop
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// The current tick interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            grid_width: self.grid.width(),
            grid_height: self.grid.height(),
            snake: self.snake.cells().to_vec(),
            food: self.food,
            score: self.score,
            high_score: self.high_score,
            phase: self.phase,
        }
    }
}
