//! Core game logic module
//!
//! Everything in here is pure simulation: no I/O, no drawing, no timers.
//! The session is advanced by whichever external scheduler drives `tick`,
//! and talks back to it only through `TimerCommand` values.

pub mod collision;
pub mod config;
pub mod direction;
pub mod food;
pub mod grid;
pub mod policy;
pub mod session;
pub mod snake;

// Re-export commonly used types
pub use collision::CollisionKind;
pub use config::GameConfig;
pub use direction::Direction;
pub use grid::{Cell, Grid};
pub use session::{GamePhase, GameSession, RenderSnapshot, TickOutcome, TimerCommand};
pub use snake::Snake;
