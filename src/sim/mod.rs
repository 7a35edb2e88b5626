//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed interval only (the host decides when a tick is due)
//! - Seeded RNG only
//! - Stable brick order (row-major grid index)
//! - No rendering, audio, or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Rect, Wall};
pub use state::{
    Ball, Brick, GameEvent, GamePhase, GameState, Outcome, Paddle, Snapshot, brick_grid,
    clamp_paddle_x,
};
pub use tick::{TickInput, tick};
