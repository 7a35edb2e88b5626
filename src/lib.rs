//! Breakout Vibe - a Breakout clone with a deterministic simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, round state)
//! - `clock`: Time sources and the fixed-interval tick gate
//! - `input`: Host events mapped to per-tick input
//! - `audio`: Square-wave cue synthesis with single-voice playback
//! - `session`: Host loop driver tying the collaborators together

pub mod audio;
pub mod clock;
pub mod highscores;
pub mod input;
pub mod palette;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use session::Session;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation interval (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 600.0;
    pub const PLAYFIELD_HEIGHT: f32 = 400.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Distance from the floor to the paddle's top edge
    pub const PADDLE_FLOOR_OFFSET: f32 = 30.0;
    /// Keyboard paddle step (pixels per key press)
    pub const PADDLE_KEY_STEP: f32 = 20.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Launch speed per axis, in units per tick
    pub const BALL_START_SPEED: f32 = 4.0;
    /// Speed boost when ball hits paddle (multiplicative, uncapped)
    pub const PADDLE_BOOST: f32 = 1.02;

    /// Brick grid
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_COLS: usize = 10;
    pub const BRICK_CELL_WIDTH: f32 = PLAYFIELD_WIDTH / BRICK_COLS as f32;
    pub const BRICK_CELL_HEIGHT: f32 = 20.0;
    /// Top of the first brick row
    pub const BRICK_TOP: f32 = 50.0;
    /// Inset on every side of a brick inside its grid cell
    pub const BRICK_INSET: f32 = 2.0;
    pub const BRICK_SCORE: u64 = 10;

    /// Lives per round
    pub const START_LIVES: u8 = 3;
}
