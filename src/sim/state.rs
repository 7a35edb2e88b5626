//! Game state and core simulation types
//!
//! Everything a round needs lives in `GameState`; the host reads it back
//! through `snapshot()` and never mutates it directly.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, Wall};
use crate::consts::*;
use crate::highscores::HighScores;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, no round in progress
    Menu,
    /// Active gameplay
    Playing,
    /// Round in progress but frozen
    Paused,
    /// Every brick destroyed
    Won,
    /// Out of lives
    Lost,
}

/// How a completed round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// Something that happened during a tick, for the renderer and audio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted,
    Paused,
    Resumed,
    ReturnedToMenu,
    WallBounce { wall: Wall },
    PaddleBounce { speed: f32 },
    BrickDestroyed { index: usize, score: u64 },
    LifeLost { lives: u8 },
    /// Ball recentred after a lost life, round continues
    ServeReset,
    RoundWon { score: u64, high_score: u64 },
    RoundLost { score: u64, high_score: u64 },
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: playfield_center(),
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
        }
    }
}

impl Ball {
    /// Ball at the playfield center, launched upward at `speed` per axis
    pub fn served(speed: f32, rightward: bool) -> Self {
        let vx = if rightward { speed } else { -speed };
        Self {
            vel: Vec2::new(vx, -speed),
            ..Self::default()
        }
    }

    /// Bounding box used for every collision test
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(self.radius))
    }
}

/// The player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Horizontal center
    pub x: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: PLAYFIELD_WIDTH / 2.0,
        }
    }
}

impl Paddle {
    /// Move the center to `target`, keeping the paddle inside the playfield
    pub fn set_target(&mut self, target: f32) {
        self.x = clamp_paddle_x(target);
    }

    pub fn bounds(&self) -> Rect {
        let top = PLAYFIELD_HEIGHT - PADDLE_FLOOR_OFFSET;
        Rect::new(
            self.x - PADDLE_WIDTH / 2.0,
            top,
            self.x + PADDLE_WIDTH / 2.0,
            top + PADDLE_HEIGHT,
        )
    }
}

/// Clamp a paddle center so the whole paddle stays on the playfield
pub fn clamp_paddle_x(x: f32) -> f32 {
    x.clamp(PADDLE_WIDTH / 2.0, PLAYFIELD_WIDTH - PADDLE_WIDTH / 2.0)
}

/// A brick. Stays in the grid after it is destroyed so indices are stable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    pub alive: bool,
}

impl Brick {
    pub fn new(rect: Rect) -> Self {
        Self { rect, alive: true }
    }

    /// Brick for a grid cell
    pub fn at(row: usize, col: usize) -> Self {
        let x0 = col as f32 * BRICK_CELL_WIDTH + BRICK_INSET;
        let y0 = row as f32 * BRICK_CELL_HEIGHT + BRICK_TOP;
        Self::new(Rect::new(
            x0,
            y0,
            x0 + BRICK_CELL_WIDTH - 2.0 * BRICK_INSET,
            y0 + BRICK_CELL_HEIGHT - 2.0 * BRICK_INSET,
        ))
    }
}

/// Full brick grid, row-major
pub fn brick_grid() -> Vec<Brick> {
    let mut bricks = Vec::with_capacity(BRICK_ROWS * BRICK_COLS);
    for row in 0..BRICK_ROWS {
        for col in 0..BRICK_COLS {
            bricks.push(Brick::at(row, col));
        }
    }
    bricks
}

pub fn playfield_center() -> Vec2 {
    Vec2::new(PLAYFIELD_WIDTH / 2.0, PLAYFIELD_HEIGHT / 2.0)
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Current phase
    pub phase: GamePhase,
    pub ball: Ball,
    pub paddle: Paddle,
    /// Brick grid, including destroyed bricks
    pub bricks: Vec<Brick>,
    pub score: u64,
    pub lives: u8,
    /// Tracked ball speed; only paddle bounces change it
    pub ball_speed: f32,
    /// Physics ticks executed this round
    pub time_ticks: u64,
    /// Completed rounds, best first
    pub records: HighScores,
    /// Serve direction source
    pub rng: Pcg32,
}

impl GameState {
    /// New game sitting at the menu
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Menu,
            ball: Ball::default(),
            paddle: Paddle::default(),
            bricks: Vec::new(),
            score: 0,
            lives: START_LIVES,
            ball_speed: BALL_START_SPEED,
            time_ticks: 0,
            records: HighScores::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Best score over all completed rounds
    pub fn high_score(&self) -> u64 {
        self.records.top_score().unwrap_or(0)
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn alive_bricks(&self) -> impl Iterator<Item = (usize, &Brick)> {
        self.bricks.iter().enumerate().filter(|(_, b)| b.alive)
    }

    pub fn destroyed_count(&self) -> usize {
        self.bricks.iter().filter(|b| !b.alive).count()
    }

    /// Reset every per-round field for a fresh round and enter Playing
    pub fn begin_round(&mut self) {
        self.score = 0;
        self.lives = START_LIVES;
        self.ball_speed = BALL_START_SPEED;
        self.time_ticks = 0;
        self.paddle = Paddle::default();
        self.bricks = brick_grid();
        self.serve();
        self.phase = GamePhase::Playing;
    }

    /// Drop the round and go back to the title screen
    pub fn discard_round(&mut self) {
        self.score = 0;
        self.lives = START_LIVES;
        self.ball_speed = BALL_START_SPEED;
        self.time_ticks = 0;
        self.paddle = Paddle::default();
        self.ball = Ball::default();
        self.bricks.clear();
        self.phase = GamePhase::Menu;
    }

    /// Recentre the ball at the current speed with a random horizontal direction
    pub fn serve(&mut self) {
        let rightward = self.rng.random_bool(0.5);
        self.ball = Ball::served(self.ball_speed, rightward);
    }

    /// Record the finished round. Returns the high score afterwards.
    pub fn finish_round(&mut self, outcome: Outcome) -> u64 {
        self.phase = match outcome {
            Outcome::Won => GamePhase::Won,
            Outcome::Lost => GamePhase::Lost,
        };
        self.records.add_score(self.score, outcome, self.time_ticks);
        self.high_score()
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            ball: self.ball,
            paddle: self.paddle,
            bricks: self.alive_bricks().map(|(i, b)| (i, b.rect)).collect(),
            score: self.score,
            lives: self.lives,
            high_score: self.high_score(),
            ball_speed: self.ball_speed,
        }
    }
}

/// Everything the renderer draws, polled once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub ball: Ball,
    pub paddle: Paddle,
    /// Alive bricks with their grid index
    pub bricks: Vec<(usize, Rect)>,
    pub score: u64,
    pub lives: u8,
    pub high_score: u64,
    pub ball_speed: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_menu() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.bricks.is_empty());
        assert_eq!(state.high_score(), 0);
    }

    #[test]
    fn test_brick_grid_layout() {
        let bricks = brick_grid();
        assert_eq!(bricks.len(), BRICK_ROWS * BRICK_COLS);

        assert_eq!(bricks[0].rect, Rect::new(2.0, 50.0, 58.0, 66.0));
        let last = bricks.last().map(|b| b.rect);
        assert_eq!(last, Some(Rect::new(542.0, 130.0, 598.0, 146.0)));
        assert!(bricks.iter().all(|b| b.alive));
    }

    #[test]
    fn test_paddle_clamped_inside_playfield() {
        let mut paddle = Paddle::default();

        paddle.set_target(-100.0);
        assert_eq!(paddle.bounds().min.x, 0.0);

        paddle.set_target(10_000.0);
        assert_eq!(paddle.bounds().max.x, PLAYFIELD_WIDTH);
    }

    #[test]
    fn test_begin_round_resets_everything() {
        let mut state = GameState::new(7);
        state.score = 120;
        state.lives = 1;
        state.ball_speed = 9.0;

        state.begin_round();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.ball.pos, playfield_center());
        assert_eq!(state.ball.vel.x.abs(), BALL_START_SPEED);
        assert_eq!(state.ball.vel.y, -BALL_START_SPEED);
        assert_eq!(state.alive_bricks().count(), BRICK_ROWS * BRICK_COLS);
    }

    #[test]
    fn test_serve_keeps_current_speed() {
        let mut state = GameState::new(3);
        state.begin_round();
        state.ball_speed = 6.5;

        state.serve();
        assert_eq!(state.ball.pos, playfield_center());
        assert_eq!(state.ball.vel.x.abs(), 6.5);
        assert_eq!(state.ball.vel.y, -6.5);
    }

    #[test]
    fn test_serve_direction_is_seeded() {
        let mut a = GameState::new(42);
        let mut b = GameState::new(42);
        for _ in 0..8 {
            a.serve();
            b.serve();
            assert_eq!(a.ball.vel, b.ball.vel);
        }
    }
}
