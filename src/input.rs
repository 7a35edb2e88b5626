//! Host input mapped to per-tick commands
//!
//! Raw pointer, key and click events arrive between frames. `InputState`
//! folds them into the pending `TickInput`, which the session takes once
//! per frame. The paddle target is latched (the mouse stays where it was);
//! commands are one-shot.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{GamePhase, Rect, TickInput, clamp_paddle_x};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    /// The `P` key
    Pause,
    Escape,
    Other,
}

/// Clickable PLAY button on the menu screen
pub fn play_button() -> Rect {
    let cx = PLAYFIELD_WIDTH / 2.0;
    let cy = PLAYFIELD_HEIGHT / 2.0;
    Rect::new(cx - 80.0, cy, cx + 80.0, cy + 40.0)
}

/// Clickable Restart button on the win/lose screen
pub fn restart_button() -> Rect {
    let cx = PLAYFIELD_WIDTH / 2.0;
    let cy = PLAYFIELD_HEIGHT / 2.0;
    Rect::new(cx - 100.0, cy + 20.0, cx + 100.0, cy + 60.0)
}

/// Input accumulated since the last frame
#[derive(Debug, Clone)]
pub struct InputState {
    pending: TickInput,
    key_step: f32,
    quit: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(PADDLE_KEY_STEP)
    }
}

impl InputState {
    pub fn new(key_step: f32) -> Self {
        Self {
            pending: TickInput::default(),
            key_step,
            quit: false,
        }
    }

    /// Pointer moved to `x`. Only steers while a round is actively played.
    pub fn pointer_moved(&mut self, x: f32, phase: GamePhase) {
        if phase == GamePhase::Playing {
            self.pending.paddle_target = Some(clamp_paddle_x(x));
        }
    }

    /// Key pressed. `paddle_x` is the paddle's current center.
    pub fn key_pressed(&mut self, key: Key, phase: GamePhase, paddle_x: f32) {
        match key {
            Key::Left | Key::Right if phase == GamePhase::Playing => {
                let from = self.pending.paddle_target.unwrap_or(paddle_x);
                let step = if key == Key::Left {
                    -self.key_step
                } else {
                    self.key_step
                };
                self.pending.paddle_target = Some(clamp_paddle_x(from + step));
            }
            Key::Pause => self.pending.pause = !self.pending.pause,
            Key::Escape => self.request_quit(),
            _ => {}
        }
    }

    /// Mouse click at `pos`; buttons only exist on the menu and end screens
    pub fn clicked(&mut self, pos: Vec2, phase: GamePhase) {
        match phase {
            GamePhase::Menu if play_button().contains_point(pos) => self.pending.start = true,
            GamePhase::Won | GamePhase::Lost if restart_button().contains_point(pos) => {
                self.pending.return_to_menu = true;
            }
            _ => {}
        }
    }

    /// Window close or Escape
    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Forget the latched paddle target; a fresh paddle stays centered
    /// until the player moves it again
    pub fn clear_paddle_target(&mut self) {
        self.pending.paddle_target = None;
    }

    /// Input for this frame. One-shot commands are cleared, the paddle
    /// target carries over.
    pub fn take(&mut self) -> TickInput {
        let input = self.pending.clone();
        self.pending.pause = false;
        self.pending.start = false;
        self.pending.return_to_menu = false;
        input
    }
}
