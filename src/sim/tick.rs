//! Fixed-interval simulation tick
//!
//! Commands are handled every call; physics only runs while Playing and
//! only when the host's frame gate says a tick is due. The physics steps
//! run in a fixed order: paddle, translate, walls, paddle bounce, bricks,
//! end-of-round checks.

use super::collision::{brick_hit_is_vertical, crossed_floor, hits_paddle_top, resolve_walls};
use super::state::{GameEvent, GamePhase, GameState, Outcome};
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Target paddle center (from mouse position or key steps)
    pub paddle_target: Option<f32>,
    /// Pause toggle
    pub pause: bool,
    /// Start a new round (from menu or a finished round)
    pub start: bool,
    /// Leave a finished round
    pub return_to_menu: bool,
}

/// Advance the game by one host iteration. Returns the events produced.
///
/// Commands that make no sense in the current phase are ignored.
pub fn tick(state: &mut GameState, input: &TickInput, due: bool) -> Vec<GameEvent> {
    let mut events = Vec::new();

    apply_commands(state, input, &mut events);

    if state.phase == GamePhase::Playing && due {
        step_physics(state, input, &mut events);
    }

    events
}

fn apply_commands(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                events.push(GameEvent::Paused);
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                events.push(GameEvent::Resumed);
            }
            _ => {}
        }
    }

    if input.start && matches!(state.phase, GamePhase::Menu | GamePhase::Won | GamePhase::Lost) {
        state.begin_round();
        log::info!("Round started (high score {})", state.high_score());
        events.push(GameEvent::RoundStarted);
    }

    if input.return_to_menu && matches!(state.phase, GamePhase::Won | GamePhase::Lost) {
        state.discard_round();
        events.push(GameEvent::ReturnedToMenu);
    }
}

fn step_physics(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    state.time_ticks += 1;

    // 1. Paddle follows the target directly
    if let Some(target) = input.paddle_target {
        state.paddle.set_target(target);
    }

    // 2. Translate
    let ball = &mut state.ball;
    ball.pos += ball.vel;

    // 3. Walls
    for wall in resolve_walls(&mut ball.pos, &mut ball.vel, ball.radius) {
        events.push(GameEvent::WallBounce { wall });
    }

    // 4. Paddle bounce, the only place speed grows
    if hits_paddle_top(&ball.bounds(), ball.vel, &state.paddle.bounds()) {
        ball.vel.y = -ball.vel.y.abs();
        ball.vel *= PADDLE_BOOST;
        state.ball_speed *= PADDLE_BOOST;
        events.push(GameEvent::PaddleBounce {
            speed: state.ball_speed,
        });
    }

    // 5. Bricks: every overlapping brick this tick, each exactly once
    let ball_box = ball.bounds();
    for (index, brick) in state.bricks.iter_mut().enumerate() {
        if !brick.alive || !ball_box.overlaps(&brick.rect) {
            continue;
        }
        brick.alive = false;
        state.score += BRICK_SCORE;

        if brick_hit_is_vertical(&ball_box, ball.vel, &brick.rect) {
            ball.vel.y = -ball.vel.y;
        } else {
            ball.vel.x = -ball.vel.x;
        }

        events.push(GameEvent::BrickDestroyed {
            index,
            score: state.score,
        });
    }

    // 6. End of round
    if state.alive_bricks().next().is_none() {
        let high_score = state.finish_round(Outcome::Won);
        log::info!("Round won with {} (high score {})", state.score, high_score);
        events.push(GameEvent::RoundWon {
            score: state.score,
            high_score,
        });
    } else if crossed_floor(&state.ball.bounds()) {
        state.lives = state.lives.saturating_sub(1);
        log::debug!("Life lost, {} remaining", state.lives);
        events.push(GameEvent::LifeLost { lives: state.lives });

        if state.lives > 0 {
            state.serve();
            events.push(GameEvent::ServeReset);
        } else {
            let high_score = state.finish_round(Outcome::Lost);
            log::info!("Round lost with {} (high score {})", state.score, high_score);
            events.push(GameEvent::RoundLost {
                score: state.score,
                high_score,
            });
        }
    }
}
