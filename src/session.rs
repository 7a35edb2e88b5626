//! Host loop driver
//!
//! A `Session` owns the game state and its collaborators. The host calls
//! `frame()` once per loop iteration and forwards raw input through the
//! `pointer_moved` / `key_pressed` / `clicked` entry points in between.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::{AudioManager, AudioOutput};
use crate::clock::{Clock, FrameGate};
use crate::input::{InputState, Key};
use crate::palette::Palette;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, Snapshot, tick};

/// Game instance holding all state
pub struct Session<C, O> {
    state: GameState,
    clock: C,
    gate: FrameGate,
    input: InputState,
    audio: AudioManager<O>,
    palette: Palette,
    palette_rng: Pcg32,
    frames: u64,
}

impl<C: Clock, O: AudioOutput> Session<C, O> {
    pub fn new(seed: u64, settings: &Settings, clock: C, output: O) -> Self {
        let mut audio = AudioManager::new(output);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);

        let gate = FrameGate::sixty_hz(clock.now());
        let mut palette_rng = Pcg32::seed_from_u64(seed.wrapping_add(1));

        Self {
            state: GameState::new(seed),
            clock,
            gate,
            input: InputState::new(settings.key_step),
            audio,
            palette: Palette::shuffled(&mut palette_rng),
            palette_rng,
            frames: 0,
        }
    }

    /// Run one host iteration: poll the clock, tick, play cues.
    pub fn frame(&mut self) -> Vec<GameEvent> {
        let now = self.clock.now();
        let due = self.gate.poll(now);
        let input = self.input.take();

        let events = tick(&mut self.state, &input, due);
        self.frames += 1;

        for event in &events {
            self.audio.handle_event(event, now);
            match event {
                GameEvent::RoundStarted => {
                    self.palette = Palette::shuffled(&mut self.palette_rng);
                    self.input.clear_paddle_target();
                }
                GameEvent::Paused => log::info!("Paused"),
                GameEvent::Resumed => log::info!("Resumed"),
                GameEvent::ReturnedToMenu => {
                    self.input.clear_paddle_target();
                    log::info!("Back to menu");
                }
                _ => {}
            }
        }

        events
    }

    pub fn pointer_moved(&mut self, x: f32) {
        self.input.pointer_moved(x, self.state.phase);
    }

    pub fn key_pressed(&mut self, key: Key) {
        self.input.key_pressed(key, self.state.phase, self.state.paddle.x);
    }

    pub fn clicked(&mut self, pos: Vec2) {
        self.input.clicked(pos, self.state.phase);
    }

    /// Window close
    pub fn close(&mut self) {
        self.input.request_quit();
    }

    pub fn is_running(&self) -> bool {
        !self.input.quit_requested()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn audio(&self) -> &AudioManager<O> {
        &self.audio
    }

    /// Host iterations run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::clock::ManualClock;
    use crate::input::{play_button, restart_button};
    use crate::sim::GamePhase;

    #[derive(Default)]
    struct Counter {
        cues: usize,
    }

    impl AudioOutput for Counter {
        fn play(&mut self, _samples: &[i16]) {
            self.cues += 1;
        }
    }

    fn session() -> Session<ManualClock, Counter> {
        Session::new(5, &Settings::default(), ManualClock::new(), Counter::default())
    }

    fn tick_interval() -> Duration {
        Duration::from_secs_f32(crate::consts::SIM_DT)
    }

    fn start(session: &mut Session<ManualClock, Counter>) {
        let button = play_button();
        session.clicked((button.min + button.max) / 2.0);
        assert_eq!(session.frame(), vec![GameEvent::RoundStarted]);
    }

    #[test]
    fn test_click_play_starts_round() {
        let mut session = session();
        assert_eq!(session.snapshot().phase, GamePhase::Menu);

        start(&mut session);
        assert_eq!(session.snapshot().phase, GamePhase::Playing);
        assert_eq!(session.snapshot().bricks.len(), 50);

        // Every brick in a row shares a palette color
        let palette = session.palette();
        assert_eq!(palette.color_for(0), palette.color_for(9));
    }

    #[test]
    fn test_ball_moves_only_when_gate_is_due() {
        let mut session = session();
        start(&mut session);
        let pos = session.snapshot().ball.pos;

        session.clock().advance(Duration::from_millis(5));
        session.frame();
        assert_eq!(session.snapshot().ball.pos, pos);

        session.clock().advance(tick_interval());
        session.frame();
        assert_ne!(session.snapshot().ball.pos, pos);
        assert_eq!(session.state().time_ticks, 1);
    }

    #[test]
    fn test_stall_runs_one_tick() {
        let mut session = session();
        start(&mut session);

        session.clock().advance(Duration::from_secs(1));
        session.frame();
        session.frame();
        assert_eq!(session.state().time_ticks, 1);
    }

    #[test]
    fn test_pause_key_freezes_play() {
        let mut session = session();
        start(&mut session);

        session.key_pressed(Key::Pause);
        assert_eq!(session.frame(), vec![GameEvent::Paused]);

        let pos = session.snapshot().ball.pos;
        session.clock().advance(tick_interval());
        session.frame();
        assert_eq!(session.snapshot().ball.pos, pos);
    }

    #[test]
    fn test_pointer_steers_paddle() {
        let mut session = session();
        start(&mut session);

        session.pointer_moved(120.0);
        session.clock().advance(tick_interval());
        session.frame();
        assert_eq!(session.snapshot().paddle.x, 120.0);
    }

    #[test]
    fn test_new_round_paddle_starts_centered() {
        let mut session = session();
        start(&mut session);

        for _ in 0..10 {
            session.key_pressed(Key::Left);
        }
        session.clock().advance(tick_interval());
        session.frame();
        assert_eq!(session.snapshot().paddle.x, 100.0);

        // Lose the round, then Restart -> PLAY
        session.state.lives = 1;
        session.state.ball.pos = Vec2::new(500.0, 390.0);
        session.state.ball.vel = Vec2::new(4.0, 4.0);
        session.clock().advance(tick_interval());
        session.frame();
        assert_eq!(session.snapshot().phase, GamePhase::Lost);

        let restart = restart_button();
        session.clicked((restart.min + restart.max) / 2.0);
        assert_eq!(session.frame(), vec![GameEvent::ReturnedToMenu]);
        start(&mut session);
        assert_eq!(session.snapshot().paddle.x, 300.0);

        // First due tick of the new round, no input
        session.clock().advance(tick_interval());
        session.frame();
        assert_eq!(session.snapshot().paddle.x, 300.0);
    }

    #[test]
    fn test_brick_break_plays_cue() {
        let mut session = session();
        start(&mut session);

        // The ball rises straight into the bottom brick row
        let mut broke = false;
        for _ in 0..60 {
            session.clock().advance(tick_interval());
            let events = session.frame();
            if events.iter().any(|e| matches!(e, GameEvent::BrickDestroyed { .. })) {
                broke = true;
                break;
            }
        }
        assert!(broke);
        assert_eq!(session.audio().output().cues, 1);
    }

    #[test]
    fn test_escape_stops_session() {
        let mut escaped = session();
        assert!(escaped.is_running());
        escaped.key_pressed(Key::Escape);
        assert!(!escaped.is_running());

        let mut closed = session();
        closed.close();
        assert!(!closed.is_running());
    }
}
