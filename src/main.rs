//! Breakout Vibe entry point
//!
//! Windowing, drawing and the sound device are provided by a host shell.
//! Natively this binary runs a headless autopilot round and prints the
//! outcome. By default it runs on a synthetic clock as fast as possible;
//! with `BREAKOUT_REALTIME` set it paces itself on the wall clock through
//! the 60 Hz frame gate, like a windowed host would.

use std::path::PathBuf;
use std::time::Duration;

use breakout_vibe::audio::NullOutput;
use breakout_vibe::clock::{Clock, ManualClock, SystemClock};
use breakout_vibe::consts::SIM_DT;
use breakout_vibe::input::play_button;
use breakout_vibe::sim::{GameEvent, GamePhase};
use breakout_vibe::{Session, Settings};

/// Give up after ten minutes of game time
const MAX_TICKS: u64 = 60 * 60 * 10;

/// Host loop sleep in real-time mode; several polls per tick interval
const REALTIME_POLL: Duration = Duration::from_millis(2);

#[derive(Debug, Default)]
struct RunStats {
    bricks: u32,
    bounces: u32,
}

fn main() {
    env_logger::init();
    log::info!("Breakout Vibe (headless) starting...");

    let settings = std::env::var_os("BREAKOUT_SETTINGS")
        .map(PathBuf::from)
        .map(|path| Settings::load(&path))
        .unwrap_or_default();
    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Seed: {}", seed);

    if std::env::var_os("BREAKOUT_REALTIME").is_some() {
        log::info!("Real-time mode");
        let mut session = Session::new(seed, &settings, SystemClock::new(), NullOutput);
        let stats = autopilot(&mut session, |_| std::thread::sleep(REALTIME_POLL));
        report(&session, &stats);
    } else {
        let mut session = Session::new(seed, &settings, ManualClock::new(), NullOutput);
        let step = Duration::from_secs_f32(SIM_DT);
        let stats = autopilot(&mut session, |clock| clock.advance(step));
        report(&session, &stats);
    }
}

/// Play one round with the paddle kept under the ball. `wait` lets time
/// pass between host iterations.
fn autopilot<C: Clock>(session: &mut Session<C, NullOutput>, mut wait: impl FnMut(&C)) -> RunStats {
    let mut stats = RunStats::default();

    let button = play_button();
    session.clicked((button.min + button.max) / 2.0);

    while session.is_running() && session.state().time_ticks < MAX_TICKS {
        let ball_x = session.snapshot().ball.pos.x;
        session.pointer_moved(ball_x);

        wait(session.clock());
        for event in session.frame() {
            match event {
                GameEvent::BrickDestroyed { .. } => stats.bricks += 1,
                GameEvent::PaddleBounce { .. } => stats.bounces += 1,
                GameEvent::LifeLost { lives } => log::info!("Life lost, {} left", lives),
                _ => {}
            }
        }

        if matches!(session.state().phase, GamePhase::Won | GamePhase::Lost) {
            session.close();
        }
    }

    stats
}

fn report<C: Clock>(session: &Session<C, NullOutput>, stats: &RunStats) {
    let snapshot = session.snapshot();
    println!(
        "{:?} after {} ticks ({} host frames): score {}, {} bricks, {} paddle bounces, \
         ball speed {:.2}",
        snapshot.phase,
        session.state().time_ticks,
        session.frames(),
        snapshot.score,
        stats.bricks,
        stats.bounces,
        snapshot.ball_speed
    );

    match serde_json::to_string_pretty(&session.state().records) {
        Ok(json) => println!("{}", json),
        Err(e) => log::warn!("Could not serialize high scores: {}", e),
    }
}
