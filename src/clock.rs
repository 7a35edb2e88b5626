//! Time sources and the fixed-interval tick gate
//!
//! The host polls a `Clock` once per loop iteration and asks the
//! `FrameGate` whether a physics tick is due. Missed intervals are dropped,
//! never replayed, so a stalled host slows the game down instead of making
//! it jump.

use std::cell::Cell;
use std::time::{Duration, Instant};

use crate::consts::SIM_DT;

/// Monotonic time source
pub trait Clock {
    /// Time since an arbitrary, fixed origin
    fn now(&self) -> Duration;
}

/// Wall clock backed by `Instant`, for hosts that pace on real time
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Synthetic clock advanced by hand (tests, headless runs)
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Decides when the next physics tick runs
#[derive(Debug, Clone)]
pub struct FrameGate {
    interval: Duration,
    last: Duration,
}

impl FrameGate {
    /// Gate whose first tick is due one interval after `now`
    pub fn new(interval: Duration, now: Duration) -> Self {
        Self {
            interval,
            last: now,
        }
    }

    /// 60 Hz gate
    pub fn sixty_hz(now: Duration) -> Self {
        Self::new(Duration::from_secs_f32(SIM_DT), now)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True when at least one interval has passed since the last due tick.
    /// The next interval is measured from `now`, not from the missed slot.
    pub fn poll(&mut self, now: Duration) -> bool {
        if now.saturating_sub(self.last) >= self.interval {
            self.last = now;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_gate_waits_for_interval() {
        let mut gate = FrameGate::new(16 * MS, Duration::ZERO);

        assert!(!gate.poll(Duration::ZERO));
        assert!(!gate.poll(15 * MS));
        assert!(gate.poll(16 * MS));
        assert!(!gate.poll(20 * MS));
        assert!(gate.poll(32 * MS));
    }

    #[test]
    fn test_gate_drops_missed_frames() {
        let mut gate = FrameGate::new(16 * MS, Duration::ZERO);

        // A long stall yields a single tick, not a burst of catch-up ticks
        assert!(gate.poll(100 * MS));
        assert!(!gate.poll(100 * MS));
        assert!(!gate.poll(110 * MS));
        assert!(gate.poll(116 * MS));
    }

    #[test]
    fn test_gate_tolerates_clock_going_backwards() {
        let mut gate = FrameGate::new(16 * MS, 50 * MS);
        assert!(!gate.poll(10 * MS));
    }

    #[test]
    fn test_sixty_hz_interval() {
        let gate = FrameGate::sixty_hz(Duration::ZERO);
        let hz = 1.0 / gate.interval().as_secs_f64();
        assert!((hz - 60.0).abs() < 0.01);
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), Duration::ZERO);

        clock.advance(5 * MS);
        clock.advance(5 * MS);
        assert_eq!(clock.now(), 10 * MS);

        clock.set(MS);
        assert_eq!(clock.now(), MS);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
