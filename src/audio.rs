//! Audio cues for collisions
//!
//! Procedurally generated GameBoy-style square-wave blips - no sample files.
//! Playback goes through a single voice: a cue that arrives while the last
//! one is still sounding is dropped, so rapid brick chains don't pile up.

use std::time::Duration;

use crate::sim::GameEvent;

/// Output sample rate (Hz)
pub const SAMPLE_RATE: u32 = 44_100;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits a side or top wall
    WallHit,
    /// Ball hits paddle
    PaddleHit,
    /// Brick destroyed
    BrickBreak,
}

impl SoundEffect {
    /// Cue for a simulation event, if it makes a sound
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::WallBounce { .. } => Some(SoundEffect::WallHit),
            GameEvent::PaddleBounce { .. } => Some(SoundEffect::PaddleHit),
            GameEvent::BrickDestroyed { .. } => Some(SoundEffect::BrickBreak),
            _ => None,
        }
    }

    /// Tone played for this effect
    pub fn tone(&self) -> Tone {
        match self {
            SoundEffect::WallHit | SoundEffect::PaddleHit | SoundEffect::BrickBreak => Tone {
                frequency: 880.0,
                duration: Duration::from_millis(100),
            },
        }
    }
}

/// A fixed-pitch square-wave tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency: f32,
    pub duration: Duration,
}

impl Tone {
    /// Render as interleaved stereo 16-bit samples at `SAMPLE_RATE`.
    /// `amplitude` is 0.0 - 1.0 of full scale.
    pub fn render(&self, amplitude: f32) -> Vec<i16> {
        let frames = (SAMPLE_RATE as f32 * self.duration.as_secs_f32()) as usize;
        let amplitude = amplitude.clamp(0.0, 1.0);
        let mut samples = Vec::with_capacity(frames * 2);

        for i in 0..frames {
            let t = i as f32 / SAMPLE_RATE as f32;
            let phase = (std::f32::consts::TAU * self.frequency * t).sin();
            // sign(0) is 0, not 1: the first sample is silent
            let level = if phase == 0.0 { 0.0 } else { phase.signum() };
            let sample = (level * amplitude * i16::MAX as f32) as i16;
            samples.push(sample);
            samples.push(sample);
        }

        samples
    }
}

/// Where rendered samples go (sound card, file, test recorder)
pub trait AudioOutput {
    fn play(&mut self, samples: &[i16]);
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullOutput;

impl AudioOutput for NullOutput {
    fn play(&mut self, _samples: &[i16]) {}
}

/// Audio manager for the game
pub struct AudioManager<O> {
    output: O,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    /// End of the cue currently sounding
    busy_until: Option<Duration>,
}

impl<O: AudioOutput> AudioManager<O> {
    pub fn new(output: O) -> Self {
        Self {
            output,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            busy_until: None,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Whether the voice is still playing at `now`
    pub fn is_busy(&self, now: Duration) -> bool {
        self.busy_until.is_some_and(|end| now < end)
    }

    /// Play a sound effect. Returns false when the cue was dropped.
    pub fn play(&mut self, effect: SoundEffect, now: Duration) -> bool {
        let vol = self.effective_volume();
        if vol <= 0.0 || self.is_busy(now) {
            return false;
        }

        let tone = effect.tone();
        // Half scale at full volume, like a GameBoy channel
        let samples = tone.render(0.5 * vol);
        self.output.play(&samples);
        self.busy_until = Some(now + tone.duration);
        true
    }

    /// Play the cue for an event, if it has one
    pub fn handle_event(&mut self, event: &GameEvent, now: Duration) {
        if let Some(effect) = SoundEffect::for_event(event) {
            if !self.play(effect, now) {
                log::trace!("Dropped {:?} (voice busy or muted)", effect);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Wall;

    #[derive(Default)]
    struct Recorder {
        buffers: Vec<Vec<i16>>,
    }

    impl AudioOutput for Recorder {
        fn play(&mut self, samples: &[i16]) {
            self.buffers.push(samples.to_vec());
        }
    }

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_square_wave_shape() {
        let tone = SoundEffect::BrickBreak.tone();
        let samples = tone.render(0.5);

        // 0.1 s of stereo at 44.1 kHz
        assert_eq!(samples.len(), 4410 * 2);
        assert_eq!(samples[0], 0);
        let high = (0.5 * i16::MAX as f32) as i16;
        assert!(samples.iter().all(|&s| s == 0 || s == high || s == -high));
        // Left and right are identical
        assert!(samples.chunks(2).all(|lr| lr[0] == lr[1]));
        // Both polarities present
        assert!(samples.contains(&high) && samples.contains(&-high));
    }

    #[test]
    fn test_events_map_to_cues() {
        let wall = GameEvent::WallBounce { wall: Wall::Top };
        assert_eq!(SoundEffect::for_event(&wall), Some(SoundEffect::WallHit));
        assert_eq!(SoundEffect::for_event(&GameEvent::Paused), None);
        assert_eq!(SoundEffect::for_event(&GameEvent::ServeReset), None);
    }

    #[test]
    fn test_single_voice_drops_overlapping_cues() {
        let mut audio = AudioManager::new(Recorder::default());

        assert!(audio.play(SoundEffect::WallHit, Duration::ZERO));
        assert!(!audio.play(SoundEffect::BrickBreak, 50 * MS));
        assert!(audio.is_busy(99 * MS));
        assert!(audio.play(SoundEffect::BrickBreak, 100 * MS));
        assert_eq!(audio.output().buffers.len(), 2);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.set_muted(true);

        audio.handle_event(&GameEvent::PaddleBounce { speed: 4.0 }, Duration::ZERO);
        assert!(audio.output().buffers.is_empty());
        assert!(!audio.is_busy(Duration::ZERO));
    }

    #[test]
    fn test_volume_scales_samples() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.set_master_volume(1.0);
        audio.set_sfx_volume(0.5);

        audio.play(SoundEffect::PaddleHit, Duration::ZERO);
        let peak = audio.output().buffers[0].iter().map(|s| s.abs()).max();
        assert_eq!(peak, Some((0.25 * i16::MAX as f32) as i16));
    }
}
