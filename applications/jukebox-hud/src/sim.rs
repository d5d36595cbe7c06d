//! Simulated audio output
//!
//! Stands in for a real mixer: time comes from a shared virtual clock that the
//! frame loop advances, so playback is deterministic and needs no device.

use jukebox_core::AudioHandle;
use jukebox_playback::{AudioOutput, PlaybackError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Clip length used when a handle carries no `@seconds` suffix
pub const DEFAULT_CLIP_LENGTH: Duration = Duration::from_secs(180);

/// Shared virtual clock, microsecond resolution
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    micros: Arc<AtomicU64>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, delta: Duration) {
        let micros = u64::try_from(delta.as_micros()).unwrap_or(u64::MAX);
        self.micros.fetch_add(micros, Ordering::AcqRel);
    }

    pub fn now(&self) -> Duration {
        Duration::from_micros(self.micros.load(Ordering::Acquire))
    }
}

/// Parse a `name@seconds` handle into its clip length
///
/// Handles without a suffix get [`DEFAULT_CLIP_LENGTH`].
pub fn clip_length(audio: &AudioHandle) -> jukebox_playback::Result<Duration> {
    let raw = audio.as_str();
    if raw.is_empty() {
        return Err(PlaybackError::Output("empty audio handle".to_string()));
    }

    let Some((_, secs)) = raw.rsplit_once('@') else {
        return Ok(DEFAULT_CLIP_LENGTH);
    };

    let invalid = || PlaybackError::Output(format!("invalid clip length in '{raw}'"));
    match secs.parse::<f64>() {
        Ok(secs) if secs > 0.0 => Duration::try_from_secs_f64(secs).map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

#[derive(Debug, Clone)]
struct Clip {
    handle: AudioHandle,
    length: Duration,
}

/// `AudioOutput` driven by a [`SimClock`]
#[derive(Debug)]
pub struct SimulatedOutput {
    clock: SimClock,
    clip: Option<Clip>,
    playing: bool,
    // Position when `anchor` was taken
    base: Duration,
    anchor: Duration,
    looping: bool,
    volume: f32,
}

impl SimulatedOutput {
    pub fn new(clock: SimClock) -> Self {
        Self {
            clock,
            clip: None,
            playing: false,
            base: Duration::ZERO,
            anchor: Duration::ZERO,
            looping: false,
            volume: 1.0,
        }
    }

    /// Handle of the current clip
    pub fn loaded(&self) -> Option<&AudioHandle> {
        self.clip.as_ref().map(|clip| &clip.handle)
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Unwrapped play time since the last anchor
    fn raw_elapsed(&self) -> Duration {
        if self.playing {
            self.base + self.clock.now().saturating_sub(self.anchor)
        } else {
            self.base
        }
    }

    fn reanchor(&mut self, position: Duration) {
        self.base = position;
        self.anchor = self.clock.now();
    }
}

impl AudioOutput for SimulatedOutput {
    fn load(&mut self, audio: &AudioHandle) -> jukebox_playback::Result<()> {
        let length = clip_length(audio)?;
        tracing::trace!(%audio, ?length, "clip loaded");

        self.clip = Some(Clip {
            handle: audio.clone(),
            length,
        });
        self.playing = false;
        self.reanchor(Duration::ZERO);
        Ok(())
    }

    fn play(&mut self) {
        if self.clip.is_none() || self.playing {
            return;
        }
        self.reanchor(self.base);
        self.playing = true;
    }

    fn pause(&mut self) {
        if !self.playing {
            return;
        }
        let position = self.elapsed();
        self.playing = false;
        self.base = position;
    }

    fn stop(&mut self) {
        self.playing = false;
        self.reanchor(Duration::ZERO);
    }

    fn seek(&mut self, position: Duration) {
        let position = match &self.clip {
            Some(clip) => position.min(clip.length),
            None => Duration::ZERO,
        };
        self.reanchor(position);
    }

    fn set_looping(&mut self, looping: bool) {
        let position = self.elapsed();
        self.looping = looping;
        self.reanchor(position);
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn elapsed(&self) -> Duration {
        let Some(clip) = &self.clip else {
            return Duration::ZERO;
        };
        let raw = self.raw_elapsed();

        if self.looping {
            let wrapped = raw.as_nanos() % clip.length.as_nanos().max(1);
            Duration::from_nanos(u64::try_from(wrapped).unwrap_or(u64::MAX))
        } else {
            raw.min(clip.length)
        }
    }

    fn duration(&self) -> Option<Duration> {
        self.clip.as_ref().map(|clip| clip.length)
    }

    fn is_finished(&self) -> bool {
        match &self.clip {
            Some(clip) => !self.looping && self.raw_elapsed() >= clip.length,
            None => false,
        }
    }
}
