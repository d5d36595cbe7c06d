//! Platform-agnostic audio output trait
//!
//! Abstracts the audio engine that actually decodes and mixes. The playback
//! engine only drives it and reads back elapsed time.

use crate::error::Result;
use jukebox_core::AudioHandle;
use std::time::Duration;

/// Platform audio output
///
/// Implementors own decoding and mixing. The engine treats the output as a
/// sink for transport commands and a source of playback time.
pub trait AudioOutput: Send {
    /// Make `audio` the current clip, rewound to zero
    ///
    /// # Returns
    /// * `Ok(())` - Clip ready to play
    /// * `Err(_)` - Handle could not be resolved or decoded
    fn load(&mut self, audio: &AudioHandle) -> Result<()>;

    /// Start or resume output of the current clip
    fn play(&mut self);

    /// Suspend output, keeping the position
    fn pause(&mut self);

    /// Halt output and rewind to zero
    fn stop(&mut self);

    /// Jump to a position in the current clip
    fn seek(&mut self, position: Duration);

    /// Repeat the current clip when it ends
    fn set_looping(&mut self, looping: bool);

    /// Output gain in [0, 1]
    fn set_volume(&mut self, volume: f32);

    /// Position in the current clip
    fn elapsed(&self) -> Duration;

    /// Length of the current clip, `None` when nothing is loaded
    fn duration(&self) -> Option<Duration>;

    /// Completion signal
    ///
    /// Outputs that know exactly when a clip ended return true once it has;
    /// the engine then advances without waiting for the threshold poll.
    fn is_finished(&self) -> bool {
        false
    }
}

/// Output that plays nothing
///
/// Accepts every command and never advances time.
#[derive(Debug, Default, Clone)]
pub struct NullOutput {
    volume: f32,
    looping: bool,
}

impl NullOutput {
    /// Create a new null output
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioOutput for NullOutput {
    fn load(&mut self, _audio: &AudioHandle) -> Result<()> {
        Ok(())
    }

    fn play(&mut self) {}

    fn pause(&mut self) {}

    fn stop(&mut self) {}

    fn seek(&mut self, _position: Duration) {}

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn elapsed(&self) -> Duration {
        Duration::ZERO
    }

    fn duration(&self) -> Option<Duration> {
        None
    }
}
