//! Core types for playback management

use crate::error::{PlaybackError, Result};
use jukebox_core::Track;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Playback state
///
/// Exactly one holds at a time. Initial state is `Stopped`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Nothing playing, position rewound
    #[default]
    Stopped,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

/// Configuration for the playback engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Initial shuffle flag (default: false)
    pub shuffle: bool,

    /// Repeat the current track indefinitely (default: true)
    pub looping: bool,

    /// Wrap around at playlist boundaries instead of stopping (default: true)
    pub loop_playlist: bool,

    /// Start playing as soon as the engine starts (default: false)
    pub play_on_start: bool,

    /// Initial volume in [0, 1] (default: 0.8)
    pub volume: f32,

    /// Volume change per increase/decrease step (default: 0.1)
    pub volume_step: f32,

    /// Seconds before the end at which a track counts as finished (default: 0.1)
    pub end_of_track_threshold_secs: f32,

    /// Seconds between progress notifications (default: 0.1)
    pub progress_interval_secs: f32,

    /// Fixed shuffle seed for reproducible play orders
    pub shuffle_seed: Option<u64>,

    /// Track reported when nothing is playing
    pub default_track: Track,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            shuffle: false,
            looping: true,
            loop_playlist: true,
            play_on_start: false,
            volume: 0.8,
            volume_step: 0.1,
            end_of_track_threshold_secs: 0.1,
            progress_interval_secs: 0.1,
            shuffle_seed: None,
            default_track: Track::default(),
        }
    }
}

impl EngineConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !unit_range(self.volume) {
            return Err(PlaybackError::InvalidConfig(format!(
                "volume {} must be within [0, 1]",
                self.volume
            )));
        }
        if !unit_range(self.volume_step) {
            return Err(PlaybackError::InvalidConfig(format!(
                "volume_step {} must be within [0, 1]",
                self.volume_step
            )));
        }
        if !self.end_of_track_threshold_secs.is_finite() || self.end_of_track_threshold_secs < 0.0
        {
            return Err(PlaybackError::InvalidConfig(format!(
                "end_of_track_threshold_secs {} must be a non-negative number",
                self.end_of_track_threshold_secs
            )));
        }
        if !self.progress_interval_secs.is_finite() || self.progress_interval_secs <= 0.0 {
            return Err(PlaybackError::InvalidConfig(format!(
                "progress_interval_secs {} must be positive",
                self.progress_interval_secs
            )));
        }
        seconds("end_of_track_threshold_secs", self.end_of_track_threshold_secs)?;
        seconds("progress_interval_secs", self.progress_interval_secs)?;
        Ok(())
    }

    /// Progress notification cadence
    ///
    /// Saturates at `Duration::MAX` for values `validate` would reject.
    pub fn progress_interval(&self) -> Duration {
        seconds("progress_interval_secs", self.progress_interval_secs.max(0.0))
            .unwrap_or(Duration::MAX)
    }

    /// End-of-track detection window
    pub fn end_of_track_threshold(&self) -> Duration {
        seconds(
            "end_of_track_threshold_secs",
            self.end_of_track_threshold_secs.max(0.0),
        )
        .unwrap_or(Duration::MAX)
    }
}

fn seconds(name: &str, value: f32) -> Result<Duration> {
    Duration::try_from_secs_f32(value).map_err(|err| {
        PlaybackError::InvalidConfig(format!("{name} {value} is not a usable duration: {err}"))
    })
}

fn unit_range(value: f32) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}
