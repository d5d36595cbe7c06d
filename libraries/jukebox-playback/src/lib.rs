//! Jukebox - Playback Management
//!
//! Platform-agnostic playlist sequencing for Jukebox.
//!
//! This crate provides:
//! - Play order generation (sequential or Fisher-Yates shuffled)
//! - Transport control (play, pause, stop, next, previous, seek)
//! - Loop modes (single track, whole playlist)
//! - Volume control (clamped to 0.0-1.0, fixed step)
//! - Progress notifications and end-of-track detection from a frame tick
//! - Synchronous multicast notifications for UI layers
//!
//! # Architecture
//!
//! `jukebox-playback` does no decoding or mixing. The platform hands the
//! engine an [`AudioOutput`] and drives [`PlaybackEngine::tick`] from its
//! main loop. There are no threads and no async: every operation completes,
//! notifications included, before it returns.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use jukebox_core::{AudioHandle, Playlist, Track};
//! use jukebox_playback::{EngineConfig, PlaybackEngine, PlaybackState};
//!
//! let mut engine = PlaybackEngine::with_null_output(EngineConfig::default());
//!
//! let playlist = Playlist::new("Evening").with_tracks(vec![
//!     Track::new("One", "Band", AudioHandle::new("one.ogg")),
//!     Track::new("Two", "Band", AudioHandle::new("two.ogg")),
//! ]);
//!
//! engine.load(&playlist);
//! assert_eq!(engine.state(), PlaybackState::Playing);
//!
//! engine.next_track();
//! assert_eq!(engine.current_track().title, "Two");
//!
//! engine.pause();
//! assert_eq!(engine.state(), PlaybackState::Paused);
//! ```
//!
//! # Example: Listening for Notifications
//!
//! ```rust
//! use jukebox_playback::{EventKind, PlaybackEngine, PlayerEvent};
//! use std::sync::{Arc, Mutex};
//!
//! let mut engine = PlaybackEngine::default();
//! let volume = Arc::new(Mutex::new(None));
//!
//! let sink = Arc::clone(&volume);
//! let subscription = engine.events_mut().subscribe(EventKind::VolumeChanged, move |event| {
//!     if let PlayerEvent::VolumeChanged(level) = event {
//!         *sink.lock().unwrap() = Some(*level);
//!     }
//! });
//!
//! engine.set_volume(1.7);
//! assert_eq!(*volume.lock().unwrap(), Some(1.0));
//!
//! engine.events_mut().unsubscribe(&subscription);
//! ```
//!
//! # Example: Platform Integration
//!
//! ```rust,no_run
//! use jukebox_core::AudioHandle;
//! use jukebox_playback::{AudioOutput, EngineConfig, PlaybackEngine, Result};
//! use std::time::Duration;
//!
//! // Implement AudioOutput for your platform
//! struct MyMixerChannel {
//!     // ... platform-specific voice
//! }
//!
//! impl AudioOutput for MyMixerChannel {
//!     fn load(&mut self, audio: &AudioHandle) -> Result<()> { Ok(()) }
//!     fn play(&mut self) {}
//!     fn pause(&mut self) {}
//!     fn stop(&mut self) {}
//!     fn seek(&mut self, position: Duration) {}
//!     fn set_looping(&mut self, looping: bool) {}
//!     fn set_volume(&mut self, volume: f32) {}
//!     fn elapsed(&self) -> Duration { Duration::ZERO }
//!     fn duration(&self) -> Option<Duration> { Some(Duration::from_secs(180)) }
//! }
//!
//! let mut engine = PlaybackEngine::new(EngineConfig::default(), Box::new(MyMixerChannel {}));
//!
//! // Call once per frame from the main loop
//! engine.tick(Duration::from_millis(16));
//! ```

mod engine;
mod error;
pub mod events;
mod output;
mod progress;
pub mod shuffle;
pub mod types;
mod volume;

// Public exports
pub use engine::PlaybackEngine;
pub use error::{PlaybackError, Result};
pub use events::{EventBus, EventKind, PlayerEvent, Subscription};
pub use output::{AudioOutput, NullOutput};
pub use progress::ProgressTracker;
pub use shuffle::{shuffle_in_place, PlayOrder};
pub use types::{EngineConfig, PlaybackState};
pub use volume::Volume;
