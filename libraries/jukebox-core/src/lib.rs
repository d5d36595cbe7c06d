//! Jukebox Core
//!
//! Passive data holders shared by the playback engine and its front ends.
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Playlist`
//! - **Handles**: `AudioHandle`, `ImageHandle` (opaque references resolved by the platform)
//! - **Error Handling**: `CoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use jukebox_core::{AudioHandle, Playlist, Track};
//!
//! let track = Track::new("Morning Light", "The Dawns", AudioHandle::new("clips/morning.ogg"))
//!     .with_license("CC-BY-4.0");
//!
//! let mut playlist = Playlist::new("Ambient");
//! playlist.push(track);
//!
//! assert_eq!(playlist.len(), 1);
//! assert!(playlist.validate().is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod types;

pub use error::{CoreError, Result};
pub use types::{AudioHandle, ImageHandle, Playlist, Track};
