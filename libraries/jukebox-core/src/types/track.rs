/// Track domain type
use crate::types::{AudioHandle, ImageHandle};
use serde::{Deserialize, Serialize};

/// A playable track
///
/// Immutable once authored. The default value is the placeholder shown when
/// nothing is playing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Track {
    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Audio data to hand to the output
    pub audio: AudioHandle,

    /// Cover art (optional)
    pub cover: Option<ImageHandle>,

    /// Source URL (optional)
    pub url: Option<String>,

    /// License identifier ("PD", "CC0-1.0", ...)
    pub license: String,
}

impl Default for Track {
    fn default() -> Self {
        Self {
            title: "Untitled".to_string(),
            artist: "Unknown Artist".to_string(),
            audio: AudioHandle::default(),
            cover: None,
            url: None,
            license: "PD".to_string(),
        }
    }
}

impl Track {
    /// Create a new track
    pub fn new(title: impl Into<String>, artist: impl Into<String>, audio: AudioHandle) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            audio,
            ..Self::default()
        }
    }

    /// Set the cover image
    #[must_use]
    pub fn with_cover(mut self, cover: ImageHandle) -> Self {
        self.cover = Some(cover);
        self
    }

    /// Set the source URL
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the license identifier
    #[must_use]
    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = license.into();
        self
    }

    /// True when the track carries no audio
    pub fn is_placeholder(&self) -> bool {
        self.audio.is_empty()
    }
}
