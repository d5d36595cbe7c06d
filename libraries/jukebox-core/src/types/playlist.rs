/// Playlist domain type
use crate::error::{CoreError, Result};
use crate::types::Track;
use serde::{Deserialize, Serialize};

/// An ordered list of tracks plus the playback defaults it was authored with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Playlist {
    /// Playlist title
    pub title: String,

    /// Tracks in authoring order
    pub tracks: Vec<Track>,

    /// Start with shuffle enabled
    pub shuffle_by_default: bool,

    /// Start with single-track loop enabled
    pub loop_by_default: bool,

    /// Initial volume in [0, 1]
    pub default_volume: f32,
}

impl Default for Playlist {
    fn default() -> Self {
        Self {
            title: "My Playlist".to_string(),
            tracks: Vec::new(),
            shuffle_by_default: false,
            loop_by_default: true,
            default_volume: 0.8,
        }
    }
}

impl Playlist {
    /// Create an empty playlist
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Replace the track list
    #[must_use]
    pub fn with_tracks(mut self, tracks: Vec<Track>) -> Self {
        self.tracks = tracks;
        self
    }

    /// Append a track
    pub fn push(&mut self, track: Track) {
        self.tracks.push(track);
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// True if the playlist has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Check authoring data
    ///
    /// The engine clamps values on load; this is for tools that want to
    /// reject bad data up front.
    pub fn validate(&self) -> Result<()> {
        if !self.default_volume.is_finite() || !(0.0..=1.0).contains(&self.default_volume) {
            return Err(CoreError::invalid_input(format!(
                "default volume {} is outside [0, 1]",
                self.default_volume
            )));
        }
        Ok(())
    }

    /// Parse a playlist from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render the playlist as pretty JSON text
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AudioHandle;

    fn track(title: &str) -> Track {
        Track::new(title, "Artist", AudioHandle::new(format!("{title}.ogg")))
    }

    #[test]
    fn default_playlist_settings() {
        let playlist = Playlist::default();
        assert_eq!(playlist.title, "My Playlist");
        assert!(!playlist.shuffle_by_default);
        assert!(playlist.loop_by_default);
        assert_eq!(playlist.default_volume, 0.8);
        assert!(playlist.is_empty());
    }

    #[test]
    fn push_keeps_insertion_order() {
        let mut playlist = Playlist::new("Mix");
        playlist.push(track("a"));
        playlist.push(track("b"));
        playlist.push(track("c"));

        let titles: Vec<&str> = playlist.tracks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[test]
    fn validate_rejects_out_of_range_volume() {
        let mut playlist = Playlist::new("Loud");
        playlist.default_volume = 1.5;
        assert!(matches!(playlist.validate(), Err(CoreError::InvalidInput(_))));

        playlist.default_volume = f32::NAN;
        assert!(playlist.validate().is_err());

        playlist.default_volume = 0.0;
        assert!(playlist.validate().is_ok());
    }

    #[test]
    fn json_authoring_format() {
        let json = r#"{
            "title": "Road Trip",
            "tracks": [{"title": "One", "artist": "A", "audio": "one.ogg"}],
            "shuffle_by_default": true
        }"#;

        let playlist = Playlist::from_json(json).unwrap();
        assert_eq!(playlist.title, "Road Trip");
        assert_eq!(playlist.len(), 1);
        assert!(playlist.shuffle_by_default);
        assert!(playlist.loop_by_default);
        assert_eq!(playlist.tracks[0].audio.as_str(), "one.ogg");

        let back = Playlist::from_json(&playlist.to_json().unwrap()).unwrap();
        assert_eq!(back, playlist);
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = Playlist::from_json("{ not json").unwrap_err();
        assert!(matches!(err, CoreError::Serialization(_)));
    }
}
