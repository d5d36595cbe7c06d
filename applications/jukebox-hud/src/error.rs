/// HUD application error types
use jukebox_playback::PlaybackError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HudError>;

#[derive(Debug, Error)]
pub enum HudError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid track: {0}")]
    InvalidTrack(String),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),
}

impl From<config::ConfigError> for HudError {
    fn from(err: config::ConfigError) -> Self {
        HudError::Config(err.to_string())
    }
}
