//! Error types for playback management

use thiserror::Error;

/// Playback errors
///
/// Transport operations never fail; errors only come out of configuration
/// and the platform audio output.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Engine configuration out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Audio output error
    #[error("Audio output error: {0}")]
    Output(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
