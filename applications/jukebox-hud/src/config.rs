/// HUD application configuration
use crate::error::{HudError, Result};
use jukebox_playback::EngineConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "jukebox.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub hud: HudSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HudSettings {
    /// Cover shown for tracks without art
    #[serde(default = "default_cover")]
    pub default_cover: String,

    /// Simulated frame length
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,

    /// Seconds between status lines in the log
    #[serde(default = "default_status_interval_secs")]
    pub status_interval_secs: f32,

    /// Volume difference below which the slider ignores engine updates
    #[serde(default = "default_volume_echo_tolerance")]
    pub volume_echo_tolerance: f32,
}

impl Default for HudSettings {
    fn default() -> Self {
        Self {
            default_cover: default_cover(),
            frame_ms: default_frame_ms(),
            status_interval_secs: default_status_interval_secs(),
            volume_echo_tolerance: default_volume_echo_tolerance(),
        }
    }
}

impl HudSettings {
    pub fn frame(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    /// Saturates at `Duration::MAX` for values `validate` would reject
    pub fn status_interval(&self) -> Duration {
        Duration::try_from_secs_f32(self.status_interval_secs.max(0.0)).unwrap_or(Duration::MAX)
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `jukebox.toml` is used when
    /// present. Environment variables override both, e.g.
    /// `JUKEBOX_ENGINE__LOOP_PLAYLIST=false`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("JUKEBOX")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.engine.validate()?;

        if self.hud.frame_ms == 0 {
            return Err(HudError::Config(
                "hud.frame_ms must be at least 1".to_string(),
            ));
        }
        if !self.hud.status_interval_secs.is_finite() || self.hud.status_interval_secs <= 0.0 {
            return Err(HudError::Config(
                "hud.status_interval_secs must be positive".to_string(),
            ));
        }
        if let Err(err) = Duration::try_from_secs_f32(self.hud.status_interval_secs) {
            return Err(HudError::Config(format!(
                "hud.status_interval_secs {} is not a usable duration: {err}",
                self.hud.status_interval_secs
            )));
        }
        if !self.hud.volume_echo_tolerance.is_finite() || self.hud.volume_echo_tolerance < 0.0 {
            return Err(HudError::Config(
                "hud.volume_echo_tolerance must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_cover() -> String {
    "covers/default.png".to_string()
}

fn default_frame_ms() -> u64 {
    16
}

fn default_status_interval_secs() -> f32 {
    1.0
}

fn default_volume_echo_tolerance() -> f32 {
    0.01
}
