//! Frame loop tying the engine, the simulated output and the HUD together

use crate::config::{AppConfig, HudSettings};
use crate::error::{HudError, Result};
use crate::hud::{Hud, HudView};
use crate::sim::{SimClock, SimulatedOutput};
use jukebox_core::{AudioHandle, ImageHandle, Playlist, Track};
use jukebox_playback::{PlaybackEngine, PlaybackState};
use std::time::Duration;
use tracing::{debug, info};

/// Parse a track argument
///
/// Accepted forms:
/// - `handle`
/// - `Title|Artist|handle`
/// - `Title|Artist|handle|cover`
///
/// A bare handle is titled after its name, without any `@seconds` suffix.
pub fn parse_track(arg: &str) -> Result<Track> {
    let parts: Vec<&str> = arg.split('|').map(str::trim).collect();

    let track = match parts.as_slice() {
        [handle] => {
            let title = handle.rsplit_once('@').map_or(*handle, |(name, _)| name);
            Track {
                title: title.to_string(),
                audio: AudioHandle::new(*handle),
                ..Track::default()
            }
        }
        [title, artist, handle] => Track::new(*title, *artist, AudioHandle::new(*handle)),
        [title, artist, handle, cover] => {
            Track::new(*title, *artist, AudioHandle::new(*handle)).with_cover(ImageHandle::new(*cover))
        }
        _ => {
            return Err(HudError::InvalidTrack(format!(
                "expected 'Title|Artist|handle', got '{arg}'"
            )))
        }
    };

    if track.audio.is_empty() {
        return Err(HudError::InvalidTrack(format!("missing audio handle in '{arg}'")));
    }
    if track.title.is_empty() {
        return Err(HudError::InvalidTrack(format!("missing title in '{arg}'")));
    }
    Ok(track)
}

/// Result of a finished run
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub frames: u64,
    pub simulated: Duration,
    pub state: PlaybackState,
    pub view: HudView,
}

/// Engine, HUD and virtual clock driven at a fixed frame cadence
pub struct Session {
    engine: PlaybackEngine,
    hud: Hud,
    clock: SimClock,
    settings: HudSettings,
    since_status: Duration,
    frames: u64,
}

impl Session {
    /// Build the engine on a simulated output, attach the HUD and start
    pub fn new(config: &AppConfig, playlist: Option<&Playlist>) -> Self {
        let clock = SimClock::new();
        let output = SimulatedOutput::new(clock.clone());
        let mut engine = PlaybackEngine::new(config.engine.clone(), Box::new(output));
        let hud = Hud::attach(&mut engine, &config.hud);

        engine.start(playlist);

        Self {
            engine,
            hud,
            clock,
            settings: config.hud.clone(),
            since_status: Duration::ZERO,
            frames: 0,
        }
    }

    /// Advance one frame
    pub fn step(&mut self) {
        let frame = self.settings.frame();
        self.clock.advance(frame);
        self.engine.tick(frame);
        self.frames += 1;

        self.since_status += frame;
        if self.since_status >= self.settings.status_interval() {
            self.since_status = Duration::ZERO;
            info!("{}", self.hud.snapshot().status_line());
        }
    }

    /// Run until `max_frames` have passed or playback stops
    pub fn run(&mut self, max_frames: u64) -> SessionSummary {
        debug!(max_frames, frame = ?self.settings.frame(), "session started");

        while self.frames < max_frames && self.engine.state() != PlaybackState::Stopped {
            self.step();
        }

        let summary = self.summary();
        info!(
            frames = summary.frames,
            simulated = ?summary.simulated,
            state = ?summary.state,
            "session finished"
        );
        summary
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            frames: self.frames,
            simulated: self.clock.now(),
            state: self.engine.state(),
            view: self.hud.snapshot(),
        }
    }

    /// Apply a gesture with the HUD and the engine
    pub fn with_hud<R>(&mut self, gesture: impl FnOnce(&Hud, &mut PlaybackEngine) -> R) -> R {
        gesture(&self.hud, &mut self.engine)
    }

    pub fn engine(&self) -> &PlaybackEngine {
        &self.engine
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }
}
