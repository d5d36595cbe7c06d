//! Playback engine - core orchestration
//!
//! Owns the working track list, the play order, the transport state and the
//! volume. Every public operation runs to completion and emits its
//! notifications synchronously before returning.

use crate::{
    events::{EventBus, PlayerEvent},
    output::{AudioOutput, NullOutput},
    progress::ProgressTracker,
    shuffle::PlayOrder,
    types::{EngineConfig, PlaybackState},
    volume::Volume,
};
use jukebox_core::{Playlist, Track};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tracing::{debug, warn};

/// Central playback management
///
/// Orchestrates:
/// - Play order (sequential or shuffled)
/// - Transport (play, pause, stop, next, previous)
/// - Loop modes (single track, whole playlist)
/// - Volume (clamped, stepped)
/// - Progress reporting and end-of-track detection from `tick`
///
/// Not thread-safe by design of use: drive it from one loop.
pub struct PlaybackEngine {
    // State
    state: PlaybackState,
    current: usize,
    clip_loaded: bool,

    // Playlist
    tracks: Vec<Track>,
    order: PlayOrder,

    // Settings
    shuffle: bool,
    looping: bool,
    loop_playlist: bool,
    volume: Volume,
    config: EngineConfig,

    // Collaborators
    output: Box<dyn AudioOutput>,
    events: EventBus,
    progress: ProgressTracker,
    rng: StdRng,
}

impl PlaybackEngine {
    /// Create a new engine driving `output`
    pub fn new(config: EngineConfig, mut output: Box<dyn AudioOutput>) -> Self {
        let volume = Volume::new(config.volume, config.volume_step);
        output.set_looping(config.looping);
        output.set_volume(volume.level());

        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            state: PlaybackState::Stopped,
            current: 0,
            clip_loaded: false,
            tracks: Vec::new(),
            order: PlayOrder::default(),
            shuffle: config.shuffle,
            looping: config.looping,
            loop_playlist: config.loop_playlist,
            volume,
            progress: ProgressTracker::new(
                config.progress_interval(),
                config.end_of_track_threshold(),
            ),
            config,
            output,
            events: EventBus::new(),
            rng,
        }
    }

    /// Create an engine with a silent output
    pub fn with_null_output(config: EngineConfig) -> Self {
        Self::new(config, Box::new(NullOutput::new()))
    }

    /// Scene-start hook
    ///
    /// Publishes the configured volume, loads `initial` if given, then stops
    /// unless `play_on_start` is set.
    pub fn start(&mut self, initial: Option<&Playlist>) {
        self.set_volume(self.volume.level());

        if let Some(playlist) = initial {
            self.load(playlist);
        }

        if self.config.play_on_start && !self.tracks.is_empty() {
            if self.state != PlaybackState::Playing {
                self.play_current();
            }
        } else {
            self.set_state(PlaybackState::Stopped);
        }
    }

    // ===== Playlist =====

    /// Replace the working track list with a playlist
    ///
    /// Adopts the playlist's shuffle/loop/volume defaults, rewinds to the
    /// first position, and starts playing if there is anything to play.
    pub fn load(&mut self, playlist: &Playlist) {
        debug!(
            title = %playlist.title,
            tracks = playlist.len(),
            "loading playlist"
        );

        self.tracks = playlist.tracks.clone();
        self.shuffle = playlist.shuffle_by_default;
        self.looping = playlist.loop_by_default;
        self.output.set_looping(self.looping);
        self.set_volume(playlist.default_volume);

        self.current = 0;
        self.order = self.generate_order();

        let track_count = self.tracks.len();
        self.events
            .emit(&PlayerEvent::PlaylistUpdated { track_count });
        self.events.emit(&PlayerEvent::PlaylistLoaded {
            title: playlist.title.clone(),
            track_count,
            shuffle: self.shuffle,
            looping: self.looping,
        });

        if self.tracks.is_empty() {
            self.set_state(PlaybackState::Stopped);
        } else {
            self.play_current();
        }
    }

    /// Append a track to the working list
    ///
    /// The first track added while stopped starts playback.
    pub fn add_track(&mut self, track: Track) {
        self.tracks.push(track);
        self.regenerate_order();

        let track_count = self.tracks.len();
        self.events
            .emit(&PlayerEvent::PlaylistUpdated { track_count });

        if track_count == 1 && self.state == PlaybackState::Stopped {
            self.play();
        }
    }

    // ===== Transport =====

    /// Resume if paused, otherwise (re)start the track at the current position
    pub fn play(&mut self) {
        if self.tracks.is_empty() {
            return;
        }

        if self.state == PlaybackState::Paused {
            self.output.play();
            self.set_state(PlaybackState::Playing);
        } else {
            self.play_current();
        }
    }

    /// Pause playback (only from Playing)
    pub fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }

        self.output.pause();
        self.set_state(PlaybackState::Paused);
    }

    /// Stop playback and rewind
    pub fn stop(&mut self) {
        self.set_state(PlaybackState::Stopped);
    }

    /// Pause when playing, play otherwise
    pub fn toggle_play_pause(&mut self) {
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused | PlaybackState::Stopped => self.play(),
        }
    }

    /// Advance one position in the play order
    ///
    /// Past the last position: wraps when looping the playlist, otherwise
    /// stops in place and reports the end.
    pub fn next_track(&mut self) {
        if self.order.is_empty() {
            return;
        }

        let mut next = self.current + 1;
        if next >= self.order.len() {
            if !self.loop_playlist {
                self.set_state(PlaybackState::Stopped);
                self.events.emit(&PlayerEvent::ReachedPlaylistEnd);
                return;
            }
            next = 0;
        }

        self.current = next;
        self.play_current();
    }

    /// Step back one position in the play order
    ///
    /// Before the first position: wraps to the last when looping the
    /// playlist, otherwise stops in place and reports the start.
    pub fn previous_track(&mut self) {
        if self.order.is_empty() {
            return;
        }

        let previous = match self.current.checked_sub(1) {
            Some(previous) => previous,
            None if self.loop_playlist => self.order.len() - 1,
            None => {
                self.set_state(PlaybackState::Stopped);
                self.events.emit(&PlayerEvent::ReachedPlaylistStart);
                return;
            }
        };

        self.current = previous;
        self.play_current();
    }

    /// Seek within the current track (0.0-1.0)
    ///
    /// No-op while stopped or when the output reports no duration.
    pub fn seek_to_percent(&mut self, percent: f32) {
        if self.state == PlaybackState::Stopped || percent.is_nan() {
            return;
        }
        let Some(duration) = self.output.duration() else {
            return;
        };

        let position = duration.mul_f32(percent.clamp(0.0, 1.0));
        debug!(?position, "seek");
        self.output.seek(position);
        self.progress.reset();
    }

    // ===== Shuffle & Loop =====

    /// Flip shuffle and rebuild the play order
    ///
    /// The now-playing track keeps playing: with shuffle on it moves to the
    /// head of the new order, with shuffle off the position follows it back
    /// to its natural slot.
    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
        self.regenerate_order();
        self.events.emit(&PlayerEvent::ShuffleChanged(self.shuffle));
    }

    /// Flip single-track loop
    pub fn toggle_loop(&mut self) {
        self.looping = !self.looping;
        self.output.set_looping(self.looping);
        self.events.emit(&PlayerEvent::LoopChanged(self.looping));
    }

    /// Wrap around at playlist boundaries instead of stopping
    pub fn set_loop_playlist(&mut self, loop_playlist: bool) {
        self.loop_playlist = loop_playlist;
    }

    // ===== Volume =====

    /// Set volume, clamped to [0, 1]
    ///
    /// Always notifies, even when the value did not change; listeners that
    /// feed the volume back in must suppress their own echo.
    pub fn set_volume(&mut self, volume: f32) {
        if !self.volume.set(volume) {
            debug!("ignoring NaN volume");
            return;
        }

        self.output.set_volume(self.volume.level());
        self.events
            .emit(&PlayerEvent::VolumeChanged(self.volume.level()));
    }

    /// Raise volume by one step
    pub fn increase_volume(&mut self) {
        self.set_volume(self.volume.raised());
    }

    /// Lower volume by one step
    pub fn decrease_volume(&mut self) {
        self.set_volume(self.volume.lowered());
    }

    /// Change the volume step size
    pub fn set_volume_step(&mut self, step: f32) {
        self.volume.set_step(step);
    }

    // ===== Frame tick =====

    /// Per-frame update
    ///
    /// While playing: emits `Progress` at the configured cadence and, when
    /// not looping the track, advances once the output reports completion or
    /// the clip is within the end-of-track threshold.
    pub fn tick(&mut self, delta: Duration) {
        if self.state != PlaybackState::Playing || !self.clip_loaded {
            return;
        }
        let Some(duration) = self.output.duration() else {
            return;
        };
        let elapsed = self.output.elapsed();

        if self.progress.advance(delta) {
            let fraction = ProgressTracker::fraction(elapsed, duration);
            self.events.emit(&PlayerEvent::Progress(fraction));
        }

        if !self.looping && (self.output.is_finished() || self.progress.near_end(elapsed, duration))
        {
            debug!(position = self.current, "track finished");
            self.next_track();
        }
    }

    // ===== State Queries =====

    /// Current playback state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Now-playing track, or the configured placeholder
    pub fn current_track(&self) -> &Track {
        self.order
            .get(self.current)
            .and_then(|index| self.tracks.get(index))
            .unwrap_or(&self.config.default_track)
    }

    /// Position in the play order
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Current play order
    pub fn play_order(&self) -> &PlayOrder {
        &self.order
    }

    /// Working track list, in insertion order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Volume level (0.0-1.0)
    pub fn volume(&self) -> f32 {
        self.volume.level()
    }

    /// Volume step size
    pub fn volume_step(&self) -> f32 {
        self.volume.step()
    }

    /// Single-track loop flag
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Shuffle flag
    pub fn is_shuffled(&self) -> bool {
        self.shuffle
    }

    /// Playlist wraparound flag
    pub fn loop_playlist(&self) -> bool {
        self.loop_playlist
    }

    /// Position in the current track
    pub fn position(&self) -> Duration {
        self.output.elapsed()
    }

    /// Length of the current track, if the output knows it
    pub fn track_duration(&self) -> Option<Duration> {
        self.output.duration()
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Notification channels, for subscribing
    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    // ===== Internals =====

    fn generate_order(&mut self) -> PlayOrder {
        if self.shuffle {
            PlayOrder::shuffled(self.tracks.len(), &mut self.rng)
        } else {
            PlayOrder::identity(self.tracks.len())
        }
    }

    /// Rebuild the play order, keeping the now-playing track current
    fn regenerate_order(&mut self) {
        let now_playing = self.order.get(self.current);
        self.order = self.generate_order();

        let Some(position) = now_playing.and_then(|index| self.order.position_of(index)) else {
            self.current = 0;
            return;
        };

        if self.shuffle {
            self.order.move_to_front(position);
            self.current = 0;
        } else {
            self.current = position;
        }
    }

    /// Load and start the track at the current position
    fn play_current(&mut self) {
        let Some(track) = self
            .order
            .get(self.current)
            .and_then(|index| self.tracks.get(index))
            .cloned()
        else {
            self.set_state(PlaybackState::Stopped);
            return;
        };

        if let Err(err) = self.output.load(&track.audio) {
            warn!(title = %track.title, audio = %track.audio, "failed to load track: {}", err);
            self.clip_loaded = false;
            self.set_state(PlaybackState::Stopped);
            return;
        }

        self.clip_loaded = true;
        self.output.play();
        self.progress.reset();

        debug!(position = self.current, title = %track.title, "playing");
        self.events.emit(&PlayerEvent::TrackChanged(track));
        self.set_state(PlaybackState::Playing);
    }

    /// Transition to `new_state`; self-transitions are silent
    fn set_state(&mut self, new_state: PlaybackState) {
        if self.state == new_state {
            return;
        }

        debug!(from = ?self.state, to = ?new_state, "state change");
        self.state = new_state;

        match new_state {
            PlaybackState::Stopped => {
                self.output.stop();
                self.events
                    .emit(&PlayerEvent::TrackChanged(self.config.default_track.clone()));
            }
            PlaybackState::Paused | PlaybackState::Playing => {}
        }

        self.events.emit(&PlayerEvent::StateChanged(new_state));
    }
}

impl Default for PlaybackEngine {
    fn default() -> Self {
        Self::with_null_output(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use jukebox_core::AudioHandle;
    use std::sync::{Arc, Mutex};

    fn track(title: &str) -> Track {
        Track::new(title, "Artist", AudioHandle::new(format!("{title}.ogg")))
    }

    fn playlist(titles: &[&str]) -> Playlist {
        Playlist::new("Test").with_tracks(titles.iter().map(|t| track(t)).collect())
    }

    fn record(engine: &mut PlaybackEngine) -> Arc<Mutex<Vec<PlayerEvent>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        engine
            .events_mut()
            .subscribe_all(move |event| sink.lock().unwrap().push(event.clone()));
        log
    }

    #[test]
    fn new_engine_is_stopped_with_placeholder() {
        let engine = PlaybackEngine::default();
        assert_eq!(engine.state(), PlaybackState::Stopped);
        assert!(engine.current_track().is_placeholder());
        assert!(engine.play_order().is_empty());
    }

    #[test]
    fn load_starts_at_first_track() {
        let mut engine = PlaybackEngine::default();
        engine.load(&playlist(&["a", "b", "c"]));

        assert_eq!(engine.state(), PlaybackState::Playing);
        assert_eq!(engine.current_index(), 0);
        assert_eq!(engine.current_track().title, "a");
        assert_eq!(engine.play_order().as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn load_adopts_playlist_defaults() {
        let mut engine = PlaybackEngine::default();
        let mut list = playlist(&["a"]);
        list.loop_by_default = false;
        list.default_volume = 0.3;

        engine.load(&list);
        assert!(!engine.is_looping());
        assert!(!engine.is_shuffled());
        assert_eq!(engine.volume(), 0.3);
    }

    #[test]
    fn load_emits_in_order() {
        let mut engine = PlaybackEngine::default();
        let log = record(&mut engine);

        engine.load(&playlist(&["a", "b"]));

        let kinds: Vec<EventKind> = log.lock().unwrap().iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::VolumeChanged,
                EventKind::PlaylistUpdated,
                EventKind::PlaylistLoaded,
                EventKind::TrackChanged,
                EventKind::StateChanged,
            ]
        );
    }

    #[test]
    fn loading_empty_playlist_stops() {
        let mut engine = PlaybackEngine::default();
        engine.load(&playlist(&["a"]));
        engine.load(&Playlist::new("Empty"));

        assert_eq!(engine.state(), PlaybackState::Stopped);
        assert!(engine.current_track().is_placeholder());
    }

    #[test]
    fn first_added_track_autoplays() {
        let mut engine = PlaybackEngine::default();
        engine.add_track(track("a"));
        assert_eq!(engine.state(), PlaybackState::Playing);

        engine.add_track(track("b"));
        assert_eq!(engine.current_track().title, "a");
        assert_eq!(engine.tracks().len(), 2);
    }

    #[test]
    fn pause_and_resume() {
        let mut engine = PlaybackEngine::default();
        engine.load(&playlist(&["a"]));
        let log = record(&mut engine);

        engine.pause();
        assert_eq!(engine.state(), PlaybackState::Paused);

        engine.play();
        assert_eq!(engine.state(), PlaybackState::Playing);

        // Resume does not re-announce the track
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                PlayerEvent::StateChanged(PlaybackState::Paused),
                PlayerEvent::StateChanged(PlaybackState::Playing),
            ]
        );
    }

    #[test]
    fn toggle_play_pause_cycles() {
        let mut engine = PlaybackEngine::default();
        engine.load(&playlist(&["a"]));
        engine.stop();

        engine.toggle_play_pause();
        assert_eq!(engine.state(), PlaybackState::Playing);
        engine.toggle_play_pause();
        assert_eq!(engine.state(), PlaybackState::Paused);
        engine.toggle_play_pause();
        assert_eq!(engine.state(), PlaybackState::Playing);
    }

    #[test]
    fn previous_wraps_to_last() {
        let mut engine = PlaybackEngine::default();
        engine.load(&playlist(&["a", "b", "c"]));

        engine.previous_track();
        assert_eq!(engine.current_index(), 2);
        assert_eq!(engine.current_track().title, "c");
    }

    #[test]
    fn toggle_loop_flips_and_notifies() {
        let mut engine = PlaybackEngine::default();
        let log = record(&mut engine);

        engine.toggle_loop();
        assert!(!engine.is_looping());
        engine.toggle_loop();
        assert!(engine.is_looping());

        assert_eq!(
            *log.lock().unwrap(),
            vec![PlayerEvent::LoopChanged(false), PlayerEvent::LoopChanged(true)]
        );
    }

    #[test]
    fn volume_steps_clamp() {
        let mut engine = PlaybackEngine::default();
        engine.set_volume(0.95);
        engine.increase_volume();
        assert_eq!(engine.volume(), 1.0);

        engine.set_volume(0.05);
        engine.decrease_volume();
        assert_eq!(engine.volume(), 0.0);
    }

    #[test]
    fn start_without_play_on_start_stays_stopped() {
        let mut engine = PlaybackEngine::default();
        engine.start(Some(&playlist(&["a", "b"])));

        assert_eq!(engine.state(), PlaybackState::Stopped);
        assert_eq!(engine.tracks().len(), 2);
    }

    #[test]
    fn start_with_play_on_start_plays() {
        let config = EngineConfig {
            play_on_start: true,
            ..EngineConfig::default()
        };
        let mut engine = PlaybackEngine::with_null_output(config);
        engine.start(Some(&playlist(&["a"])));

        assert_eq!(engine.state(), PlaybackState::Playing);
    }

    #[test]
    fn unvalidated_oversized_interval_does_not_panic() {
        let config = EngineConfig {
            progress_interval_secs: 1e30,
            ..EngineConfig::default()
        };
        let mut engine = PlaybackEngine::with_null_output(config);
        engine.load(&playlist(&["a"]));
        engine.tick(Duration::from_millis(16));

        assert_eq!(engine.state(), PlaybackState::Playing);
    }

    #[test]
    fn seek_is_ignored_when_stopped() {
        let mut engine = PlaybackEngine::default();
        engine.seek_to_percent(0.5);
        assert_eq!(engine.position(), Duration::ZERO);
    }
}
