//! HUD binding
//!
//! Mirrors engine notifications into a view model and turns user gestures
//! into engine operations. The view holds only what a screen would draw.

use crate::config::HudSettings;
use jukebox_core::{ImageHandle, Track};
use jukebox_playback::{
    EventKind, PlaybackEngine, PlaybackState, PlayerEvent, Subscription, Volume,
};
use std::fmt::Write as _;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;

/// Glyph shown on the play/pause button while playing (pause symbol)
pub const PAUSE_ICON: char = '\u{f04c}';

/// Glyph shown on the play/pause button otherwise (play symbol)
pub const PLAY_ICON: char = '\u{f04b}';

/// What the HUD currently displays
#[derive(Debug, Clone, PartialEq)]
pub struct HudView {
    pub title: String,
    pub artist: String,
    pub cover: ImageHandle,
    pub playlist_title: String,
    pub track_count: usize,
    /// Progress slider, 0.0 to 1.0
    pub progress: f32,
    /// Volume slider, 0.0 to 1.0
    pub volume: f32,
    pub state: PlaybackState,
    pub loop_active: bool,
    pub shuffle_active: bool,
    /// User is holding the progress slider
    pub dragging_progress: bool,

    default_cover: ImageHandle,
    volume_echo_tolerance: f32,
}

impl HudView {
    pub fn new(settings: &HudSettings) -> Self {
        let default_cover = ImageHandle::new(settings.default_cover.clone());
        let placeholder = Track::default();

        Self {
            title: placeholder.title,
            artist: placeholder.artist,
            cover: default_cover.clone(),
            playlist_title: String::new(),
            track_count: 0,
            progress: 0.0,
            volume: 0.0,
            state: PlaybackState::Stopped,
            loop_active: false,
            shuffle_active: false,
            dragging_progress: false,
            default_cover,
            volume_echo_tolerance: settings.volume_echo_tolerance,
        }
    }

    /// Update the view for one engine notification
    pub fn apply(&mut self, event: &PlayerEvent) {
        match event {
            PlayerEvent::TrackChanged(track) => self.show_track(track),
            PlayerEvent::StateChanged(state) => self.state = *state,
            PlayerEvent::Progress(progress) => {
                if !self.dragging_progress {
                    self.progress = *progress;
                }
            }
            PlayerEvent::VolumeChanged(volume) => {
                // Skip our own slider input coming back
                if (self.volume - volume).abs() > self.volume_echo_tolerance {
                    self.volume = *volume;
                }
            }
            PlayerEvent::LoopChanged(looping) => self.loop_active = *looping,
            PlayerEvent::ShuffleChanged(shuffle) => self.shuffle_active = *shuffle,
            PlayerEvent::PlaylistLoaded {
                title,
                track_count,
                shuffle,
                looping,
            } => {
                self.playlist_title.clone_from(title);
                self.track_count = *track_count;
                self.shuffle_active = *shuffle;
                self.loop_active = *looping;
            }
            PlayerEvent::PlaylistUpdated { track_count } => self.track_count = *track_count,
            PlayerEvent::ReachedPlaylistStart => info!("reached start of playlist"),
            PlayerEvent::ReachedPlaylistEnd => info!("reached end of playlist"),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Icon glyph for the play/pause button
    pub fn play_pause_icon(&self) -> char {
        if self.is_playing() {
            PAUSE_ICON
        } else {
            PLAY_ICON
        }
    }

    /// Text fallback for the play/pause button
    pub fn play_pause_label(&self) -> &'static str {
        if self.is_playing() {
            "Pause"
        } else {
            "Play"
        }
    }

    /// One-line summary for the log
    pub fn status_line(&self) -> String {
        let mut line = format!(
            "[{}] {} - {} | {:>3.0}% | vol {:>3.0}% ({:.1} dB)",
            self.play_pause_label(),
            self.title,
            self.artist,
            self.progress * 100.0,
            self.volume * 100.0,
            Volume::new(self.volume, 0.0).to_db(),
        );
        if self.loop_active {
            line.push_str(" | loop");
        }
        if self.shuffle_active {
            line.push_str(" | shuffle");
        }
        if !self.playlist_title.is_empty() {
            let _ = write!(line, " | {} ({})", self.playlist_title, self.track_count);
        }
        line
    }

    fn show_track(&mut self, track: &Track) {
        self.title.clone_from(&track.title);
        self.artist.clone_from(&track.artist);
        self.cover = track
            .cover
            .clone()
            .unwrap_or_else(|| self.default_cover.clone());
        self.progress = 0.0;
    }
}

/// Live HUD attached to an engine
///
/// Listeners hold a shared handle to the view; gesture methods borrow the
/// engine for the duration of the call only.
pub struct Hud {
    view: Arc<Mutex<HudView>>,
    subscriptions: Vec<Subscription>,
}

impl Hud {
    /// Subscribe to every engine channel and sync with the current state
    pub fn attach(engine: &mut PlaybackEngine, settings: &HudSettings) -> Self {
        let mut view = HudView::new(settings);
        view.show_track(engine.current_track());
        view.state = engine.state();
        view.volume = engine.volume();
        view.loop_active = engine.is_looping();
        view.shuffle_active = engine.is_shuffled();
        view.track_count = engine.tracks().len();

        let view = Arc::new(Mutex::new(view));
        let subscriptions = EventKind::ALL
            .iter()
            .map(|kind| {
                let view = Arc::clone(&view);
                engine.events_mut().subscribe(*kind, move |event| {
                    view.lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .apply(event);
                })
            })
            .collect();

        Self {
            view,
            subscriptions,
        }
    }

    /// Unsubscribe from the engine
    pub fn detach(self, engine: &mut PlaybackEngine) {
        for subscription in &self.subscriptions {
            engine.events_mut().unsubscribe(subscription);
        }
    }

    /// Copy of what is on screen
    pub fn snapshot(&self) -> HudView {
        self.lock().clone()
    }

    // ===== Gestures =====

    pub fn play_pause(&self, engine: &mut PlaybackEngine) {
        engine.toggle_play_pause();
    }

    pub fn next(&self, engine: &mut PlaybackEngine) {
        engine.next_track();
    }

    pub fn previous(&self, engine: &mut PlaybackEngine) {
        engine.previous_track();
    }

    pub fn toggle_loop(&self, engine: &mut PlaybackEngine) {
        engine.toggle_loop();
    }

    pub fn toggle_shuffle(&self, engine: &mut PlaybackEngine) {
        engine.toggle_shuffle();
    }

    pub fn volume_up(&self, engine: &mut PlaybackEngine) {
        engine.increase_volume();
    }

    pub fn volume_down(&self, engine: &mut PlaybackEngine) {
        engine.decrease_volume();
    }

    /// User moved the volume slider
    pub fn slide_volume(&self, engine: &mut PlaybackEngine, value: f32) {
        self.lock().volume = value.clamp(0.0, 1.0);
        engine.set_volume(value);
    }

    /// User grabbed the progress slider
    pub fn begin_progress_drag(&self) {
        self.lock().dragging_progress = true;
    }

    /// User is moving the progress slider
    pub fn drag_progress(&self, value: f32) {
        let mut view = self.lock();
        if view.dragging_progress {
            view.progress = value.clamp(0.0, 1.0);
        }
    }

    /// User released the progress slider; seeks to where it was left
    pub fn end_progress_drag(&self, engine: &mut PlaybackEngine) {
        let target = {
            let mut view = self.lock();
            if !view.dragging_progress {
                return;
            }
            view.dragging_progress = false;
            view.progress
        };
        engine.seek_to_percent(target);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HudView> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jukebox_core::{AudioHandle, Playlist};

    fn view() -> HudView {
        HudView::new(&HudSettings::default())
    }

    fn track(title: &str) -> Track {
        Track::new(title, "Artist", AudioHandle::new(format!("{title}.ogg")))
    }

    #[test]
    fn track_change_uses_default_cover_when_missing() {
        let mut view = view();
        view.progress = 0.7;

        view.apply(&PlayerEvent::TrackChanged(track("Plain")));
        assert_eq!(view.title, "Plain");
        assert_eq!(view.cover.as_str(), "covers/default.png");
        assert_eq!(view.progress, 0.0);

        let with_art = track("Art").with_cover(ImageHandle::new("art.png"));
        view.apply(&PlayerEvent::TrackChanged(with_art));
        assert_eq!(view.cover.as_str(), "art.png");
    }

    #[test]
    fn progress_ignored_while_dragging() {
        let mut view = view();
        view.apply(&PlayerEvent::Progress(0.25));
        assert_eq!(view.progress, 0.25);

        view.dragging_progress = true;
        view.apply(&PlayerEvent::Progress(0.5));
        assert_eq!(view.progress, 0.25);
    }

    #[test]
    fn volume_echo_is_suppressed() {
        let mut view = view();
        view.volume = 0.5;

        view.apply(&PlayerEvent::VolumeChanged(0.505));
        assert_eq!(view.volume, 0.5);

        view.apply(&PlayerEvent::VolumeChanged(0.6));
        assert_eq!(view.volume, 0.6);
    }

    #[test]
    fn play_pause_icon_follows_state() {
        let mut view = view();
        assert_eq!(view.play_pause_icon(), PLAY_ICON);

        view.apply(&PlayerEvent::StateChanged(PlaybackState::Playing));
        assert_eq!(view.play_pause_icon(), PAUSE_ICON);
        assert_eq!(view.play_pause_label(), "Pause");

        view.apply(&PlayerEvent::StateChanged(PlaybackState::Paused));
        assert_eq!(view.play_pause_icon(), PLAY_ICON);
    }

    #[test]
    fn status_line_mentions_track_and_modes() {
        let mut view = view();
        view.apply(&PlayerEvent::TrackChanged(track("Song")));
        view.apply(&PlayerEvent::PlaylistLoaded {
            title: "Mix".to_string(),
            track_count: 4,
            shuffle: true,
            looping: false,
        });

        let line = view.status_line();
        assert!(line.contains("Song - Artist"));
        assert!(line.contains("shuffle"));
        assert!(!line.contains("loop"));
        assert!(line.contains("Mix (4)"));
        assert!(line.contains("vol   0% (-60.0 dB)"));
    }

    #[test]
    fn attach_syncs_and_detach_unsubscribes() {
        let mut engine = PlaybackEngine::default();
        let hud = Hud::attach(&mut engine, &HudSettings::default());

        let initial = hud.snapshot();
        assert_eq!(initial.title, "Untitled");
        assert!(initial.loop_active);
        assert_eq!(initial.volume, 0.8);
        assert_eq!(engine.events_mut().listener_count(), EventKind::ALL.len());

        engine.load(&Playlist::new("Set").with_tracks(vec![track("One")]));
        let loaded = hud.snapshot();
        assert_eq!(loaded.title, "One");
        assert_eq!(loaded.playlist_title, "Set");
        assert!(loaded.is_playing());

        hud.detach(&mut engine);
        assert_eq!(engine.events_mut().listener_count(), 0);
    }

    #[test]
    fn gestures_drive_engine() {
        let mut engine = PlaybackEngine::default();
        let hud = Hud::attach(&mut engine, &HudSettings::default());
        engine.load(&Playlist::new("Set").with_tracks(vec![track("One"), track("Two")]));

        hud.next(&mut engine);
        assert_eq!(hud.snapshot().title, "Two");

        hud.play_pause(&mut engine);
        assert_eq!(engine.state(), PlaybackState::Paused);
        assert_eq!(hud.snapshot().play_pause_icon(), PLAY_ICON);

        hud.toggle_shuffle(&mut engine);
        assert!(hud.snapshot().shuffle_active);

        hud.slide_volume(&mut engine, 0.3);
        assert_eq!(engine.volume(), 0.3);
        assert_eq!(hud.snapshot().volume, 0.3);
    }

    #[test]
    fn drag_without_begin_is_ignored() {
        let mut engine = PlaybackEngine::default();
        let hud = Hud::attach(&mut engine, &HudSettings::default());

        hud.drag_progress(0.9);
        hud.end_progress_drag(&mut engine);
        assert_eq!(hud.snapshot().progress, 0.0);
    }
}
