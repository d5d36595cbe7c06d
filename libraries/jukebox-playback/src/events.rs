//! Playback Events
//!
//! Synchronous notification channels from the engine to its listeners
//! (typically a UI binding). Events are emitted at key points:
//! - Setting toggles (loop, shuffle, volume)
//! - State changes (play/pause/stop)
//! - Track changes (including the placeholder track on stop)
//! - Playlist loads and edits
//! - Progress updates (periodic, while playing)
//! - Playlist boundaries reached without wraparound

use crate::types::PlaybackState;
use jukebox_core::Track;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Events emitted by the playback engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Single-track loop toggled
    LoopChanged(bool),

    /// Shuffle toggled
    ShuffleChanged(bool),

    /// Volume set (already clamped to [0, 1])
    VolumeChanged(f32),

    /// Playback state changed; never emitted for a self-transition
    StateChanged(PlaybackState),

    /// Now-playing track changed
    ///
    /// Carries the configured placeholder track when playback stops.
    TrackChanged(Track),

    /// A playlist replaced the working track list
    PlaylistLoaded {
        /// Title of the loaded playlist
        title: String,
        /// Number of tracks loaded
        track_count: usize,
        /// Shuffle flag adopted from the playlist
        shuffle: bool,
        /// Single-track loop flag adopted from the playlist
        looping: bool,
    },

    /// Working track list changed
    PlaylistUpdated {
        /// New track count
        track_count: usize,
    },

    /// Normalized position in the current track, 0.0 to 1.0
    Progress(f32),

    /// Previous was requested at the first position without wraparound
    ReachedPlaylistStart,

    /// Next was requested at the last position without wraparound
    ReachedPlaylistEnd,
}

/// Notification channel, one per `PlayerEvent` variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    LoopChanged,
    ShuffleChanged,
    VolumeChanged,
    StateChanged,
    TrackChanged,
    PlaylistLoaded,
    PlaylistUpdated,
    Progress,
    ReachedPlaylistStart,
    ReachedPlaylistEnd,
}

impl EventKind {
    /// Every channel, in declaration order
    pub const ALL: [EventKind; 10] = [
        EventKind::LoopChanged,
        EventKind::ShuffleChanged,
        EventKind::VolumeChanged,
        EventKind::StateChanged,
        EventKind::TrackChanged,
        EventKind::PlaylistLoaded,
        EventKind::PlaylistUpdated,
        EventKind::Progress,
        EventKind::ReachedPlaylistStart,
        EventKind::ReachedPlaylistEnd,
    ];
}

impl PlayerEvent {
    /// Channel this event is delivered on
    pub fn kind(&self) -> EventKind {
        match self {
            PlayerEvent::LoopChanged(_) => EventKind::LoopChanged,
            PlayerEvent::ShuffleChanged(_) => EventKind::ShuffleChanged,
            PlayerEvent::VolumeChanged(_) => EventKind::VolumeChanged,
            PlayerEvent::StateChanged(_) => EventKind::StateChanged,
            PlayerEvent::TrackChanged(_) => EventKind::TrackChanged,
            PlayerEvent::PlaylistLoaded { .. } => EventKind::PlaylistLoaded,
            PlayerEvent::PlaylistUpdated { .. } => EventKind::PlaylistUpdated,
            PlayerEvent::Progress(_) => EventKind::Progress,
            PlayerEvent::ReachedPlaylistStart => EventKind::ReachedPlaylistStart,
            PlayerEvent::ReachedPlaylistEnd => EventKind::ReachedPlaylistEnd,
        }
    }
}

/// Callback invoked for each delivered event
pub type Listener = Box<dyn FnMut(&PlayerEvent) + Send>;

/// Handle to a registered listener
///
/// Clones share the same registration. Cancelling through any clone stops
/// delivery immediately, even while the bus is in the middle of a dispatch.
#[derive(Debug, Clone)]
pub struct Subscription {
    id: u64,
    active: Arc<AtomicBool>,
}

impl Subscription {
    /// Stop delivering events to this listener
    pub fn cancel(&self) {
        self.active.store(false, Ordering::Release);
    }

    /// False once cancelled
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Registration id, unique per bus
    pub fn id(&self) -> u64 {
        self.id
    }
}

struct Entry {
    id: u64,
    filter: Option<EventKind>,
    active: Arc<AtomicBool>,
    listener: Listener,
}

/// Multicast event bus keyed by `EventKind`
///
/// Delivery is synchronous: `emit` returns after every matching listener ran,
/// in subscription order.
#[derive(Default)]
pub struct EventBus {
    entries: Vec<Entry>,
    next_id: u64,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl EventBus {
    /// Create an empty bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen on a single channel
    pub fn subscribe<F>(&mut self, kind: EventKind, listener: F) -> Subscription
    where
        F: FnMut(&PlayerEvent) + Send + 'static,
    {
        self.register(Some(kind), Box::new(listener))
    }

    /// Listen on every channel
    pub fn subscribe_all<F>(&mut self, listener: F) -> Subscription
    where
        F: FnMut(&PlayerEvent) + Send + 'static,
    {
        self.register(None, Box::new(listener))
    }

    /// Remove a listener
    ///
    /// Returns false if it was already gone.
    pub fn unsubscribe(&mut self, subscription: &Subscription) -> bool {
        subscription.cancel();
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != subscription.id);
        self.entries.len() != before
    }

    /// Deliver an event to every matching listener
    pub fn emit(&mut self, event: &PlayerEvent) {
        tracing::debug!(?event, "emit");

        let kind = event.kind();
        for entry in &mut self.entries {
            // Re-checked per entry: an earlier listener may have cancelled this one
            if !entry.active.load(Ordering::Acquire) {
                continue;
            }
            if entry.filter.is_some_and(|filter| filter != kind) {
                continue;
            }
            (entry.listener)(event);
        }

        self.entries
            .retain(|entry| entry.active.load(Ordering::Acquire));
    }

    /// Number of live listeners
    pub fn listener_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.active.load(Ordering::Acquire))
            .count()
    }

    fn register(&mut self, filter: Option<EventKind>, listener: Listener) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;

        let active = Arc::new(AtomicBool::new(true));
        self.entries.push(Entry {
            id,
            filter,
            active: Arc::clone(&active),
            listener,
        });

        Subscription { id, active }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recorder() -> (Arc<Mutex<Vec<PlayerEvent>>>, impl FnMut(&PlayerEvent) + Send) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        (log, move |event: &PlayerEvent| {
            sink.lock().unwrap().push(event.clone());
        })
    }

    #[test]
    fn kind_matches_variant() {
        assert_eq!(PlayerEvent::LoopChanged(true).kind(), EventKind::LoopChanged);
        assert_eq!(PlayerEvent::Progress(0.5).kind(), EventKind::Progress);
        assert_eq!(
            PlayerEvent::PlaylistUpdated { track_count: 3 }.kind(),
            EventKind::PlaylistUpdated
        );
        assert_eq!(
            PlayerEvent::ReachedPlaylistEnd.kind(),
            EventKind::ReachedPlaylistEnd
        );
    }

    #[test]
    fn channel_filtering() {
        let mut bus = EventBus::new();
        let (volume_log, volume_listener) = recorder();
        let (all_log, all_listener) = recorder();

        bus.subscribe(EventKind::VolumeChanged, volume_listener);
        bus.subscribe_all(all_listener);

        bus.emit(&PlayerEvent::VolumeChanged(0.5));
        bus.emit(&PlayerEvent::LoopChanged(false));

        assert_eq!(
            *volume_log.lock().unwrap(),
            vec![PlayerEvent::VolumeChanged(0.5)]
        );
        assert_eq!(all_log.lock().unwrap().len(), 2);
    }

    #[test]
    fn delivery_in_subscription_order() {
        let mut bus = EventBus::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for name in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            bus.subscribe_all(move |_| order.lock().unwrap().push(name));
        }

        bus.emit(&PlayerEvent::ReachedPlaylistStart);
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let mut bus = EventBus::new();
        let (log, listener) = recorder();
        let subscription = bus.subscribe_all(listener);

        bus.emit(&PlayerEvent::Progress(0.1));
        assert!(bus.unsubscribe(&subscription));
        assert!(!bus.unsubscribe(&subscription));
        bus.emit(&PlayerEvent::Progress(0.2));

        assert_eq!(log.lock().unwrap().len(), 1);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn listener_can_cancel_itself_during_dispatch() {
        let mut bus = EventBus::new();
        let count = Arc::new(Mutex::new(0));
        let handle: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let subscription = {
            let count = Arc::clone(&count);
            let handle = Arc::clone(&handle);
            bus.subscribe_all(move |_| {
                *count.lock().unwrap() += 1;
                if let Some(own) = handle.lock().unwrap().as_ref() {
                    own.cancel();
                }
            })
        };
        *handle.lock().unwrap() = Some(subscription);

        bus.emit(&PlayerEvent::ReachedPlaylistEnd);
        bus.emit(&PlayerEvent::ReachedPlaylistEnd);

        assert_eq!(*count.lock().unwrap(), 1);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn listener_cancelled_mid_dispatch_is_skipped() {
        let mut bus = EventBus::new();
        let (log, listener) = recorder();

        // Registered second, cancelled by the first listener before its turn
        let victim: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        {
            let victim = Arc::clone(&victim);
            bus.subscribe_all(move |_| {
                if let Some(sub) = victim.lock().unwrap().as_ref() {
                    sub.cancel();
                }
            });
        }
        *victim.lock().unwrap() = Some(bus.subscribe_all(listener));

        bus.emit(&PlayerEvent::ShuffleChanged(true));
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(bus.listener_count(), 1);
    }
}
