//! Property-based tests for play order and the playback engine
//!
//! Uses proptest to verify invariants across many random inputs.

use jukebox_core::{AudioHandle, Playlist, Track};
use jukebox_playback::{EngineConfig, PlayOrder, PlaybackEngine, PlaybackState};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ===== Helpers =====

fn playlist_of(len: usize, shuffle: bool) -> Playlist {
    let mut playlist = Playlist::new("Generated").with_tracks(
        (0..len)
            .map(|i| Track::new(format!("Song {i}"), "Artist", AudioHandle::new(format!("{i}.ogg"))))
            .collect(),
    );
    playlist.shuffle_by_default = shuffle;
    playlist
}

fn is_permutation(order: &[usize], len: usize) -> bool {
    let mut sorted = order.to_vec();
    sorted.sort_unstable();
    sorted == (0..len).collect::<Vec<_>>()
}

// ===== Property Tests =====

proptest! {
    /// Property: any shuffled order is a permutation of [0, N)
    #[test]
    fn shuffled_order_is_permutation(len in 0usize..200, seed in any::<u64>()) {
        let order = PlayOrder::shuffled(len, &mut StdRng::seed_from_u64(seed));
        prop_assert_eq!(order.len(), len);
        prop_assert!(is_permutation(order.as_slice(), len));
    }

    /// Property: loaded play order matches the playlist, identity when unshuffled
    #[test]
    fn engine_order_tracks_playlist(len in 0usize..60, shuffle in any::<bool>(), seed in any::<u64>()) {
        let config = EngineConfig { shuffle_seed: Some(seed), ..EngineConfig::default() };
        let mut engine = PlaybackEngine::with_null_output(config);
        engine.load(&playlist_of(len, shuffle));

        let order = engine.play_order().as_slice().to_vec();
        prop_assert_eq!(order.len(), len);
        prop_assert!(is_permutation(&order, len));
        if !shuffle {
            prop_assert_eq!(order, (0..len).collect::<Vec<_>>());
        }
    }

    /// Property: set_volume always lands in [0, 1]
    #[test]
    fn volume_always_clamped(value in -10.0f32..10.0) {
        let mut engine = PlaybackEngine::default();
        engine.set_volume(value);
        prop_assert!((0.0..=1.0).contains(&engine.volume()));
    }

    /// Property: arbitrary operation sequences keep the engine consistent
    #[test]
    fn operations_preserve_invariants(
        len in 0usize..20,
        operations in prop::collection::vec(0u8..11, 1..60),
        seed in any::<u64>(),
    ) {
        let config = EngineConfig { shuffle_seed: Some(seed), ..EngineConfig::default() };
        let mut engine = PlaybackEngine::with_null_output(config);
        engine.load(&playlist_of(len, false));

        for op in operations {
            match op {
                0 => engine.play(),
                1 => engine.pause(),
                2 => engine.stop(),
                3 => engine.next_track(),
                4 => engine.previous_track(),
                5 => engine.toggle_shuffle(),
                6 => engine.toggle_loop(),
                7 => engine.toggle_play_pause(),
                8 => engine.add_track(Track::new("Extra", "Artist", AudioHandle::new("extra.ogg"))),
                9 => engine.set_loop_playlist(!engine.loop_playlist()),
                _ => engine.increase_volume(),
            }

            let track_count = engine.tracks().len();
            let order = engine.play_order().as_slice().to_vec();
            prop_assert_eq!(order.len(), track_count);
            prop_assert!(is_permutation(&order, track_count));
            if !engine.is_shuffled() {
                prop_assert_eq!(order, (0..track_count).collect::<Vec<_>>());
            }
            if track_count > 0 {
                prop_assert!(engine.current_index() < track_count);
            } else {
                prop_assert_eq!(engine.state(), PlaybackState::Stopped);
                prop_assert!(engine.current_track().is_placeholder());
            }
        }
    }
}
