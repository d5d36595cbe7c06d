//! Play order generation
//!
//! Fisher-Yates shuffle plus the index permutation the engine walks through.

use rand::Rng;

/// Shuffle a slice in place (Fisher-Yates)
///
/// For i from N-1 down to 1, draws j uniformly from [0, i] and swaps i and j.
/// Deterministic for a seeded `rng`.
pub fn shuffle_in_place<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// A permutation of track indices `[0, N)`
///
/// Position `p` in the order holds the index of the track played p-th.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayOrder {
    indices: Vec<usize>,
}

impl PlayOrder {
    /// Natural order `0, 1, ..., n-1`
    pub fn identity(len: usize) -> Self {
        Self {
            indices: (0..len).collect(),
        }
    }

    /// Uniformly random order of `n` tracks
    pub fn shuffled<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        let mut order = Self::identity(len);
        shuffle_in_place(&mut order.indices, rng);
        order
    }

    /// Number of positions
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True if there is nothing to play
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Track index at a position
    pub fn get(&self, position: usize) -> Option<usize> {
        self.indices.get(position).copied()
    }

    /// Position at which a track index is played
    pub fn position_of(&self, track_index: usize) -> Option<usize> {
        self.indices.iter().position(|&i| i == track_index)
    }

    /// Swap the entry at `position` with the head of the order
    pub fn move_to_front(&mut self, position: usize) {
        if position < self.indices.len() {
            self.indices.swap(0, position);
        }
    }

    /// The raw permutation
    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }
}
