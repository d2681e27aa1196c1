//! Per-player revealed-card tracking.
//!
//! A `VisibilitySet` holds indices into its owner's own hand. It is private
//! to that player and must stay within the hand's bounds as cards leave it.

use std::collections::BTreeSet;

use rand::Rng;

use crate::domain::rules::INITIAL_REVEAL;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilitySet(BTreeSet<usize>);

impl VisibilitySet {
    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        Self(indices.into_iter().collect())
    }

    /// Every index of a hand of `hand_len` cards.
    pub fn all(hand_len: usize) -> Self {
        Self::from_indices(0..hand_len)
    }

    /// `INITIAL_REVEAL` distinct random indices, or all of them for a short hand.
    pub fn initial<R: Rng>(hand_len: usize, rng: &mut R) -> Self {
        if hand_len <= INITIAL_REVEAL {
            return Self::all(hand_len);
        }
        Self::from_indices(rand::seq::index::sample(rng, hand_len, INITIAL_REVEAL))
    }

    /// Account for the card at `removed` leaving the hand: drop it and shift
    /// every greater index down by one.
    pub fn remove_index(&mut self, removed: usize) {
        self.0 = self
            .0
            .iter()
            .filter(|&&i| i != removed)
            .map(|&i| if i > removed { i - 1 } else { i })
            .collect();
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every index is valid for a hand of `hand_len` cards.
    pub fn fits(&self, hand_len: usize) -> bool {
        self.0.last().map_or(true, |&max| max < hand_len)
    }
}
