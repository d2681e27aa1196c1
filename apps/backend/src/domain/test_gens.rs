// Proptest generators for domain types.

use proptest::prelude::*;

use crate::domain::rules::{PlayerCount, MAX_PLAYERS, MIN_PLAYERS};
use crate::domain::{Card, Rank, Suit};

pub fn suit() -> impl Strategy<Value = Suit> {
    prop::sample::select(Suit::ALL.to_vec())
}

pub fn rank() -> impl Strategy<Value = Rank> {
    prop::sample::select(Rank::ALL.to_vec())
}

pub fn card() -> impl Strategy<Value = Card> {
    (suit(), rank()).prop_map(|(suit, rank)| Card { suit, rank })
}

/// A supported table size.
pub fn player_count() -> impl Strategy<Value = PlayerCount> {
    (MIN_PLAYERS..=MAX_PLAYERS).prop_map(|n| PlayerCount::new(n).unwrap())
}

/// `n` distinct cards drawn from a full deck.
pub fn unique_cards(n: usize) -> impl Strategy<Value = Vec<Card>> {
    let deck: Vec<Card> = Suit::ALL
        .iter()
        .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card { suit, rank }))
        .collect();
    Just(deck)
        .prop_shuffle()
        .prop_map(move |d| d.into_iter().take(n).collect())
}

/// A trick of `len` distinct cards, with seats assigned in play order.
pub fn trick(len: usize) -> impl Strategy<Value = Vec<(usize, Card)>> {
    unique_cards(len).prop_map(|cards| cards.into_iter().enumerate().collect())
}
