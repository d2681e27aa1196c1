//! Deck construction, shuffling, and dealing.

use rand::Rng;

use crate::domain::rules::PlayerCount;
use crate::domain::{Card, Rank, Suit};

/// Generate a full 52-card deck in standard order.
fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(52);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card { suit, rank });
        }
    }
    deck
}

/// Build the deck for a table of `players`.
///
/// 4 players keep all 52 cards; 5 players drop the two red 2s (50 cards);
/// 6 players drop all four 2s (48 cards). The result always divides evenly.
pub fn build_deck(players: PlayerCount) -> Vec<Card> {
    let removed: &[Suit] = match players.get() {
        5 => &[Suit::Hearts, Suit::Diamonds],
        6 => &Suit::ALL,
        _ => &[],
    };
    full_deck()
        .into_iter()
        .filter(|c| !(c.rank == Rank::Two && removed.contains(&c.suit)))
        .collect()
}

/// Fisher-Yates shuffle: for i from the last index down to 1, swap with a
/// uniformly chosen index in `[0, i]`.
pub fn shuffle<R: Rng>(deck: &mut [Card], rng: &mut R) {
    for i in (1..deck.len()).rev() {
        let j = rng.random_range(0..=i);
        deck.swap(i, j);
    }
}

/// Partition `deck` into contiguous equal blocks, one per seat in order.
///
/// A remainder (never produced by `build_deck`) is left undealt.
pub fn deal(deck: &[Card], players: PlayerCount) -> Vec<Vec<Card>> {
    let per_player = deck.len() / players.get();
    deck.chunks_exact(per_player.max(1))
        .take(players.get())
        .map(<[Card]>::to_vec)
        .collect()
}

/// Build, shuffle, and deal a fresh round.
pub fn deal_round<R: Rng>(players: PlayerCount, rng: &mut R) -> Vec<Vec<Card>> {
    let mut deck = build_deck(players);
    shuffle(&mut deck, rng);
    deal(&deck, players)
}
