use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::rules::PlayerCount;
use crate::domain::visibility::VisibilitySet;
use crate::domain::{Card, Suit};
use crate::errors::domain::DomainError;

/// Seat index within a game; also the turn-order position.
pub type Seat = usize;

/// Stable player identity, assigned when a player creates or joins a room.
///
/// Independent of any connection handle so a transport can rebind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(Uuid);

impl PlayerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Overall game progression phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Players predict their trick count in seat order.
    Prediction,
    /// Highest predictor selects the trump suit.
    Trump,
    /// Playing tricks within the round.
    Play,
    /// All rounds complete; terminal.
    GameEnd,
}

/// A resolved trick, kept for display after the table clears.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedTrick {
    pub plays: Vec<(Seat, Card)>,
    pub winner: Seat,
}

/// Summary of the most recently finished round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviousRound {
    pub round_no: u8,
    pub predictions: Vec<Option<u8>>,
    pub sets_won: Vec<u8>,
    pub points: Vec<u32>,
}

/// Per-round state relevant during prediction, trump, and trick play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    /// Ordered plays for the current trick (who, card).
    pub trick_plays: Vec<(Seat, Card)>,
    /// Suit of the first card in the current trick.
    pub trick_lead: Option<Suit>,
    /// Tricks won per seat this round.
    pub sets_won: Vec<u8>,
    /// Trump for this round, once chosen.
    pub trump: Option<Suit>,
    /// Predictions per seat.
    pub predictions: Vec<Option<u8>>,
    /// Last resolved trick of this round.
    pub last_trick: Option<CompletedTrick>,
}

impl RoundState {
    pub fn empty(players: PlayerCount) -> Self {
        Self {
            trick_plays: Vec::with_capacity(players.get()),
            trick_lead: None,
            sets_won: vec![0; players.get()],
            trump: None,
            predictions: vec![None; players.get()],
            last_trick: None,
        }
    }

    pub fn prediction_count(&self) -> usize {
        self.predictions.iter().flatten().count()
    }

    pub fn prediction_total(&self) -> u32 {
        self.predictions.iter().flatten().map(|&p| u32::from(p)).sum()
    }
}

/// Entire game container, sufficient for pure domain operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub phase: Phase,
    /// Round number, 1-based; exceeds `players` once the game has ended.
    pub round_no: u8,
    pub players: PlayerCount,
    /// Cards dealt per player this round.
    pub hand_size: u8,
    pub hands: Vec<Vec<Card>>,
    /// Revealed indices of each seat's own hand.
    pub visibility: Vec<VisibilitySet>,
    /// Seat expected to act; `None` once the game has ended.
    pub turn: Option<Seat>,
    /// Cumulative scores across rounds.
    pub scores_total: Vec<u32>,
    pub round: RoundState,
    pub previous_round: Option<PreviousRound>,
}

impl GameState {
    /// A state with empty hands, ready for the first deal.
    pub fn new(players: PlayerCount) -> Self {
        Self {
            phase: Phase::Prediction,
            round_no: 1,
            players,
            hand_size: players.hand_size(),
            hands: vec![Vec::new(); players.get()],
            visibility: vec![VisibilitySet::default(); players.get()],
            turn: Some(0),
            scores_total: vec![0; players.get()],
            round: RoundState::empty(players),
            previous_round: None,
        }
    }
}

/// Returns the next seat in turn order, wrapping at `players`.
#[inline]
pub fn next_seat(seat: Seat, players: PlayerCount) -> Seat {
    (seat + 1) % players.get()
}

/// Seat holding the highest prediction; earliest seat wins ties.
pub fn highest_predictor(predictions: &[Option<u8>]) -> Option<Seat> {
    predictions
        .iter()
        .enumerate()
        .filter_map(|(seat, p)| p.map(|p| (seat, p)))
        .fold(None, |best: Option<(Seat, u8)>, (seat, p)| match best {
            Some((_, best_p)) if best_p >= p => best,
            _ => Some((seat, p)),
        })
        .map(|(seat, _)| seat)
}

pub fn require_turn(state: &GameState, ctx: &'static str) -> Result<Seat, DomainError> {
    state.turn.ok_or_else(|| {
        DomainError::validation_other(format!("Invariant violated: turn must be set ({ctx})"))
    })
}
