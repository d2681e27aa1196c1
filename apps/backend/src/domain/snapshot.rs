//! Per-player redacted views of a game.
//!
//! A snapshot is built for exactly one seat. Card identities it carries are
//! limited to that seat's revealed cards plus the public table (current and
//! last trick). Every other hand is reduced to a count.

use serde::{Deserialize, Serialize};

use crate::domain::predictions::legal_predictions;
use crate::domain::rules::RuleSet;
use crate::domain::session::SeatInfo;
use crate::domain::state::{CompletedTrick, GameState, Phase, PlayerId, Seat};
use crate::domain::tricks::legal_card_indices;
use crate::domain::{Card, Suit};

/// One position of the viewer's own hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum HandSlot {
    Visible { card: Card },
    Hidden,
}

/// Public info about a single seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatPublic {
    pub seat: Seat,
    pub player_id: PlayerId,
    pub display_name: String,
    pub hand_count: usize,
    pub prediction: Option<u8>,
    pub sets_won: u8,
    pub score: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedCard {
    pub seat: Seat,
    pub player_id: PlayerId,
    pub card: Card,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickResult {
    pub plays: Vec<PlayedCard>,
    pub winner: Seat,
}

/// Final tallies of the most recently finished round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round_no: u8,
    pub predictions: Vec<Option<u8>>,
    pub sets_won: Vec<u8>,
    pub points: Vec<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// The viewer's seat.
    pub player_index: Seat,
    pub player_id: PlayerId,
    pub round_no: u8,
    pub total_rounds: u8,
    pub phase: Phase,
    pub hand_size: u8,
    pub current_player_index: Option<Seat>,
    pub trump_suit: Option<Suit>,
    pub must_follow_suit: bool,
    pub hand: Vec<HandSlot>,
    pub players: Vec<SeatPublic>,
    pub prediction_total: u32,
    pub current_trick: Vec<PlayedCard>,
    pub last_trick: Option<TrickResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_round: Option<RoundResult>,
    /// Acceptable predictions; present only on the viewer's prediction turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_predictions: Option<Vec<u8>>,
    /// Playable hand indices; present only on the viewer's play turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playable_indices: Option<Vec<usize>>,
}

/// Build the view of `state` as seen from `viewer`.
///
/// Returns `None` when `viewer` is not a seat of this game.
pub fn snapshot_for(
    seats: &[SeatInfo],
    rules: RuleSet,
    state: &GameState,
    viewer: Seat,
) -> Option<PlayerSnapshot> {
    let viewer_info = seats.get(viewer)?;
    let round = &state.round;
    let own_hand = state.hands.get(viewer).map(Vec::as_slice).unwrap_or_default();
    let hand = own_hand
        .iter()
        .enumerate()
        .map(|(i, &card)| {
            let revealed = state.visibility.get(viewer).is_some_and(|v| v.contains(i));
            if revealed {
                HandSlot::Visible { card }
            } else {
                HandSlot::Hidden
            }
        })
        .collect();

    let players = seats
        .iter()
        .enumerate()
        .map(|(seat, info)| SeatPublic {
            seat,
            player_id: info.player_id,
            display_name: info.display_name.clone(),
            hand_count: state.hands.get(seat).map_or(0, Vec::len),
            prediction: round.predictions.get(seat).copied().flatten(),
            sets_won: round.sets_won.get(seat).copied().unwrap_or(0),
            score: state.scores_total.get(seat).copied().unwrap_or(0),
        })
        .collect();

    let my_turn = state.turn == Some(viewer);
    let legal = (my_turn && state.phase == Phase::Prediction).then(|| {
        let is_last = round.prediction_count() + 1 == state.players.get();
        legal_predictions(state.hand_size, is_last, round.prediction_total())
    });
    let playable = (my_turn && state.phase == Phase::Play)
        .then(|| legal_card_indices(own_hand, round.trick_lead, rules.must_follow_suit));

    Some(PlayerSnapshot {
        player_index: viewer,
        player_id: viewer_info.player_id,
        round_no: state.round_no.min(state.players.total_rounds()),
        total_rounds: state.players.total_rounds(),
        phase: state.phase,
        hand_size: state.hand_size,
        current_player_index: state.turn,
        trump_suit: round.trump,
        must_follow_suit: rules.must_follow_suit,
        hand,
        players,
        prediction_total: round.prediction_total(),
        current_trick: played_cards(seats, &round.trick_plays),
        last_trick: round.last_trick.as_ref().map(|t| trick_result(seats, t)),
        previous_round: state.previous_round.as_ref().map(|prev| RoundResult {
            round_no: prev.round_no,
            predictions: prev.predictions.clone(),
            sets_won: prev.sets_won.clone(),
            points: prev.points.clone(),
        }),
        legal_predictions: legal,
        playable_indices: playable,
    })
}

fn played_cards(seats: &[SeatInfo], plays: &[(Seat, Card)]) -> Vec<PlayedCard> {
    plays
        .iter()
        .filter_map(|&(seat, card)| {
            seats.get(seat).map(|info| PlayedCard {
                seat,
                player_id: info.player_id,
                card,
            })
        })
        .collect()
}

fn trick_result(seats: &[SeatInfo], trick: &CompletedTrick) -> TrickResult {
    TrickResult {
        plays: played_cards(seats, &trick.plays),
        winner: trick.winner,
    }
}
