//! Authoritative per-room game state machine.
//!
//! Every intent is validated completely before anything is mutated: a
//! rejected intent leaves the session exactly as it was.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::dealing::deal_round;
use crate::domain::predictions::validate_prediction;
use crate::domain::rules::{PlayerCount, RuleSet};
use crate::domain::scoring::score_round;
use crate::domain::snapshot::{snapshot_for, PlayerSnapshot};
use crate::domain::state::{
    highest_predictor, next_seat, require_turn, CompletedTrick, GameState, Phase, PlayerId,
    PreviousRound, RoundState, Seat,
};
use crate::domain::tricks::{legal_card_indices, resolve_trick};
use crate::domain::visibility::VisibilitySet;
use crate::domain::Suit;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

/// A seated player, captured when the game starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatInfo {
    pub player_id: PlayerId,
    pub display_name: String,
}

/// What an accepted intent changed beyond the obvious.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Winner of a trick completed by this action.
    pub trick_winner: Option<Seat>,
    /// Round number that this action finished.
    pub round_completed: Option<u8>,
    /// The game reached `GameEnd`.
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    seats: Vec<SeatInfo>,
    rules: RuleSet,
    state: GameState,
    rng: ChaCha8Rng,
}

impl GameSession {
    /// Start a game with an OS-seeded shuffle.
    pub fn start(seats: Vec<SeatInfo>, rules: RuleSet) -> Result<Self, DomainError> {
        Self::start_with_rng(seats, rules, ChaCha8Rng::from_rng(&mut rand::rng()))
    }

    /// Start a game whose deals and reveals are reproducible from `seed`.
    pub fn start_seeded(
        seats: Vec<SeatInfo>,
        rules: RuleSet,
        seed: u64,
    ) -> Result<Self, DomainError> {
        Self::start_with_rng(seats, rules, ChaCha8Rng::seed_from_u64(seed))
    }

    fn start_with_rng(
        seats: Vec<SeatInfo>,
        rules: RuleSet,
        rng: ChaCha8Rng,
    ) -> Result<Self, DomainError> {
        let players = PlayerCount::new(seats.len())?;
        let mut session = Self {
            seats,
            rules,
            state: GameState::new(players),
            rng,
        };
        session.deal_new_round();
        Ok(session)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn seats(&self) -> &[SeatInfo] {
        &self.seats
    }

    pub fn rules(&self) -> RuleSet {
        self.rules
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn is_over(&self) -> bool {
        self.state.phase == Phase::GameEnd
    }

    pub fn seat_of(&self, player: PlayerId) -> Option<Seat> {
        self.seats.iter().position(|s| s.player_id == player)
    }

    /// Redacted view for one seated player.
    pub fn snapshot_for(&self, player: PlayerId) -> Option<PlayerSnapshot> {
        let seat = self.seat_of(player)?;
        snapshot_for(&self.seats, self.rules, &self.state, seat)
    }

    /// One redacted view per seat, in seat order.
    pub fn snapshots(&self) -> Vec<(PlayerId, PlayerSnapshot)> {
        (0..self.seats.len())
            .filter_map(|seat| snapshot_for(&self.seats, self.rules, &self.state, seat))
            .map(|snap| (snap.player_id, snap))
            .collect()
    }

    /// Record a prediction for the player whose turn it is.
    pub fn submit_prediction(
        &mut self,
        player: PlayerId,
        value: i32,
    ) -> Result<ActionOutcome, DomainError> {
        let seat = self.require_actor(player, Phase::Prediction)?;
        let round = &self.state.round;
        let is_last = round.prediction_count() + 1 == self.state.players.get();
        let accepted = validate_prediction(
            value,
            self.state.hand_size,
            is_last,
            round.prediction_total(),
        )?;

        self.state.round.predictions[seat] = Some(accepted);
        if is_last {
            self.state.phase = Phase::Trump;
            self.state.turn = highest_predictor(&self.state.round.predictions);
        } else {
            self.state.turn = Some(next_seat(seat, self.state.players));
        }
        Ok(ActionOutcome::default())
    }

    /// Fix the round's trump and reveal every hand to its owner.
    pub fn set_trump(&mut self, player: PlayerId, suit: Suit) -> Result<ActionOutcome, DomainError> {
        self.require_actor(player, Phase::Trump)?;

        self.state.round.trump = Some(suit);
        self.state.phase = Phase::Play;
        for (vis, hand) in self.state.visibility.iter_mut().zip(&self.state.hands) {
            *vis = VisibilitySet::all(hand.len());
        }
        Ok(ActionOutcome::default())
    }

    /// Play the card at `card_index` of the acting player's hand.
    pub fn play_card(
        &mut self,
        player: PlayerId,
        card_index: i32,
    ) -> Result<ActionOutcome, DomainError> {
        let seat = self.require_actor(player, Phase::Play)?;
        let hand = &self.state.hands[seat];
        let index = usize::try_from(card_index)
            .ok()
            .filter(|&i| i < hand.len())
            .ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::InvalidCardIndex,
                    format!("Card index {card_index} is not in your hand"),
                )
            })?;
        let lead = self.state.round.trick_lead;
        if !legal_card_indices(hand, lead, self.rules.must_follow_suit).contains(&index) {
            return Err(DomainError::validation(
                ValidationKind::MustFollowSuit,
                "Must follow the leading suit",
            ));
        }

        let card = self.state.hands[seat].remove(index);
        self.state.visibility[seat].remove_index(index);
        let round = &mut self.state.round;
        if round.trick_plays.is_empty() {
            round.trick_lead = Some(card.suit);
        }
        round.trick_plays.push((seat, card));

        let mut outcome = ActionOutcome::default();
        if round.trick_plays.len() < self.state.players.get() {
            self.state.turn = Some(next_seat(seat, self.state.players));
            return Ok(outcome);
        }

        if let Some(winner) = resolve_trick(&round.trick_plays, round.trump) {
            round.sets_won[winner] += 1;
            round.last_trick = Some(CompletedTrick {
                plays: std::mem::take(&mut round.trick_plays),
                winner,
            });
            self.state.turn = Some(winner);
            outcome.trick_winner = Some(winner);
        }
        round.trick_plays.clear();
        round.trick_lead = None;

        if self.state.hands.iter().all(Vec::is_empty) {
            outcome.round_completed = Some(self.state.round_no);
            self.finish_round();
            outcome.game_over = self.is_over();
        }
        Ok(outcome)
    }

    /// Validate that `player` is seated, the phase is `expected`, and it is
    /// their turn. Returns their seat.
    fn require_actor(&self, player: PlayerId, expected: Phase) -> Result<Seat, DomainError> {
        if self.state.phase != expected {
            return Err(DomainError::validation(
                ValidationKind::InvalidPhase,
                format!(
                    "Action not allowed during {:?} phase",
                    self.state.phase
                ),
            ));
        }
        let seat = self.seat_of(player).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Player, "You are not seated in this game")
        })?;
        if require_turn(&self.state, "require_actor")? != seat {
            return Err(DomainError::validation(
                ValidationKind::OutOfTurn,
                "It is not your turn",
            ));
        }
        Ok(seat)
    }

    /// Score the round, then either end the game or deal the next round.
    fn finish_round(&mut self) {
        let round = &self.state.round;
        let points: Vec<u32> = round
            .predictions
            .iter()
            .zip(&round.sets_won)
            .map(|(predicted, &won)| predicted.map_or(0, |p| score_round(p, won)))
            .collect();
        for (total, p) in self.state.scores_total.iter_mut().zip(&points) {
            *total += p;
        }
        self.state.previous_round = Some(PreviousRound {
            round_no: self.state.round_no,
            predictions: round.predictions.clone(),
            sets_won: round.sets_won.clone(),
            points,
        });

        self.state.round_no += 1;
        if self.state.round_no > self.state.players.total_rounds() {
            self.state.phase = Phase::GameEnd;
            self.state.turn = None;
            let last_trick = self.state.round.last_trick.take();
            self.state.round = RoundState::empty(self.state.players);
            self.state.round.last_trick = last_trick;
            return;
        }
        self.deal_new_round();
    }

    /// Fresh deck, shuffle, deal, and initial reveal; prediction starts at seat 0.
    fn deal_new_round(&mut self) {
        let players = self.state.players;
        let hands = deal_round(players, &mut self.rng);
        self.state.visibility = hands
            .iter()
            .map(|h| VisibilitySet::initial(h.len(), &mut self.rng))
            .collect();
        self.state.hands = hands;
        self.state.hand_size = players.hand_size();
        self.state.round = RoundState::empty(players);
        self.state.phase = Phase::Prediction;
        self.state.turn = Some(0);
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
