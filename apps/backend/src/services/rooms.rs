//! Intent dispatch: turns client intents into registry, room, and session
//! calls, then fans the results out through the broadcaster.
//!
//! Failures are returned to the caller and never broadcast; the transport
//! replies to the acting client alone. Broadcasts for a room are issued while
//! that room's lock is held so every member sees them in acceptance order.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::rules::RuleSet;
use crate::domain::session::ActionOutcome;
use crate::domain::state::PlayerId;
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::rooms::{LeaveOutcome, Room, RoomRegistry};
use crate::services::broadcast::Broadcaster;
use crate::utils::room_code::RoomCode;
use crate::ws::protocol::{GameAction, ServerMsg};

#[derive(Clone)]
pub struct RoomService {
    registry: Arc<RoomRegistry>,
    broadcaster: Arc<dyn Broadcaster>,
}

impl RoomService {
    pub fn new(registry: Arc<RoomRegistry>, broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self {
            registry,
            broadcaster,
        }
    }

    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    /// Create a room. `bind` runs with the new player id before any message
    /// is sent, so the caller can route deliveries to its connection.
    pub fn create_room(
        &self,
        player_name: &str,
        bind: impl FnOnce(PlayerId),
    ) -> Result<(RoomCode, PlayerId), AppError> {
        let (code, player_id, shared) = self.registry.create_room(player_name)?;
        bind(player_id);

        let room = shared.lock();
        self.broadcaster.send_to(
            player_id,
            ServerMsg::RoomCreated {
                code: code.clone(),
                player_id,
            },
        );
        self.broadcast_players(&room);
        Ok((code, player_id))
    }

    /// Join an existing room; see `create_room` for `bind`.
    pub fn join_room(
        &self,
        raw_code: &str,
        player_name: &str,
        bind: impl FnOnce(PlayerId),
    ) -> Result<(RoomCode, PlayerId), AppError> {
        let code = RoomCode::normalize(raw_code);
        let (player_id, shared) = self.registry.join_room(&code, player_name)?;
        bind(player_id);

        let room = shared.lock();
        self.broadcaster.send_to(
            player_id,
            ServerMsg::RoomJoined {
                code: code.clone(),
                player_id,
            },
        );
        self.broadcast_players(&room);
        Ok((code, player_id))
    }

    /// Host-only: start (or restart) the room's game and send every seat its
    /// opening view.
    pub fn start_game(
        &self,
        raw_code: &str,
        player: PlayerId,
        rules: RuleSet,
    ) -> Result<(), AppError> {
        let code = RoomCode::normalize(raw_code);
        let shared = self.registry.require(&code)?;
        let mut room = shared.lock();
        let snapshots = room.start_game(player, rules)?.snapshots();
        info!(
            room_code = %code,
            player_id = %player,
            players = snapshots.len(),
            must_follow_suit = rules.must_follow_suit,
            "Game started"
        );

        for (seat_player, snapshot) in snapshots {
            self.broadcaster.send_to(
                seat_player,
                ServerMsg::GameStarted {
                    code: code.clone(),
                    snapshot,
                },
            );
        }
        Ok(())
    }

    /// Apply an in-game intent. On success every member still in the room
    /// receives their own updated view; on failure nobody receives anything.
    pub fn game_action(
        &self,
        raw_code: &str,
        player: PlayerId,
        action: GameAction,
    ) -> Result<ActionOutcome, AppError> {
        let code = RoomCode::normalize(raw_code);
        let shared = self.registry.require(&code)?;
        let mut room = shared.lock();
        if !room.is_member(player) {
            return Err(not_in_room().into());
        }
        let members = room.member_ids();
        let session = room.session_mut().ok_or_else(|| {
            DomainError::validation(ValidationKind::InvalidPhase, "No game has been started")
        })?;

        let result = match &action {
            GameAction::MakePrediction { prediction } => {
                session.submit_prediction(player, *prediction)
            }
            GameAction::SetTrump { trump_suit } => session.set_trump(player, *trump_suit),
            GameAction::PlayCard { card_index } => session.play_card(player, *card_index),
        };
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                debug!(room_code = %code, player_id = %player, ?action, error = %err, "Action rejected");
                return Err(err.into());
            }
        };

        debug!(
            room_code = %code,
            player_id = %player,
            ?action,
            phase = ?session.phase(),
            "Action applied"
        );
        if let Some(seat) = outcome.trick_winner {
            debug!(room_code = %code, seat, "Trick resolved");
        }
        if let Some(round_no) = outcome.round_completed {
            info!(room_code = %code, round_no, "Round completed");
        }
        if outcome.game_over {
            info!(room_code = %code, scores = ?session.state().scores_total, "Game over");
        }

        for (seat_player, snapshot) in session.snapshots() {
            if !members.contains(&seat_player) {
                continue;
            }
            self.broadcaster.send_to(
                seat_player,
                ServerMsg::GameStateUpdate {
                    code: code.clone(),
                    snapshot,
                },
            );
        }
        Ok(outcome)
    }

    /// Remove a player from a room, notifying whoever remains.
    pub fn leave(&self, raw_code: &str, player: PlayerId) -> Result<LeaveOutcome, AppError> {
        let code = RoomCode::normalize(raw_code);
        let outcome = self.registry.leave(&code, player)?;
        if outcome.room_closed {
            return Ok(outcome);
        }
        if let Some(new_host) = outcome.new_host {
            info!(room_code = %code, player_id = %new_host, "Host reassigned");
        }

        if let Some(shared) = self.registry.get(&code) {
            let room = shared.lock();
            warn_if_turn_orphaned(&room, player);
            self.broadcast_players(&room);
        }
        Ok(outcome)
    }

    fn broadcast_players(&self, room: &Room) {
        let msg = ServerMsg::PlayersUpdate {
            code: room.code().clone(),
            players: room.players().to_vec(),
        };
        self.broadcaster.send_to_all(&room.member_ids(), &msg);
    }
}

/// The departed player keeps their seat; if it is their turn the game waits.
fn warn_if_turn_orphaned(room: &Room, departed: PlayerId) {
    let Some(session) = room.session().filter(|s| !s.is_over()) else {
        return;
    };
    let turn_holder = session
        .state()
        .turn
        .and_then(|seat| session.seats().get(seat))
        .map(|s| s.player_id);
    if turn_holder == Some(departed) {
        warn!(
            room_code = %room.code(),
            player_id = %departed,
            "Turn holder left mid-game; room is stalled"
        );
    }
}

fn not_in_room() -> DomainError {
    DomainError::not_found(NotFoundKind::Player, "You are not in this room")
}
