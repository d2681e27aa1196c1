use serde::{Deserialize, Serialize};

use crate::domain::rules::RuleSet;
use crate::domain::session::{GameSession, SeatInfo};
use crate::domain::state::PlayerId;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::utils::room_code::RoomCode;

/// Maximum number of members in a room.
pub const ROOM_CAPACITY: usize = 6;

/// Maximum display name length, in characters, after trimming.
pub const MAX_NAME_LEN: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    pub is_host: bool,
}

/// Trim a display name and check its length.
pub fn validate_name(raw: &str) -> Result<String, DomainError> {
    let name = raw.trim();
    let len = name.chars().count();
    if len == 0 || len > MAX_NAME_LEN {
        return Err(DomainError::validation(
            ValidationKind::InvalidName,
            format!("Name must be between 1 and {MAX_NAME_LEN} characters"),
        ));
    }
    Ok(name.to_string())
}

/// Connected players plus at most one game.
///
/// Member order defines seat order when a game starts. Exactly one member is
/// host while the room is non-empty.
#[derive(Debug)]
pub struct Room {
    code: RoomCode,
    players: Vec<Player>,
    session: Option<GameSession>,
    closed: bool,
}

impl Room {
    /// Create a room whose first member is its host.
    pub fn new(code: RoomCode, host_name: &str) -> Result<(Self, PlayerId), DomainError> {
        let display_name = validate_name(host_name)?;
        let id = PlayerId::new();
        let room = Self {
            code,
            players: vec![Player {
                id,
                display_name,
                is_host: true,
            }],
            session: None,
            closed: false,
        };
        Ok((room, id))
    }

    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn member_ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id).collect()
    }

    pub fn is_member(&self, id: PlayerId) -> bool {
        self.players.iter().any(|p| p.id == id)
    }

    pub fn host(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_host)
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// True once the registry has dropped this room; it accepts no members.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub(crate) fn close(&mut self) {
        self.closed = true;
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut GameSession> {
        self.session.as_mut()
    }

    /// A game exists and has not reached `GameEnd`.
    pub fn game_in_progress(&self) -> bool {
        self.session.as_ref().is_some_and(|s| !s.is_over())
    }

    pub fn add_player(&mut self, raw_name: &str) -> Result<PlayerId, DomainError> {
        let display_name = validate_name(raw_name)?;
        if self.closed {
            return Err(DomainError::not_found(
                NotFoundKind::Room,
                format!("Room {} not found", self.code),
            ));
        }
        if self.players.len() >= ROOM_CAPACITY {
            return Err(DomainError::conflict(
                ConflictKind::RoomFull,
                format!("Room is full ({ROOM_CAPACITY} players)"),
            ));
        }
        if self.game_in_progress() {
            return Err(DomainError::conflict(
                ConflictKind::GameInProgress,
                "A game is already in progress in this room",
            ));
        }
        let id = PlayerId::new();
        self.players.push(Player {
            id,
            display_name,
            is_host: false,
        });
        Ok(id)
    }

    /// Remove a member. When the host leaves, the lowest-index remaining
    /// member becomes host; the new host's id is returned in that case.
    pub fn remove_player(&mut self, id: PlayerId) -> Result<Option<PlayerId>, DomainError> {
        let index = self
            .players
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Player, "You are not in this room")
            })?;
        let removed = self.players.remove(index);
        if !removed.is_host {
            return Ok(None);
        }
        Ok(self.players.first_mut().map(|next| {
            next.is_host = true;
            next.id
        }))
    }

    /// Host-only: seat every current member in order and start a fresh game,
    /// replacing any previous one.
    pub fn start_game(
        &mut self,
        requester: PlayerId,
        rules: RuleSet,
    ) -> Result<&GameSession, DomainError> {
        self.start_with(requester, rules, GameSession::start)
    }

    /// As `start_game`, with deals reproducible from `seed`.
    pub fn start_game_seeded(
        &mut self,
        requester: PlayerId,
        rules: RuleSet,
        seed: u64,
    ) -> Result<&GameSession, DomainError> {
        self.start_with(requester, rules, |seats, rules| {
            GameSession::start_seeded(seats, rules, seed)
        })
    }

    fn start_with(
        &mut self,
        requester: PlayerId,
        rules: RuleSet,
        start: impl FnOnce(Vec<SeatInfo>, RuleSet) -> Result<GameSession, DomainError>,
    ) -> Result<&GameSession, DomainError> {
        if !self.is_member(requester) {
            return Err(DomainError::not_found(
                NotFoundKind::Player,
                "You are not in this room",
            ));
        }
        if self.host().map(|h| h.id) != Some(requester) {
            return Err(DomainError::forbidden("Only the host can start the game"));
        }
        let seats = self
            .players
            .iter()
            .map(|p| SeatInfo {
                player_id: p.id,
                display_name: p.display_name.clone(),
            })
            .collect();
        let session = start(seats, rules)?;
        Ok(self.session.insert(session))
    }
}
