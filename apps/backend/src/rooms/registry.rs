use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::domain::state::PlayerId;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::rooms::room::{validate_name, Room};
use crate::utils::room_code::RoomCode;

/// Codes tried before giving up on finding a free one.
const MAX_CODE_ATTEMPTS: usize = 32;

/// A room behind its own lock. One intent holds it at a time.
pub type SharedRoom = Arc<Mutex<Room>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaveOutcome {
    /// The room became empty and was dropped from the registry.
    pub room_closed: bool,
    /// Set when the departing player was host and someone took over.
    pub new_host: Option<PlayerId>,
}

/// Maps room codes to live rooms.
///
/// The map only guards membership of the code space; everything inside a room
/// is guarded by that room's own mutex. A map guard is never held while
/// waiting on a room lock.
#[derive(Default)]
pub struct RoomRegistry {
    rooms: DashMap<RoomCode, SharedRoom>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    /// Create a room under a fresh code with `host_name` as its host.
    pub fn create_room(
        &self,
        host_name: &str,
    ) -> Result<(RoomCode, PlayerId, SharedRoom), DomainError> {
        validate_name(host_name)?;
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = RoomCode::generate();
            match self.rooms.entry(code.clone()) {
                Entry::Occupied(_) => {
                    debug!(room_code = %code, "Room code collision, retrying");
                }
                Entry::Vacant(slot) => {
                    let (room, host) = Room::new(code.clone(), host_name)?;
                    let shared = Arc::new(Mutex::new(room));
                    slot.insert(Arc::clone(&shared));
                    info!(room_code = %code, player_id = %host, "Room created");
                    return Ok((code, host, shared));
                }
            }
        }
        Err(DomainError::conflict(
            ConflictKind::RoomCodeExhausted,
            "Could not allocate a room code",
        ))
    }

    pub fn get(&self, code: &RoomCode) -> Option<SharedRoom> {
        self.rooms.get(code).map(|entry| Arc::clone(entry.value()))
    }

    /// Like `get`, failing with `RoomNotFound`.
    pub fn require(&self, code: &RoomCode) -> Result<SharedRoom, DomainError> {
        self.get(code).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Room, format!("Room {code} not found"))
        })
    }

    pub fn join_room(
        &self,
        code: &RoomCode,
        player_name: &str,
    ) -> Result<(PlayerId, SharedRoom), DomainError> {
        let shared = self.require(code)?;
        let id = shared.lock().add_player(player_name)?;
        info!(room_code = %code, player_id = %id, "Player joined room");
        Ok((id, shared))
    }

    /// Remove `player`; an emptied room is closed and dropped.
    pub fn leave(&self, code: &RoomCode, player: PlayerId) -> Result<LeaveOutcome, DomainError> {
        let shared = self.require(code)?;
        let mut room = shared.lock();
        let new_host = room.remove_player(player)?;
        info!(room_code = %code, player_id = %player, "Player left room");

        if room.is_empty() {
            room.close();
            self.rooms
                .remove_if(code, |_, current| Arc::ptr_eq(current, &shared));
            info!(room_code = %code, "Room closed");
            return Ok(LeaveOutcome {
                room_closed: true,
                new_host: None,
            });
        }
        Ok(LeaveOutcome {
            room_closed: false,
            new_host,
        })
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
