//! Error codes for the Sets backend protocol.
//!
//! This module defines all error codes sent to clients. Add new codes here;
//! never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in `error` and `action_rejected` frames.

use core::fmt;

use serde::{Serialize, Serializer};

/// Centralized error codes for the Sets backend protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Room membership
    /// No room with the given code
    RoomNotFound,
    /// Room already holds the maximum number of players
    RoomFull,
    /// A game is running in the room; joining is closed
    GameInProgress,
    /// Only the host may perform this operation
    NotHost,
    /// The player is not a member of the room
    NotInRoom,
    /// Display name empty or too long
    InvalidName,
    /// Not enough (or too many) players to start
    InvalidPlayerCount,

    // Game actions
    /// Not this player's turn
    OutOfTurn,
    /// Action does not apply in the current phase
    InvalidPhase,
    /// Prediction out of range or would make the total equal the hand size
    InvalidPrediction,
    /// Card index outside the player's hand
    InvalidCardIndex,
    /// Must follow the leading suit
    MustFollowSuit,
    /// Parse card error
    ParseCard,
    /// General validation error
    ValidationError,

    // Protocol
    /// Malformed or unsupported client message
    BadRequest,
    /// Unsupported protocol version
    BadProtocol,

    // System Errors
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RoomNotFound => "ROOM_NOT_FOUND",
            Self::RoomFull => "ROOM_FULL",
            Self::GameInProgress => "GAME_IN_PROGRESS",
            Self::NotHost => "NOT_HOST",
            Self::NotInRoom => "NOT_IN_ROOM",
            Self::InvalidName => "INVALID_NAME",
            Self::InvalidPlayerCount => "INVALID_PLAYER_COUNT",

            Self::OutOfTurn => "OUT_OF_TURN",
            Self::InvalidPhase => "INVALID_PHASE",
            Self::InvalidPrediction => "INVALID_PREDICTION",
            Self::InvalidCardIndex => "INVALID_CARD_INDEX",
            Self::MustFollowSuit => "MUST_FOLLOW_SUIT",
            Self::ParseCard => "PARSE_CARD",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::BadRequest => "BAD_REQUEST",
            Self::BadProtocol => "BAD_PROTOCOL",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
