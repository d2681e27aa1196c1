use serde::{Deserialize, Serialize};

use crate::domain::rules::RuleSet;
use crate::domain::snapshot::PlayerSnapshot;
use crate::domain::state::PlayerId;
use crate::domain::Suit;
use crate::errors::ErrorCode;
use crate::rooms::Player;
use crate::utils::room_code::RoomCode;

pub const PROTOCOL_VERSION: i32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    Hello {
        protocol: i32,
    },
    CreateRoom {
        player_name: String,
    },
    JoinRoom {
        code: String,
        player_name: String,
    },
    StartGame {
        code: String,
        #[serde(default)]
        settings: RuleSet,
    },
    GameAction {
        code: String,
        action: GameAction,
    },
    LeaveRoom {
        code: String,
    },
}

/// In-game intents, validated by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameAction {
    MakePrediction { prediction: i32 },
    SetTrump { trump_suit: Suit },
    PlayCard { card_index: i32 },
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    HelloAck {
        protocol: i32,
        player_id: Option<PlayerId>,
    },

    RoomCreated {
        code: RoomCode,
        player_id: PlayerId,
    },

    RoomJoined {
        code: RoomCode,
        player_id: PlayerId,
    },

    PlayersUpdate {
        code: RoomCode,
        players: Vec<Player>,
    },

    GameStarted {
        code: RoomCode,
        snapshot: PlayerSnapshot,
    },

    GameStateUpdate {
        code: RoomCode,
        snapshot: PlayerSnapshot,
    },

    /// An in-game intent was refused; only the acting client receives it.
    ActionRejected {
        code: ErrorCode,
        message: String,
    },

    Error {
        code: ErrorCode,
        message: String,
    },
}
