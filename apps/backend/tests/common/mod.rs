#![allow(dead_code)]

use sets_backend::domain::PlayerId;
use sets_backend::ws::protocol::ServerMsg;
use sets_backend::RecordingBroadcaster;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Short names for the `type` tag of recorded messages, for readable asserts.
pub fn kinds(msgs: &[ServerMsg]) -> Vec<&'static str> {
    msgs.iter()
        .map(|m| match m {
            ServerMsg::HelloAck { .. } => "hello_ack",
            ServerMsg::RoomCreated { .. } => "room_created",
            ServerMsg::RoomJoined { .. } => "room_joined",
            ServerMsg::PlayersUpdate { .. } => "players_update",
            ServerMsg::GameStarted { .. } => "game_started",
            ServerMsg::GameStateUpdate { .. } => "game_state_update",
            ServerMsg::ActionRejected { .. } => "action_rejected",
            ServerMsg::Error { .. } => "error",
        })
        .collect()
}

/// Kinds of everything recorded for `player`.
pub fn kinds_for(broadcaster: &RecordingBroadcaster, player: PlayerId) -> Vec<&'static str> {
    kinds(&broadcaster.sent_to(player))
}
