//! Outbound delivery seam between the room service and the transport.

use parking_lot::Mutex;

use crate::domain::state::PlayerId;
use crate::ws::protocol::ServerMsg;

/// Delivers messages to individual players.
///
/// Implementations must not block and must not let a failed delivery to one
/// player affect delivery to any other.
pub trait Broadcaster: Send + Sync {
    fn send_to(&self, player: PlayerId, msg: ServerMsg);

    fn send_to_all(&self, players: &[PlayerId], msg: &ServerMsg) {
        for &player in players {
            self.send_to(player, msg.clone());
        }
    }
}

/// In-memory broadcaster that records every delivery, for tests.
#[derive(Default)]
pub struct RecordingBroadcaster {
    sent: Mutex<Vec<(PlayerId, ServerMsg)>>,
}

impl RecordingBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything sent so far, in send order.
    pub fn sent(&self) -> Vec<(PlayerId, ServerMsg)> {
        self.sent.lock().clone()
    }

    /// Messages delivered to one player, in order.
    pub fn sent_to(&self, player: PlayerId) -> Vec<ServerMsg> {
        self.sent
            .lock()
            .iter()
            .filter(|(to, _)| *to == player)
            .map(|(_, msg)| msg.clone())
            .collect()
    }

    /// Drain and return everything recorded so far.
    pub fn take(&self) -> Vec<(PlayerId, ServerMsg)> {
        std::mem::take(&mut *self.sent.lock())
    }
}

impl Broadcaster for RecordingBroadcaster {
    fn send_to(&self, player: PlayerId, msg: ServerMsg) {
        self.sent.lock().push((player, msg));
    }
}
