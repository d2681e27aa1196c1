use actix::prelude::*;
use dashmap::DashMap;
use tracing::{debug, warn};

use crate::domain::state::PlayerId;
use crate::services::broadcast::Broadcaster;
use crate::ws::protocol::ServerMsg;

/// A server frame queued for one connection.
#[derive(Message, Clone, Debug)]
#[rtype(result = "()")]
pub struct OutboundMessage(pub ServerMsg);

/// Routes messages from the room service to live websocket sessions.
///
/// Holds the binding between a player identity and the connection currently
/// speaking for it.
#[derive(Default)]
pub struct WsHub {
    connections: DashMap<PlayerId, Recipient<OutboundMessage>>,
}

impl WsHub {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    pub fn bind(&self, player: PlayerId, recipient: Recipient<OutboundMessage>) {
        self.connections.insert(player, recipient);
        debug!(player_id = %player, "[WS HUB] bound");
    }

    pub fn unbind(&self, player: PlayerId) {
        if self.connections.remove(&player).is_some() {
            debug!(player_id = %player, "[WS HUB] unbound");
        }
    }

    pub fn is_connected(&self, player: PlayerId) -> bool {
        self.connections.contains_key(&player)
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

impl Broadcaster for WsHub {
    fn send_to(&self, player: PlayerId, msg: ServerMsg) {
        let Some(recipient) = self.connections.get(&player).map(|r| r.value().clone()) else {
            debug!(player_id = %player, "[WS HUB] no connection, dropping message");
            return;
        };
        match recipient.try_send(OutboundMessage(msg)) {
            Ok(()) => {}
            Err(SendError::Full(_)) => {
                warn!(player_id = %player, "[WS HUB] mailbox full, dropping message");
            }
            Err(SendError::Closed(_)) => {
                warn!(player_id = %player, "[WS HUB] connection closed, unbinding");
                self.connections
                    .remove_if(&player, |_, current| !current.connected());
            }
        }
    }
}
