//! Websocket transport: JSON protocol, per-connection session actor, and the
//! hub that routes room broadcasts to connections.

pub mod hub;
pub mod protocol;
pub mod session;
