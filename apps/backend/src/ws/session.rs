use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::domain::state::PlayerId;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::state::app_state::AppState;
use crate::utils::room_code::RoomCode;
use crate::ws::hub::OutboundMessage;
use crate::ws::protocol::{ClientMsg, ServerMsg, PROTOCOL_VERSION};
use crate::AppError;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let conn_id = Uuid::new_v4();
    let session = WsSession::new(conn_id, app_state);
    ws::start(session, &req, stream)
}

/// One websocket connection. Speaks for at most one player in one room.
pub struct WsSession {
    conn_id: Uuid,
    app_state: web::Data<AppState>,

    player_id: Option<PlayerId>,
    room_code: Option<RoomCode>,

    last_heartbeat: Instant,
}

impl WsSession {
    fn new(conn_id: Uuid, app_state: web::Data<AppState>) -> Self {
        Self {
            conn_id,
            app_state,
            player_id: None,
            room_code: None,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn send_error_and_close(&self, ctx: &mut ws::WebsocketContext<Self>, err: &AppError) {
        self.send_failure(ctx, err, false);
        ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
        ctx.stop();
    }

    /// Reply to this connection alone. `rejected` selects the in-game frame.
    fn send_failure(&self, ctx: &mut ws::WebsocketContext<Self>, err: &AppError, rejected: bool) {
        if err.is_client_error() {
            debug!(conn_id = %self.conn_id, error = %err, "[WS SESSION] request refused");
        } else {
            error!(conn_id = %self.conn_id, error = %err, "[WS SESSION] request failed");
        }
        let (code, message) = (err.code(), err.client_message());
        let msg = if rejected {
            ServerMsg::ActionRejected { code, message }
        } else {
            ServerMsg::Error { code, message }
        };
        Self::send_json(ctx, &msg);
    }

    fn require_player(&self) -> Result<PlayerId, AppError> {
        self.player_id.ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Player, "Create or join a room first").into()
        })
    }

    /// Leave whatever room this connection is in and drop its hub binding.
    fn leave_current(&mut self) {
        let (Some(player), Some(code)) = (self.player_id.take(), self.room_code.take()) else {
            return;
        };
        self.app_state.hub().unbind(player);
        if let Err(err) = self.app_state.rooms().leave(code.as_str(), player) {
            debug!(
                conn_id = %self.conn_id,
                player_id = %player,
                room_code = %code,
                error = %err,
                "[WS SESSION] leave on disconnect failed"
            );
        }
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(conn_id = %actor.conn_id, "[WS SESSION] heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn handle_client_msg(&mut self, cmd: ClientMsg, ctx: &mut ws::WebsocketContext<Self>) {
        match cmd {
            ClientMsg::Hello { protocol } => {
                if protocol != PROTOCOL_VERSION {
                    let err = AppError::bad_protocol(format!(
                        "Unsupported protocol version {protocol}, expected {PROTOCOL_VERSION}"
                    ));
                    self.send_error_and_close(ctx, &err);
                    return;
                }
                Self::send_json(
                    ctx,
                    &ServerMsg::HelloAck {
                        protocol: PROTOCOL_VERSION,
                        player_id: self.player_id,
                    },
                );
            }

            // The previous room is left only once the new one has accepted us.
            ClientMsg::CreateRoom { player_name } => {
                let hub = self.app_state.hub().clone();
                let recipient = ctx.address().recipient::<OutboundMessage>();
                match self
                    .app_state
                    .rooms()
                    .create_room(&player_name, |id| hub.bind(id, recipient))
                {
                    Ok((code, player_id)) => {
                        info!(conn_id = %self.conn_id, room_code = %code, player_id = %player_id, "[WS SESSION] created room");
                        self.leave_current();
                        self.player_id = Some(player_id);
                        self.room_code = Some(code);
                    }
                    Err(err) => self.send_failure(ctx, &err, false),
                }
            }

            ClientMsg::JoinRoom { code, player_name } => {
                let hub = self.app_state.hub().clone();
                let recipient = ctx.address().recipient::<OutboundMessage>();
                match self
                    .app_state
                    .rooms()
                    .join_room(&code, &player_name, |id| hub.bind(id, recipient))
                {
                    Ok((code, player_id)) => {
                        info!(conn_id = %self.conn_id, room_code = %code, player_id = %player_id, "[WS SESSION] joined room");
                        self.leave_current();
                        self.player_id = Some(player_id);
                        self.room_code = Some(code);
                    }
                    Err(err) => self.send_failure(ctx, &err, false),
                }
            }

            ClientMsg::StartGame { code, settings } => {
                let result = self
                    .require_player()
                    .and_then(|player| self.app_state.rooms().start_game(&code, player, settings));
                if let Err(err) = result {
                    self.send_failure(ctx, &err, false);
                }
            }

            ClientMsg::GameAction { code, action } => {
                let result = self
                    .require_player()
                    .and_then(|player| self.app_state.rooms().game_action(&code, player, action));
                if let Err(err) = result {
                    self.send_failure(ctx, &err, true);
                }
            }

            ClientMsg::LeaveRoom { code } => {
                let result = self
                    .require_player()
                    .and_then(|player| self.app_state.rooms().leave(&code, player).map(|_| player));
                match result {
                    Ok(player) => {
                        self.app_state.hub().unbind(player);
                        self.player_id = None;
                        self.room_code = None;
                    }
                    Err(err) => self.send_failure(ctx, &err, false),
                }
            }
        }
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "[WS SESSION] started");
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.leave_current();
        info!(conn_id = %self.conn_id, "[WS SESSION] stopped");
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();

                match serde_json::from_str::<ClientMsg>(&text) {
                    Ok(cmd) => self.handle_client_msg(cmd, ctx),
                    Err(err) => {
                        // Malformed input never closes the socket.
                        self.send_failure(ctx, &AppError::from(err), false);
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                let err = AppError::bad_request("Binary frames are not supported");
                self.send_error_and_close(ctx, &err);
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(
                    conn_id = %self.conn_id,
                    error = %err,
                    "[WS SESSION] protocol error"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<OutboundMessage> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: OutboundMessage, ctx: &mut Self::Context) -> Self::Result {
        Self::send_json(ctx, &msg.0);
    }
}
