use actix::{Actor, ActorContext, Addr, AsyncContext, StreamHandler};
use actix_web::{web, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub const WELCOME_MESSAGE: &str = "Welcome to Conversa!";

// Frames the browser client may send. Anything that does not parse as one of
// these is answered with an error frame and never broadcast.
#[derive(Deserialize, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientEvent {
    Chat { message: String },
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerEvent {
    Chat { message: String },
    Error { message: String },
}

impl ServerEvent {
    pub fn chat(message: impl Into<String>) -> Self {
        ServerEvent::Chat {
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ServerEvent::Error {
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
}

pub struct ChatRoom {
    sessions: Mutex<HashMap<Uuid, Addr<ChatSession>>>,
}

impl ChatRoom {
    pub fn new() -> Self {
        ChatRoom {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn broadcast(&self, event: &ServerEvent) {
        let frame = event.to_json();
        let sessions = self.sessions.lock().unwrap();
        for session in sessions.values() {
            session.do_send(OutboundFrame(frame.clone()));
        }
    }

    pub fn add_session(&self, session_id: Uuid, addr: Addr<ChatSession>) {
        self.sessions.lock().unwrap().insert(session_id, addr);
    }

    pub fn remove_session(&self, session_id: Uuid) {
        self.sessions.lock().unwrap().remove(&session_id);
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }
}

impl Default for ChatRoom {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(actix::Message)]
#[rtype(result = "()")]
pub struct OutboundFrame(pub String);

// One actor per accepted connection, the counterpart of the original
// chat consumer. Sessions are anonymous: each gets a fresh id.
pub struct ChatSession {
    id: Uuid,
    room: Arc<ChatRoom>,
}

impl ChatSession {
    pub fn new(room: Arc<ChatRoom>) -> Self {
        ChatSession {
            id: Uuid::new_v4(),
            room,
        }
    }
}

// Upgrades the request and runs a chat session on this room.
pub fn start_consumer(
    room: Arc<ChatRoom>,
    req: &HttpRequest,
    stream: web::Payload,
) -> actix_web::Result<HttpResponse> {
    ws::start(ChatSession::new(room), req, stream)
}

impl Actor for ChatSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.room.add_session(self.id, ctx.address());
        info!(
            "Session {} connected ({} online)",
            self.id,
            self.room.session_count()
        );
        ctx.text(ServerEvent::chat(WELCOME_MESSAGE).to_json());
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.room.remove_session(self.id);
        info!(
            "Session {} disconnected ({} online)",
            self.id,
            self.room.session_count()
        );
    }
}

// What one inbound text frame leads to: a chat frame fanned out to every
// connected session (the sender included), or an error frame for the sender
// alone. Kept free of the actor so the split is testable on its own.
#[derive(Debug, PartialEq)]
pub enum TextOutcome {
    Broadcast(ServerEvent),
    ReplyToSender(ServerEvent),
}

pub fn outcome_for_text(text: &str) -> TextOutcome {
    match serde_json::from_str::<ClientEvent>(text) {
        Ok(ClientEvent::Chat { message }) => TextOutcome::Broadcast(ServerEvent::chat(message)),
        Err(_) => TextOutcome::ReplyToSender(ServerEvent::error("Unknown message type!")),
    }
}

impl actix::Handler<OutboundFrame> for ChatSession {
    type Result = ();

    fn handle(&mut self, msg: OutboundFrame, ctx: &mut Self::Context) {
        ctx.text(msg.0);
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ChatSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => match outcome_for_text(&text) {
                TextOutcome::Broadcast(event) => {
                    self.room.broadcast(&event);
                }
                TextOutcome::ReplyToSender(event) => {
                    warn!("Session {} sent an unreadable frame: {}", self.id, text);
                    ctx.text(event.to_json());
                }
            },
            Ok(ws::Message::Ping(msg)) => {
                ctx.pong(&msg);
            }
            Ok(ws::Message::Pong(_)) => {}
            Ok(ws::Message::Binary(_)) => {}
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            _ => {}
        }
    }
}
