//! WebSocket coordination: inbound action dispatch and state fan-out.
//!
//! Each connection gets a reader task plus an unbounded outbound queue
//! drained by a writer task. Mutating actions take the session store's
//! write lock for the whole transition-and-broadcast, so clients never
//! observe a torn state and updates fan out in transition order. Broadcasts
//! go to every live connection process-wide, not just the ones viewing the
//! affected session.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use futures_util::{SinkExt, StreamExt};
use log::{debug, info, warn};
use serde_json::json;
use shared::{ClientMessage, ServerMessage};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

use crate::error::GameError;
use crate::pages::{self, Role};
use crate::session::SessionStore;

/// Handle for pushing frames to one connected client.
pub type ConnectionSender = mpsc::UnboundedSender<Message>;

/// Registry of live connections. Connections are independent of sessions:
/// nothing is cleaned up in the store when a client goes away.
pub struct ConnectionManager {
    connections: HashMap<u64, ConnectionSender>,
    next_id: u64,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            connections: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn add(&mut self, tx: ConnectionSender) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.connections.insert(id, tx);
        info!("Client {} connected", id);
        id
    }

    pub fn remove(&mut self, id: u64) {
        if self.connections.remove(&id).is_some() {
            info!("Client {} disconnected", id);
        }
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Queues a frame on every live connection. A send only fails when the
    /// receiving task already hung up; the reader task removes the entry on
    /// its way out, so failures are dropped here.
    pub fn broadcast(&self, message: &ServerMessage) {
        match serde_json::to_string(message) {
            Ok(text) => {
                for tx in self.connections.values() {
                    let _ = tx.send(Message::Text(text.clone()));
                }
            }
            Err(e) => warn!("Failed to encode broadcast: {}", e),
        }
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared server state: the session store behind the one exclusive guard,
/// and the connection registry used for fan-out.
pub struct AppState {
    pub store: RwLock<SessionStore>,
    pub connections: RwLock<ConnectionManager>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(store: SessionStore) -> SharedState {
        Arc::new(Self {
            store: RwLock::new(store),
            connections: RwLock::new(ConnectionManager::new()),
        })
    }
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/player/:game_id", get(player_page))
        .route("/spymaster/:game_id", get(spymaster_page))
        .route("/reset/:game_id", post(reset_game))
        .route("/ws", get(ws_upgrade))
        .with_state(state)
}

async fn index_page() -> Html<String> {
    Html(pages::index())
}

async fn player_page(
    State(state): State<SharedState>,
    Path(game_id): Path<String>,
) -> Result<Html<String>, (StatusCode, String)> {
    ensure_session(&state, &game_id).await?;
    Ok(Html(pages::render(&game_id, Role::Player)))
}

async fn spymaster_page(
    State(state): State<SharedState>,
    Path(game_id): Path<String>,
) -> Result<Html<String>, (StatusCode, String)> {
    ensure_session(&state, &game_id).await?;
    Ok(Html(pages::render(&game_id, Role::Spymaster)))
}

/// Page loads are where create-on-first-reference happens; a failed board
/// generation surfaces to the visitor that triggered it.
async fn ensure_session(
    state: &SharedState,
    game_id: &str,
) -> Result<(), (StatusCode, String)> {
    let mut store = state.store.write().await;
    store
        .get_or_create(game_id)
        .map(|_| ())
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

/// Administrative reset: regenerates the session and tells every client to
/// re-request full state.
async fn reset_game(
    State(state): State<SharedState>,
    Path(game_id): Path<String>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let mut store = state.store.write().await;
    store
        .reset(&game_id)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    state
        .connections
        .read()
        .await
        .broadcast(&ServerMessage::GameReset {
            game_id: game_id.clone(),
        });

    Ok(Json(json!({ "status": "success", "message": "Game reset" })))
}

async fn ws_upgrade(State(state): State<SharedState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Per-connection lifecycle: register, greet, pump inbound frames through
/// the dispatcher, unregister. Session state outlives the connection.
async fn handle_socket(socket: WebSocket, state: SharedState) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();

    let conn_id = state.connections.write().await.add(tx.clone());

    // Writer task: drains the outbound queue into the socket
    let writer = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if sink.send(message).await.is_err() {
                break;
            }
        }
    });

    send_to(
        &tx,
        &ServerMessage::ConnectionResponse {
            status: "connected".to_string(),
        },
    );

    while let Some(frame) = stream.next().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(_) => break,
        };
        match frame {
            Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(message) => dispatch(&state, &tx, message).await,
                Err(e) => warn!("Client {} sent an unparseable frame: {}", conn_id, e),
            },
            Message::Close(_) => break,
            // Ping/pong are answered by the protocol layer; binary is ignored
            _ => {}
        }
    }

    state.connections.write().await.remove(conn_id);
    writer.abort();
}

/// Serializes a reply onto one connection's outbound queue.
fn send_to(tx: &ConnectionSender, message: &ServerMessage) {
    match serde_json::to_string(message) {
        Ok(text) => {
            let _ = tx.send(Message::Text(text));
        }
        Err(e) => warn!("Failed to encode reply: {}", e),
    }
}

/// Maps one inbound action onto the state machine and fans out the result.
///
/// Unknown sessions are an error only for reads; mutating actions on a
/// missing session are swallowed.
async fn dispatch(state: &SharedState, tx: &ConnectionSender, message: ClientMessage) {
    match message {
        ClientMessage::RequestGameState { game_id } => {
            let store = state.store.read().await;
            match store.get(&game_id) {
                Some(game) => send_to(tx, &game.snapshot()),
                None => send_to(
                    tx,
                    &ServerMessage::Error {
                        message: GameError::UnknownSession(game_id).to_string(),
                    },
                ),
            }
        }

        ClientMessage::RevealCard {
            game_id,
            card_index,
        } => {
            let mut store = state.store.write().await;
            let Some(game) = store.get_mut(&game_id) else {
                return;
            };
            let Some(team) = game.reveal_card(&game_id, card_index) else {
                return;
            };
            let update = ServerMessage::GameStateUpdate {
                card_index: card_index as usize,
                team,
                summary: game.summary(),
            };
            state.connections.read().await.broadcast(&update);
        }

        ClientMessage::GiveClue {
            game_id,
            clue,
            number,
        } => {
            let mut store = state.store.write().await;
            let Some(game) = store.get_mut(&game_id) else {
                return;
            };
            match game.give_clue(&game_id, &clue, number) {
                Ok(true) => {
                    let announcement = ServerMessage::ClueGiven {
                        clue: clue.trim().to_string(),
                        number: number as u32,
                        team: game.current_turn,
                        guesses_allowed: game.guesses_allowed,
                    };
                    state.connections.read().await.broadcast(&announcement);
                }
                Ok(false) => {}
                Err(e) => send_to(
                    tx,
                    &ServerMessage::Error {
                        message: e.to_string(),
                    },
                ),
            }
        }

        ClientMessage::EndTurn { game_id } => {
            let mut store = state.store.write().await;
            let Some(game) = store.get_mut(&game_id) else {
                return;
            };
            if game.end_turn(&game_id) {
                let update = ServerMessage::TurnEnded {
                    current_turn: game.current_turn,
                };
                state.connections.read().await.broadcast(&update);
            }
        }

        ClientMessage::CursorPosition {
            game_id,
            player_id,
            x,
            y,
        } => {
            {
                let mut store = state.store.write().await;
                if let Some(game) = store.get_mut(&game_id) {
                    game.set_cursor(&player_id, x, y);
                }
            }
            let cursor = ServerMessage::PlayerCursor { player_id, x, y };
            state.connections.read().await.broadcast(&cursor);
        }

        ClientMessage::CursorMove {
            player_id,
            card_index,
            word,
        } => {
            // Observed only; clients do not receive hover events
            debug!(
                "Player {} hovering over card {}: {}",
                player_id, card_index, word
            );
        }
    }
}
