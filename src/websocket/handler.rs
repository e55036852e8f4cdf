//! WebSocket Handler
//!
//! Handles WebSocket upgrade requests and manages the connection lifecycle.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{stream::SplitSink, SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

use super::messages::{ClientMessage, ServerMessage};
use crate::api::state::dispatch_blocking;
use crate::api::AppState;
use crate::store::Store;

/// WebSocket upgrade handler
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    let store = Arc::clone(&state.store);
    ws.on_upgrade(move |socket| handle_socket(socket, store))
}

/// Handle an established WebSocket connection
async fn handle_socket(socket: WebSocket, store: Arc<Store>) {
    let (mut sender, mut receiver) = socket.split();
    let connection_id = uuid::Uuid::new_v4().to_string();

    // Subscribe before the initial snapshot so no change falls in between
    let mut events = store.subscribe();

    let connected = ServerMessage::Connected {
        connection_id: connection_id.clone(),
    };
    let initial = match store.snapshot() {
        Ok(snapshot) => ServerMessage::snapshot(snapshot),
        Err(e) => ServerMessage::error(e.to_string()),
    };
    if send(&mut sender, &connected).await.is_err() || send(&mut sender, &initial).await.is_err() {
        tracing::debug!(connection_id = %connection_id, "Client left before handshake");
        return;
    }

    tracing::info!(connection_id = %connection_id, "WebSocket connected");

    loop {
        tokio::select! {
            event = events.recv() => {
                let msg = match event {
                    Ok(event) => ServerMessage::from(event),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!(connection_id = %connection_id, skipped, "Subscriber lagged, resending snapshot");
                        match store.snapshot() {
                            Ok(snapshot) => ServerMessage::snapshot(snapshot),
                            Err(e) => ServerMessage::error(e.to_string()),
                        }
                    }
                    Err(RecvError::Closed) => break,
                };
                if send(&mut sender, &msg).await.is_err() {
                    break;
                }
            }
            incoming = receiver.next() => {
                let reply = match incoming {
                    Some(Ok(Message::Text(text))) => handle_text(&store, &connection_id, &text).await,
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => None,
                    Some(Err(e)) => {
                        tracing::debug!(connection_id = %connection_id, error = %e, "WebSocket receive error");
                        break;
                    }
                };
                if let Some(reply) = reply {
                    if send(&mut sender, &reply).await.is_err() {
                        break;
                    }
                }
            }
        }
    }

    tracing::info!(connection_id = %connection_id, "WebSocket disconnected");
}

/// Handle a text frame, returning the reply (if any)
async fn handle_text(
    store: &Arc<Store>,
    connection_id: &str,
    text: &str,
) -> Option<ServerMessage> {
    let msg = match serde_json::from_str::<ClientMessage>(text) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::debug!(
                connection_id = %connection_id,
                error = %e,
                "Invalid client message"
            );
            return Some(ServerMessage::error(format!("Invalid message: {}", e)));
        }
    };

    let reply = match msg {
        ClientMessage::Dispatch { intent } => {
            match dispatch_blocking(Arc::clone(store), intent).await {
                Ok((outcome, _)) => ServerMessage::Dispatched { outcome },
                Err(e) => ServerMessage::error(e.to_string()),
            }
        }
        ClientMessage::Snapshot => match store.snapshot() {
            Ok(snapshot) => ServerMessage::snapshot(snapshot),
            Err(e) => ServerMessage::error(e.to_string()),
        },
        ClientMessage::Ping => ServerMessage::Pong,
    };

    Some(reply)
}

async fn send(
    sender: &mut SplitSink<WebSocket, Message>,
    msg: &ServerMessage,
) -> Result<(), axum::Error> {
    match serde_json::to_string(msg) {
        Ok(text) => sender.send(Message::Text(text)).await,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize message");
            Ok(())
        }
    }
}
