//! WebSocket Message Types
//!
//! Defines all message types for WebSocket communication between
//! dashboards and the store.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::store::{DispatchOutcome, Intent, RootState, Snapshot, StoreEvent};

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Dispatch an intent to the store
    Dispatch {
        intent: Intent,
    },
    /// Ask for the full current state
    Snapshot,
    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established
    Connected {
        /// Unique connection identifier
        connection_id: String,
    },
    /// Full state, sent on connect, on request and after lagging
    Snapshot {
        revision: u64,
        state: Arc<RootState>,
    },
    /// The store changed
    StateChanged {
        /// Intent that produced the change
        intent: String,
        revision: u64,
        state: Arc<RootState>,
    },
    /// Reply to a client dispatch
    Dispatched {
        outcome: DispatchOutcome,
    },
    /// Pong response to ping
    Pong,
    /// Error message
    Error {
        /// Error description
        message: String,
    },
}

impl ServerMessage {
    pub fn snapshot(snapshot: Snapshot) -> Self {
        ServerMessage::Snapshot {
            revision: snapshot.revision,
            state: snapshot.state,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            message: message.into(),
        }
    }
}

impl From<StoreEvent> for ServerMessage {
    fn from(event: StoreEvent) -> Self {
        ServerMessage::StateChanged {
            intent: event.intent.to_string(),
            revision: event.snapshot.revision,
            state: event.snapshot.state,
        }
    }
}
