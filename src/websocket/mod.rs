//! WebSocket Live Updates
//!
//! Streams store changes to dashboard clients.
//!
//! ## Protocol
//!
//! On connect the server sends `connected` and a full `snapshot`. Every state
//! change is pushed as `state_changed`. Clients may send:
//!
//! - `{"type": "dispatch", "intent": {...}}` - dispatch an intent
//! - `{"type": "snapshot"}` - request the full state
//! - `{"type": "ping"}` - keepalive
//!
//! ## Example
//!
//! ```javascript
//! const ws = new WebSocket('ws://localhost:3000/ws');
//!
//! ws.onopen = () => {
//!   ws.send(JSON.stringify({
//!     type: 'dispatch',
//!     intent: {type: 'toggleFavorite', payload: {id: '25', name: 'Pikachu'}},
//!   }));
//! };
//!
//! ws.onmessage = (event) => {
//!   const msg = JSON.parse(event.data);
//!   console.log('Received:', msg);
//! };
//! ```

mod handler;
mod messages;

pub use handler::websocket_handler;
pub use messages::{ClientMessage, ServerMessage};
