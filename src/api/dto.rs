//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::Serialize;
use serde_json::Value;

use crate::store::{DispatchOutcome, FavoriteItem, Snapshot, StoreStats};

/// Confirmation text returned by `POST /api/counter`
pub const COUNTER_POST_MESSAGE: &str = "Datos recibidos correctamente";

/// Static value served by `GET /api/counter`
pub const COUNTER_FIXED_COUNT: u64 = 100;

// ============================================
// COUNTER DTOs
// ============================================

/// Fixed counter response
#[derive(Debug, Serialize)]
pub struct CounterResponse {
    pub count: u64,
}

/// Echo of a posted JSON document
#[derive(Debug, Serialize)]
pub struct CounterEchoResponse {
    pub message: &'static str,
    pub data: Value,
}

// ============================================
// STORE DTOs
// ============================================

/// Live cart count
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub count: u64,
    pub ready: bool,
}

/// Result of a dispatched intent
#[derive(Debug, Serialize)]
pub struct DispatchResponse {
    pub outcome: DispatchOutcome,
    pub snapshot: Snapshot,
}

// ============================================
// FAVORITES DTOs
// ============================================

/// Favorites as a list
#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub count: usize,
    pub favorites: Vec<FavoriteItem>,
}

/// Result of toggling one favorite
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub id: String,
    /// Whether the item is a favorite after the toggle
    pub favorite: bool,
    pub count: usize,
    pub revision: u64,
    /// Whether the durable copy was updated
    pub persisted: bool,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub storage: String,
    pub storage_backend: String,
    pub store: StoreStats,
    pub uptime_seconds: u64,
    pub version: String,
}
