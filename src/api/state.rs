//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::api::error::{ApiError, ApiResult};
use crate::config::ApiConfig;
use crate::store::{DispatchOutcome, Intent, Snapshot, Store};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// The dashboard state store
    pub store: Arc<Store>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(store: Arc<Store>, config: ApiConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Dispatch off the async runtime.
    ///
    /// Dispatch holds the store lock while effects write to disk, so it runs
    /// on the blocking pool.
    pub async fn dispatch(&self, intent: Intent) -> ApiResult<(DispatchOutcome, Snapshot)> {
        dispatch_blocking(Arc::clone(&self.store), intent).await
    }
}

/// Run `Store::dispatch_with_snapshot` on the blocking pool
pub async fn dispatch_blocking(
    store: Arc<Store>,
    intent: Intent,
) -> ApiResult<(DispatchOutcome, Snapshot)> {
    let result = tokio::task::spawn_blocking(move || store.dispatch_with_snapshot(intent))
        .await
        .map_err(|e| ApiError::Internal(format!("Dispatch task failed: {}", e)))?;

    Ok(result?)
}
