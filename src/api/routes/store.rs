//! Store Routes
//!
//! Read access to the whole state and a generic intent entry point.
//!
//! - GET /api/state - Current snapshot
//! - POST /api/dispatch - Dispatch any intent
//! - GET /api/cart - Live cart count

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{CartResponse, DispatchResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::store::{selectors, Intent, Snapshot};

/// GET /api/state
pub async fn get_state(State(state): State<Arc<AppState>>) -> ApiResult<Json<Snapshot>> {
    Ok(Json(state.store.snapshot()?))
}

/// POST /api/dispatch
pub async fn dispatch_intent(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Intent>, JsonRejection>,
) -> ApiResult<Json<DispatchResponse>> {
    let Json(intent) = payload?;

    let (outcome, snapshot) = state.dispatch(intent).await?;

    Ok(Json(DispatchResponse { outcome, snapshot }))
}

/// GET /api/cart
pub async fn get_cart(State(state): State<Arc<AppState>>) -> ApiResult<Json<CartResponse>> {
    let (count, ready) = state.store.select(|s| {
        (
            selectors::select_cart_count(s),
            selectors::select_counter_ready(s),
        )
    })?;

    Ok(Json(CartResponse { count, ready }))
}
