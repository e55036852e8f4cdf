//! Favorites Routes
//!
//! - GET /api/favorites - List favorites
//! - PUT /api/favorites - Replace all favorites
//! - GET /api/favorites/:id - Get one favorite
//! - POST /api/favorites/toggle - Toggle one favorite (written through to storage)

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{DispatchResponse, FavoritesResponse, ToggleResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::store::{selectors, FavoriteItem, FavoritesMap, Intent};

/// GET /api/favorites
pub async fn list_favorites(State(state): State<Arc<AppState>>) -> ApiResult<Json<FavoritesResponse>> {
    let favorites: Vec<FavoriteItem> = state
        .store
        .select(|s| {
            selectors::select_favorites(s)
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        })?;

    Ok(Json(FavoritesResponse {
        count: favorites.len(),
        favorites,
    }))
}

/// GET /api/favorites/:id
pub async fn get_favorite(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<FavoriteItem>> {
    state
        .store
        .select(|s| selectors::select_favorites_map(s).get(&id).cloned())?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Favorite '{}'", id)))
}

/// PUT /api/favorites
///
/// Body is a map `id → item`. Entries are re-keyed by their own id.
pub async fn replace_favorites(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FavoritesMap>, JsonRejection>,
) -> ApiResult<Json<DispatchResponse>> {
    let Json(favorites) = payload?;

    let (outcome, snapshot) = state.dispatch(Intent::SetFavoritePokemons(favorites)).await?;

    Ok(Json(DispatchResponse { outcome, snapshot }))
}

/// POST /api/favorites/toggle
pub async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FavoriteItem>, JsonRejection>,
) -> ApiResult<Json<ToggleResponse>> {
    let Json(item) = payload?;
    validate_item(&item)?;

    let id = item.id.clone();
    let (outcome, snapshot) = state.dispatch(Intent::ToggleFavorite(item)).await?;
    let favorite = selectors::select_is_favorite(&snapshot.state, &id);
    let count = selectors::select_favorite_count(&snapshot.state);

    tracing::info!(id = %id, favorite, count, "Toggled favorite");

    Ok(Json(ToggleResponse {
        id,
        favorite,
        count,
        revision: outcome.revision,
        persisted: outcome.effects_failed == 0,
    }))
}

/// The store accepts any id; the HTTP boundary is stricter.
fn validate_item(item: &FavoriteItem) -> ApiResult<()> {
    if item.id.trim().is_empty() {
        return Err(ApiError::Validation("Favorite id cannot be empty".to_string()));
    }

    if item.id.len() > 64 {
        return Err(ApiError::Validation(
            "Favorite id exceeds maximum length of 64 characters".to_string(),
        ));
    }

    Ok(())
}
