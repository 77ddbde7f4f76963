//! Photo endpoint routes.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};

use crate::error::Result;
use crate::handlers::{
    handle_command, handle_insert, handle_list, handle_refresh, handle_reset, handle_swap,
    handle_visibility, ListQuery, MoveRequest, PhotoListResponse, RefreshRequest,
    VisibilityRequest,
};
use crate::AppState;
use gridmuse_engine::{Command, PhotoId};

/// Create photo routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/photos", get(list_handler).delete(reset_handler))
        .route("/photos/refresh", post(refresh_handler))
        .route("/photos/swap", post(swap_handler))
        .route("/photos/insert", post(insert_handler))
        .route("/photos/commands", post(command_handler))
        .route("/photos/{id}/visibility", put(visibility_handler))
}

/// GET /photos - Current list.
async fn list_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<PhotoListResponse> {
    Json(handle_list(&state.service, query))
}

/// POST /photos/refresh - Rebuild the list.
async fn refresh_handler(
    State(state): State<AppState>,
    request: Option<Json<RefreshRequest>>,
) -> Result<Json<PhotoListResponse>> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    Ok(Json(handle_refresh(&state.service, request).await?))
}

/// POST /photos/swap
async fn swap_handler(
    State(state): State<AppState>,
    Json(request): Json<MoveRequest>,
) -> Result<Json<PhotoListResponse>> {
    Ok(Json(handle_swap(&state.service, request).await?))
}

/// POST /photos/insert
async fn insert_handler(
    State(state): State<AppState>,
    Json(request): Json<MoveRequest>,
) -> Result<Json<PhotoListResponse>> {
    Ok(Json(handle_insert(&state.service, request).await?))
}

/// PUT /photos/{id}/visibility
async fn visibility_handler(
    State(state): State<AppState>,
    Path(id): Path<PhotoId>,
    Json(request): Json<VisibilityRequest>,
) -> Result<Json<PhotoListResponse>> {
    Ok(Json(handle_visibility(&state.service, id, request).await?))
}

/// POST /photos/commands - Any engine command.
async fn command_handler(
    State(state): State<AppState>,
    Json(command): Json<Command>,
) -> Result<Json<PhotoListResponse>> {
    Ok(Json(handle_command(&state.service, command).await?))
}

/// DELETE /photos - Clear the store.
async fn reset_handler(State(state): State<AppState>) -> Result<Json<PhotoListResponse>> {
    Ok(Json(handle_reset(&state.service).await?))
}
