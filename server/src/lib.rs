//! GridMuse Server - photo collection service.
//!
//! Keeps a user-controlled order over the photos found on the device,
//! appends the photos of a remote account and serves the result over HTTP.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod ordering;
pub mod routes;
pub mod service;
pub mod source;
pub mod store;

use crate::service::CollectionService;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CollectionService>,
}

/// Build the router with its middleware.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::create_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
