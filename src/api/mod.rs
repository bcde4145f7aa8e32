//! HTTP API module
//!
//! This module contains the endpoint handlers, the JSON transport helpers and the
//! response structures.

pub mod handlers;
pub mod json;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/coffees", get(list_coffees_handler))
        .route("/coffees/coffee", post(create_coffee_handler))
        .route("/coffees/:id", get(get_coffee_handler))
        .route("/health", get(health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
