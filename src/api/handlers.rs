//! HTTP endpoint handlers
//!
//! Every failure is logged once where it becomes an `ApiError` and answered with
//! the error envelope; no handler returns partial data.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use tracing::{error, info};

use super::{
    json::{encode_response, ApiError, JsonBody},
    responses::{CoffeesResponse, HealthResponse},
};
use crate::{models::Coffee, state::AppState};

/// Handle GET /coffees - List every coffee, in no guaranteed order
pub async fn list_coffees_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let coffees = state.store.list_all().await.map_err(|e| {
        error!("Failed to list coffees: {}", e);
        ApiError::internal()
    })?;

    info!("Listed {} coffees", coffees.len());
    Ok(encode_response(
        StatusCode::OK,
        &CoffeesResponse { coffees },
        None,
    )?)
}

/// Handle GET /coffees/:id - Fetch a single coffee
pub async fn get_coffee_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let coffee = state.store.get_by_id(&id).await.map_err(|e| {
        error!("Failed to fetch coffee {}: {}", id, e);
        ApiError::internal()
    })?;

    match coffee {
        Some(coffee) => Ok(encode_response(StatusCode::OK, &coffee, None)?),
        None => Err(ApiError::not_found(format!("coffee {} not found", id))),
    }
}

/// Handle POST /coffees/coffee - Create a coffee from the request body
pub async fn create_coffee_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(candidate): JsonBody<Coffee>,
) -> Result<Response, ApiError> {
    let created = state.store.create(candidate).await.map_err(|e| {
        error!("Failed to create coffee: {}", e);
        ApiError::internal()
    })?;

    info!("Created coffee {} ({})", created.id, created.name);
    Ok(encode_response(StatusCode::OK, &created, None)?)
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    Ok(encode_response(
        StatusCode::OK,
        &HealthResponse::ok(state.get_uptime()),
        None,
    )?)
}
