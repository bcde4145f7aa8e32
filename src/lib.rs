//! Coffeeshop API - A small HTTP API for a coffee product catalog
//!
//! This library provides the coffee entity, the Postgres data-access layer, the
//! JSON transport helpers and the axum router that ties them together.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use db::{CoffeeStore, PgCoffeeStore, StoreError};
pub use models::{Coffee, JsonResponse};
pub use state::AppState;
pub use utils::signals::shutdown_signal;
