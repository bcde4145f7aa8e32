//! Coffeeshop API - HTTP API for a coffee product catalog
//!
//! This is the main entry point for the coffeeshop-api server.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use coffeeshop_api::{
    api::create_router,
    config::Config,
    db::{self, PgCoffeeStore},
    state::AppState,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine, the environment may already be populated
    dotenvy::dotenv().ok();
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "coffeeshop_api={},tower_http=info",
            config.log_level()
        ))
        .init();

    info!("Starting coffeeshop-api v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, db_timeout={}s, max_open_conns={}",
        config.host, config.port, config.db_timeout, config.max_open_conns
    );

    let pool = db::connect(&config.database())
        .await
        .context("failed to connect to the database")?;
    if config.migrate {
        db::run_migrations(&pool)
            .await
            .context("failed to apply database migrations")?;
    }

    let store = PgCoffeeStore::new(pool.clone(), config.db_timeout());
    let state = Arc::new(AppState::new(Arc::new(store)));
    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /coffees        - List all coffees");
    info!("  POST /coffees/coffee - Create a coffee");
    info!("  GET  /coffees/:id    - Fetch a coffee");
    info!("  GET  /health         - Health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}
