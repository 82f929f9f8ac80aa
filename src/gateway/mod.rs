//! HTTP Gateway
//!
//! Exposes the economy API over HTTP. This is the service boundary an
//! integration (a game-server plugin, a web shop) calls; all real logic
//! lives behind the injected [`EconomyProvider`](crate::ledger::EconomyProvider).

pub mod handlers;
pub mod state;
pub mod types;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;

pub use state::AppState;

/// Build the economy API router
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/economy/deposit", post(handlers::deposit))
        .route(
            "/api/v1/economy/balance/{account_id}",
            get(handlers::get_balance),
        )
        .route(
            "/api/v1/economy/sufficiency/{account_id}",
            get(handlers::check_sufficiency),
        )
        .route("/api/v1/economy/transfer", post(handlers::transfer))
        .route("/health", get(handlers::health))
        .with_state(state)
}

/// Bind and serve the gateway until the process exits
pub async fn serve(state: Arc<AppState>, host: &str, port: u16) -> anyhow::Result<()> {
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Economy gateway listening");

    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
