//! Deckhand Server - Card Aggregation API
//!
//! HTTP server exposing the merged card list for the deckhand client.

pub mod http;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use deckhand_core::TableReader;

/// Shared application state
///
/// Holds the base handle behind the [`TableReader`] seam so tests can run
/// the router against an in-memory base.
pub struct AppState {
    pub base: Box<dyn TableReader>,
}

impl AppState {
    pub fn new(base: impl TableReader + 'static) -> Self {
        Self {
            base: Box::new(base),
        }
    }
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/cards", get(http::get_cards))
        .route("/healthz", get(http::healthz))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the server
pub async fn serve(addr: &str, state: Arc<AppState>) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Deckhand server listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
