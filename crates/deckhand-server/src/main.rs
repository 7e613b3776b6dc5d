//! Deckhand Server Binary
//!
//! Standalone server for the card aggregation API.

use std::sync::Arc;

use deckhand_core::{BaseClient, Config};
use deckhand_server::{serve, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let state = Arc::new(AppState::new(BaseClient::new(&config)));
    let addr = std::env::var("DECKHAND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

    serve(&addr, state).await
}
