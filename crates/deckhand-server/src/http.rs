//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use deckhand_core::{fetch_cards, CardsResponse};

use crate::AppState;

/// Aggregate the four tables into the merged card list.
///
/// Every aggregation failure maps to 500 with the error text as body; the
/// upstream status code is logged, not forwarded.
pub async fn get_cards(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CardsResponse>, (StatusCode, String)> {
    let cards = fetch_cards(state.base.as_ref()).await.map_err(|e| {
        tracing::error!("card aggregation failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    Ok(Json(CardsResponse { cards }))
}

/// Liveness probe; no upstream call.
pub async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
