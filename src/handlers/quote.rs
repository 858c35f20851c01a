use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::quote::format_price;
use crate::models::Quote;
use crate::services::quote::compute_total;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub service_id: String,
    #[serde(default)]
    pub add_on_ids: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    #[serde(flatten)]
    quote: Quote,
    total: String,
}

// POST /api/quote
pub async fn quote(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, AppError> {
    let quote = compute_total(&state.catalog, &req.service_id, &req.add_on_ids).map_err(|e| {
        tracing::warn!(error = %e, "quote requested for an id missing from the catalog");
        e
    })?;

    Ok(Json(QuoteResponse {
        total: format_price(quote.price_cents),
        quote,
    }))
}
