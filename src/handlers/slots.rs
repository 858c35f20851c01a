use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::TimeSlot;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SlotsQuery {
    pub date: Option<NaiveDate>,
    pub available: Option<bool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotsResponse {
    today: NaiveDate,
    closed_weekday: String,
    slots: Vec<TimeSlot>,
}

// GET /api/slots
pub async fn list_slots(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SlotsQuery>,
) -> Json<SlotsResponse> {
    let calendar = state.calendar();

    let slots = calendar
        .slots
        .into_iter()
        .filter(|s| query.date.map_or(true, |d| s.date == d))
        .filter(|s| query.available.map_or(true, |a| s.available == a))
        .collect();

    Json(SlotsResponse {
        today: calendar.today,
        closed_weekday: calendar.closed_weekday.to_string(),
        slots,
    })
}
