use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::quote::format_price;
use crate::models::{Booking, BookingDraft, Quote};
use crate::services::quote::compute_total;
use crate::services::session::{BookingSession, FormState};
use crate::services::validation::ValidationContext;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftView {
    id: String,
    state: &'static str,
    draft: BookingDraft,
    /// Display-only; recomputed from the catalog on every read.
    quote: Option<Quote>,
    total: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    booking: Option<Booking>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl DraftView {
    fn build(state: &AppState, session: &BookingSession) -> Self {
        let draft = session.draft();
        let form = session.state();
        let quote = if draft.service_id.is_empty() {
            None
        } else {
            compute_total(&state.catalog, &draft.service_id, &draft.add_on_ids).ok()
        };
        let (booking, message) = match &form {
            FormState::Submitted { booking } => (Some(booking.clone()), None),
            FormState::Failed { message } => (None, Some(message.clone())),
            FormState::Editing | FormState::Submitting => (None, None),
        };

        Self {
            id: session.id().to_string(),
            state: form.as_str(),
            total: quote.as_ref().map(|q| format_price(q.price_cents)),
            quote,
            draft,
            booking,
            message,
        }
    }
}

// POST /api/drafts
#[derive(Deserialize)]
pub struct CreateDraftQuery {
    pub service: Option<String>,
}

pub async fn create_draft(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CreateDraftQuery>,
) -> (StatusCode, Json<DraftView>) {
    // an unknown preselection is simply ignored, like a stale link
    let initial = query
        .service
        .filter(|id| state.catalog.get_service(id).is_ok());
    let session = state.create_session(initial);
    tracing::debug!(draft = session.id(), "created booking draft");
    (StatusCode::CREATED, Json(DraftView::build(&state, &session)))
}

// GET /api/drafts/:id
pub async fn get_draft(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DraftView>, AppError> {
    let session = state.session(&id)?;
    Ok(Json(DraftView::build(&state, &session)))
}

// PUT /api/drafts/:id
pub async fn update_draft(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(draft): Json<BookingDraft>,
) -> Result<Json<DraftView>, AppError> {
    let session = state.session(&id)?;
    session.update(draft)?;
    Ok(Json(DraftView::build(&state, &session)))
}

// POST /api/drafts/:id/submit
pub async fn submit_draft(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DraftView>, AppError> {
    let session = state.session(&id)?;
    let calendar = state.calendar();
    let ctx = ValidationContext {
        catalog: &state.catalog,
        slots: &calendar.slots,
        closed_weekday: calendar.closed_weekday,
        today: calendar.today,
    };

    session
        .submit(&ctx, state.submitter.as_ref(), state.config.submit_timeout)
        .await?;

    Ok(Json(DraftView::build(&state, &session)))
}

// POST /api/drafts/:id/reset
pub async fn reset_draft(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DraftView>, AppError> {
    let session = state.session(&id)?;
    session.reset()?;
    Ok(Json(DraftView::build(&state, &session)))
}
