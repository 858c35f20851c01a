use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::errors::AppError;
use crate::models::{Inquiry, InquiryDraft};
use crate::services::inquiry::submit_inquiry;
use crate::state::AppState;

// POST /api/inquiries
pub async fn create_inquiry(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<InquiryDraft>,
) -> Result<(StatusCode, Json<Inquiry>), AppError> {
    let inquiry = submit_inquiry(draft, state.submitter.as_ref(), state.config.submit_timeout).await?;
    Ok((StatusCode::CREATED, Json(inquiry)))
}
