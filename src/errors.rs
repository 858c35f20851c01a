use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::models::CatalogKind;

/// One failed form rule, keyed by the form field name the client uses.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("unknown {} id: {id}", .kind.as_str())]
    UnknownReference { kind: CatalogKind, id: String },

    #[error("submission failed: {0}")]
    Submission(String),

    #[error("a submission is already in progress")]
    AlreadySubmitting,

    #[error("draft has already been submitted")]
    DraftLocked,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            AppError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UnknownReference { .. } => StatusCode::NOT_FOUND,
            AppError::Submission(_) => StatusCode::BAD_GATEWAY,
            AppError::AlreadySubmitting => StatusCode::CONFLICT,
            AppError::DraftLocked => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = match &self {
            AppError::Validation(errors) => {
                serde_json::json!({ "error": self.to_string(), "fields": errors })
            }
            _ => serde_json::json!({ "error": self.to_string() }),
        };
        (status, axum::Json(body)).into_response()
    }
}
