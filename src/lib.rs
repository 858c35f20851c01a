pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/services", get(handlers::catalog::list_services))
        .route("/api/services/:id", get(handlers::catalog::get_service))
        .route("/api/add-ons", get(handlers::catalog::list_add_ons))
        .route("/api/testimonials", get(handlers::catalog::list_testimonials))
        .route(
            "/api/testimonials/featured",
            get(handlers::catalog::featured_testimonial),
        )
        .route("/api/slots", get(handlers::slots::list_slots))
        .route("/api/quote", post(handlers::quote::quote))
        .route("/api/drafts", post(handlers::drafts::create_draft))
        .route(
            "/api/drafts/:id",
            get(handlers::drafts::get_draft).put(handlers::drafts::update_draft),
        )
        .route("/api/drafts/:id/submit", post(handlers::drafts::submit_draft))
        .route("/api/drafts/:id/reset", post(handlers::drafts::reset_draft))
        .route("/api/inquiries", post(handlers::inquiries::create_inquiry))
        .with_state(state)
}
