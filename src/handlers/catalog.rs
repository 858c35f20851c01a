use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{AddOn, ServicePackage, Testimonial};
use crate::services::carousel::{average_rating, Carousel};
use crate::state::AppState;

// GET /api/services
pub async fn list_services(State(state): State<Arc<AppState>>) -> Json<Vec<ServicePackage>> {
    Json(state.catalog.services().to_vec())
}

// GET /api/services/:id
pub async fn get_service(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ServicePackage>, AppError> {
    state
        .catalog
        .get_service(&id)
        .cloned()
        .map(Json)
        .map_err(|_| AppError::NotFound(format!("service {id}")))
}

// GET /api/add-ons
pub async fn list_add_ons(State(state): State<Arc<AppState>>) -> Json<Vec<AddOn>> {
    Json(state.catalog.add_ons().to_vec())
}

// GET /api/testimonials
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialsResponse {
    testimonials: Vec<Testimonial>,
    average_rating: Option<f64>,
}

pub async fn list_testimonials(State(state): State<Arc<AppState>>) -> Json<TestimonialsResponse> {
    let testimonials = state.catalog.testimonials();
    Json(TestimonialsResponse {
        testimonials: testimonials.to_vec(),
        average_rating: average_rating(testimonials),
    })
}

// GET /api/testimonials/featured
#[derive(Deserialize)]
pub struct FeaturedQuery {
    pub index: Option<usize>,
    pub step: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedResponse {
    index: usize,
    auto_playing: bool,
    testimonial: Testimonial,
}

pub async fn featured_testimonial(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FeaturedQuery>,
) -> Result<Json<FeaturedResponse>, AppError> {
    let testimonials = state.catalog.testimonials();
    let mut carousel = Carousel::new(testimonials.len());
    let elapsed = state.started_at.elapsed();
    let interval = Duration::from_secs(state.config.testimonial_rotation_secs);

    let step: Option<fn(&mut Carousel)> = match query.step.as_deref() {
        None => None,
        Some("next") => Some(Carousel::next),
        Some("previous") | Some("prev") => Some(Carousel::previous),
        Some(other) => {
            return Err(AppError::BadRequest(format!(
                "unknown carousel step {other:?}, expected next or previous"
            )));
        }
    };

    // Stepping without an index steps from the slide currently auto-playing.
    if query.index.is_some() || step.is_some() {
        let start = match query.index {
            Some(index) => index,
            None => carousel.position_at(elapsed, interval),
        };
        carousel.go_to(start)?;
    }
    if let Some(step) = step {
        step(&mut carousel);
    }

    let index = carousel.position_at(elapsed, interval);
    let testimonial = testimonials
        .get(index)
        .cloned()
        .ok_or_else(|| AppError::NotFound("testimonials".to_string()))?;

    Ok(Json(FeaturedResponse {
        index,
        auto_playing: carousel.auto_playing(),
        testimonial,
    }))
}
