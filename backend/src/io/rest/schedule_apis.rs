//! # REST API for Schedule Previews and Health

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tracing::info;

use crate::domain::schedule::generate_payment_dates;
use crate::domain::validation::validate_schedule_span;
use crate::domain::DomainError;
use crate::io::rest::{domain_error_response, ApiJson};
use crate::io::rest::mappers::ProjectMapper;
use crate::AppState;
use shared::{SchedulePreviewRequest, SchedulePreviewResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/schedules/preview", post(preview_schedule))
        .route("/health", get(health))
}

/// Run the schedule generator without storing anything
pub async fn preview_schedule(ApiJson(request): ApiJson<SchedulePreviewRequest>) -> impl IntoResponse {
    info!("POST /api/schedules/preview - request: {:?}", request);

    if let Err(e) = validate_schedule_span(request.start_date, request.end_date) {
        return domain_error_response("Failed to preview schedule", DomainError::from(e));
    }

    let frequency = ProjectMapper::frequency_to_domain(request.payment_frequency);
    match generate_payment_dates(request.start_date, request.end_date, request.payment_day, frequency) {
        Ok(payment_dates) => (StatusCode::OK, Json(SchedulePreviewResponse { payment_dates })).into_response(),
        Err(e) => domain_error_response("Failed to preview schedule", DomainError::from(e)),
    }
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}
