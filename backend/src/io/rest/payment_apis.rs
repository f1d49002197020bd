//! # REST API for Recording Payments

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use tracing::info;

use crate::io::rest::mappers::PaymentMapper;
use crate::io::rest::{domain_error_response, today, ApiJson, OwnerId};
use crate::AppState;
use shared::RecordPaymentRequest;

pub fn router() -> Router<AppState> {
    Router::new().route("/payments", post(record_payment))
}

/// Settle one payment schedule row
pub async fn record_payment(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    ApiJson(request): ApiJson<RecordPaymentRequest>,
) -> impl IntoResponse {
    info!("POST /api/payments - request: {:?}", request);

    let command = PaymentMapper::to_record_command(request);
    match state.payment_service.record_payment(&owner_id, command).await {
        Ok(schedule) => (StatusCode::OK, Json(PaymentMapper::to_record_response_dto(schedule, today()))).into_response(),
        Err(e) => domain_error_response("Failed to record payment", e),
    }
}
