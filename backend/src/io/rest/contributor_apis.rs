//! # REST API for Contributors
//!
//! Enrolling contributors into a project and managing them afterwards.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use tracing::info;

use crate::io::rest::mappers::ContributorMapper;
use crate::io::rest::{domain_error_response, today, ApiJson, OwnerId};
use crate::AppState;
use shared::{AddContributorsRequest, SetContributorStatusRequest, UpdateContributorRequest};

/// Create a router for contributor related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects/:id/contributors", post(add_contributors))
        .route(
            "/contributors/:id",
            get(get_contributor).put(update_contributor).delete(delete_contributor),
        )
        .route("/contributors/:id/status", put(set_contributor_status))
}

/// Add a batch of contributors to a project and generate their schedules
pub async fn add_contributors(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Path(project_id): Path<String>,
    ApiJson(request): ApiJson<AddContributorsRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/projects/{}/contributors - {} contributors",
        project_id,
        request.contributors.len()
    );

    let command = ContributorMapper::to_add_command(project_id, request);
    match state.contributor_service.add_contributors(&owner_id, command).await {
        Ok(result) => (StatusCode::CREATED, Json(ContributorMapper::to_add_response_dto(result))).into_response(),
        Err(e) => domain_error_response("Failed to add contributors", e),
    }
}

/// Get a contributor with their project and payment history
pub async fn get_contributor(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Path(contributor_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/contributors/{}", contributor_id);

    match state
        .contributor_service
        .get_contributor_detail(&owner_id, &contributor_id)
        .await
    {
        Ok(detail) => (StatusCode::OK, Json(ContributorMapper::to_detail_dto(detail, today()))).into_response(),
        Err(e) => domain_error_response("Failed to get contributor", e),
    }
}

/// Update a contributor's details
pub async fn update_contributor(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Path(contributor_id): Path<String>,
    ApiJson(request): ApiJson<UpdateContributorRequest>,
) -> impl IntoResponse {
    info!("PUT /api/contributors/{} - request: {:?}", contributor_id, request);

    let command = ContributorMapper::to_update_command(contributor_id, request);
    match state.contributor_service.update_contributor(&owner_id, command).await {
        Ok(contributor) => (
            StatusCode::OK,
            Json(ContributorMapper::to_contributor_response_dto(
                contributor,
                "Contributor updated successfully",
            )),
        )
            .into_response(),
        Err(e) => domain_error_response("Failed to update contributor", e),
    }
}

/// Activate or deactivate a contributor
pub async fn set_contributor_status(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Path(contributor_id): Path<String>,
    ApiJson(request): ApiJson<SetContributorStatusRequest>,
) -> impl IntoResponse {
    info!("PUT /api/contributors/{}/status - {:?}", contributor_id, request.status);

    let status = ContributorMapper::status_to_domain(request.status);
    match state
        .contributor_service
        .set_contributor_status(&owner_id, &contributor_id, status)
        .await
    {
        Ok(contributor) => (
            StatusCode::OK,
            Json(ContributorMapper::to_contributor_response_dto(
                contributor,
                "Contributor status updated successfully",
            )),
        )
            .into_response(),
        Err(e) => domain_error_response("Failed to set contributor status", e),
    }
}

/// Delete a contributor and their schedule rows
pub async fn delete_contributor(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Path(contributor_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/contributors/{}", contributor_id);

    match state
        .contributor_service
        .delete_contributor(&owner_id, &contributor_id)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response("Failed to delete contributor", e),
    }
}
