//! # REST API for Project Insights

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::info;

use crate::io::rest::mappers::InsightsMapper;
use crate::io::rest::{domain_error_response, today, ApiQuery, OwnerId};
use crate::AppState;
use shared::ProjectOverviewQuery;

pub fn router() -> Router<AppState> {
    Router::new().route("/projects/:id/overview", get(get_project_overview))
}

/// Payment table, contributors and statistics for one project
pub async fn get_project_overview(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Path(project_id): Path<String>,
    ApiQuery(query): ApiQuery<ProjectOverviewQuery>,
) -> impl IntoResponse {
    info!("GET /api/projects/{}/overview - query: {:?}", project_id, query);

    let query = InsightsMapper::to_query(query);
    match state
        .insights_service
        .project_overview(&owner_id, &project_id, query)
        .await
    {
        Ok(overview) => (StatusCode::OK, Json(InsightsMapper::to_overview_dto(overview, today()))).into_response(),
        Err(e) => domain_error_response("Failed to build project overview", e),
    }
}
