//! # REST API for Project Management
//!
//! Endpoints for creating, listing, updating and deleting projects.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::info;

use crate::io::rest::mappers::ProjectMapper;
use crate::io::rest::{domain_error_response, ApiJson, OwnerId};
use crate::AppState;
use shared::{CreateProjectRequest, UpdateProjectRequest};

/// Create a router for project related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route(
            "/projects/:id",
            get(get_project).put(update_project).delete(delete_project),
        )
}

/// List the caller's projects with their progress
pub async fn list_projects(State(state): State<AppState>, OwnerId(owner_id): OwnerId) -> impl IntoResponse {
    info!("GET /api/projects - owner: {}", owner_id);

    match state.project_service.list_projects(&owner_id).await {
        Ok(projects) => (StatusCode::OK, Json(ProjectMapper::to_project_list_dto(projects))).into_response(),
        Err(e) => domain_error_response("Failed to list projects", e),
    }
}

/// Create a new project
pub async fn create_project(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    ApiJson(request): ApiJson<CreateProjectRequest>,
) -> impl IntoResponse {
    info!("POST /api/projects - request: {:?}", request);

    let command = ProjectMapper::to_create_command(request);
    match state.project_service.create_project(&owner_id, command).await {
        Ok(project) => (
            StatusCode::CREATED,
            Json(ProjectMapper::to_project_response_dto(project, "Project created successfully")),
        )
            .into_response(),
        Err(e) => domain_error_response("Failed to create project", e),
    }
}

/// Get a project by ID
pub async fn get_project(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Path(project_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/projects/{}", project_id);

    match state.project_service.get_project(&owner_id, &project_id).await {
        Ok(project) => (StatusCode::OK, Json(ProjectMapper::to_dto(project))).into_response(),
        Err(e) => domain_error_response("Failed to get project", e),
    }
}

/// Update the descriptive fields of a project
pub async fn update_project(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Path(project_id): Path<String>,
    ApiJson(request): ApiJson<UpdateProjectRequest>,
) -> impl IntoResponse {
    info!("PUT /api/projects/{} - request: {:?}", project_id, request);

    let command = ProjectMapper::to_update_command(request);
    match state
        .project_service
        .update_project(&owner_id, &project_id, command)
        .await
    {
        Ok(project) => (
            StatusCode::OK,
            Json(ProjectMapper::to_project_response_dto(project, "Project updated successfully")),
        )
            .into_response(),
        Err(e) => domain_error_response("Failed to update project", e),
    }
}

/// Delete a project with its contributors and schedules
pub async fn delete_project(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Path(project_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/projects/{}", project_id);

    match state.project_service.delete_project(&owner_id, &project_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response("Failed to delete project", e),
    }
}
