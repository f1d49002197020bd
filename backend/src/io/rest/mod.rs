//! # REST API Interface Layer
//!
//! HTTP endpoints for projects, contributors, payments and schedule previews.
//! This layer handles:
//! - JSON request/response serialization
//! - Caller identity from the `x-user-id` header
//! - Error translation from domain errors to HTTP status codes
//!
//! Each `*_apis` module exposes a `router()` that `create_router` merges under
//! `/api`.

pub mod contributor_apis;
pub mod insights_apis;
pub mod mappers;
pub mod payment_apis;
pub mod project_apis;
pub mod schedule_apis;

use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts,
    },
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Json, Response},
    Router,
};
use chrono::{NaiveDate, Utc};
use tracing::{error, warn};

use crate::domain::DomainError;
use crate::AppState;
use shared::ErrorResponse;

/// Header carrying the authenticated user id, set by the upstream auth proxy
pub const OWNER_HEADER: &str = "x-user-id";

/// All API routes, relative to `/api`
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(project_apis::router())
        .merge(contributor_apis::router())
        .merge(insights_apis::router())
        .merge(payment_apis::router())
        .merge(schedule_apis::router())
}

/// Identity of the caller, taken from the `x-user-id` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for OwnerId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let owner = parts
            .headers
            .get(OWNER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty());

        match owner {
            Some(owner) => Ok(OwnerId(owner.to_string())),
            None => {
                warn!("Rejected request to {} without {} header", parts.uri.path(), OWNER_HEADER);
                Err(error_body(StatusCode::UNAUTHORIZED, "Session not found"))
            }
        }
    }
}

/// JSON request body; malformed bodies answer 400 with an error body
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(InputRejection))]
pub struct ApiJson<T>(pub T);

/// Query string; malformed parameters answer 400 with an error body
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(InputRejection))]
pub struct ApiQuery<T>(pub T);

/// A request body or query string that could not be deserialized
#[derive(Debug)]
pub struct InputRejection {
    message: String,
}

impl From<JsonRejection> for InputRejection {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for InputRejection {
    fn from(rejection: QueryRejection) -> Self {
        Self {
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for InputRejection {
    fn into_response(self) -> Response {
        warn!("Rejected malformed request: {}", self.message);
        error_body(StatusCode::BAD_REQUEST, self.message)
    }
}

pub(crate) fn error_body(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Translate a domain error into a status code and JSON error body
pub(crate) fn domain_error_response(context: &str, err: DomainError) -> Response {
    match err {
        DomainError::NotFound { .. } => {
            warn!("{}: {}", context, err);
            error_body(StatusCode::NOT_FOUND, err.to_string())
        }
        DomainError::Validation(_) | DomainError::Schedule(_) => {
            warn!("{}: {}", context, err);
            error_body(StatusCode::BAD_REQUEST, err.to_string())
        }
        DomainError::Storage(_) => {
            error!("{}: {:?}", context, err);
            error_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

/// The date overdue flags are computed against
pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}
