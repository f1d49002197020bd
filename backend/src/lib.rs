//! # Contribution Tracker Backend
//!
//! HTTP service for pooled-fund projects: owners create projects, enroll
//! contributors, and the service generates and tracks each contributor's
//! payment schedule.
//!
//! ## Layers
//!
//! - **io**: axum REST handlers and DTO mappers
//! - **domain**: services, the schedule generator and validation
//! - **storage**: SQLite persistence through SQLx

pub mod config;
pub mod domain;
pub mod io;
pub mod logging;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::domain::{ContributorService, InsightsService, PaymentService, ProjectService};
use crate::storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub project_service: ProjectService,
    pub contributor_service: ContributorService,
    pub payment_service: PaymentService,
    pub insights_service: InsightsService,
}

/// Build every service on top of an open database
pub fn initialize_backend(db: DbConnection) -> AppState {
    info!("Setting up domain services");
    let db = Arc::new(db);

    AppState {
        project_service: ProjectService::new(db.clone()),
        contributor_service: ContributorService::new(db.clone()),
        payment_service: PaymentService::new(db.clone()),
        insights_service: InsightsService::new(db),
    }
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, server: &ServerConfig) -> Result<Router> {
    // CORS setup to allow the frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(server.cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Ok(Router::new()
        .nest("/api", io::rest::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn setup_test_router() -> Router {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        create_router(initialize_backend(db), &AppConfig::default().server).expect("Failed to build router")
    }

    async fn send(router: &Router, method: &str, uri: &str, owner: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(owner) = owner {
            builder = builder.header("x-user-id", owner);
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn project_body() -> Value {
        json!({
            "title": "Barkada Fund",
            "description": "Savings for the December trip",
            "targetAmount": 3000.0,
            "defaultContributionAmount": 500.0,
            "paymentDay": 15,
            "paymentFrequency": "MONTHLY",
            "icon": "plane",
            "color": "#1e90ff",
            "startDate": "2025-01-01",
            "endDate": "2025-03-31"
        })
    }

    #[tokio::test]
    async fn test_health() {
        let router = setup_test_router().await;
        let (status, body) = send(&router, "GET", "/api/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_schedule_preview() {
        let router = setup_test_router().await;
        let body = json!({
            "startDate": "2025-01-01",
            "endDate": "2025-01-31",
            "paymentDay": 3,
            "paymentFrequency": "WEEKLY"
        });

        let (status, body) = send(&router, "POST", "/api/schedules/preview", None, Some(body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["paymentDates"],
            json!(["2025-01-01", "2025-01-08", "2025-01-15", "2025-01-22", "2025-01-29"])
        );
    }

    #[tokio::test]
    async fn test_schedule_preview_rejects_invalid_day() {
        let router = setup_test_router().await;
        let body = json!({
            "startDate": "2025-01-01",
            "endDate": "2025-06-30",
            "paymentDay": 32,
            "paymentFrequency": "MONTHLY"
        });

        let (status, body) = send(&router, "POST", "/api/schedules/preview", None, Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("Invalid payment day 32"));
    }

    #[tokio::test]
    async fn test_unknown_frequency_is_bad_request() {
        let router = setup_test_router().await;
        let preview = json!({
            "startDate": "2025-01-01",
            "endDate": "2025-06-30",
            "paymentDay": 3,
            "paymentFrequency": "BIWEEKLY"
        });

        let (status, body) = send(&router, "POST", "/api/schedules/preview", None, Some(preview)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("BIWEEKLY"));

        let mut project = project_body();
        project["paymentFrequency"] = json!("BIWEEKLY");
        let (status, body) = send(&router, "POST", "/api/projects", Some("user-1"), Some(project)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let mut project = project_body();
        project["paymentDay"] = json!(-1);
        let (status, body) = send(&router, "POST", "/api/projects", Some("user-1"), Some(project)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_overview_query_is_bad_request() {
        let router = setup_test_router().await;
        let (_, body) = send(&router, "POST", "/api/projects", Some("user-1"), Some(project_body())).await;
        let project_id = body["project"]["id"].as_str().unwrap().to_string();

        let uri = format!("/api/projects/{}/overview?date=not-a-date", project_id);
        let (status, body) = send(&router, "GET", &uri, Some("user-1"), None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_schedule_preview_rejects_long_span() {
        let router = setup_test_router().await;
        let body = json!({
            "startDate": "2025-01-01",
            "endDate": "2099-12-31",
            "paymentDay": 3,
            "paymentFrequency": "WEEKLY"
        });

        let (status, body) = send(&router, "POST", "/api/schedules/preview", None, Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid endDate: Schedule must not span more than 10 years.");
    }

    #[tokio::test]
    async fn test_projects_require_owner_header() {
        let router = setup_test_router().await;
        let (status, body) = send(&router, "GET", "/api/projects", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_project_lifecycle() {
        let router = setup_test_router().await;

        let (status, body) = send(&router, "POST", "/api/projects", Some("user-1"), Some(project_body())).await;
        assert_eq!(status, StatusCode::CREATED);
        let project_id = body["project"]["id"].as_str().unwrap().to_string();

        let contributors = json!({
            "contributors": [
                { "name": "Ana", "contributionAmount": 500.0 },
                { "name": "Ben", "contributionAmount": 250.0, "email": "ben@example.com" }
            ]
        });
        let uri = format!("/api/projects/{}/contributors", project_id);
        let (status, body) = send(&router, "POST", &uri, Some("user-1"), Some(contributors)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["contributorsCreated"], 2);
        assert_eq!(body["schedulesCreated"], 6);

        let uri = format!("/api/projects/{}/overview?sort=paidBy&order=desc", project_id);
        let (status, body) = send(&router, "GET", &uri, Some("user-1"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["selectedDate"], "2025-01-15");
        assert_eq!(body["paymentDateOptions"].as_array().unwrap().len(), 3);
        let rows = body["paymentSchedules"].as_array().unwrap();
        assert_eq!(rows[0]["contributorName"], "Ben");
        assert_eq!(rows[0]["paymentMethod"], "UNPAID");
        let schedule_id = rows[0]["id"].as_str().unwrap().to_string();

        let payment = json!({
            "scheduleId": schedule_id,
            "actualAmountPaid": 250.0,
            "paymentDate": "2025-01-14",
            "paymentMethod": "BANK_TRANSFER"
        });
        let (status, body) = send(&router, "POST", "/api/payments", Some("user-1"), Some(payment)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["payment"]["paymentMethod"], "BANK_TRANSFER");
        assert_eq!(body["payment"]["isOverdue"], false);

        let (status, body) = send(&router, "GET", "/api/projects", Some("user-1"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["projects"][0]["totalAmountPaid"], 250.0);
        assert_eq!(body["projects"][0]["title"], "Barkada Fund");

        let uri = format!("/api/projects/{}", project_id);
        let (status, _) = send(&router, "GET", &uri, Some("user-2"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&router, "DELETE", &uri, Some("user-1"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&router, "GET", &uri, Some("user-1"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_validation_errors_are_bad_requests() {
        let router = setup_test_router().await;
        let mut body = project_body();
        body["color"] = json!("blue");

        let (status, body) = send(&router, "POST", "/api/projects", Some("user-1"), Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid color: Provide a valid color");
    }

    #[tokio::test]
    async fn test_contributor_endpoints() {
        let router = setup_test_router().await;
        let (_, body) = send(&router, "POST", "/api/projects", Some("user-1"), Some(project_body())).await;
        let project_id = body["project"]["id"].as_str().unwrap().to_string();

        let uri = format!("/api/projects/{}/contributors", project_id);
        let duplicate = json!({
            "contributors": [
                { "name": "Ana", "contributionAmount": 500.0 },
                { "name": "ana", "contributionAmount": 500.0 }
            ]
        });
        let (status, _) = send(&router, "POST", &uri, Some("user-1"), Some(duplicate)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let single = json!({ "contributors": [{ "name": "Ana", "contributionAmount": 500.0 }] });
        send(&router, "POST", &uri, Some("user-1"), Some(single)).await;
        let overview_uri = format!("/api/projects/{}/overview", project_id);
        let (_, overview) = send(&router, "GET", &overview_uri, Some("user-1"), None).await;
        let contributor_id = overview["contributors"][0]["id"].as_str().unwrap().to_string();

        let uri = format!("/api/contributors/{}/status", contributor_id);
        let (status, body) = send(&router, "PUT", &uri, Some("user-1"), Some(json!({ "status": "INACTIVE" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["contributor"]["status"], "INACTIVE");

        let uri = format!("/api/contributors/{}", contributor_id);
        let (status, body) = send(&router, "GET", &uri, Some("user-1"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["project"]["title"], "Barkada Fund");
        assert_eq!(body["paymentSchedules"].as_array().unwrap().len(), 3);

        let (status, _) = send(&router, "DELETE", &uri, Some("user-1"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&router, "GET", &uri, Some("user-1"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
