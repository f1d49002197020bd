// Repository modules
pub mod contributor_repository;
pub mod payment_schedule_repository;
pub mod project_repository;

use anyhow::Result;
use chrono::{DateTime, Utc};

// Re-export repository types
pub use contributor_repository::ContributorRepository;
pub use payment_schedule_repository::PaymentScheduleRepository;
pub use project_repository::ProjectRepository;

/// Timestamps are stored as RFC 3339 text
pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc))
}
