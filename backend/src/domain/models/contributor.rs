//! Domain model for a contributor enrolled in a project.

use chrono::{DateTime, Utc};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContributorStatus {
    Active,
    Inactive,
}

impl ContributorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContributorStatus::Active => "ACTIVE",
            ContributorStatus::Inactive => "INACTIVE",
        }
    }
}

impl FromStr for ContributorStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(ContributorStatus::Active),
            "INACTIVE" => Ok(ContributorStatus::Inactive),
            other => Err(anyhow::anyhow!("Unknown contributor status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Contributor {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub contribution_amount: f64,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub status: ContributorStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contributor {
    pub fn generate_id() -> String {
        format!("contributor::{}", uuid::Uuid::new_v4())
    }
}
