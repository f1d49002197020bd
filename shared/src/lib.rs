use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How often a contributor is expected to pay into a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentFrequency {
    OneTime,
    Weekly,
    Monthly,
    Quarterly,
}

/// How a scheduled payment was settled. `Unpaid` marks an open obligation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Unpaid,
    Cash,
    BankTransfer,
    Gcash,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentMethod::Unpaid => "Unpaid",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::BankTransfer => "Bank",
            PaymentMethod::Gcash => "GCash",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContributorStatus {
    Active,
    Inactive,
}

/// Sort direction used by the overview listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub description: String,
    pub target_amount: f64,
    pub default_contribution_amount: f64,
    pub payment_day: u32,
    pub payment_frequency: PaymentFrequency,
    pub icon: String,
    pub color: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// RFC 3339 timestamp
    pub created_at: String,
    /// RFC 3339 timestamp
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: String,
    pub target_amount: f64,
    pub default_contribution_amount: f64,
    pub payment_day: u32,
    pub payment_frequency: PaymentFrequency,
    pub icon: String,
    pub color: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Schedule-defining fields (dates, day, frequency) cannot be edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub title: String,
    pub description: String,
    pub target_amount: f64,
    pub default_contribution_amount: f64,
    pub icon: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub project: Project,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    #[serde(flatten)]
    pub project: Project,
    pub total_amount_paid: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectListResponse {
    pub projects: Vec<ProjectSummary>,
}

// ---------------------------------------------------------------------------
// Contributors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributor {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub contribution_amount: f64,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub status: ContributorStatus,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributorInput {
    pub name: String,
    pub contribution_amount: f64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddContributorsRequest {
    pub contributors: Vec<ContributorInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddContributorsResponse {
    pub success: bool,
    pub contributors_created: usize,
    pub schedules_created: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContributorRequest {
    pub name: String,
    pub contribution_amount: f64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetContributorStatusRequest {
    pub status: ContributorStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributorResponse {
    pub contributor: Contributor,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributorDetailResponse {
    pub contributor: Contributor,
    pub project: ProjectRef,
    pub payment_schedules: Vec<PaymentSchedule>,
    pub total_paid: f64,
    pub last_payment_date: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// Payment schedules
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSchedule {
    pub id: String,
    pub project_id: String,
    pub contributor_id: String,
    pub scheduled_payment_date: NaiveDate,
    pub amount_to_pay: f64,
    pub payment_method: PaymentMethod,
    pub actual_amount_paid: f64,
    pub payment_date: Option<NaiveDate>,
    pub proof_of_payment: Option<String>,
    pub note: Option<String>,
    pub is_overdue: bool,
}

/// A schedule row joined with the name of the contributor who owes it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPayment {
    #[serde(flatten)]
    pub schedule: PaymentSchedule,
    pub contributor_name: String,
    pub contribution_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentRequest {
    pub schedule_id: String,
    pub actual_amount_paid: f64,
    pub payment_date: NaiveDate,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub proof_of_payment: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentResponse {
    pub payment: PaymentSchedule,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePreviewRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub payment_day: u32,
    pub payment_frequency: PaymentFrequency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePreviewResponse {
    pub payment_dates: Vec<NaiveDate>,
}

// ---------------------------------------------------------------------------
// Insights
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectOverviewQuery {
    /// Case-insensitive contributor name search
    pub c: Option<String>,
    /// Selected scheduled payment date; defaults to the earliest one
    pub date: Option<NaiveDate>,
    /// Payment method filter for the schedule listing
    pub status: Option<PaymentMethod>,
    pub sort: Option<String>,
    pub order: Option<SortOrder>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickStatistics {
    pub total_raised: f64,
    pub target_amount: f64,
    pub contributions_this_period: f64,
    pub paid_contributors_count: usize,
    pub contributors_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopContributor {
    pub id: String,
    pub name: String,
    pub total_paid: f64,
    pub contribution_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOverviewResponse {
    pub project: Project,
    pub selected_date: Option<NaiveDate>,
    pub payment_date_options: Vec<NaiveDate>,
    pub payment_schedules: Vec<ScheduledPayment>,
    pub contributors: Vec<Contributor>,
    pub quick_statistics: QuickStatistics,
    pub top_contributors: Vec<TopContributor>,
    pub pending_payments: Vec<ScheduledPayment>,
    pub recent_payments: Vec<ScheduledPayment>,
}

/// Body returned alongside every non-2xx response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
