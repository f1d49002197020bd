//! Domain-level command and query types.
//!
//! Services take these instead of the public DTOs from the `shared` crate; the
//! REST layer maps one into the other.

pub mod project {
    use chrono::NaiveDate;

    use crate::domain::models::{PaymentFrequency, Project};

    #[derive(Debug, Clone)]
    pub struct CreateProjectCommand {
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

    /// Only the descriptive fields; the schedule-defining ones are fixed at
    /// creation.
    #[derive(Debug, Clone)]
    pub struct UpdateProjectCommand {
        pub title: String,
        pub description: String,
        pub target_amount: f64,
        pub default_contribution_amount: f64,
        pub icon: String,
        pub color: String,
    }

    /// A project with its progress towards the target
    #[derive(Debug, Clone)]
    pub struct ProjectProgress {
        pub project: Project,
        pub total_amount_paid: f64,
        pub percentage: f64,
    }
}

pub mod contributor {
    use chrono::NaiveDate;

    use crate::domain::models::{Contributor, PaymentSchedule};

    #[derive(Debug, Clone)]
    pub struct ContributorInput {
        pub name: String,
        pub contribution_amount: f64,
        pub email: Option<String>,
        pub phone_number: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct AddContributorsCommand {
        pub project_id: String,
        pub contributors: Vec<ContributorInput>,
    }

    #[derive(Debug, Clone)]
    pub struct AddContributorsResult {
        pub contributors: Vec<Contributor>,
        pub schedules_created: usize,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateContributorCommand {
        pub contributor_id: String,
        pub details: ContributorInput,
    }

    #[derive(Debug, Clone)]
    pub struct ContributorDetail {
        pub contributor: Contributor,
        pub project_id: String,
        pub project_title: String,
        /// Ordered by scheduled payment date, earliest first
        pub payment_schedules: Vec<PaymentSchedule>,
        pub total_paid: f64,
        pub last_payment_date: Option<NaiveDate>,
    }
}

pub mod payment {
    use chrono::NaiveDate;

    use crate::domain::models::PaymentMethod;

    #[derive(Debug, Clone)]
    pub struct RecordPaymentCommand {
        pub schedule_id: String,
        pub actual_amount_paid: f64,
        pub payment_date: NaiveDate,
        pub payment_method: PaymentMethod,
        pub proof_of_payment: Option<String>,
        pub note: Option<String>,
    }
}

pub mod insights {
    use chrono::NaiveDate;

    use crate::domain::models::{Contributor, PaymentMethod, Project, ScheduleWithContributor};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum SortOrder {
        #[default]
        Asc,
        Desc,
    }

    #[derive(Debug, Clone, Default)]
    pub struct ProjectOverviewQuery {
        pub name_search: Option<String>,
        pub date: Option<NaiveDate>,
        pub status: Option<PaymentMethod>,
        pub sort: Option<String>,
        pub order: Option<SortOrder>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct QuickStatistics {
        pub total_raised: f64,
        pub target_amount: f64,
        pub contributions_this_period: f64,
        pub paid_contributors_count: usize,
        pub contributors_count: usize,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct TopContributor {
        pub contributor_id: String,
        pub name: String,
        pub total_paid: f64,
        pub contribution_amount: f64,
    }

    #[derive(Debug, Clone)]
    pub struct ProjectOverview {
        pub project: Project,
        pub selected_date: Option<NaiveDate>,
        pub payment_date_options: Vec<NaiveDate>,
        pub payment_schedules: Vec<ScheduleWithContributor>,
        pub contributors: Vec<Contributor>,
        pub quick_statistics: QuickStatistics,
        pub top_contributors: Vec<TopContributor>,
        pub pending_payments: Vec<ScheduleWithContributor>,
        pub recent_payments: Vec<ScheduleWithContributor>,
    }
}
