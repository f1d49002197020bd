//! Per-project overview: the payment table for one due date, the contributor
//! list, and the summary figures shown next to them.
//!
//! Storage hands back every schedule row of the project; the filtering,
//! sorting and aggregation below are plain functions over those rows.

use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::domain::commands::insights::{
    ProjectOverview, ProjectOverviewQuery, QuickStatistics, SortOrder, TopContributor,
};
use crate::domain::errors::DomainResult;
use crate::domain::models::{Contributor, Project, ScheduleWithContributor};
use crate::domain::project_service::owned_project;
use crate::storage::{ContributorRepository, DbConnection, PaymentScheduleRepository, ProjectRepository};

/// Number of rows in the pending and recent payment lists
pub const HIGHLIGHT_LIMIT: usize = 5;

/// Service for the read-only project overview
#[derive(Clone)]
pub struct InsightsService {
    projects: ProjectRepository,
    contributors: ContributorRepository,
    schedules: PaymentScheduleRepository,
}

impl InsightsService {
    pub fn new(db: Arc<DbConnection>) -> Self {
        let db = db.as_ref().clone();
        Self {
            projects: ProjectRepository::new(db.clone()),
            contributors: ContributorRepository::new(db.clone()),
            schedules: PaymentScheduleRepository::new(db),
        }
    }

    pub async fn project_overview(
        &self,
        owner_id: &str,
        project_id: &str,
        query: ProjectOverviewQuery,
    ) -> DomainResult<ProjectOverview> {
        info!("Building overview for project {}: {:?}", project_id, query);

        let project = owned_project(&self.projects, owner_id, project_id).await?;
        let schedules = self.schedules.list_for_project(project_id).await?;
        let contributors = self.contributors.list_contributors(project_id).await?;

        let overview = build_overview(project, schedules, contributors, &query);

        info!(
            "Overview for project {}: {} dates, {} rows on {:?}",
            project_id,
            overview.payment_date_options.len(),
            overview.payment_schedules.len(),
            overview.selected_date
        );
        Ok(overview)
    }
}

/// Assemble the overview from every schedule row and contributor of a project
pub fn build_overview(
    project: Project,
    schedules: Vec<ScheduleWithContributor>,
    contributors: Vec<Contributor>,
    query: &ProjectOverviewQuery,
) -> ProjectOverview {
    let search = query.name_search.as_deref();

    let mut payment_date_options: Vec<NaiveDate> =
        schedules.iter().map(|s| s.schedule.scheduled_payment_date).collect();
    payment_date_options.sort();
    payment_date_options.dedup();

    let selected_date = query.date.or_else(|| payment_date_options.first().copied());

    let on_selected_date: Vec<&ScheduleWithContributor> = schedules
        .iter()
        .filter(|s| Some(s.schedule.scheduled_payment_date) == selected_date)
        .filter(|s| matches_name(&s.contributor_name, search))
        .collect();

    let mut payment_schedules: Vec<ScheduleWithContributor> = on_selected_date
        .iter()
        .filter(|s| query.status.map_or(true, |status| s.schedule.payment_method == status))
        .map(|s| (*s).clone())
        .collect();
    sort_schedules(&mut payment_schedules, query.sort.as_deref(), query.order);

    let mut contributors: Vec<Contributor> = contributors
        .into_iter()
        .filter(|c| matches_name(&c.name, search))
        .collect();
    sort_contributors(&mut contributors, query.sort.as_deref(), query.order);

    let quick_statistics = QuickStatistics {
        total_raised: schedules.iter().map(|s| s.schedule.actual_amount_paid).sum(),
        target_amount: project.target_amount,
        contributions_this_period: on_selected_date
            .iter()
            .map(|s| s.schedule.actual_amount_paid)
            .sum(),
        paid_contributors_count: on_selected_date
            .iter()
            .filter(|s| s.schedule.payment_method.is_paid())
            .count(),
        contributors_count: contributors.len(),
    };

    let pending_payments = on_selected_date
        .iter()
        .filter(|s| !s.schedule.payment_method.is_paid())
        .take(HIGHLIGHT_LIMIT)
        .map(|s| (*s).clone())
        .collect();

    let mut recent: Vec<ScheduleWithContributor> = on_selected_date
        .iter()
        .filter(|s| s.schedule.payment_method.is_paid())
        .map(|s| (*s).clone())
        .collect();
    recent.sort_by(|a, b| b.schedule.payment_date.cmp(&a.schedule.payment_date));
    recent.truncate(HIGHLIGHT_LIMIT);

    ProjectOverview {
        top_contributors: top_contributors(&schedules),
        project,
        selected_date,
        payment_date_options,
        payment_schedules,
        contributors,
        quick_statistics,
        pending_payments,
        recent_payments: recent,
    }
}

/// Case-insensitive substring match; no search matches everything
fn matches_name(name: &str, search: Option<&str>) -> bool {
    match search.map(str::trim).filter(|s| !s.is_empty()) {
        Some(search) => name.to_lowercase().contains(&search.to_lowercase()),
        None => true,
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn apply_order(ordering: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

/// Sort the payment table. Without a key or order the table is by
/// contributor name ascending; `paidBy` and unknown keys sort by contributor
/// name in the requested order.
pub fn sort_schedules(rows: &mut [ScheduleWithContributor], sort: Option<&str>, order: Option<SortOrder>) {
    let direction = order.unwrap_or_default();

    match sort {
        Some("actualAmountPaid") => rows.sort_by(|a, b| {
            apply_order(
                a.schedule.actual_amount_paid.total_cmp(&b.schedule.actual_amount_paid),
                direction,
            )
        }),
        Some("paymentMethod") => rows.sort_by(|a, b| {
            apply_order(
                a.schedule.payment_method.as_str().cmp(b.schedule.payment_method.as_str()),
                direction,
            )
        }),
        Some("paymentDate") => rows.sort_by(|a, b| {
            // Unpaid rows have no payment date and sort after every paid one
            let ordering = match (a.schedule.payment_date, b.schedule.payment_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
            apply_order(ordering, direction)
        }),
        _ => rows.sort_by(|a, b| apply_order(compare_names(&a.contributor_name, &b.contributor_name), direction)),
    }
}

/// Sort the contributor list by `name` or `contributionAmount`; any other
/// key falls back to name ascending regardless of the requested order.
pub fn sort_contributors(contributors: &mut [Contributor], sort: Option<&str>, order: Option<SortOrder>) {
    let direction = order.unwrap_or_default();

    match sort {
        None | Some("name") => {
            contributors.sort_by(|a, b| apply_order(compare_names(&a.name, &b.name), direction))
        }
        Some("contributionAmount") => contributors.sort_by(|a, b| {
            apply_order(a.contribution_amount.total_cmp(&b.contribution_amount), direction)
        }),
        Some(_) => contributors.sort_by(|a, b| compare_names(&a.name, &b.name)),
    }
}

/// Paid rows summed per contributor, largest total first
pub fn top_contributors(schedules: &[ScheduleWithContributor]) -> Vec<TopContributor> {
    let mut totals: HashMap<&str, TopContributor> = HashMap::new();

    for row in schedules.iter().filter(|s| s.schedule.payment_method.is_paid()) {
        totals
            .entry(row.schedule.contributor_id.as_str())
            .and_modify(|top| top.total_paid += row.schedule.actual_amount_paid)
            .or_insert_with(|| TopContributor {
                contributor_id: row.schedule.contributor_id.clone(),
                name: row.contributor_name.clone(),
                total_paid: row.schedule.actual_amount_paid,
                contribution_amount: row.contribution_amount,
            });
    }

    let mut ranked: Vec<TopContributor> = totals.into_values().collect();
    ranked.sort_by(|a, b| {
        b.total_paid
            .total_cmp(&a.total_paid)
            .then_with(|| compare_names(&a.name, &b.name))
    });
    ranked
}
