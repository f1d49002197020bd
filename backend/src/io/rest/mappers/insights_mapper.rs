use chrono::NaiveDate;

use crate::domain::commands::insights::{
    ProjectOverview, ProjectOverviewQuery as DomainQuery, QuickStatistics as DomainStatistics,
    SortOrder as DomainOrder, TopContributor as DomainTopContributor,
};
use crate::domain::models::ScheduleWithContributor;
use crate::io::rest::mappers::{ContributorMapper, PaymentMapper, ProjectMapper};
use shared::{
    ProjectOverviewQuery as SharedQuery, ProjectOverviewResponse, QuickStatistics as SharedStatistics,
    ScheduledPayment, SortOrder as SharedOrder, TopContributor as SharedTopContributor,
};

/// Mapper for the project overview query and response
pub struct InsightsMapper;

impl InsightsMapper {
    pub fn to_query(dto: SharedQuery) -> DomainQuery {
        DomainQuery {
            name_search: dto.c,
            date: dto.date,
            status: dto.status.map(PaymentMapper::method_to_domain),
            sort: dto.sort.filter(|s| !s.is_empty()),
            order: dto.order.map(|order| match order {
                SharedOrder::Asc => DomainOrder::Asc,
                SharedOrder::Desc => DomainOrder::Desc,
            }),
        }
    }

    fn statistics_to_dto(domain: DomainStatistics) -> SharedStatistics {
        SharedStatistics {
            total_raised: domain.total_raised,
            target_amount: domain.target_amount,
            contributions_this_period: domain.contributions_this_period,
            paid_contributors_count: domain.paid_contributors_count,
            contributors_count: domain.contributors_count,
        }
    }

    fn top_contributor_to_dto(domain: DomainTopContributor) -> SharedTopContributor {
        SharedTopContributor {
            id: domain.contributor_id,
            name: domain.name,
            total_paid: domain.total_paid,
            contribution_amount: domain.contribution_amount,
        }
    }

    fn scheduled_to_dto(rows: Vec<ScheduleWithContributor>, today: NaiveDate) -> Vec<ScheduledPayment> {
        rows.into_iter()
            .map(|row| PaymentMapper::to_scheduled_payment_dto(row, today))
            .collect()
    }

    pub fn to_overview_dto(domain: ProjectOverview, today: NaiveDate) -> ProjectOverviewResponse {
        ProjectOverviewResponse {
            project: ProjectMapper::to_dto(domain.project),
            selected_date: domain.selected_date,
            payment_date_options: domain.payment_date_options,
            payment_schedules: Self::scheduled_to_dto(domain.payment_schedules, today),
            contributors: domain
                .contributors
                .into_iter()
                .map(ContributorMapper::to_dto)
                .collect(),
            quick_statistics: Self::statistics_to_dto(domain.quick_statistics),
            top_contributors: domain
                .top_contributors
                .into_iter()
                .map(Self::top_contributor_to_dto)
                .collect(),
            pending_payments: Self::scheduled_to_dto(domain.pending_payments, today),
            recent_payments: Self::scheduled_to_dto(domain.recent_payments, today),
        }
    }
}
