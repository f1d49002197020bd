use chrono::NaiveDate;

use crate::domain::commands::contributor::{
    AddContributorsCommand, AddContributorsResult, ContributorDetail, ContributorInput,
    UpdateContributorCommand,
};
use crate::domain::models::{Contributor as DomainContributor, ContributorStatus as DomainStatus};
use crate::io::rest::mappers::PaymentMapper;
use shared::{
    AddContributorsRequest, AddContributorsResponse, Contributor as SharedContributor,
    ContributorDetailResponse, ContributorInput as SharedContributorInput, ContributorResponse,
    ContributorStatus as SharedStatus, ProjectRef, UpdateContributorRequest,
};

/// Mapper between the contributor DTOs and the domain contributor model
pub struct ContributorMapper;

impl ContributorMapper {
    pub fn status_to_domain(dto: SharedStatus) -> DomainStatus {
        match dto {
            SharedStatus::Active => DomainStatus::Active,
            SharedStatus::Inactive => DomainStatus::Inactive,
        }
    }

    pub fn status_to_dto(domain: DomainStatus) -> SharedStatus {
        match domain {
            DomainStatus::Active => SharedStatus::Active,
            DomainStatus::Inactive => SharedStatus::Inactive,
        }
    }

    fn input_to_domain(dto: SharedContributorInput) -> ContributorInput {
        ContributorInput {
            name: dto.name,
            contribution_amount: dto.contribution_amount,
            email: dto.email,
            phone_number: dto.phone_number,
        }
    }

    pub fn to_add_command(project_id: String, dto: AddContributorsRequest) -> AddContributorsCommand {
        AddContributorsCommand {
            project_id,
            contributors: dto.contributors.into_iter().map(Self::input_to_domain).collect(),
        }
    }

    pub fn to_update_command(contributor_id: String, dto: UpdateContributorRequest) -> UpdateContributorCommand {
        UpdateContributorCommand {
            contributor_id,
            details: ContributorInput {
                name: dto.name,
                contribution_amount: dto.contribution_amount,
                email: dto.email,
                phone_number: dto.phone_number,
            },
        }
    }

    pub fn to_dto(domain: DomainContributor) -> SharedContributor {
        SharedContributor {
            id: domain.id,
            project_id: domain.project_id,
            name: domain.name,
            contribution_amount: domain.contribution_amount,
            email: domain.email,
            phone_number: domain.phone_number,
            status: Self::status_to_dto(domain.status),
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }

    pub fn to_add_response_dto(domain: AddContributorsResult) -> AddContributorsResponse {
        AddContributorsResponse {
            success: true,
            contributors_created: domain.contributors.len(),
            schedules_created: domain.schedules_created,
        }
    }

    pub fn to_contributor_response_dto(domain: DomainContributor, message: &str) -> ContributorResponse {
        ContributorResponse {
            contributor: Self::to_dto(domain),
            success_message: message.to_string(),
        }
    }

    /// `today` decides which unpaid rows are flagged overdue
    pub fn to_detail_dto(domain: ContributorDetail, today: NaiveDate) -> ContributorDetailResponse {
        ContributorDetailResponse {
            contributor: Self::to_dto(domain.contributor),
            project: ProjectRef {
                id: domain.project_id,
                title: domain.project_title,
            },
            payment_schedules: domain
                .payment_schedules
                .into_iter()
                .map(|s| PaymentMapper::to_dto(s, today))
                .collect(),
            total_paid: domain.total_paid,
            last_payment_date: domain.last_payment_date,
        }
    }
}
