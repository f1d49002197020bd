use crate::domain::commands::project::{CreateProjectCommand, ProjectProgress, UpdateProjectCommand};
use crate::domain::models::{PaymentFrequency as DomainFrequency, Project as DomainProject};
use shared::{
    CreateProjectRequest, PaymentFrequency as SharedFrequency, Project as SharedProject,
    ProjectListResponse, ProjectResponse, ProjectSummary, UpdateProjectRequest,
};

/// Mapper between the project DTOs and the domain project model
pub struct ProjectMapper;

impl ProjectMapper {
    pub fn frequency_to_domain(dto: SharedFrequency) -> DomainFrequency {
        match dto {
            SharedFrequency::OneTime => DomainFrequency::OneTime,
            SharedFrequency::Weekly => DomainFrequency::Weekly,
            SharedFrequency::Monthly => DomainFrequency::Monthly,
            SharedFrequency::Quarterly => DomainFrequency::Quarterly,
        }
    }

    pub fn frequency_to_dto(domain: DomainFrequency) -> SharedFrequency {
        match domain {
            DomainFrequency::OneTime => SharedFrequency::OneTime,
            DomainFrequency::Weekly => SharedFrequency::Weekly,
            DomainFrequency::Monthly => SharedFrequency::Monthly,
            DomainFrequency::Quarterly => SharedFrequency::Quarterly,
        }
    }

    pub fn to_create_command(dto: CreateProjectRequest) -> CreateProjectCommand {
        CreateProjectCommand {
            title: dto.title,
            description: dto.description,
            target_amount: dto.target_amount,
            default_contribution_amount: dto.default_contribution_amount,
            payment_day: dto.payment_day,
            payment_frequency: Self::frequency_to_domain(dto.payment_frequency),
            icon: dto.icon,
            color: dto.color,
            start_date: dto.start_date,
            end_date: dto.end_date,
        }
    }

    pub fn to_update_command(dto: UpdateProjectRequest) -> UpdateProjectCommand {
        UpdateProjectCommand {
            title: dto.title,
            description: dto.description,
            target_amount: dto.target_amount,
            default_contribution_amount: dto.default_contribution_amount,
            icon: dto.icon,
            color: dto.color,
        }
    }

    pub fn to_dto(domain: DomainProject) -> SharedProject {
        SharedProject {
            id: domain.id,
            owner_id: domain.owner_id,
            title: domain.title,
            description: domain.description,
            target_amount: domain.target_amount,
            default_contribution_amount: domain.default_contribution_amount,
            payment_day: domain.payment_day,
            payment_frequency: Self::frequency_to_dto(domain.payment_frequency),
            icon: domain.icon,
            color: domain.color,
            start_date: domain.start_date,
            end_date: domain.end_date,
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }

    pub fn to_project_response_dto(domain: DomainProject, message: &str) -> ProjectResponse {
        ProjectResponse {
            project: Self::to_dto(domain),
            success_message: message.to_string(),
        }
    }

    pub fn to_project_list_dto(projects: Vec<ProjectProgress>) -> ProjectListResponse {
        ProjectListResponse {
            projects: projects
                .into_iter()
                .map(|p| ProjectSummary {
                    project: Self::to_dto(p.project),
                    total_amount_paid: p.total_amount_paid,
                    percentage: p.percentage,
                })
                .collect(),
        }
    }
}
