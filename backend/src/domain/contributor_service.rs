use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::contributor::{
    AddContributorsCommand, AddContributorsResult, ContributorDetail, ContributorInput,
    UpdateContributorCommand,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Contributor, ContributorStatus, PaymentSchedule, Project};
use crate::domain::project_service::owned_project;
use crate::domain::validation::{validate_contributor, validate_contributor_batch};
use crate::storage::{ContributorRepository, DbConnection, PaymentScheduleRepository, ProjectRepository};

/// Service for enrolling contributors and managing their schedules
#[derive(Clone)]
pub struct ContributorService {
    projects: ProjectRepository,
    contributors: ContributorRepository,
    schedules: PaymentScheduleRepository,
}

impl ContributorService {
    pub fn new(db: Arc<DbConnection>) -> Self {
        let db = db.as_ref().clone();
        Self {
            projects: ProjectRepository::new(db.clone()),
            contributors: ContributorRepository::new(db.clone()),
            schedules: PaymentScheduleRepository::new(db),
        }
    }

    /// Add a batch of contributors to a project, creating one unpaid schedule
    /// row per contributor per payment date. The whole batch is stored in one
    /// transaction.
    pub async fn add_contributors(
        &self,
        owner_id: &str,
        command: AddContributorsCommand,
    ) -> DomainResult<AddContributorsResult> {
        info!(
            "Adding {} contributors to project {}",
            command.contributors.len(),
            command.project_id
        );

        validate_contributor_batch(&command.contributors)?;
        let project = owned_project(&self.projects, owner_id, &command.project_id).await?;

        let payment_dates = project.payment_dates()?;
        let now = Utc::now();

        let batch: Vec<(Contributor, Vec<PaymentSchedule>)> = command
            .contributors
            .into_iter()
            .map(|input| {
                let contributor = new_contributor(&project, input, now);
                let schedules = payment_dates
                    .iter()
                    .map(|date| {
                        PaymentSchedule::unpaid(
                            &project.id,
                            &contributor.id,
                            *date,
                            contributor.contribution_amount,
                        )
                    })
                    .collect();
                (contributor, schedules)
            })
            .collect();

        let schedules_created = self.contributors.create_contributors_with_schedules(&batch).await?;
        let contributors: Vec<Contributor> = batch.into_iter().map(|(c, _)| c).collect();

        info!(
            "Added {} contributors with {} schedule rows to project {}",
            contributors.len(),
            schedules_created,
            project.id
        );

        Ok(AddContributorsResult {
            contributors,
            schedules_created,
        })
    }

    /// Update a contributor's details. Existing schedule rows keep the amount
    /// they were created with.
    pub async fn update_contributor(
        &self,
        owner_id: &str,
        command: UpdateContributorCommand,
    ) -> DomainResult<Contributor> {
        info!("Updating contributor: {}", command.contributor_id);

        validate_contributor(&command.details)?;
        let (mut contributor, _) = self.owned_contributor(owner_id, &command.contributor_id).await?;

        let details = command.details;
        contributor.name = details.name.trim().to_string();
        contributor.contribution_amount = details.contribution_amount;
        contributor.email = non_empty(details.email);
        contributor.phone_number = non_empty(details.phone_number);
        contributor.updated_at = Utc::now();

        self.contributors.update_contributor(&contributor).await?;

        info!("Updated contributor: {}", contributor.id);
        Ok(contributor)
    }

    /// Mark a contributor active or inactive
    pub async fn set_contributor_status(
        &self,
        owner_id: &str,
        contributor_id: &str,
        status: ContributorStatus,
    ) -> DomainResult<Contributor> {
        info!("Setting contributor {} status to {}", contributor_id, status.as_str());

        let (mut contributor, _) = self.owned_contributor(owner_id, contributor_id).await?;
        contributor.status = status;
        contributor.updated_at = Utc::now();

        self.contributors.update_contributor(&contributor).await?;
        Ok(contributor)
    }

    /// Delete a contributor and every schedule row they owe
    pub async fn delete_contributor(&self, owner_id: &str, contributor_id: &str) -> DomainResult<()> {
        info!("Deleting contributor: {}", contributor_id);

        self.owned_contributor(owner_id, contributor_id).await?;
        self.contributors.delete_contributor(contributor_id).await?;

        info!("Deleted contributor: {}", contributor_id);
        Ok(())
    }

    /// A contributor with their project and full payment history
    pub async fn get_contributor_detail(
        &self,
        owner_id: &str,
        contributor_id: &str,
    ) -> DomainResult<ContributorDetail> {
        info!("Getting contributor detail: {}", contributor_id);

        let (contributor, project) = self.owned_contributor(owner_id, contributor_id).await?;
        let payment_schedules = self.schedules.list_for_contributor(contributor_id).await?;

        let paid = payment_schedules.iter().filter(|s| s.payment_method.is_paid());
        let total_paid = paid.clone().map(|s| s.actual_amount_paid).sum();
        let last_payment_date = paid.filter_map(|s| s.payment_date).max();

        Ok(ContributorDetail {
            contributor,
            project_id: project.id,
            project_title: project.title,
            payment_schedules,
            total_paid,
            last_payment_date,
        })
    }

    /// Load a contributor whose project belongs to `owner_id`
    async fn owned_contributor(&self, owner_id: &str, contributor_id: &str) -> DomainResult<(Contributor, Project)> {
        let contributor = match self.contributors.get_contributor(contributor_id).await? {
            Some(contributor) => contributor,
            None => {
                warn!("Contributor not found: {}", contributor_id);
                return Err(DomainError::not_found("Contributor", contributor_id));
            }
        };

        match owned_project(&self.projects, owner_id, &contributor.project_id).await {
            Ok(project) => Ok((contributor, project)),
            Err(DomainError::NotFound { .. }) => Err(DomainError::not_found("Contributor", contributor_id)),
            Err(e) => Err(e),
        }
    }
}

fn new_contributor(project: &Project, input: ContributorInput, now: chrono::DateTime<Utc>) -> Contributor {
    Contributor {
        id: Contributor::generate_id(),
        project_id: project.id.clone(),
        name: input.name.trim().to_string(),
        contribution_amount: input.contribution_amount,
        email: non_empty(input.email),
        phone_number: non_empty(input.phone_number),
        status: ContributorStatus::Active,
        created_at: now,
        updated_at: now,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
