use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::project::{CreateProjectCommand, ProjectProgress, UpdateProjectCommand};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Project;
use crate::domain::validation::{validate_create_project, validate_update_project};
use crate::storage::{DbConnection, ProjectRepository};

/// Service for managing an owner's projects
#[derive(Clone)]
pub struct ProjectService {
    projects: ProjectRepository,
}

impl ProjectService {
    pub fn new(db: Arc<DbConnection>) -> Self {
        Self {
            projects: ProjectRepository::new(db.as_ref().clone()),
        }
    }

    /// Create a new project
    pub async fn create_project(&self, owner_id: &str, command: CreateProjectCommand) -> DomainResult<Project> {
        info!(
            "Creating project: owner={}, title={}, frequency={}",
            owner_id, command.title, command.payment_frequency
        );

        validate_create_project(&command)?;

        let now = Utc::now();
        let project = Project {
            id: Project::generate_id(),
            owner_id: owner_id.to_string(),
            title: command.title.trim().to_string(),
            description: command.description.trim().to_string(),
            target_amount: command.target_amount,
            default_contribution_amount: command.default_contribution_amount,
            payment_day: command.payment_day,
            payment_frequency: command.payment_frequency,
            icon: command.icon,
            color: command.color,
            start_date: command.start_date,
            end_date: command.end_date,
            created_at: now,
            updated_at: now,
        };

        // Reject plans the generator cannot expand before anything is stored
        let payment_dates = project.payment_dates()?;

        self.projects.store_project(&project).await?;

        info!(
            "Created project {} with {} payment dates",
            project.id,
            payment_dates.len()
        );
        Ok(project)
    }

    /// Get one of the owner's projects
    pub async fn get_project(&self, owner_id: &str, project_id: &str) -> DomainResult<Project> {
        info!("Getting project: {}", project_id);
        owned_project(&self.projects, owner_id, project_id).await
    }

    /// List the owner's projects with the amount raised so far
    pub async fn list_projects(&self, owner_id: &str) -> DomainResult<Vec<ProjectProgress>> {
        info!("Listing projects for owner {}", owner_id);

        let projects = self.projects.list_projects_with_totals(owner_id).await?;

        info!("Found {} projects", projects.len());

        Ok(projects
            .into_iter()
            .map(|(project, total_amount_paid)| ProjectProgress {
                percentage: project.percentage_of_target(total_amount_paid),
                project,
                total_amount_paid,
            })
            .collect())
    }

    /// Update the descriptive fields of a project
    pub async fn update_project(
        &self,
        owner_id: &str,
        project_id: &str,
        command: UpdateProjectCommand,
    ) -> DomainResult<Project> {
        info!("Updating project: {}", project_id);

        validate_update_project(&command)?;
        let mut project = owned_project(&self.projects, owner_id, project_id).await?;

        project.title = command.title.trim().to_string();
        project.description = command.description.trim().to_string();
        project.target_amount = command.target_amount;
        project.default_contribution_amount = command.default_contribution_amount;
        project.icon = command.icon;
        project.color = command.color;
        project.updated_at = Utc::now();

        self.projects.update_project(&project).await?;

        info!("Updated project: {}", project.id);
        Ok(project)
    }

    /// Delete a project together with its contributors and schedules
    pub async fn delete_project(&self, owner_id: &str, project_id: &str) -> DomainResult<()> {
        info!("Deleting project: {}", project_id);

        owned_project(&self.projects, owner_id, project_id).await?;
        self.projects.delete_project(project_id).await?;

        info!("Deleted project: {}", project_id);
        Ok(())
    }
}

/// Load a project, treating one that belongs to someone else as missing
pub(crate) async fn owned_project(
    projects: &ProjectRepository,
    owner_id: &str,
    project_id: &str,
) -> DomainResult<Project> {
    match projects.get_project(project_id).await? {
        Some(project) if project.owner_id == owner_id => Ok(project),
        Some(_) => {
            warn!("Project {} requested by non-owner {}", project_id, owner_id);
            Err(DomainError::not_found("Project", project_id))
        }
        None => {
            warn!("Project not found: {}", project_id);
            Err(DomainError::not_found("Project", project_id))
        }
    }
}
