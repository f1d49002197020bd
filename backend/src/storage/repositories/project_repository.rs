use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::Project;
use crate::storage::connection::DbConnection;
use crate::storage::repositories::parse_timestamp;

const PROJECT_COLUMNS: &str = r#"
    p.id, p.owner_id, p.title, p.description, p.target_amount,
    p.default_contribution_amount, p.payment_day, p.payment_frequency,
    p.icon, p.color, p.start_date, p.end_date, p.created_at, p.updated_at
"#;

/// Repository for project operations
#[derive(Clone)]
pub struct ProjectRepository {
    db: DbConnection,
}

impl ProjectRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store a project in the database
    pub async fn store_project(&self, project: &Project) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO projects (
                id, owner_id, title, description, target_amount,
                default_contribution_amount, payment_day, payment_frequency,
                icon, color, start_date, end_date, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&project.id)
        .bind(&project.owner_id)
        .bind(&project.title)
        .bind(&project.description)
        .bind(project.target_amount)
        .bind(project.default_contribution_amount)
        .bind(project.payment_day as i64)
        .bind(project.payment_frequency.as_str())
        .bind(&project.icon)
        .bind(&project.color)
        .bind(project.start_date)
        .bind(project.end_date)
        .bind(project.created_at.to_rfc3339())
        .bind(project.updated_at.to_rfc3339())
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Get a project by ID
    pub async fn get_project(&self, project_id: &str) -> Result<Option<Project>> {
        let query = format!("SELECT {} FROM projects p WHERE p.id = ?", PROJECT_COLUMNS);
        let row = sqlx::query(&query)
            .bind(project_id)
            .fetch_optional(self.db.pool())
            .await?;

        match row {
            Some(r) => Ok(Some(project_from_row(&r)?)),
            None => Ok(None),
        }
    }

    /// List an owner's projects, newest first, each with the sum of
    /// `actual_amount_paid` over its schedules
    pub async fn list_projects_with_totals(&self, owner_id: &str) -> Result<Vec<(Project, f64)>> {
        let query = format!(
            r#"
            SELECT {}, COALESCE(SUM(s.actual_amount_paid), 0.0) AS total_amount_paid
            FROM projects p
            LEFT JOIN payment_schedules s ON s.project_id = p.id
            WHERE p.owner_id = ?
            GROUP BY p.id
            ORDER BY p.created_at DESC, p.id ASC
            "#,
            PROJECT_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(owner_id)
            .fetch_all(self.db.pool())
            .await?;

        rows.iter()
            .map(|row| Ok((project_from_row(row)?, row.get("total_amount_paid"))))
            .collect()
    }

    /// Update the descriptive fields of a project
    pub async fn update_project(&self, project: &Project) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE projects
            SET title = ?, description = ?, target_amount = ?,
                default_contribution_amount = ?, icon = ?, color = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&project.title)
        .bind(&project.description)
        .bind(project.target_amount)
        .bind(project.default_contribution_amount)
        .bind(&project.icon)
        .bind(&project.color)
        .bind(project.updated_at.to_rfc3339())
        .bind(&project.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Delete a project; contributors and schedules go with it
    pub async fn delete_project(&self, project_id: &str) -> Result<()> {
        sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(project_id)
            .execute(self.db.pool())
            .await?;
        Ok(())
    }
}

fn project_from_row(row: &SqliteRow) -> Result<Project> {
    let payment_day: i64 = row.get("payment_day");
    let frequency: String = row.get("payment_frequency");

    Ok(Project {
        id: row.get("id"),
        owner_id: row.get("owner_id"),
        title: row.get("title"),
        description: row.get("description"),
        target_amount: row.get("target_amount"),
        default_contribution_amount: row.get("default_contribution_amount"),
        payment_day: u32::try_from(payment_day)?,
        payment_frequency: frequency.parse()?,
        icon: row.get("icon"),
        color: row.get("color"),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
        created_at: parse_timestamp(row.get("created_at"))?,
        updated_at: parse_timestamp(row.get("updated_at"))?,
    })
}


#[cfg(test)]
mod tests {
    use super::test_support::sample_project;
    use super::*;

    async fn setup_test_repo() -> ProjectRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        ProjectRepository::new(db)
    }

    #[tokio::test]
    async fn test_store_and_get_project() {
        let repo = setup_test_repo().await;
        let project = sample_project("user-1");

        repo.store_project(&project).await.expect("Failed to store project");

        let loaded = repo
            .get_project(&project.id)
            .await
            .expect("Failed to get project")
            .expect("Project should exist");
        assert_eq!(loaded.title, project.title);
        assert_eq!(loaded.payment_day, 15);
        assert_eq!(loaded.payment_frequency, project.payment_frequency);
        assert_eq!(loaded.start_date, project.start_date);
        assert_eq!(loaded.end_date, project.end_date);
    }

    #[tokio::test]
    async fn test_get_nonexistent_project() {
        let repo = setup_test_repo().await;
        assert!(repo.get_project("project::missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_owner() {
        let repo = setup_test_repo().await;
        repo.store_project(&sample_project("user-1")).await.unwrap();
        repo.store_project(&sample_project("user-1")).await.unwrap();
        repo.store_project(&sample_project("user-2")).await.unwrap();

        let projects = repo.list_projects_with_totals("user-1").await.unwrap();
        assert_eq!(projects.len(), 2);
        assert!(projects.iter().all(|(p, total)| p.owner_id == "user-1" && *total == 0.0));
    }

    #[tokio::test]
    async fn test_update_only_touches_descriptive_fields() {
        let repo = setup_test_repo().await;
        let mut project = sample_project("user-1");
        repo.store_project(&project).await.unwrap();

        project.title = "Renamed".to_string();
        project.payment_day = 3;
        repo.update_project(&project).await.unwrap();

        let loaded = repo.get_project(&project.id).await.unwrap().unwrap();
        assert_eq!(loaded.title, "Renamed");
        assert_eq!(loaded.payment_day, 15);
    }

    #[tokio::test]
    async fn test_delete_project() {
        let repo = setup_test_repo().await;
        let project = sample_project("user-1");
        repo.store_project(&project).await.unwrap();

        repo.delete_project(&project.id).await.unwrap();
        assert!(repo.get_project(&project.id).await.unwrap().is_none());
    }
}
