use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::{Contributor, ContributorStatus, PaymentSchedule};
use crate::storage::connection::DbConnection;
use crate::storage::repositories::parse_timestamp;
use crate::storage::repositories::payment_schedule_repository::insert_schedule;

/// Repository for contributor operations
#[derive(Clone)]
pub struct ContributorRepository {
    db: DbConnection,
}

impl ContributorRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Insert contributors together with their schedule rows in a single
    /// transaction. Nothing is written unless every insert succeeds. Returns
    /// the number of schedule rows created.
    pub async fn create_contributors_with_schedules(
        &self,
        batch: &[(Contributor, Vec<PaymentSchedule>)],
    ) -> Result<usize> {
        let mut tx = self.db.pool().begin().await?;
        let mut schedules_created = 0;

        for (contributor, schedules) in batch {
            sqlx::query(
                r#"
                INSERT INTO contributors (
                    id, project_id, name, contribution_amount, email, phone_number,
                    status, created_at, updated_at
                )
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&contributor.id)
            .bind(&contributor.project_id)
            .bind(&contributor.name)
            .bind(contributor.contribution_amount)
            .bind(&contributor.email)
            .bind(&contributor.phone_number)
            .bind(contributor.status.as_str())
            .bind(contributor.created_at.to_rfc3339())
            .bind(contributor.updated_at.to_rfc3339())
            .execute(&mut *tx)
            .await?;

            for schedule in schedules {
                insert_schedule(&mut *tx, schedule).await?;
                schedules_created += 1;
            }
        }

        tx.commit().await?;
        Ok(schedules_created)
    }

    /// Get a contributor by ID
    pub async fn get_contributor(&self, contributor_id: &str) -> Result<Option<Contributor>> {
        let row = sqlx::query(
            r#"
            SELECT id, project_id, name, contribution_amount, email, phone_number,
                   status, created_at, updated_at
            FROM contributors
            WHERE id = ?
            "#,
        )
        .bind(contributor_id)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(contributor_from_row(&r)?)),
            None => Ok(None),
        }
    }

    /// List a project's contributors ordered by name
    pub async fn list_contributors(&self, project_id: &str) -> Result<Vec<Contributor>> {
        let rows = sqlx::query(
            r#"
            SELECT id, project_id, name, contribution_amount, email, phone_number,
                   status, created_at, updated_at
            FROM contributors
            WHERE project_id = ?
            ORDER BY name COLLATE NOCASE ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(contributor_from_row).collect()
    }

    /// Update a contributor's details and status
    pub async fn update_contributor(&self, contributor: &Contributor) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE contributors
            SET name = ?, contribution_amount = ?, email = ?, phone_number = ?,
                status = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&contributor.name)
        .bind(contributor.contribution_amount)
        .bind(&contributor.email)
        .bind(&contributor.phone_number)
        .bind(contributor.status.as_str())
        .bind(contributor.updated_at.to_rfc3339())
        .bind(&contributor.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Delete a contributor; its schedule rows go with it
    pub async fn delete_contributor(&self, contributor_id: &str) -> Result<()> {
        sqlx::query("DELETE FROM contributors WHERE id = ?")
            .bind(contributor_id)
            .execute(self.db.pool())
            .await?;
        Ok(())
    }
}

fn contributor_from_row(row: &SqliteRow) -> Result<Contributor> {
    let status: String = row.get("status");

    Ok(Contributor {
        id: row.get("id"),
        project_id: row.get("project_id"),
        name: row.get("name"),
        contribution_amount: row.get("contribution_amount"),
        email: row.get("email"),
        phone_number: row.get("phone_number"),
        status: status.parse::<ContributorStatus>()?,
        created_at: parse_timestamp(row.get("created_at"))?,
        updated_at: parse_timestamp(row.get("updated_at"))?,
    })
}


#[cfg(test)]
mod tests {
    use super::test_support::sample_contributor;
    use super::*;
    use crate::storage::repositories::project_repository::test_support::sample_project;
    use crate::storage::repositories::ProjectRepository;
    use chrono::NaiveDate;

    async fn setup_test() -> (DbConnection, String) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let project = sample_project("user-1");
        ProjectRepository::new(db.clone())
            .store_project(&project)
            .await
            .expect("Failed to store project");
        (db, project.id)
    }

    async fn count(db: &DbConnection, table: &str) -> i64 {
        sqlx::query(&format!("SELECT COUNT(*) AS n FROM {}", table))
            .fetch_one(db.pool())
            .await
            .unwrap()
            .get("n")
    }

    fn schedules_for(contributor: &Contributor, days: &[u32]) -> Vec<PaymentSchedule> {
        days.iter()
            .map(|d| {
                PaymentSchedule::unpaid(
                    &contributor.project_id,
                    &contributor.id,
                    NaiveDate::from_ymd_opt(2025, 1, *d).unwrap(),
                    contributor.contribution_amount,
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn test_create_contributors_with_schedules() {
        let (db, project_id) = setup_test().await;
        let repo = ContributorRepository::new(db.clone());

        let ana = sample_contributor(&project_id, "Ana", 500.0);
        let ben = sample_contributor(&project_id, "Ben", 250.0);
        let batch = vec![
            (ana.clone(), schedules_for(&ana, &[5, 12])),
            (ben.clone(), schedules_for(&ben, &[5, 12])),
        ];

        let created = repo.create_contributors_with_schedules(&batch).await.unwrap();
        assert_eq!(created, 4);
        assert_eq!(count(&db, "contributors").await, 2);
        assert_eq!(count(&db, "payment_schedules").await, 4);

        let loaded = repo.get_contributor(&ana.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Ana");
        assert_eq!(loaded.status, ContributorStatus::Active);
    }

    #[tokio::test]
    async fn test_failed_batch_rolls_back() {
        let (db, project_id) = setup_test().await;
        let repo = ContributorRepository::new(db.clone());

        let ana = sample_contributor(&project_id, "Ana", 500.0);
        let ben = sample_contributor(&project_id, "Ben", 250.0);
        let ana_schedules = schedules_for(&ana, &[5]);
        let mut ben_schedules = schedules_for(&ben, &[5]);
        // Reusing a primary key makes the last insert fail
        ben_schedules[0].id = ana_schedules[0].id.clone();

        let result = repo
            .create_contributors_with_schedules(&[(ana, ana_schedules), (ben, ben_schedules)])
            .await;

        assert!(result.is_err());
        assert_eq!(count(&db, "contributors").await, 0);
        assert_eq!(count(&db, "payment_schedules").await, 0);
    }

    #[tokio::test]
    async fn test_list_contributors_sorted_by_name() {
        let (db, project_id) = setup_test().await;
        let repo = ContributorRepository::new(db);

        let batch: Vec<_> = ["carla", "Ana", "Ben"]
            .iter()
            .map(|name| (sample_contributor(&project_id, name, 100.0), Vec::new()))
            .collect();
        repo.create_contributors_with_schedules(&batch).await.unwrap();

        let names: Vec<String> = repo
            .list_contributors(&project_id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Ana", "Ben", "carla"]);
    }

    #[tokio::test]
    async fn test_update_contributor() {
        let (db, project_id) = setup_test().await;
        let repo = ContributorRepository::new(db);
        let mut ana = sample_contributor(&project_id, "Ana", 500.0);
        repo.create_contributors_with_schedules(&[(ana.clone(), Vec::new())])
            .await
            .unwrap();

        ana.email = Some("ana@example.com".to_string());
        ana.status = ContributorStatus::Inactive;
        repo.update_contributor(&ana).await.unwrap();

        let loaded = repo.get_contributor(&ana.id).await.unwrap().unwrap();
        assert_eq!(loaded.email.as_deref(), Some("ana@example.com"));
        assert_eq!(loaded.status, ContributorStatus::Inactive);
    }

    #[tokio::test]
    async fn test_delete_contributor_cascades_to_schedules() {
        let (db, project_id) = setup_test().await;
        let repo = ContributorRepository::new(db.clone());
        let ana = sample_contributor(&project_id, "Ana", 500.0);
        let schedules = schedules_for(&ana, &[5, 12, 19]);
        repo.create_contributors_with_schedules(&[(ana.clone(), schedules)])
            .await
            .unwrap();

        repo.delete_contributor(&ana.id).await.unwrap();

        assert!(repo.get_contributor(&ana.id).await.unwrap().is_none());
        assert_eq!(count(&db, "payment_schedules").await, 0);
    }

    #[tokio::test]
    async fn test_delete_project_cascades() {
        let (db, project_id) = setup_test().await;
        let repo = ContributorRepository::new(db.clone());
        let ana = sample_contributor(&project_id, "Ana", 500.0);
        let schedules = schedules_for(&ana, &[5]);
        repo.create_contributors_with_schedules(&[(ana, schedules)])
            .await
            .unwrap();

        ProjectRepository::new(db.clone())
            .delete_project(&project_id)
            .await
            .unwrap();

        assert_eq!(count(&db, "contributors").await, 0);
        assert_eq!(count(&db, "payment_schedules").await, 0);
    }
}
