use anyhow::Result;
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use crate::domain::models::{PaymentMethod, PaymentSchedule, ScheduleWithContributor};
use crate::storage::connection::DbConnection;

const SCHEDULE_COLUMNS: &str = r#"
    s.id, s.project_id, s.contributor_id, s.scheduled_payment_date, s.amount_to_pay,
    s.payment_method, s.actual_amount_paid, s.payment_date, s.proof_of_payment, s.note
"#;

/// Repository for payment schedule rows
#[derive(Clone)]
pub struct PaymentScheduleRepository {
    db: DbConnection,
}

impl PaymentScheduleRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Get a schedule row by ID
    pub async fn get_schedule(&self, schedule_id: &str) -> Result<Option<PaymentSchedule>> {
        let query = format!("SELECT {} FROM payment_schedules s WHERE s.id = ?", SCHEDULE_COLUMNS);
        let row = sqlx::query(&query)
            .bind(schedule_id)
            .fetch_optional(self.db.pool())
            .await?;

        match row {
            Some(r) => Ok(Some(schedule_from_row(&r)?)),
            None => Ok(None),
        }
    }

    /// All schedule rows of a contributor, earliest due date first
    pub async fn list_for_contributor(&self, contributor_id: &str) -> Result<Vec<PaymentSchedule>> {
        let query = format!(
            r#"
            SELECT {}
            FROM payment_schedules s
            WHERE s.contributor_id = ?
            ORDER BY s.scheduled_payment_date ASC
            "#,
            SCHEDULE_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(contributor_id)
            .fetch_all(self.db.pool())
            .await?;

        rows.iter().map(schedule_from_row).collect()
    }

    /// All schedule rows of a project joined with their contributor, ordered
    /// by due date and then contributor name
    pub async fn list_for_project(&self, project_id: &str) -> Result<Vec<ScheduleWithContributor>> {
        let query = format!(
            r#"
            SELECT {}, c.name AS contributor_name, c.contribution_amount
            FROM payment_schedules s
            JOIN contributors c ON c.id = s.contributor_id
            WHERE s.project_id = ?
            ORDER BY s.scheduled_payment_date ASC, c.name COLLATE NOCASE ASC
            "#,
            SCHEDULE_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(project_id)
            .fetch_all(self.db.pool())
            .await?;

        rows.iter()
            .map(|row| {
                Ok(ScheduleWithContributor {
                    schedule: schedule_from_row(row)?,
                    contributor_name: row.get("contributor_name"),
                    contribution_amount: row.get("contribution_amount"),
                })
            })
            .collect()
    }

    /// Write the settlement fields of a schedule row. Returns false when no
    /// row has the given ID.
    pub async fn record_payment(&self, schedule: &PaymentSchedule) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE payment_schedules
            SET payment_method = ?, actual_amount_paid = ?, payment_date = ?,
                proof_of_payment = ?, note = ?
            WHERE id = ?
            "#,
        )
        .bind(schedule.payment_method.as_str())
        .bind(schedule.actual_amount_paid)
        .bind(schedule.payment_date)
        .bind(&schedule.proof_of_payment)
        .bind(&schedule.note)
        .bind(&schedule.id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Insert one schedule row on an open connection or transaction
pub(crate) async fn insert_schedule(conn: &mut SqliteConnection, schedule: &PaymentSchedule) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO payment_schedules (
            id, project_id, contributor_id, scheduled_payment_date, amount_to_pay,
            payment_method, actual_amount_paid, payment_date, proof_of_payment, note
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&schedule.id)
    .bind(&schedule.project_id)
    .bind(&schedule.contributor_id)
    .bind(schedule.scheduled_payment_date)
    .bind(schedule.amount_to_pay)
    .bind(schedule.payment_method.as_str())
    .bind(schedule.actual_amount_paid)
    .bind(schedule.payment_date)
    .bind(&schedule.proof_of_payment)
    .bind(&schedule.note)
    .execute(conn)
    .await?;
    Ok(())
}

fn schedule_from_row(row: &SqliteRow) -> Result<PaymentSchedule> {
    let method: String = row.get("payment_method");
    let payment_date: Option<NaiveDate> = row.get("payment_date");

    Ok(PaymentSchedule {
        id: row.get("id"),
        project_id: row.get("project_id"),
        contributor_id: row.get("contributor_id"),
        scheduled_payment_date: row.get("scheduled_payment_date"),
        amount_to_pay: row.get("amount_to_pay"),
        payment_method: method.parse::<PaymentMethod>()?,
        actual_amount_paid: row.get("actual_amount_paid"),
        payment_date,
        proof_of_payment: row.get("proof_of_payment"),
        note: row.get("note"),
    })
}
