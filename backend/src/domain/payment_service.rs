use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::payment::RecordPaymentCommand;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::PaymentSchedule;
use crate::domain::project_service::owned_project;
use crate::domain::validation::validate_record_payment;
use crate::storage::{DbConnection, PaymentScheduleRepository, ProjectRepository};

/// Service for settling payment schedule rows
#[derive(Clone)]
pub struct PaymentService {
    projects: ProjectRepository,
    schedules: PaymentScheduleRepository,
}

impl PaymentService {
    pub fn new(db: Arc<DbConnection>) -> Self {
        let db = db.as_ref().clone();
        Self {
            projects: ProjectRepository::new(db.clone()),
            schedules: PaymentScheduleRepository::new(db),
        }
    }

    /// Record a payment against one schedule row. Recording again overwrites
    /// the previous settlement.
    pub async fn record_payment(&self, owner_id: &str, command: RecordPaymentCommand) -> DomainResult<PaymentSchedule> {
        info!(
            "Recording payment: schedule={}, amount={}, method={}",
            command.schedule_id,
            command.actual_amount_paid,
            command.payment_method.as_str()
        );

        validate_record_payment(&command)?;

        let mut schedule = match self.schedules.get_schedule(&command.schedule_id).await? {
            Some(schedule) => schedule,
            None => {
                warn!("Payment schedule not found: {}", command.schedule_id);
                return Err(DomainError::not_found("Payment schedule", command.schedule_id));
            }
        };

        if let Err(e) = owned_project(&self.projects, owner_id, &schedule.project_id).await {
            return match e {
                DomainError::NotFound { .. } => Err(DomainError::not_found("Payment schedule", command.schedule_id)),
                other => Err(other),
            };
        }

        schedule.payment_method = command.payment_method;
        schedule.actual_amount_paid = command.actual_amount_paid;
        schedule.payment_date = Some(command.payment_date);
        schedule.proof_of_payment = command.proof_of_payment.filter(|p| !p.is_empty());
        schedule.note = command
            .note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        if !self.schedules.record_payment(&schedule).await? {
            return Err(DomainError::not_found("Payment schedule", schedule.id));
        }

        info!("Recorded payment for schedule {}", schedule.id);
        Ok(schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::contributor::AddContributorsCommand;
    use crate::domain::contributor_service::test_support::contributor_input;
    use crate::domain::models::PaymentMethod;
    use crate::domain::project_service::test_support::monthly_project_command;
    use crate::domain::{ContributorService, ProjectService};
    use chrono::NaiveDate;

    struct Fixture {
        service: PaymentService,
        contributors: ContributorService,
        projects: ProjectService,
        contributor_id: String,
        schedule_id: String,
    }

    async fn setup_test() -> Fixture {
        let db = Arc::new(DbConnection::init_test().await.expect("Failed to create test database"));
        let projects = ProjectService::new(db.clone());
        let contributors = ContributorService::new(db.clone());

        let project = projects.create_project("user-1", monthly_project_command()).await.unwrap();
        let added = contributors
            .add_contributors(
                "user-1",
                AddContributorsCommand {
                    project_id: project.id.clone(),
                    contributors: vec![contributor_input("Ana", 500.0)],
                },
            )
            .await
            .unwrap();
        let contributor_id = added.contributors[0].id.clone();
        let detail = contributors
            .get_contributor_detail("user-1", &contributor_id)
            .await
            .unwrap();

        Fixture {
            service: PaymentService::new(db),
            contributors,
            projects,
            contributor_id,
            schedule_id: detail.payment_schedules[0].id.clone(),
        }
    }

    fn payment(schedule_id: &str) -> RecordPaymentCommand {
        RecordPaymentCommand {
            schedule_id: schedule_id.to_string(),
            actual_amount_paid: 500.0,
            payment_date: NaiveDate::from_ymd_opt(2025, 1, 14).unwrap(),
            payment_method: PaymentMethod::Gcash,
            proof_of_payment: Some("https://files.example.com/receipt.png".to_string()),
            note: Some(" paid early ".to_string()),
        }
    }

    #[tokio::test]
    async fn test_record_payment() {
        let fixture = setup_test().await;

        let schedule = fixture
            .service
            .record_payment("user-1", payment(&fixture.schedule_id))
            .await
            .expect("Failed to record payment");

        assert_eq!(schedule.payment_method, PaymentMethod::Gcash);
        assert_eq!(schedule.actual_amount_paid, 500.0);
        assert_eq!(schedule.note.as_deref(), Some("paid early"));

        let detail = fixture
            .contributors
            .get_contributor_detail("user-1", &fixture.contributor_id)
            .await
            .unwrap();
        assert_eq!(detail.total_paid, 500.0);
        assert_eq!(detail.last_payment_date, NaiveDate::from_ymd_opt(2025, 1, 14));

        let projects = fixture.projects.list_projects("user-1").await.unwrap();
        assert_eq!(projects[0].total_amount_paid, 500.0);
        assert!((projects[0].percentage - 500.0 / 3000.0 * 100.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_record_payment_validation() {
        let fixture = setup_test().await;

        let mut command = payment(&fixture.schedule_id);
        command.payment_method = PaymentMethod::Unpaid;
        assert!(matches!(
            fixture.service.record_payment("user-1", command).await,
            Err(DomainError::Validation(_))
        ));

        let mut command = payment(&fixture.schedule_id);
        command.proof_of_payment = Some("receipt.png".to_string());
        assert!(matches!(
            fixture.service.record_payment("user-1", command).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_record_payment_unknown_schedule() {
        let fixture = setup_test().await;
        let result = fixture
            .service
            .record_payment("user-1", payment("schedule::missing"))
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_record_payment_for_foreign_project() {
        let fixture = setup_test().await;
        let result = fixture
            .service
            .record_payment("user-2", payment(&fixture.schedule_id))
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}
