use chrono::NaiveDate;

use crate::domain::commands::payment::RecordPaymentCommand;
use crate::domain::models::{
    PaymentMethod as DomainMethod, PaymentSchedule as DomainSchedule, ScheduleWithContributor,
};
use shared::{
    PaymentMethod as SharedMethod, PaymentSchedule as SharedSchedule, RecordPaymentRequest,
    RecordPaymentResponse, ScheduledPayment,
};

/// Mapper between the payment schedule DTOs and the domain schedule model
pub struct PaymentMapper;

impl PaymentMapper {
    pub fn method_to_domain(dto: SharedMethod) -> DomainMethod {
        match dto {
            SharedMethod::Unpaid => DomainMethod::Unpaid,
            SharedMethod::Cash => DomainMethod::Cash,
            SharedMethod::BankTransfer => DomainMethod::BankTransfer,
            SharedMethod::Gcash => DomainMethod::Gcash,
        }
    }

    pub fn method_to_dto(domain: DomainMethod) -> SharedMethod {
        match domain {
            DomainMethod::Unpaid => SharedMethod::Unpaid,
            DomainMethod::Cash => SharedMethod::Cash,
            DomainMethod::BankTransfer => SharedMethod::BankTransfer,
            DomainMethod::Gcash => SharedMethod::Gcash,
        }
    }

    pub fn to_record_command(dto: RecordPaymentRequest) -> RecordPaymentCommand {
        RecordPaymentCommand {
            schedule_id: dto.schedule_id,
            actual_amount_paid: dto.actual_amount_paid,
            payment_date: dto.payment_date,
            payment_method: Self::method_to_domain(dto.payment_method),
            proof_of_payment: dto.proof_of_payment,
            note: dto.note,
        }
    }

    pub fn to_dto(domain: DomainSchedule, today: NaiveDate) -> SharedSchedule {
        SharedSchedule {
            is_overdue: domain.is_overdue(today),
            id: domain.id,
            project_id: domain.project_id,
            contributor_id: domain.contributor_id,
            scheduled_payment_date: domain.scheduled_payment_date,
            amount_to_pay: domain.amount_to_pay,
            payment_method: Self::method_to_dto(domain.payment_method),
            actual_amount_paid: domain.actual_amount_paid,
            payment_date: domain.payment_date,
            proof_of_payment: domain.proof_of_payment,
            note: domain.note,
        }
    }

    pub fn to_scheduled_payment_dto(domain: ScheduleWithContributor, today: NaiveDate) -> ScheduledPayment {
        ScheduledPayment {
            schedule: Self::to_dto(domain.schedule, today),
            contributor_name: domain.contributor_name,
            contribution_amount: domain.contribution_amount,
        }
    }

    pub fn to_record_response_dto(domain: DomainSchedule, today: NaiveDate) -> RecordPaymentResponse {
        RecordPaymentResponse {
            payment: Self::to_dto(domain, today),
            success_message: "Payment recorded successfully".to_string(),
        }
    }
}
