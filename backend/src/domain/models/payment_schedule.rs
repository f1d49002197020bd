//! Domain model for one payment obligation: a contributor owing an amount on a
//! scheduled date, and how (if at all) it was settled.

use chrono::NaiveDate;
use std::str::FromStr;

use crate::domain::calendar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    Unpaid,
    Cash,
    BankTransfer,
    Gcash,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Unpaid => "UNPAID",
            PaymentMethod::Cash => "CASH",
            PaymentMethod::BankTransfer => "BANK_TRANSFER",
            PaymentMethod::Gcash => "GCASH",
        }
    }

    pub fn is_paid(&self) -> bool {
        *self != PaymentMethod::Unpaid
    }
}

impl FromStr for PaymentMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNPAID" => Ok(PaymentMethod::Unpaid),
            "CASH" => Ok(PaymentMethod::Cash),
            "BANK_TRANSFER" => Ok(PaymentMethod::BankTransfer),
            "GCASH" => Ok(PaymentMethod::Gcash),
            other => Err(anyhow::anyhow!("Unknown payment method: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentSchedule {
    pub id: String,
    pub project_id: String,
    pub contributor_id: String,
    pub scheduled_payment_date: NaiveDate,
    pub amount_to_pay: f64,
    pub payment_method: PaymentMethod,
    pub actual_amount_paid: f64,
    pub payment_date: Option<NaiveDate>,
    pub proof_of_payment: Option<String>,
    pub note: Option<String>,
}

impl PaymentSchedule {
    pub fn generate_id() -> String {
        format!("schedule::{}", uuid::Uuid::new_v4())
    }

    /// A fresh, unpaid obligation for `contributor_id` due on `date`
    pub fn unpaid(project_id: &str, contributor_id: &str, date: NaiveDate, amount_to_pay: f64) -> Self {
        Self {
            id: Self::generate_id(),
            project_id: project_id.to_string(),
            contributor_id: contributor_id.to_string(),
            scheduled_payment_date: date,
            amount_to_pay,
            payment_method: PaymentMethod::Unpaid,
            actual_amount_paid: 0.0,
            payment_date: None,
            proof_of_payment: None,
            note: None,
        }
    }

    /// Unpaid and past its due date as of `today`
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.payment_method.is_paid() && calendar::is_overdue(self.scheduled_payment_date, today)
    }
}

/// A schedule row together with the contributor it belongs to, as needed by
/// the project overview listings
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleWithContributor {
    pub schedule: PaymentSchedule,
    pub contributor_name: String,
    pub contribution_amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_unpaid_schedule_defaults() {
        let schedule = PaymentSchedule::unpaid("project::1", "contributor::1", date(2025, 3, 10), 250.0);
        assert!(schedule.id.starts_with("schedule::"));
        assert_eq!(schedule.payment_method, PaymentMethod::Unpaid);
        assert_eq!(schedule.actual_amount_paid, 0.0);
        assert_eq!(schedule.amount_to_pay, 250.0);
        assert!(schedule.payment_date.is_none());
    }

    #[test]
    fn test_overdue_only_when_unpaid_and_past_due() {
        let mut schedule = PaymentSchedule::unpaid("p", "c", date(2025, 3, 10), 100.0);
        assert!(!schedule.is_overdue(date(2025, 3, 10)));
        assert!(schedule.is_overdue(date(2025, 3, 11)));

        schedule.payment_method = PaymentMethod::Cash;
        assert!(!schedule.is_overdue(date(2025, 3, 11)));
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("GCASH".parse::<PaymentMethod>().unwrap(), PaymentMethod::Gcash);
        assert_eq!("BANK_TRANSFER".parse::<PaymentMethod>().unwrap(), PaymentMethod::BankTransfer);
        assert!("CHEQUE".parse::<PaymentMethod>().is_err());
        assert!(!PaymentMethod::Unpaid.is_paid());
        assert!(PaymentMethod::Cash.is_paid());
    }
}
