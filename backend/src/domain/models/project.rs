//! Domain model for a project: a pooled fund with a recurring payment plan.

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::ScheduleError;
use crate::domain::schedule::generate_payment_dates;

/// Recurrence of a project's payment schedule.
///
/// Persisted and exchanged as `ONE_TIME`, `WEEKLY`, `MONTHLY` and `QUARTERLY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentFrequency {
    OneTime,
    Weekly,
    Monthly,
    Quarterly,
}

impl PaymentFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentFrequency::OneTime => "ONE_TIME",
            PaymentFrequency::Weekly => "WEEKLY",
            PaymentFrequency::Monthly => "MONTHLY",
            PaymentFrequency::Quarterly => "QUARTERLY",
        }
    }

    /// Inclusive range of accepted `payment_day` values, or `None` when the
    /// day is ignored
    pub fn payment_day_bounds(&self) -> Option<(u32, u32)> {
        match self {
            PaymentFrequency::OneTime => None,
            // 0 and 7 both land on Sunday
            PaymentFrequency::Weekly => Some((0, 7)),
            PaymentFrequency::Monthly | PaymentFrequency::Quarterly => Some((1, 31)),
        }
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentFrequency {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ONE_TIME" => Ok(PaymentFrequency::OneTime),
            "WEEKLY" => Ok(PaymentFrequency::Weekly),
            "MONTHLY" => Ok(PaymentFrequency::Monthly),
            "QUARTERLY" => Ok(PaymentFrequency::Quarterly),
            other => Err(ScheduleError::UnknownFrequency(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub description: String,
    pub target_amount: f64,
    pub default_contribution_amount: f64,
    pub payment_day: u32,
    pub payment_frequency: PaymentFrequency,
    pub icon: String,
    pub color: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn generate_id() -> String {
        format!("project::{}", uuid::Uuid::new_v4())
    }

    /// Due dates every contributor of this project owes a payment on
    pub fn payment_dates(&self) -> Result<Vec<NaiveDate>, ScheduleError> {
        generate_payment_dates(
            self.start_date,
            self.end_date,
            self.payment_day,
            self.payment_frequency,
        )
    }

    /// Share of the target raised so far, in percent
    pub fn percentage_of_target(&self, total_paid: f64) -> f64 {
        if self.target_amount <= 0.0 {
            return 0.0;
        }
        total_paid / self.target_amount * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_round_trips_through_str() {
        for frequency in [
            PaymentFrequency::OneTime,
            PaymentFrequency::Weekly,
            PaymentFrequency::Monthly,
            PaymentFrequency::Quarterly,
        ] {
            assert_eq!(frequency.as_str().parse::<PaymentFrequency>().unwrap(), frequency);
        }
    }

    #[test]
    fn test_unknown_frequency_is_an_error() {
        let err = "BIWEEKLY".parse::<PaymentFrequency>().unwrap_err();
        assert_eq!(err, ScheduleError::UnknownFrequency("BIWEEKLY".to_string()));
    }

    #[test]
    fn test_generate_id_is_prefixed_and_unique() {
        let a = Project::generate_id();
        let b = Project::generate_id();
        assert!(a.starts_with("project::"));
        assert_ne!(a, b);
    }
}
