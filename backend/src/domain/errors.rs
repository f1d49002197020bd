//! Error types shared by the domain services.
//!
//! Services return [`DomainError`]; the REST layer turns each variant into an
//! HTTP status code. Repositories keep returning `anyhow::Result` and are
//! folded into [`DomainError::Storage`] at the service boundary.

use chrono::NaiveDate;

use crate::domain::models::project::PaymentFrequency;

pub type DomainResult<T> = Result<T, DomainError>;

/// Rejected input to the payment schedule generator
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("Invalid payment day {day} for {frequency} schedule: must be between {min} and {max}")]
    InvalidPaymentDay {
        day: u32,
        frequency: PaymentFrequency,
        min: u32,
        max: u32,
    },
    #[error("Unknown payment frequency: {0}")]
    UnknownFrequency(String),
    #[error("Date arithmetic overflowed after {0}")]
    DateOverflow(NaiveDate),
}

/// A single field that failed validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error("Storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        DomainError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::Validation(ValidationError::new(field, message))
    }
}
