//! Field rules for incoming commands.
//!
//! Each function returns the first violated rule as a [`ValidationError`].

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::domain::commands::contributor::ContributorInput;
use crate::domain::commands::payment::RecordPaymentCommand;
use crate::domain::commands::project::{CreateProjectCommand, UpdateProjectCommand};
use crate::domain::errors::ValidationError;
use crate::domain::models::{PaymentFrequency, PaymentMethod};

pub const MAX_TITLE_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;
pub const MAX_SCHEDULE_SPAN_YEARS: i32 = 10;

static COLOR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#([0-9A-Fa-f]{3}){1,2}$").expect("color pattern is valid"));

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("url pattern is valid"));

fn require(condition: bool, field: &str, message: &str) -> Result<(), ValidationError> {
    if condition {
        Ok(())
    } else {
        Err(ValidationError::new(field, message))
    }
}

fn validate_project_details(
    title: &str,
    description: &str,
    target_amount: f64,
    default_contribution_amount: f64,
    icon: &str,
    color: &str,
) -> Result<(), ValidationError> {
    require(!title.trim().is_empty(), "title", "Title is required")?;
    require(
        title.chars().count() <= MAX_TITLE_LENGTH,
        "title",
        "Title must be less than 100 characters",
    )?;
    require(!description.trim().is_empty(), "description", "Description is required")?;
    require(
        description.chars().count() <= MAX_DESCRIPTION_LENGTH,
        "description",
        "Description must be less than 500 characters",
    )?;
    require(
        target_amount.is_finite() && target_amount >= 1.0,
        "targetAmount",
        "Target amount must be at least 1",
    )?;
    require(
        default_contribution_amount.is_finite() && default_contribution_amount > 0.0,
        "defaultContributionAmount",
        "Must not be zero",
    )?;
    require(!icon.trim().is_empty(), "icon", "Icon is required")?;
    require(COLOR_PATTERN.is_match(color), "color", "Provide a valid color")?;
    Ok(())
}

/// Schedule-defining fields of a new project
pub fn validate_project_period(
    start_date: NaiveDate,
    end_date: NaiveDate,
    payment_day: u32,
    frequency: PaymentFrequency,
) -> Result<(), ValidationError> {
    require(
        (1..=31).contains(&payment_day),
        "paymentDay",
        "Invalid payment day",
    )?;

    match frequency {
        PaymentFrequency::Weekly => require(payment_day <= 7, "paymentDay", "Must not exceed 7."),
        PaymentFrequency::Monthly | PaymentFrequency::Quarterly => require(
            start_date < end_date,
            "endDate",
            "End date must be later than start date.",
        ),
        PaymentFrequency::OneTime => Ok(()),
    }?;

    require(
        start_date <= end_date,
        "endDate",
        "End date must not be before start date.",
    )?;
    validate_schedule_span(start_date, end_date)
}

/// Bounds the number of periods a schedule can produce
pub fn validate_schedule_span(start_date: NaiveDate, end_date: NaiveDate) -> Result<(), ValidationError> {
    let within = match start_date.with_year(start_date.year() + MAX_SCHEDULE_SPAN_YEARS) {
        Some(limit) => end_date <= limit,
        // Feb 29 start, or a year past chrono's range
        None => (end_date - start_date).num_days() <= 366 * i64::from(MAX_SCHEDULE_SPAN_YEARS),
    };
    require(
        within,
        "endDate",
        &format!("Schedule must not span more than {} years.", MAX_SCHEDULE_SPAN_YEARS),
    )
}

pub fn validate_create_project(command: &CreateProjectCommand) -> Result<(), ValidationError> {
    validate_project_details(
        &command.title,
        &command.description,
        command.target_amount,
        command.default_contribution_amount,
        &command.icon,
        &command.color,
    )?;
    validate_project_period(
        command.start_date,
        command.end_date,
        command.payment_day,
        command.payment_frequency,
    )
}

pub fn validate_update_project(command: &UpdateProjectCommand) -> Result<(), ValidationError> {
    validate_project_details(
        &command.title,
        &command.description,
        command.target_amount,
        command.default_contribution_amount,
        &command.icon,
        &command.color,
    )
}

fn validate_contributor_fields(input: &ContributorInput, prefix: &str) -> Result<(), ValidationError> {
    require(
        !input.name.trim().is_empty(),
        &format!("{}name", prefix),
        "Name is required.",
    )?;
    require(
        input.contribution_amount.is_finite() && input.contribution_amount > 0.0,
        &format!("{}contributionAmount", prefix),
        "Invalid amount.",
    )?;
    if let Some(email) = input.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
        require(
            EMAIL_PATTERN.is_match(email),
            &format!("{}email", prefix),
            "Invalid email.",
        )?;
    }
    Ok(())
}

pub fn validate_contributor(input: &ContributorInput) -> Result<(), ValidationError> {
    validate_contributor_fields(input, "")
}

/// A batch must be non-empty and its names unique, ignoring case
pub fn validate_contributor_batch(inputs: &[ContributorInput]) -> Result<(), ValidationError> {
    require(
        !inputs.is_empty(),
        "contributors",
        "At least one contributor is required.",
    )?;

    let mut seen = HashSet::new();
    for (index, input) in inputs.iter().enumerate() {
        validate_contributor_fields(input, &format!("contributors[{}].", index))?;
        if !seen.insert(input.name.trim().to_lowercase()) {
            return Err(ValidationError::new(
                format!("contributors[{}].name", index),
                "Already exists.",
            ));
        }
    }
    Ok(())
}

pub fn validate_record_payment(command: &RecordPaymentCommand) -> Result<(), ValidationError> {
    require(
        !command.schedule_id.trim().is_empty(),
        "scheduleId",
        "Payment schedule is required.",
    )?;
    require(
        command.actual_amount_paid.is_finite() && command.actual_amount_paid > 0.0,
        "actualAmountPaid",
        "Invalid amount.",
    )?;
    require(
        command.payment_method != PaymentMethod::Unpaid,
        "paymentMethod",
        "Invalid payment method.",
    )?;
    if let Some(proof) = command.proof_of_payment.as_deref().filter(|p| !p.is_empty()) {
        require(URL_PATTERN.is_match(proof), "proofOfPayment", "Invalid image.")?;
    }
    Ok(())
}
