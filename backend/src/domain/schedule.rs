//! Payment schedule generation.
//!
//! Given a project's period, recurrence and anchor day, [`generate_payment_dates`]
//! produces the due dates every contributor owes a payment on. The result is
//! ascending, duplicate-free, and every date lies inside `[start, end]`.
//!
//! - `OneTime`: the start date alone, whatever the payment day.
//! - `Weekly`: `payment_day % 7` days after the Sunday starting the week of
//!   `start`, pushed one week forward if that precedes `start`, then every
//!   seven days.
//! - `Monthly` / `Quarterly`: the payment day of each month (every third month
//!   for quarterly) counted from the month containing `start`, clamped to the
//!   month's last day. Periods whose due date falls outside the range are
//!   skipped.
//!
//! A start after the end yields an empty schedule for the recurring modes.

use chrono::NaiveDate;

use crate::domain::calendar;
use crate::domain::errors::ScheduleError;
use crate::domain::models::PaymentFrequency;

pub fn generate_payment_dates(
    start_date: NaiveDate,
    end_date: NaiveDate,
    payment_day: u32,
    frequency: PaymentFrequency,
) -> Result<Vec<NaiveDate>, ScheduleError> {
    validate_payment_day(payment_day, frequency)?;

    match frequency {
        PaymentFrequency::OneTime => Ok(vec![start_date]),
        PaymentFrequency::Weekly => weekly_dates(start_date, end_date, payment_day),
        PaymentFrequency::Monthly => monthly_dates(start_date, end_date, payment_day, 1),
        PaymentFrequency::Quarterly => monthly_dates(start_date, end_date, payment_day, 3),
    }
}

pub fn validate_payment_day(payment_day: u32, frequency: PaymentFrequency) -> Result<(), ScheduleError> {
    match frequency.payment_day_bounds() {
        Some((min, max)) if payment_day < min || payment_day > max => {
            Err(ScheduleError::InvalidPaymentDay {
                day: payment_day,
                frequency,
                min,
                max,
            })
        }
        _ => Ok(()),
    }
}

fn weekly_dates(
    start_date: NaiveDate,
    end_date: NaiveDate,
    payment_day: u32,
) -> Result<Vec<NaiveDate>, ScheduleError> {
    let week_start =
        calendar::start_of_week(start_date).ok_or(ScheduleError::DateOverflow(start_date))?;
    let mut current = calendar::add_days(week_start, (payment_day % 7) as u64)
        .ok_or(ScheduleError::DateOverflow(week_start))?;

    if current < start_date {
        current = calendar::add_days(current, 7).ok_or(ScheduleError::DateOverflow(current))?;
    }

    let mut dates = Vec::new();
    while current <= end_date {
        if calendar::is_within(current, start_date, end_date) {
            dates.push(current);
        }
        current = match calendar::add_days(current, 7) {
            Some(next) => next,
            None => break,
        };
    }

    Ok(dates)
}

fn monthly_dates(
    start_date: NaiveDate,
    end_date: NaiveDate,
    payment_day: u32,
    months_per_period: u32,
) -> Result<Vec<NaiveDate>, ScheduleError> {
    let mut anchor = calendar::start_of_month(start_date);

    let mut dates = Vec::new();
    while anchor <= end_date {
        let due = calendar::day_in_month_clamped(anchor, payment_day);
        if calendar::is_within(due, start_date, end_date) {
            dates.push(due);
        }
        anchor = match calendar::add_months(anchor, months_per_period) {
            Some(next) => next,
            None => break,
        };
    }

    Ok(dates)
}
