//! Calendar helpers: clamped dates, monthly installment schedules and
//! period bucketing. All dates are `NaiveDate`; there is no time of day.

use crate::types::PeriodKey;
use chrono::{Datelike, Months, NaiveDate};

/// Number of days in the given month, or None for an invalid year/month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    NaiveDate::from_ymd_opt(year, month, 1)?;
    Some(first_of_next.pred_opt()?.day())
}

/// Build a date, clamping `day` into the month (Feb 31 -> Feb 28/29).
pub fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let last = days_in_month(year, month)?;
    NaiveDate::from_ymd_opt(year, month, day.clamp(1, last))
}

pub fn year_start(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
}

pub fn year_end(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 12, 31)
}

/// Monthly due dates starting at `first_due`, up to and including `until`.
/// Month-end overflow follows chrono: Jan 31 + 1 month = Feb 28/29.
pub fn monthly_due_dates(first_due: NaiveDate, until: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut k = 0u32;
    while let Some(due) = first_due.checked_add_months(Months::new(k)) {
        if due > until {
            break;
        }
        dates.push(due);
        k += 1;
    }
    dates
}

/// Period bucket key for a date, e.g. `2024-03`.
pub fn period_key(date: NaiveDate) -> PeriodKey {
    date.format("%Y-%m").to_string()
}
