//! Pay period boundary resolution.
//!
//! This module maps a period-end date and a pay cadence to the first day of
//! the period the run covers.

use chrono::{Datelike, Days, NaiveDate};
use tracing::warn;

use crate::models::Frequency;

/// Days subtracted from the period end for a weekly period.
const WEEKLY_SPAN_DAYS: u64 = 6;

/// Days subtracted from the period end for a bi-weekly period.
const BI_WEEKLY_SPAN_DAYS: u64 = 13;

/// Last day of the first half of a semi-monthly period.
const SEMI_MONTHLY_SPLIT_DAY: u32 = 15;

/// Resolves the first day of the pay period ending on `period_end`.
///
/// - `monthly`: the first of `period_end`'s month
/// - `weekly`: `period_end` − 6 days
/// - `bi_weekly`: `period_end` − 13 days
/// - `semi_monthly`: the 16th when `period_end` falls after the 15th, else the 1st
/// - `custom`: the first of the month, with a warning event
///
/// Never fails.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::resolve_period_start;
/// use payroll_engine::models::Frequency;
/// use chrono::NaiveDate;
///
/// let end = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
/// assert_eq!(
///     resolve_period_start(end, Frequency::SemiMonthly),
///     NaiveDate::from_ymd_opt(2025, 1, 16).unwrap()
/// );
/// assert_eq!(
///     resolve_period_start(end, Frequency::Weekly),
///     NaiveDate::from_ymd_opt(2025, 1, 25).unwrap()
/// );
/// ```
pub fn resolve_period_start(period_end: NaiveDate, frequency: Frequency) -> NaiveDate {
    match frequency {
        Frequency::Monthly => first_of_month(period_end),
        Frequency::Weekly => days_before(period_end, WEEKLY_SPAN_DAYS),
        Frequency::BiWeekly => days_before(period_end, BI_WEEKLY_SPAN_DAYS),
        Frequency::SemiMonthly => {
            if period_end.day() > SEMI_MONTHLY_SPLIT_DAY {
                period_end
                    .with_day(SEMI_MONTHLY_SPLIT_DAY + 1)
                    .unwrap_or(period_end)
            } else {
                first_of_month(period_end)
            }
        }
        Frequency::Custom => {
            warn!(
                period_end = %period_end,
                frequency = %frequency,
                "No period rule for frequency; falling back to first of month"
            );
            first_of_month(period_end)
        }
    }
}

/// Returns true if the frequency has no dedicated period rule.
pub fn is_fallback_frequency(frequency: Frequency) -> bool {
    frequency == Frequency::Custom
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}
