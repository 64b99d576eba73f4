//! Calendar utilities: day enumeration, weekend detection, holiday lookup,
//! and Monday-aligned week windows for report bucketing.

use crate::error::{StaffingError, StaffingResult};
use crate::model::Holiday;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

/// Inclusive day-by-day sequence from `start` to `end`.
pub fn enumerate_days(start: NaiveDate, end: NaiveDate) -> StaffingResult<Vec<NaiveDate>> {
    if start > end {
        return Err(StaffingError::InvalidRange { start, end });
    }
    let len = (end - start).num_days() as usize + 1;
    let mut days = Vec::with_capacity(len);
    let mut day = start;
    while day <= end {
        days.push(day);
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    Ok(days)
}

/// Saturday or Sunday, under the Monday-first week convention used by
/// the weekly buckets.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// True if any holiday record matches `date` exactly and is either
/// country-wide or in the given region.
pub fn is_holiday(date: NaiveDate, region: &str, holidays: &[Holiday]) -> bool {
    holidays.iter().any(|h| h.date == date && h.applies_to(region))
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// One Monday-aligned week, clipped to an overall range.
/// The first and last window of a range may be partial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekWindow {
    /// Monday of the nominal week, used for column labels.
    pub monday: NaiveDate,
    /// First day of the window inside the range.
    pub start: NaiveDate,
    /// Last day of the window inside the range.
    pub end: NaiveDate,
}

/// Partition `[start, end]` into Monday-aligned week windows.
pub fn weeks_in_range(start: NaiveDate, end: NaiveDate) -> StaffingResult<Vec<WeekWindow>> {
    if start > end {
        return Err(StaffingError::InvalidRange { start, end });
    }
    let mut weeks = Vec::new();
    let mut monday = week_start(start);
    while monday <= end {
        let sunday = monday + Duration::days(6);
        weeks.push(WeekWindow {
            monday,
            start: monday.max(start),
            end: sunday.min(end),
        });
        monday += Duration::days(7);
    }
    Ok(weeks)
}
