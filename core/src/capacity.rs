//! Capacity aggregation — per-person and team utilization over a range.
//!
//! Definitions used everywhere:
//!   - work_days = total_days − weekend_days. Holidays stay a separate
//!     informational bucket and are NOT removed from the work-day base.
//!   - effective days = productive days in the clipped interval ×
//!     allocation_percent / 100. Productive means non-weekend, non-holiday.
//!   - unassigned_days = max(0, work_days − holiday_days − assigned_days).
//!   - team available_capacity_percent = team unassigned_days over the
//!     raw team work_days, times 100, floored at 0.
//!
//! Pure computation: inputs are never mutated, recomputing over the same
//! inputs yields identical output.

use crate::calendar::{enumerate_days, is_holiday, is_weekend};
use crate::error::StaffingResult;
use crate::model::{Assignment, Holiday, Person};
use crate::types::{PersonId, ProjectId};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProjectAllocation {
    pub project_id: ProjectId,
    pub effective_days: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PersonCapacitySummary {
    pub person_id: PersonId,
    pub display_name: String,
    pub total_days: u32,
    pub weekend_days: u32,
    /// Non-weekend holidays only; a holiday on a Saturday counts as
    /// a weekend day, not a holiday day.
    pub holiday_days: u32,
    pub work_days: u32,
    pub assigned_days: f64,
    pub unassigned_days: f64,
    /// Per-project effective-day totals, ordered by project id.
    pub by_project: Vec<ProjectAllocation>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TeamCapacitySummary {
    pub total_days: u32,
    pub weekend_days: u32,
    pub holiday_days: u32,
    pub work_days: u32,
    pub assigned_days: f64,
    pub unassigned_days: f64,
    /// unassigned over the team work-day capacity, floored at 0.
    pub available_capacity_percent: f64,
    pub persons: Vec<PersonCapacitySummary>,
}

/// Aggregate one person's capacity over `[start, end]`.
pub fn compute_person_capacity(
    person: &Person,
    start: NaiveDate,
    end: NaiveDate,
    assignments: &[Assignment],
    holidays: &[Holiday],
) -> StaffingResult<PersonCapacitySummary> {
    let days = enumerate_days(start, end)?;
    let total_days = days.len() as u32;
    let weekend_days = days.iter().filter(|d| is_weekend(**d)).count() as u32;
    let holiday_days = days
        .iter()
        .filter(|d| !is_weekend(**d) && is_holiday(**d, &person.region, holidays))
        .count() as u32;
    let work_days = total_days - weekend_days;

    let mut by_project: BTreeMap<ProjectId, f64> = BTreeMap::new();
    let mut assigned_days = 0.0;

    for a in assignments
        .iter()
        .filter(|a| a.person_id == person.person_id && a.overlaps(start, end))
    {
        let clip_start = a.start_date.max(start);
        let clip_end = a.end_date.min(end);
        let mut productive: u32 = 0;
        let mut day = clip_start;
        while day <= clip_end {
            if !is_weekend(day) && !is_holiday(day, &person.region, holidays) {
                productive += 1;
            }
            day = match day.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }
        let effective = f64::from(productive) * f64::from(a.allocation_percent) / 100.0;
        if effective > 0.0 {
            *by_project.entry(a.project_id.clone()).or_insert(0.0) += effective;
            assigned_days += effective;
        }
    }

    // holiday_days counts non-weekend days only, so this never underflows.
    let base = f64::from(work_days - holiday_days);
    let unassigned_days = (base - assigned_days).max(0.0);

    Ok(PersonCapacitySummary {
        person_id: person.person_id.clone(),
        display_name: person.display_name.clone(),
        total_days,
        weekend_days,
        holiday_days,
        work_days,
        assigned_days,
        unassigned_days,
        by_project: by_project
            .into_iter()
            .map(|(project_id, effective_days)| ProjectAllocation {
                project_id,
                effective_days,
            })
            .collect(),
    })
}

/// Aggregate a set of people into a team summary: per-person metrics
/// summed, plus the available-capacity percentage over the team's
/// work-day base.
pub fn compute_team_capacity(
    people: &[Person],
    start: NaiveDate,
    end: NaiveDate,
    assignments: &[Assignment],
    holidays: &[Holiday],
) -> StaffingResult<TeamCapacitySummary> {
    let mut persons = Vec::with_capacity(people.len());
    for person in people {
        persons.push(compute_person_capacity(
            person,
            start,
            end,
            assignments,
            holidays,
        )?);
    }

    let total_days = persons.iter().map(|s| s.total_days).sum();
    let weekend_days = persons.iter().map(|s| s.weekend_days).sum();
    let holiday_days = persons.iter().map(|s| s.holiday_days).sum();
    let work_days: u32 = persons.iter().map(|s| s.work_days).sum();
    let assigned_days = persons.iter().map(|s| s.assigned_days).sum();
    let unassigned_days: f64 = persons.iter().map(|s| s.unassigned_days).sum();

    let available_capacity_percent = if work_days > 0 {
        (unassigned_days / f64::from(work_days) * 100.0).max(0.0)
    } else {
        0.0
    };

    Ok(TeamCapacitySummary {
        total_days,
        weekend_days,
        holiday_days,
        work_days,
        assigned_days,
        unassigned_days,
        available_capacity_percent,
        persons,
    })
}
