//! Conflict detection over a person's assignment set.
//!
//! A conflict is one or more existing assignments for the same person whose
//! date interval overlaps a candidate's interval. Detection walks the
//! candidate's days and collects every overlapped assignment plus the exact
//! set of overlapping days; resolution policy is the caller's choice.
//!
//! RULE: detection never writes. The write plan comes from resolution.

use crate::calendar::{enumerate_days, is_weekend};
use crate::config::StaffingConfig;
use crate::error::{DayOverload, StaffingError, StaffingResult};
use crate::model::Assignment;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;

/// Outcome of checking a candidate against the stored assignment set.
/// An empty conflict set means the candidate can be persisted directly.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConflictResult {
    /// Overlapped assignments, deduplicated by id, ordered by start date.
    pub conflicting: Vec<Assignment>,
    /// Days of the candidate's interval covered by at least one
    /// existing assignment, ascending.
    pub conflict_days: Vec<NaiveDate>,
}

impl ConflictResult {
    pub fn is_empty(&self) -> bool {
        self.conflicting.is_empty()
    }
}

/// Check a candidate assignment against the existing collection.
///
/// Only assignments of the candidate's person participate; the detector
/// filters even if the caller already did. A candidate whose interval
/// covers a Saturday or Sunday is rejected up front when the config says
/// so, before any overlap scanning.
pub fn check_conflict(
    candidate: &Assignment,
    existing: &[Assignment],
    config: &StaffingConfig,
) -> StaffingResult<ConflictResult> {
    let days = enumerate_days(candidate.start_date, candidate.end_date)?;

    if config.reject_weekend_assignments {
        if let Some(day) = days.iter().copied().find(|d| is_weekend(*d)) {
            return Err(StaffingError::WeekendAssignment { date: day });
        }
    }

    let own: Vec<&Assignment> = existing
        .iter()
        .filter(|a| {
            a.person_id == candidate.person_id && a.assignment_id != candidate.assignment_id
        })
        .collect();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut conflicting: Vec<Assignment> = Vec::new();
    let mut conflict_days: Vec<NaiveDate> = Vec::new();

    for &day in &days {
        let mut covered = false;
        for a in &own {
            if a.covers(day) {
                covered = true;
                if seen.insert(a.assignment_id.as_str()) {
                    conflicting.push((*a).clone());
                }
            }
        }
        if covered {
            conflict_days.push(day);
        }
    }

    conflicting.sort_by(|x, y| {
        (x.start_date, &x.assignment_id).cmp(&(y.start_date, &y.assignment_id))
    });

    Ok(ConflictResult {
        conflicting,
        conflict_days,
    })
}

/// Summed allocation percent of all assignments covering `day`.
pub fn daily_allocation(day: NaiveDate, assignments: &[Assignment]) -> u32 {
    assignments
        .iter()
        .filter(|a| a.covers(day))
        .map(|a| a.allocation_percent)
        .sum()
}

/// The add-policy capacity rule: layering the candidate on top of the
/// existing assignments must not push any day's summed allocation above
/// 100%. Reports every offending day, not just the first.
pub fn validate_added_capacity(
    candidate: &Assignment,
    existing: &[Assignment],
) -> StaffingResult<()> {
    let days = enumerate_days(candidate.start_date, candidate.end_date)?;
    let own: Vec<&Assignment> = existing
        .iter()
        .filter(|a| {
            a.person_id == candidate.person_id && a.assignment_id != candidate.assignment_id
        })
        .collect();

    let mut overloads = Vec::new();
    for day in days {
        let total: u32 = own
            .iter()
            .filter(|a| a.covers(day))
            .map(|a| a.allocation_percent)
            .sum::<u32>()
            + candidate.allocation_percent;
        if total > 100 {
            overloads.push(DayOverload {
                date: day,
                total_percent: total,
            });
        }
    }

    if overloads.is_empty() {
        Ok(())
    } else {
        Err(StaffingError::CapacityExceeded { days: overloads })
    }
}
