//! Weekly staffing table — per-person, per-week bucket classification.
//!
//! Each non-weekend, non-holiday day's allocation is classified by the
//! assigned project's bucket; the unallocated remainder of a day counts
//! as availability. Weekend and holiday days land in the separate
//! unavailable bucket. One row per person, one column-group per week.

use crate::calendar::{is_holiday, is_weekend, weeks_in_range, WeekWindow};
use crate::config::StaffingConfig;
use crate::error::StaffingResult;
use crate::model::{Assignment, Holiday, Person, Project};
use crate::types::{PersonId, ProjectId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fixed set of reporting buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffingBucket {
    BillableProject,
    InternalProduct,
    Availability,
    Management,
    Support,
    OtherBillable,
    Unavailable,
}

impl StaffingBucket {
    /// Column order of the bucket group inside a week.
    pub const ALL: [StaffingBucket; 7] = [
        StaffingBucket::BillableProject,
        StaffingBucket::InternalProduct,
        StaffingBucket::Availability,
        StaffingBucket::Management,
        StaffingBucket::Support,
        StaffingBucket::OtherBillable,
        StaffingBucket::Unavailable,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::BillableProject => "billable_project",
            Self::InternalProduct => "internal_product",
            Self::Availability => "availability",
            Self::Management => "management",
            Self::Support => "support",
            Self::OtherBillable => "other_billable",
            Self::Unavailable => "unavailable",
        }
    }
}

/// Fractional days per bucket for one person in one week window.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct WeekCell {
    pub billable_project: f64,
    pub internal_product: f64,
    pub availability: f64,
    pub management: f64,
    pub support: f64,
    pub other_billable: f64,
    pub unavailable: f64,
}

impl WeekCell {
    pub fn add(&mut self, bucket: StaffingBucket, days: f64) {
        match bucket {
            StaffingBucket::BillableProject => self.billable_project += days,
            StaffingBucket::InternalProduct => self.internal_product += days,
            StaffingBucket::Availability => self.availability += days,
            StaffingBucket::Management => self.management += days,
            StaffingBucket::Support => self.support += days,
            StaffingBucket::OtherBillable => self.other_billable += days,
            StaffingBucket::Unavailable => self.unavailable += days,
        }
    }

    pub fn get(&self, bucket: StaffingBucket) -> f64 {
        match bucket {
            StaffingBucket::BillableProject => self.billable_project,
            StaffingBucket::InternalProduct => self.internal_product,
            StaffingBucket::Availability => self.availability,
            StaffingBucket::Management => self.management,
            StaffingBucket::Support => self.support,
            StaffingBucket::OtherBillable => self.other_billable,
            StaffingBucket::Unavailable => self.unavailable,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeeklyStaffingRow {
    pub person_id: PersonId,
    pub display_name: String,
    /// Parallel to the table's week windows.
    pub weeks: Vec<WeekCell>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeeklyStaffingTable {
    pub weeks: Vec<WeekWindow>,
    pub rows: Vec<WeeklyStaffingRow>,
}

/// Build the weekly staffing table for a set of people over `[start, end]`.
pub fn compute_weekly_staffing(
    people: &[Person],
    start: NaiveDate,
    end: NaiveDate,
    assignments: &[Assignment],
    holidays: &[Holiday],
    projects: &[Project],
    config: &StaffingConfig,
) -> StaffingResult<WeeklyStaffingTable> {
    let weeks = weeks_in_range(start, end)?;

    let bucket_by_project: HashMap<&ProjectId, StaffingBucket> = projects
        .iter()
        .map(|p| (&p.project_id, config.bucket_for(&p.classification)))
        .collect();

    let mut rows = Vec::with_capacity(people.len());
    for person in people {
        let own: Vec<&Assignment> = assignments
            .iter()
            .filter(|a| a.person_id == person.person_id)
            .collect();

        let mut cells = Vec::with_capacity(weeks.len());
        for window in &weeks {
            let mut cell = WeekCell::default();
            let mut day = window.start;
            while day <= window.end {
                if is_weekend(day) || is_holiday(day, &person.region, holidays) {
                    cell.add(StaffingBucket::Unavailable, 1.0);
                } else {
                    let mut allocated = 0.0;
                    for a in own.iter().filter(|a| a.covers(day)) {
                        let fraction = f64::from(a.allocation_percent) / 100.0;
                        let bucket = bucket_by_project
                            .get(&a.project_id)
                            .copied()
                            .unwrap_or(StaffingBucket::OtherBillable);
                        cell.add(bucket, fraction);
                        allocated += fraction;
                    }
                    if allocated < 1.0 {
                        cell.add(StaffingBucket::Availability, 1.0 - allocated);
                    }
                }
                day = match day.succ_opt() {
                    Some(next) => next,
                    None => break,
                };
            }
            cells.push(cell);
        }

        rows.push(WeeklyStaffingRow {
            person_id: person.person_id.clone(),
            display_name: person.display_name.clone(),
            weeks: cells,
        });
    }

    Ok(WeeklyStaffingTable { weeks, rows })
}
