//! Domain records: people, projects, assignments, holidays.
//!
//! Assignments are the central fact. Their date interval is a closed
//! `[start_date, end_date]` range and they are never updated in place —
//! a range that must be partially overwritten is deleted and recreated
//! by the replace policy.

use crate::types::{AssignmentId, PersonId, ProjectId, Region};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Region label on a holiday record that marks it country-wide.
/// An empty region means the same thing.
pub const NATIONAL_REGION: &str = "NACIONAL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub person_id:     PersonId,
    pub display_name:  String,
    /// Resolves which holiday calendar applies to this person.
    pub region:        Region,
    pub squad_lead_id: Option<PersonId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub project_id:   ProjectId,
    pub code:         String,
    pub display_name: String,
    /// Free-form "tipologia" label, mapped to a staffing bucket by config.
    pub classification: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub assignment_id: AssignmentId,
    pub person_id:     PersonId,
    pub project_id:    ProjectId,
    pub start_date:    NaiveDate,
    pub end_date:      NaiveDate,
    /// Fraction of a working day devoted to the project, 1–100.
    pub allocation_percent: u32,
    #[serde(rename = "type")]
    pub kind:  String,
    pub notes: Option<String>,
}

impl Assignment {
    /// True if `day` falls inside the closed interval.
    pub fn covers(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }

    /// True if the closed intervals `[start_date, end_date]` and
    /// `[start, end]` share at least one day.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && start <= self.end_date
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub date:        NaiveDate,
    pub description: String,
    pub country:     String,
    /// Empty or "NACIONAL" means country-wide.
    pub region:      Region,
}

impl Holiday {
    /// Country-wide holidays apply regardless of a person's region;
    /// regional ones match case-insensitively.
    pub fn applies_to(&self, region: &str) -> bool {
        self.region.is_empty()
            || self.region.eq_ignore_ascii_case(NATIONAL_REGION)
            || self.region.eq_ignore_ascii_case(region)
    }
}
