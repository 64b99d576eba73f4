//! The staffing engine — the facade the dashboard and exporters call.
//!
//! CONTROL FLOW (fixed, mirrors the interactive edit loop):
//!   1. caller builds a candidate assignment
//!   2. check_conflict runs against the person's stored assignments
//!   3. on conflict, the caller picks a policy; resolution builds a plan
//!   4. the store applies the plan in one transaction
//!   5. capacity and staffing reports recompute on demand from fresh reads
//!
//! RULES:
//!   - Every assignment write goes through the conflict gate. There is no
//!     side door; imports use the same path.
//!   - Reports are pure recomputation over snapshots read from the store,
//!     never cached.

use crate::{
    capacity::{self, PersonCapacitySummary, TeamCapacitySummary},
    config::StaffingConfig,
    conflict::{self, ConflictResult},
    error::{StaffingError, StaffingResult},
    import::{self, ImportRow, RowRejection},
    model::Assignment,
    resolution::{self, ResolutionPolicy, WriteOp},
    staffing::{self, WeeklyStaffingTable},
    store::{AssignmentFilter, StaffingStore},
    types::PersonId,
};
use chrono::NaiveDate;

pub struct StaffingEngine {
    config: StaffingConfig,
    store: StaffingStore,
}

/// What happened to a batch of imported rows.
#[derive(Debug, Default)]
pub struct ImportSummary {
    pub persons: usize,
    pub holidays: usize,
    pub assignments: usize,
    pub rejected: Vec<RowRejection>,
}

impl StaffingEngine {
    pub fn new(config: StaffingConfig, store: StaffingStore) -> Self {
        Self { config, store }
    }

    /// Build an engine with config loaded from the data/ directory.
    pub fn build(data_dir: &str, store: StaffingStore) -> StaffingResult<Self> {
        let config = StaffingConfig::load(data_dir)?;
        Ok(Self::new(config, store))
    }

    /// Migrated in-memory engine with test config. The analogue of the
    /// dashboard wiring, for tests and tooling.
    pub fn in_memory() -> StaffingResult<Self> {
        let store = StaffingStore::in_memory()?;
        store.migrate()?;
        Ok(Self::new(StaffingConfig::default_test(), store))
    }

    pub fn config(&self) -> &StaffingConfig {
        &self.config
    }

    pub fn store(&self) -> &StaffingStore {
        &self.store
    }

    fn person_assignments(&self, person_id: &str) -> StaffingResult<Vec<Assignment>> {
        self.store.list_assignments(&AssignmentFilter {
            person_id: Some(person_id.to_string()),
            range: None,
        })
    }

    /// Check a candidate against the person's stored assignments.
    pub fn check_conflict(&self, candidate: &Assignment) -> StaffingResult<ConflictResult> {
        let existing = self.person_assignments(&candidate.person_id)?;
        conflict::check_conflict(candidate, &existing, &self.config)
    }

    /// Create an assignment, resolving any conflict with the given policy.
    /// Without a conflict the candidate is inserted directly under either
    /// policy. Returns the conflict that was resolved (possibly empty).
    pub fn create_assignment(
        &mut self,
        candidate: &Assignment,
        policy: ResolutionPolicy,
    ) -> StaffingResult<ConflictResult> {
        let existing = self.person_assignments(&candidate.person_id)?;
        let conflict = conflict::check_conflict(candidate, &existing, &self.config)?;

        let plan = if conflict.is_empty() {
            vec![WriteOp::Insert(candidate.clone())]
        } else {
            log::info!(
                "conflict: {} assignment(s) overlap candidate for {} on {} day(s)",
                conflict.conflicting.len(),
                candidate.person_id,
                conflict.conflict_days.len(),
            );
            resolution::resolve_conflict(policy, &conflict, candidate, &existing)?
        };

        self.store.apply_plan(&plan)?;
        log::debug!(
            "applied {} write op(s) for person {}",
            plan.len(),
            candidate.person_id
        );
        Ok(conflict)
    }

    /// Capacity summary for one person over `[start, end]`.
    pub fn person_capacity(
        &self,
        person_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StaffingResult<PersonCapacitySummary> {
        let person = self
            .store
            .get_person(person_id)?
            .ok_or_else(|| StaffingError::PersonNotFound {
                person_id: person_id.to_string(),
            })?;
        let assignments = self.person_assignments(person_id)?;
        let holidays = self.store.list_holidays(Some((start, end)))?;
        capacity::compute_person_capacity(&person, start, end, &assignments, &holidays)
    }

    /// Capacity summary for every person in the store.
    pub fn team_capacity(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StaffingResult<TeamCapacitySummary> {
        let people = self.store.list_persons()?;
        let assignments = self.store.list_assignments(&AssignmentFilter {
            person_id: None,
            range: Some((start, end)),
        })?;
        let holidays = self.store.list_holidays(Some((start, end)))?;
        capacity::compute_team_capacity(&people, start, end, &assignments, &holidays)
    }

    /// Week-bucketed staffing table for every person in the store.
    pub fn weekly_staffing(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StaffingResult<WeeklyStaffingTable> {
        let people = self.store.list_persons()?;
        let assignments = self.store.list_assignments(&AssignmentFilter {
            person_id: None,
            range: Some((start, end)),
        })?;
        let holidays = self.store.list_holidays(Some((start, end)))?;
        let projects = self.store.list_projects()?;
        staffing::compute_weekly_staffing(
            &people,
            start,
            end,
            &assignments,
            &holidays,
            &projects,
            &self.config,
        )
    }

    /// Validate and load a batch of imported rows. Reference rows go
    /// straight to the store; assignment rows pass through the conflict
    /// gate with the add policy, and policy failures become per-row
    /// rejections. Store failures abort the whole import.
    pub fn import_rows(&mut self, rows: &[ImportRow]) -> StaffingResult<ImportSummary> {
        let validated = import::validate_rows(rows);
        let mut summary = ImportSummary {
            rejected: validated.rejected,
            ..ImportSummary::default()
        };

        for person in &validated.persons {
            self.store.insert_person(person)?;
            summary.persons += 1;
        }
        for holiday in &validated.holidays {
            self.store.insert_holiday(holiday)?;
            summary.holidays += 1;
        }
        for (row, assignment) in &validated.assignments {
            match self.create_assignment(assignment, ResolutionPolicy::Add) {
                Ok(_) => summary.assignments += 1,
                Err(
                    e @ (StaffingError::WeekendAssignment { .. }
                    | StaffingError::CapacityExceeded { .. }
                    | StaffingError::InvalidRange { .. }),
                ) => {
                    log::warn!("import: row {row} rejected: {e}");
                    summary.rejected.push(RowRejection {
                        row: *row,
                        reason: e.to_string(),
                    });
                }
                Err(other) => return Err(other),
            }
        }

        log::info!(
            "import: {} person(s), {} holiday(s), {} assignment(s), {} rejected",
            summary.persons,
            summary.holidays,
            summary.assignments,
            summary.rejected.len(),
        );
        Ok(summary)
    }

    /// Load a full demo data set. Assignments go through the conflict
    /// gate like any other write.
    pub fn load_demo_data(&mut self, data: &crate::demo::DemoDataSet) -> StaffingResult<()> {
        for person in &data.persons {
            self.store.insert_person(person)?;
        }
        for project in &data.projects {
            self.store.insert_project(project)?;
        }
        for holiday in &data.holidays {
            self.store.insert_holiday(holiday)?;
        }
        for assignment in &data.assignments {
            self.create_assignment(assignment, ResolutionPolicy::Add)?;
        }
        Ok(())
    }

    /// Assignments currently stored for a person, for display flows.
    pub fn assignments_for(&self, person_id: &PersonId) -> StaffingResult<Vec<Assignment>> {
        self.person_assignments(person_id)
    }
}
