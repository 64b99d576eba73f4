//! Conflict resolution — turning a detected conflict and a chosen policy
//! into a write plan.
//!
//! The plan is pure data; the store applies it inside one transaction so
//! a half-applied replace can never leave deleted-but-not-recreated rows.

use crate::conflict::{validate_added_capacity, ConflictResult};
use crate::error::StaffingResult;
use crate::model::Assignment;
use crate::types::AssignmentId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How to make room for a conflicting candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPolicy {
    /// The candidate takes exclusive precedence: overlapped assignments
    /// are deleted and recreated truncated around the candidate.
    Replace,
    /// The candidate is layered alongside the existing assignments,
    /// rejected if any day's summed allocation would exceed 100%.
    Add,
}

/// One store mutation. Plans are ordered; deletes of an overlapped
/// assignment precede the inserts of its truncated stubs.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    Insert(Assignment),
    Delete(AssignmentId),
}

/// Build the write plan for a detected conflict under the chosen policy.
/// The add policy re-validates capacity and produces no plan on failure.
pub fn resolve_conflict(
    policy: ResolutionPolicy,
    conflict: &ConflictResult,
    candidate: &Assignment,
    existing: &[Assignment],
) -> StaffingResult<Vec<WriteOp>> {
    match policy {
        ResolutionPolicy::Replace => Ok(replace_plan(conflict, candidate)),
        ResolutionPolicy::Add => {
            validate_added_capacity(candidate, existing)?;
            Ok(vec![WriteOp::Insert(candidate.clone())])
        }
    }
}

/// Delete every conflicting assignment; recreate a left stub ending the
/// day before the candidate and/or a right stub starting the day after,
/// when the original extends beyond the candidate on that side. Stubs get
/// fresh ids; the candidate is inserted unmodified.
fn replace_plan(conflict: &ConflictResult, candidate: &Assignment) -> Vec<WriteOp> {
    let mut plan = Vec::new();
    for a in &conflict.conflicting {
        plan.push(WriteOp::Delete(a.assignment_id.clone()));
        if a.start_date < candidate.start_date {
            if let Some(stub_end) = candidate.start_date.pred_opt() {
                plan.push(WriteOp::Insert(Assignment {
                    assignment_id: Uuid::new_v4().to_string(),
                    end_date: stub_end,
                    ..a.clone()
                }));
            }
        }
        if a.end_date > candidate.end_date {
            if let Some(stub_start) = candidate.end_date.succ_opt() {
                plan.push(WriteOp::Insert(Assignment {
                    assignment_id: Uuid::new_v4().to_string(),
                    start_date: stub_start,
                    ..a.clone()
                }));
            }
        }
    }
    plan.push(WriteOp::Insert(candidate.clone()));
    plan
}
