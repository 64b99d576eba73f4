//! Assignment queries and the transactional write path.

use super::{date_from_sql, date_to_sql, StaffingStore};
use crate::error::StaffingResult;
use crate::model::Assignment;
use crate::resolution::WriteOp;
use crate::types::PersonId;
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

/// Read filter for the assignment collection. The range filter keeps
/// every assignment whose interval intersects it.
#[derive(Debug, Clone, Default)]
pub struct AssignmentFilter {
    pub person_id: Option<PersonId>,
    pub range: Option<(NaiveDate, NaiveDate)>,
}

const SELECT_COLS: &str = "SELECT assignment_id, person_id, project_id, start_date, end_date,
            allocation_percent, type, notes
     FROM assignment";

fn row_to_assignment(r: &Row<'_>) -> rusqlite::Result<Assignment> {
    Ok(Assignment {
        assignment_id: r.get(0)?,
        person_id: r.get(1)?,
        project_id: r.get(2)?,
        start_date: date_from_sql(&r.get::<_, String>(3)?)?,
        end_date: date_from_sql(&r.get::<_, String>(4)?)?,
        allocation_percent: r.get::<_, i64>(5)? as u32,
        kind: r.get(6)?,
        notes: r.get(7)?,
    })
}

fn insert_assignment_row(conn: &Connection, a: &Assignment) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO assignment (assignment_id, person_id, project_id, start_date,
            end_date, allocation_percent, type, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            a.assignment_id,
            a.person_id,
            a.project_id,
            date_to_sql(a.start_date),
            date_to_sql(a.end_date),
            a.allocation_percent as i64,
            a.kind,
            a.notes,
        ],
    )?;
    Ok(())
}

impl StaffingStore {
    pub fn insert_assignment(&self, assignment: &Assignment) -> StaffingResult<()> {
        insert_assignment_row(&self.conn, assignment)?;
        Ok(())
    }

    pub fn delete_assignment(&self, assignment_id: &str) -> StaffingResult<()> {
        self.conn.execute(
            "DELETE FROM assignment WHERE assignment_id = ?1",
            params![assignment_id],
        )?;
        Ok(())
    }

    /// List assignments matching the filter, ordered by start date then id.
    /// The person filter runs in SQL; range intersection is applied on the
    /// decoded rows (per-person assignment sets are small).
    pub fn list_assignments(&self, filter: &AssignmentFilter) -> StaffingResult<Vec<Assignment>> {
        let mut result = match &filter.person_id {
            Some(person_id) => {
                let mut stmt = self.conn.prepare(&format!(
                    "{SELECT_COLS} WHERE person_id = ?1 ORDER BY start_date, assignment_id"
                ))?;
                let rows = stmt.query_map(params![person_id], row_to_assignment)?;
                let mut out = Vec::new();
                for r in rows {
                    out.push(r?);
                }
                out
            }
            None => {
                let mut stmt = self
                    .conn
                    .prepare(&format!("{SELECT_COLS} ORDER BY start_date, assignment_id"))?;
                let rows = stmt.query_map([], row_to_assignment)?;
                let mut out = Vec::new();
                for r in rows {
                    out.push(r?);
                }
                out
            }
        };
        if let Some((start, end)) = filter.range {
            result.retain(|a| a.overlaps(start, end));
        }
        Ok(result)
    }

    /// Apply a write plan inside one transaction. Either every delete and
    /// insert commits, or the assignment set is untouched.
    pub fn apply_plan(&mut self, plan: &[WriteOp]) -> StaffingResult<()> {
        let tx = self.conn.transaction()?;
        for op in plan {
            match op {
                WriteOp::Delete(assignment_id) => {
                    tx.execute(
                        "DELETE FROM assignment WHERE assignment_id = ?1",
                        params![assignment_id],
                    )?;
                }
                WriteOp::Insert(assignment) => {
                    insert_assignment_row(&tx, assignment)?;
                }
            }
        }
        tx.commit()?;
        Ok(())
    }
}
