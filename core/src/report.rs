//! Report shaping — the row/column structures consumed by on-screen
//! tables and the spreadsheet/PDF exporters. No I/O happens here.

use crate::capacity::TeamCapacitySummary;
use crate::model::Project;
use crate::staffing::{StaffingBucket, WeeklyStaffingTable};
use crate::types::{PersonId, ProjectId};
use serde::Serialize;
use std::collections::HashMap;

/// Flat per-person/per-project row for on-screen display.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AllocationRow {
    pub person_id: PersonId,
    pub person_name: String,
    pub project_id: ProjectId,
    pub project_code: String,
    pub project_name: String,
    pub effective_days: f64,
}

/// Expand a team summary into flat allocation rows with resolved
/// project names. Projects missing from the reference list keep their id
/// as code and name rather than dropping the row.
pub fn allocation_rows(team: &TeamCapacitySummary, projects: &[Project]) -> Vec<AllocationRow> {
    let by_id: HashMap<&ProjectId, &Project> =
        projects.iter().map(|p| (&p.project_id, p)).collect();

    let mut rows = Vec::new();
    for person in &team.persons {
        for alloc in &person.by_project {
            let (code, name) = match by_id.get(&alloc.project_id) {
                Some(p) => (p.code.clone(), p.display_name.clone()),
                None => (alloc.project_id.clone(), alloc.project_id.clone()),
            };
            rows.push(AllocationRow {
                person_id: person.person_id.clone(),
                person_name: person.display_name.clone(),
                project_id: alloc.project_id.clone(),
                project_code: code,
                project_name: name,
                effective_days: alloc.effective_days,
            });
        }
    }
    rows
}

/// Wide export sheet: one header per (week × bucket) column, one row per
/// person. This is the structure the Excel/PDF exporters consume.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StaffingSheet {
    pub headers: Vec<String>,
    pub rows: Vec<SheetRow>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SheetRow {
    pub label: String,
    pub cells: Vec<f64>,
}

pub fn weekly_sheet(table: &WeeklyStaffingTable) -> StaffingSheet {
    let mut headers = Vec::with_capacity(1 + table.weeks.len() * StaffingBucket::ALL.len());
    headers.push("person".to_string());
    for window in &table.weeks {
        for bucket in StaffingBucket::ALL {
            headers.push(format!("{} {}", window.monday.format("%Y-%m-%d"), bucket.name()));
        }
    }

    let rows = table
        .rows
        .iter()
        .map(|row| SheetRow {
            label: row.display_name.clone(),
            cells: row
                .weeks
                .iter()
                .flat_map(|cell| StaffingBucket::ALL.iter().map(|b| cell.get(*b)))
                .collect(),
        })
        .collect();

    StaffingSheet { headers, rows }
}
