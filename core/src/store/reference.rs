//! Person, project, and holiday reference-data queries.

use super::{date_from_sql, date_to_sql, StaffingStore};
use crate::error::StaffingResult;
use crate::model::{Holiday, Person, Project};
use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};

impl StaffingStore {
    // ── Person ─────────────────────────────────────────────────

    pub fn insert_person(&self, person: &Person) -> StaffingResult<()> {
        self.conn.execute(
            "INSERT INTO person (person_id, display_name, region, squad_lead_id)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                person.person_id,
                person.display_name,
                person.region,
                person.squad_lead_id,
            ],
        )?;
        Ok(())
    }

    pub fn get_person(&self, person_id: &str) -> StaffingResult<Option<Person>> {
        Ok(self
            .conn
            .query_row(
                "SELECT person_id, display_name, region, squad_lead_id
                 FROM person WHERE person_id = ?1",
                params![person_id],
                |r| {
                    Ok(Person {
                        person_id: r.get(0)?,
                        display_name: r.get(1)?,
                        region: r.get(2)?,
                        squad_lead_id: r.get(3)?,
                    })
                },
            )
            .optional()?)
    }

    pub fn list_persons(&self) -> StaffingResult<Vec<Person>> {
        let mut stmt = self.conn.prepare(
            "SELECT person_id, display_name, region, squad_lead_id
             FROM person ORDER BY person_id",
        )?;
        let rows = stmt.query_map([], |r| {
            Ok(Person {
                person_id: r.get(0)?,
                display_name: r.get(1)?,
                region: r.get(2)?,
                squad_lead_id: r.get(3)?,
            })
        })?;
        let mut result = Vec::new();
        for r in rows {
            result.push(r?);
        }
        Ok(result)
    }

    // ── Project ────────────────────────────────────────────────

    pub fn insert_project(&self, project: &Project) -> StaffingResult<()> {
        self.conn.execute(
            "INSERT INTO project (project_id, code, display_name, classification)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                project.project_id,
                project.code,
                project.display_name,
                project.classification,
            ],
        )?;
        Ok(())
    }

    pub fn list_projects(&self) -> StaffingResult<Vec<Project>> {
        let mut stmt = self.conn.prepare(
            "SELECT project_id, code, display_name, classification
             FROM project ORDER BY project_id",
        )?;
        let rows = stmt.query_map([], |r| {
            Ok(Project {
                project_id: r.get(0)?,
                code: r.get(1)?,
                display_name: r.get(2)?,
                classification: r.get(3)?,
            })
        })?;
        let mut result = Vec::new();
        for r in rows {
            result.push(r?);
        }
        Ok(result)
    }

    // ── Holiday ────────────────────────────────────────────────

    pub fn insert_holiday(&self, holiday: &Holiday) -> StaffingResult<()> {
        self.conn.execute(
            "INSERT INTO holiday (date, description, country, region)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                date_to_sql(holiday.date),
                holiday.description,
                holiday.country,
                holiday.region,
            ],
        )?;
        Ok(())
    }

    /// List holidays, optionally limited to a date range (inclusive).
    pub fn list_holidays(
        &self,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> StaffingResult<Vec<Holiday>> {
        let mut result = Vec::new();
        match range {
            Some((start, end)) => {
                let mut stmt = self.conn.prepare(
                    "SELECT date, description, country, region
                     FROM holiday WHERE date >= ?1 AND date <= ?2
                     ORDER BY date, region",
                )?;
                let rows = stmt.query_map(
                    params![date_to_sql(start), date_to_sql(end)],
                    row_to_holiday,
                )?;
                for r in rows {
                    result.push(r?);
                }
            }
            None => {
                let mut stmt = self.conn.prepare(
                    "SELECT date, description, country, region
                     FROM holiday ORDER BY date, region",
                )?;
                let rows = stmt.query_map([], row_to_holiday)?;
                for r in rows {
                    result.push(r?);
                }
            }
        }
        Ok(result)
    }
}

fn row_to_holiday(r: &rusqlite::Row<'_>) -> rusqlite::Result<Holiday> {
    Ok(Holiday {
        date: date_from_sql(&r.get::<_, String>(0)?)?,
        description: r.get(1)?,
        country: r.get(2)?,
        region: r.get(3)?,
    })
}
