//! Import-boundary validation.
//!
//! Spreadsheet uploads arrive here as a tagged variant per known row
//! schema, already parsed out of the file by the external importer.
//! Validation normalizes regions, parses dates, bounds-checks
//! percentages, and hands back typed records plus per-row rejections.
//! Untyped rows never reach the engine or the store.

use crate::model::{Assignment, Holiday, Person};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One uploaded row. The external file parser maps each spreadsheet row
/// to exactly one of these variants.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "row", rename_all = "snake_case")]
pub enum ImportRow {
    Person {
        person_id: String,
        display_name: String,
        region: String,
        #[serde(default)]
        squad_lead_id: Option<String>,
    },
    Assignment {
        person_id: String,
        project_id: String,
        start_date: String,
        end_date: String,
        allocation_percent: i64,
        #[serde(rename = "type", default)]
        kind: Option<String>,
        #[serde(default)]
        notes: Option<String>,
    },
    Holiday {
        date: String,
        description: String,
        country: String,
        #[serde(default)]
        region: String,
    },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RowRejection {
    /// Zero-based index into the uploaded row list.
    pub row: usize,
    pub reason: String,
}

/// Typed output of a validation pass. Assignments keep their source row
/// index because they can still be rejected later by the conflict gate.
#[derive(Debug, Default)]
pub struct ValidatedImport {
    pub persons: Vec<Person>,
    pub holidays: Vec<Holiday>,
    pub assignments: Vec<(usize, Assignment)>,
    pub rejected: Vec<RowRejection>,
}

/// Validate a batch of uploaded rows. Never fails as a whole: bad rows
/// are collected with their index and reason, good rows come out typed.
pub fn validate_rows(rows: &[ImportRow]) -> ValidatedImport {
    let mut out = ValidatedImport::default();

    for (index, row) in rows.iter().enumerate() {
        match row {
            ImportRow::Person {
                person_id,
                display_name,
                region,
                squad_lead_id,
            } => match validate_person(person_id, display_name, region, squad_lead_id) {
                Ok(person) => out.persons.push(person),
                Err(reason) => out.rejected.push(RowRejection { row: index, reason }),
            },
            ImportRow::Assignment {
                person_id,
                project_id,
                start_date,
                end_date,
                allocation_percent,
                kind,
                notes,
            } => match validate_assignment(
                person_id,
                project_id,
                start_date,
                end_date,
                *allocation_percent,
                kind.as_deref(),
                notes.clone(),
            ) {
                Ok(assignment) => out.assignments.push((index, assignment)),
                Err(reason) => out.rejected.push(RowRejection { row: index, reason }),
            },
            ImportRow::Holiday {
                date,
                description,
                country,
                region,
            } => match validate_holiday(date, description, country, region) {
                Ok(holiday) => out.holidays.push(holiday),
                Err(reason) => out.rejected.push(RowRejection { row: index, reason }),
            },
        }
    }

    if !out.rejected.is_empty() {
        log::warn!("import: {} row(s) rejected at validation", out.rejected.len());
    }
    out
}

fn validate_person(
    person_id: &str,
    display_name: &str,
    region: &str,
    squad_lead_id: &Option<String>,
) -> Result<Person, String> {
    let person_id = person_id.trim();
    if person_id.is_empty() {
        return Err("person row without id".into());
    }
    let display_name = display_name.trim();
    if display_name.is_empty() {
        return Err(format!("person '{person_id}' without a display name"));
    }
    let region = region.trim();
    if region.is_empty() {
        return Err(format!("person '{person_id}' without a region"));
    }
    Ok(Person {
        person_id: person_id.to_string(),
        display_name: display_name.to_string(),
        region: region.to_ascii_uppercase(),
        squad_lead_id: squad_lead_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    })
}

fn validate_assignment(
    person_id: &str,
    project_id: &str,
    start_date: &str,
    end_date: &str,
    allocation_percent: i64,
    kind: Option<&str>,
    notes: Option<String>,
) -> Result<Assignment, String> {
    let person_id = person_id.trim();
    let project_id = project_id.trim();
    if person_id.is_empty() || project_id.is_empty() {
        return Err("assignment row without person or project".into());
    }
    let start = parse_date(start_date)?;
    let end = parse_date(end_date)?;
    if start > end {
        return Err(format!("start {start} is after end {end}"));
    }
    if !(1..=100).contains(&allocation_percent) {
        return Err(format!("allocation {allocation_percent}% outside 1–100"));
    }
    Ok(Assignment {
        assignment_id: Uuid::new_v4().to_string(),
        person_id: person_id.to_string(),
        project_id: project_id.to_string(),
        start_date: start,
        end_date: end,
        allocation_percent: allocation_percent as u32,
        kind: kind
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("development")
            .to_string(),
        notes,
    })
}

fn validate_holiday(
    date: &str,
    description: &str,
    country: &str,
    region: &str,
) -> Result<Holiday, String> {
    let country = country.trim();
    if country.is_empty() {
        return Err("holiday row without a country".into());
    }
    Ok(Holiday {
        date: parse_date(date)?,
        description: description.trim().to_string(),
        country: country.to_ascii_uppercase(),
        region: region.trim().to_ascii_uppercase(),
    })
}

/// Spreadsheets deliver dates either ISO or day-first.
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
        .map_err(|_| format!("unparseable date '{s}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person_row(id: &str, name: &str, region: &str) -> ImportRow {
        ImportRow::Person {
            person_id: id.into(),
            display_name: name.into(),
            region: region.into(),
            squad_lead_id: None,
        }
    }

    #[test]
    fn person_region_is_normalized_uppercase() {
        let out = validate_rows(&[person_row("p-1", "Ana Ruiz", "madrid")]);
        assert!(out.rejected.is_empty());
        assert_eq!(out.persons[0].region, "MADRID");
    }

    #[test]
    fn person_without_region_is_rejected_with_index() {
        let out = validate_rows(&[
            person_row("p-1", "Ana Ruiz", "MADRID"),
            person_row("p-2", "Luis Gil", "  "),
        ]);
        assert_eq!(out.persons.len(), 1);
        assert_eq!(out.rejected.len(), 1);
        assert_eq!(out.rejected[0].row, 1);
    }

    #[test]
    fn assignment_accepts_both_date_formats() {
        let row = ImportRow::Assignment {
            person_id: "p-1".into(),
            project_id: "prj-1".into(),
            start_date: "2024-02-05".into(),
            end_date: "09/02/2024".into(),
            allocation_percent: 80,
            kind: None,
            notes: None,
        };
        let out = validate_rows(&[row]);
        assert!(out.rejected.is_empty());
        let (_, a) = &out.assignments[0];
        assert_eq!(a.start_date.to_string(), "2024-02-05");
        assert_eq!(a.end_date.to_string(), "2024-02-09");
        assert_eq!(a.kind, "development");
    }

    #[test]
    fn assignment_percent_out_of_bounds_is_rejected() {
        for pct in [0, 101, -5] {
            let row = ImportRow::Assignment {
                person_id: "p-1".into(),
                project_id: "prj-1".into(),
                start_date: "2024-02-05".into(),
                end_date: "2024-02-09".into(),
                allocation_percent: pct,
                kind: None,
                notes: None,
            };
            let out = validate_rows(&[row]);
            assert_eq!(out.rejected.len(), 1, "percent {pct} should be rejected");
        }
    }

    #[test]
    fn assignment_inverted_range_is_rejected() {
        let row = ImportRow::Assignment {
            person_id: "p-1".into(),
            project_id: "prj-1".into(),
            start_date: "2024-02-09".into(),
            end_date: "2024-02-05".into(),
            allocation_percent: 50,
            kind: None,
            notes: None,
        };
        let out = validate_rows(&[row]);
        assert_eq!(out.assignments.len(), 0);
        assert_eq!(out.rejected.len(), 1);
    }

    #[test]
    fn holiday_defaults_to_national_scope() {
        let row = ImportRow::Holiday {
            date: "2024-10-12".into(),
            description: "Fiesta Nacional".into(),
            country: "es".into(),
            region: String::new(),
        };
        let out = validate_rows(&[row]);
        assert!(out.rejected.is_empty());
        assert_eq!(out.holidays[0].country, "ES");
        assert_eq!(out.holidays[0].region, "");
        assert!(out.holidays[0].applies_to("MADRID"));
    }
}
