//! Capacity aggregation tests.

use chrono::NaiveDate;
use staffing_core::capacity::{compute_person_capacity, compute_team_capacity};
use staffing_core::model::{Assignment, Holiday, Person};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn person(id: &str, region: &str) -> Person {
    Person {
        person_id: id.into(),
        display_name: format!("Person {id}"),
        region: region.into(),
        squad_lead_id: None,
    }
}

fn asg(id: &str, person: &str, project: &str, start: NaiveDate, end: NaiveDate, pct: u32) -> Assignment {
    Assignment {
        assignment_id: id.into(),
        person_id: person.into(),
        project_id: project.into(),
        start_date: start,
        end_date: end,
        allocation_percent: pct,
        kind: "development".into(),
        notes: None,
    }
}

fn national_holiday(date: NaiveDate) -> Holiday {
    Holiday {
        date,
        description: "Fiesta Nacional".into(),
        country: "ES".into(),
        region: "NACIONAL".into(),
    }
}

/// Two weeks with one national holiday on a Tuesday: work days exclude
/// only weekends, the holiday shows in its own bucket, and a person with
/// no assignments is unassigned for work days minus the holiday.
#[test]
fn empty_person_over_two_weeks_with_holiday() {
    // 2024-01-01 is a Monday; 2024-01-09 a Tuesday.
    let holidays = vec![national_holiday(d(2024, 1, 9))];
    let summary = compute_person_capacity(
        &person("p-1", "MADRID"),
        d(2024, 1, 1),
        d(2024, 1, 14),
        &[],
        &holidays,
    )
    .unwrap();

    assert_eq!(summary.total_days, 14);
    assert_eq!(summary.weekend_days, 4);
    assert_eq!(summary.holiday_days, 1);
    assert_eq!(summary.work_days, 10);
    assert_eq!(summary.assigned_days, 0.0);
    assert_eq!(summary.unassigned_days, 9.0);
    assert!(summary.by_project.is_empty());
}

/// weekend_days + work_days == total_days must hold for any range.
#[test]
fn weekend_and_work_days_partition_the_range() {
    for (start, end) in [
        (d(2024, 1, 1), d(2024, 1, 14)),
        (d(2024, 2, 7), d(2024, 3, 19)),
        (d(2024, 6, 8), d(2024, 6, 9)),
        (d(2024, 6, 12), d(2024, 6, 12)),
    ] {
        let summary =
            compute_person_capacity(&person("p-1", "MADRID"), start, end, &[], &[]).unwrap();
        assert_eq!(
            summary.weekend_days + summary.work_days,
            summary.total_days,
            "{start}..{end}"
        );
    }
}

/// A holiday falling on a Saturday counts as a weekend day, not a
/// holiday day.
#[test]
fn weekend_holiday_is_not_double_counted() {
    let holidays = vec![national_holiday(d(2024, 1, 6))];
    let summary = compute_person_capacity(
        &person("p-1", "MADRID"),
        d(2024, 1, 1),
        d(2024, 1, 7),
        &[],
        &holidays,
    )
    .unwrap();
    assert_eq!(summary.weekend_days, 2);
    assert_eq!(summary.holiday_days, 0);
}

/// Effective days are percentage-weighted productive days.
#[test]
fn allocation_percent_weights_effective_days() {
    let assignments = vec![asg(
        "a-1", "p-1", "prj-web",
        d(2024, 1, 8), d(2024, 1, 12), 50,
    )];
    let summary = compute_person_capacity(
        &person("p-1", "MADRID"),
        d(2024, 1, 8),
        d(2024, 1, 14),
        &assignments,
        &[],
    )
    .unwrap();

    assert_eq!(summary.work_days, 5);
    assert_eq!(summary.assigned_days, 2.5);
    assert_eq!(summary.unassigned_days, 2.5);
    assert_eq!(summary.by_project.len(), 1);
    assert_eq!(summary.by_project[0].project_id, "prj-web");
    assert_eq!(summary.by_project[0].effective_days, 2.5);
}

/// Assignments extending beyond the range only contribute their clipped
/// in-range days.
#[test]
fn assignment_interval_is_clipped_to_range() {
    let assignments = vec![asg(
        "a-1", "p-1", "prj-web",
        d(2023, 12, 20), d(2024, 1, 3), 100,
    )];
    let summary = compute_person_capacity(
        &person("p-1", "MADRID"),
        d(2024, 1, 1),
        d(2024, 1, 5),
        &assignments,
        &[],
    )
    .unwrap();
    // Jan 1–3 are Mon–Wed.
    assert_eq!(summary.assigned_days, 3.0);
}

/// Holidays inside an assignment's interval do not produce effective
/// days.
#[test]
fn holidays_are_excluded_from_effective_days() {
    let holidays = vec![national_holiday(d(2024, 1, 9))];
    let assignments = vec![asg(
        "a-1", "p-1", "prj-web",
        d(2024, 1, 8), d(2024, 1, 12), 100,
    )];
    let summary = compute_person_capacity(
        &person("p-1", "MADRID"),
        d(2024, 1, 8),
        d(2024, 1, 14),
        &assignments,
        &holidays,
    )
    .unwrap();
    assert_eq!(summary.assigned_days, 4.0);
    assert_eq!(summary.unassigned_days, 0.0);
}

/// A regional holiday applies only to people of that region.
#[test]
fn regional_holiday_is_scoped_to_region() {
    let holidays = vec![Holiday {
        date: d(2024, 1, 9),
        description: "Fiesta Local".into(),
        country: "ES".into(),
        region: "MADRID".into(),
    }];
    let people = [person("p-1", "MADRID"), person("p-2", "BARCELONA")];
    let team = compute_team_capacity(
        &people,
        d(2024, 1, 8),
        d(2024, 1, 12),
        &[],
        &holidays,
    )
    .unwrap();

    assert_eq!(team.persons[0].holiday_days, 1);
    assert_eq!(team.persons[1].holiday_days, 0);
    assert_eq!(team.holiday_days, 1);
}

/// Recomputing over the same inputs yields identical output.
#[test]
fn aggregation_is_idempotent() {
    let holidays = vec![national_holiday(d(2024, 1, 9))];
    let assignments = vec![
        asg("a-1", "p-1", "prj-web", d(2024, 1, 8), d(2024, 1, 12), 75),
        asg("a-2", "p-1", "prj-crm", d(2024, 1, 15), d(2024, 1, 19), 100),
    ];
    let p = person("p-1", "MADRID");

    let first =
        compute_person_capacity(&p, d(2024, 1, 1), d(2024, 1, 31), &assignments, &holidays)
            .unwrap();
    let second =
        compute_person_capacity(&p, d(2024, 1, 1), d(2024, 1, 31), &assignments, &holidays)
            .unwrap();
    assert_eq!(first, second);
}

/// Team metrics are per-person sums; available capacity is the
/// unassigned share of the team work-day base.
#[test]
fn team_summary_sums_members() {
    let assignments = vec![asg(
        "a-1", "p-1", "prj-web",
        d(2024, 1, 8), d(2024, 1, 12), 100,
    )];
    let people = [person("p-1", "MADRID"), person("p-2", "MADRID")];
    let team =
        compute_team_capacity(&people, d(2024, 1, 8), d(2024, 1, 12), &assignments, &[]).unwrap();

    assert_eq!(team.work_days, 10);
    assert_eq!(team.assigned_days, 5.0);
    assert_eq!(team.unassigned_days, 5.0);
    assert_eq!(team.available_capacity_percent, 50.0);
}

/// An over-assigned person floors at zero unassigned days instead of
/// going negative.
#[test]
fn over_assignment_floors_at_zero() {
    let assignments = vec![
        asg("a-1", "p-1", "prj-web", d(2024, 1, 8), d(2024, 1, 12), 100),
        asg("a-2", "p-1", "prj-crm", d(2024, 1, 8), d(2024, 1, 12), 75),
    ];
    let people = [person("p-1", "MADRID")];
    let team =
        compute_team_capacity(&people, d(2024, 1, 8), d(2024, 1, 12), &assignments, &[]).unwrap();

    assert_eq!(team.persons[0].unassigned_days, 0.0);
    assert_eq!(team.available_capacity_percent, 0.0);
    assert_eq!(team.assigned_days, 8.75);
}
