//! Calendar utility tests.

use chrono::NaiveDate;
use staffing_core::calendar::{enumerate_days, is_holiday, is_weekend, weeks_in_range};
use staffing_core::error::StaffingError;
use staffing_core::model::Holiday;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn holiday(date: NaiveDate, region: &str) -> Holiday {
    Holiday {
        date,
        description: "test".into(),
        country: "ES".into(),
        region: region.into(),
    }
}

/// Round-trip: enumerating and counting must match the closed-interval
/// day count, including single-day ranges and a leap February.
#[test]
fn enumerate_days_counts_inclusive() {
    for (start, end) in [
        (d(2024, 1, 1), d(2024, 1, 1)),
        (d(2024, 1, 1), d(2024, 1, 31)),
        (d(2024, 2, 1), d(2024, 3, 1)),
        (d(2023, 12, 28), d(2024, 1, 3)),
    ] {
        let days = enumerate_days(start, end).unwrap();
        let expected = (end - start).num_days() + 1;
        assert_eq!(days.len() as i64, expected, "{start}..{end}");
        assert_eq!(days.first(), Some(&start));
        assert_eq!(days.last(), Some(&end));
    }
}

#[test]
fn enumerate_days_rejects_inverted_range() {
    let err = enumerate_days(d(2024, 1, 10), d(2024, 1, 9)).unwrap_err();
    assert!(matches!(err, StaffingError::InvalidRange { .. }));
}

#[test]
fn weekend_detection_is_monday_first() {
    // 2024-01-01 is a Monday.
    assert!(!is_weekend(d(2024, 1, 1)));
    assert!(!is_weekend(d(2024, 1, 5)));
    assert!(is_weekend(d(2024, 1, 6)));
    assert!(is_weekend(d(2024, 1, 7)));
    assert!(!is_weekend(d(2024, 1, 8)));
}

#[test]
fn holiday_matches_exact_date_and_region() {
    let holidays = vec![
        holiday(d(2024, 10, 12), ""),
        holiday(d(2024, 5, 2), "MADRID"),
    ];
    // Empty region means country-wide.
    assert!(is_holiday(d(2024, 10, 12), "MADRID", &holidays));
    assert!(is_holiday(d(2024, 10, 12), "SEVILLA", &holidays));
    // Regional holiday matches its region case-insensitively.
    assert!(is_holiday(d(2024, 5, 2), "MADRID", &holidays));
    assert!(is_holiday(d(2024, 5, 2), "madrid", &holidays));
    assert!(!is_holiday(d(2024, 5, 2), "SEVILLA", &holidays));
    // Wrong date never matches.
    assert!(!is_holiday(d(2024, 5, 3), "MADRID", &holidays));
}

#[test]
fn nacional_label_is_country_wide_any_case() {
    let holidays = vec![holiday(d(2024, 8, 15), "Nacional")];
    assert!(is_holiday(d(2024, 8, 15), "BARCELONA", &holidays));
}

/// A Wednesday-to-Tuesday range spans three windows: two partial ones
/// around a full middle week, all labeled with their nominal Monday.
#[test]
fn weeks_in_range_clips_partial_weeks() {
    let weeks = weeks_in_range(d(2024, 1, 3), d(2024, 1, 16)).unwrap();
    assert_eq!(weeks.len(), 3);

    assert_eq!(weeks[0].monday, d(2024, 1, 1));
    assert_eq!(weeks[0].start, d(2024, 1, 3));
    assert_eq!(weeks[0].end, d(2024, 1, 7));

    assert_eq!(weeks[1].monday, d(2024, 1, 8));
    assert_eq!(weeks[1].start, d(2024, 1, 8));
    assert_eq!(weeks[1].end, d(2024, 1, 14));

    assert_eq!(weeks[2].monday, d(2024, 1, 15));
    assert_eq!(weeks[2].start, d(2024, 1, 15));
    assert_eq!(weeks[2].end, d(2024, 1, 16));
}

#[test]
fn weeks_in_range_single_day() {
    let weeks = weeks_in_range(d(2024, 1, 10), d(2024, 1, 10)).unwrap();
    assert_eq!(weeks.len(), 1);
    assert_eq!(weeks[0].start, weeks[0].end);
    assert_eq!(weeks[0].monday, d(2024, 1, 8));
}

#[test]
fn weeks_in_range_rejects_inverted_range() {
    assert!(matches!(
        weeks_in_range(d(2024, 2, 2), d(2024, 2, 1)),
        Err(StaffingError::InvalidRange { .. })
    ));
}
