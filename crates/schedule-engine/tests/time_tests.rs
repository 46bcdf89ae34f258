//! Tests for clock-time, date and weekday-convention helpers.

use chrono::{NaiveDate, Weekday};
use schedule_engine::day::{
    column_of, from_sunday_index, to_sunday_index, weekday_of_column, DAYS_PER_WEEK,
};
use schedule_engine::time::{
    add_days, checked_add_days, format_clock_time, format_local_date, monday_of, next_occurrence, parse_clock_time,
    parse_local_date, time_to_minutes,
};
use schedule_engine::ScheduleError;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── Clock times ─────────────────────────────────────────────────────────────

#[test]
fn minutes_from_hhmm() {
    assert_eq!(time_to_minutes("00:00").unwrap(), 0);
    assert_eq!(time_to_minutes("09:45").unwrap(), 585);
    assert_eq!(time_to_minutes("23:59").unwrap(), 1439);
}

#[test]
fn seconds_are_dropped() {
    assert_eq!(time_to_minutes("17:30:59").unwrap(), 1050);
    let t = parse_clock_time("17:30:59").unwrap();
    assert_eq!(format_clock_time(t), "17:30");
}

#[test]
fn malformed_times_rejected() {
    for bad in ["", "9", "25:00", "10:60", "ab:cd", "10-30"] {
        assert!(
            matches!(time_to_minutes(bad), Err(ScheduleError::InvalidTime(_))),
            "{bad:?} should be rejected"
        );
    }
}

// ── Dates ───────────────────────────────────────────────────────────────────

#[test]
fn monday_of_every_day_of_a_week() {
    // 2026-03-02 is a Monday.
    for offset in 0..7 {
        assert_eq!(monday_of(date(2026, 3, 2 + offset)), date(2026, 3, 2));
    }
}

#[test]
fn sunday_belongs_to_the_previous_monday() {
    assert_eq!(monday_of(date(2026, 3, 1)), date(2026, 2, 23));
}

#[test]
fn local_date_is_not_shifted() {
    let d = parse_local_date("2026-12-31").unwrap();
    assert_eq!(d, date(2026, 12, 31));
    assert_eq!(format_local_date(d), "2026-12-31");
}

#[test]
fn malformed_dates_rejected() {
    for bad in ["2026-13-01", "31/12/2026", "2026-02-30", ""] {
        assert!(
            matches!(parse_local_date(bad), Err(ScheduleError::InvalidDate(_))),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn add_days_crosses_month_and_year() {
    assert_eq!(add_days(date(2026, 12, 28), 7), date(2027, 1, 4));
    assert_eq!(add_days(date(2026, 3, 2), -7), date(2026, 2, 23));
}

#[test]
fn checked_add_days_reports_overflow() {
    assert_eq!(checked_add_days(date(2026, 3, 2), 7), Ok(date(2026, 3, 9)));
    assert!(matches!(
        checked_add_days(date(2026, 3, 4), 140_000_000),
        Err(ScheduleError::DateOutOfRange { days: 140_000_000, .. })
    ));
    assert!(checked_add_days(date(2026, 3, 4), i64::MIN).is_err());
}

#[test]
fn add_days_clamps_at_calendar_edges() {
    assert_eq!(add_days(date(2026, 3, 4), i64::MAX), NaiveDate::MAX);
    assert_eq!(add_days(date(2026, 3, 4), i64::MIN), NaiveDate::MIN);
    assert_eq!(monday_of(NaiveDate::MIN), NaiveDate::MIN);
}

#[test]
fn next_occurrence_is_today_or_later() {
    let wednesday = date(2026, 3, 4);
    assert_eq!(next_occurrence(Weekday::Wed, wednesday), wednesday);
    assert_eq!(next_occurrence(Weekday::Fri, wednesday), date(2026, 3, 6));
    assert_eq!(next_occurrence(Weekday::Mon, wednesday), date(2026, 3, 9));
    assert_eq!(next_occurrence(Weekday::Sun, wednesday), date(2026, 3, 8));
}

// ── Weekday conventions ─────────────────────────────────────────────────────

#[test]
fn wire_index_is_sunday_based() {
    assert_eq!(to_sunday_index(Weekday::Sun), 0);
    assert_eq!(to_sunday_index(Weekday::Mon), 1);
    assert_eq!(to_sunday_index(Weekday::Sat), 6);
    for index in 0..7 {
        let weekday = from_sunday_index(index).unwrap();
        assert_eq!(i64::from(to_sunday_index(weekday)), index);
    }
}

#[test]
fn wire_index_out_of_range_rejected() {
    assert_eq!(from_sunday_index(7), Err(ScheduleError::InvalidWeekday(7)));
    assert_eq!(from_sunday_index(-1), Err(ScheduleError::InvalidWeekday(-1)));
}

#[test]
fn column_is_monday_based() {
    assert_eq!(column_of(Weekday::Mon), 0);
    assert_eq!(column_of(Weekday::Wed), 2);
    assert_eq!(column_of(Weekday::Sun), 6);
    for column in 0..DAYS_PER_WEEK {
        assert_eq!(column_of(weekday_of_column(column)), column);
    }
}

#[test]
fn column_matches_shifted_wire_index() {
    for index in 0..7i64 {
        let weekday = from_sunday_index(index).unwrap();
        assert_eq!(column_of(weekday), ((index + 6) % 7) as usize);
    }
}
