//! Tests for schedule-clash detection.

use chrono::{NaiveDate, NaiveTime, Weekday};
use schedule_engine::conflict::{check, find_conflict, has_conflict, overlap_minutes, DayMatch};
use schedule_engine::{Candidate, EventId, ScheduledEvent, TeamId};

fn hm(time: &str) -> NaiveTime {
    NaiveTime::parse_from_str(time, "%H:%M").unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Helper to create a recurring event on a weekday.
fn recurring(id: u64, weekday: Weekday, start: &str, end: &str) -> ScheduledEvent {
    ScheduledEvent {
        id: EventId(id),
        team_id: TeamId(1),
        team_name: None,
        trainer_id: None,
        trainer_name: None,
        place: "Court 1".to_string(),
        weekday,
        date: None,
        start_time: hm(start),
        end_time: hm(end),
        color: "#FCD34D".to_string(),
        active: true,
    }
}

/// Helper to create an event pinned to a date (weekday follows the date).
fn dated(id: u64, on: NaiveDate, start: &str, end: &str) -> ScheduledEvent {
    use chrono::Datelike;
    ScheduledEvent {
        date: Some(on),
        ..recurring(id, on.weekday(), start, end)
    }
}

#[test]
fn overlapping_ranges_conflict() {
    // 10:00-11:30 vs 11:00-12:00 → 30 min overlap
    let existing = vec![recurring(1, Weekday::Tue, "11:00", "12:00")];
    let candidate = Candidate::recurring(Weekday::Tue, hm("10:00"), hm("11:30"));

    assert!(has_conflict(&candidate, &existing, None));
}

#[test]
fn touching_ranges_do_not_conflict() {
    // 10:00-11:00 vs 11:00-12:00 → adjacent, NOT overlapping
    let existing = vec![recurring(1, Weekday::Tue, "11:00", "12:00")];
    let candidate = Candidate::recurring(Weekday::Tue, hm("10:00"), hm("11:00"));

    assert!(
        !has_conflict(&candidate, &existing, None),
        "adjacent events (end == start) should not be conflicts"
    );
}

#[test]
fn different_weekdays_never_conflict() {
    let existing = vec![recurring(1, Weekday::Tue, "10:00", "12:00")];
    let candidate = Candidate::recurring(Weekday::Wed, hm("10:00"), hm("12:00"));

    assert!(!has_conflict(&candidate, &existing, None));
}

#[test]
fn contained_range_conflicts() {
    let existing = vec![recurring(1, Weekday::Fri, "09:00", "12:00")];
    let candidate = Candidate::recurring(Weekday::Fri, hm("10:00"), hm("11:00"));

    assert!(has_conflict(&candidate, &existing, None));
}

#[test]
fn editing_an_event_ignores_itself() {
    let existing = vec![recurring(5, Weekday::Mon, "17:00", "19:00")];
    let unchanged = existing[0].candidate();

    assert!(
        !has_conflict(&unchanged, &existing, Some(EventId(5))),
        "an event must not clash with its own previous version"
    );
    assert!(has_conflict(&unchanged, &existing, None));
}

#[test]
fn ignore_only_skips_the_named_event() {
    let existing = vec![
        recurring(5, Weekday::Mon, "17:00", "19:00"),
        recurring(6, Weekday::Mon, "18:00", "20:00"),
    ];
    let candidate = existing[0].candidate();

    let clash = find_conflict(&candidate, &existing, Some(EventId(5)), DayMatch::Recorded);
    assert_eq!(clash.map(|e| e.id), Some(EventId(6)));
}

#[test]
fn dated_events_compare_by_date() {
    let monday = date(2026, 3, 2);
    let existing = vec![dated(1, monday, "09:00", "10:00")];

    let same_date = Candidate::dated(monday, hm("09:30"), hm("10:30"));
    let next_monday = Candidate::dated(date(2026, 3, 9), hm("09:30"), hm("10:30"));

    assert!(has_conflict(&same_date, &existing, None));
    assert!(
        !has_conflict(&next_monday, &existing, None),
        "same weekday but a different date is not the same day"
    );
}

#[test]
fn recurring_event_clashes_with_any_matching_date() {
    let existing = vec![recurring(1, Weekday::Mon, "09:00", "10:00")];

    for week in 0..4 {
        let monday = date(2026, 3, 2 + 7 * week);
        let candidate = Candidate::dated(monday, hm("09:15"), hm("09:45"));
        assert!(
            has_conflict(&candidate, &existing, None),
            "recurring Monday event should clash on {monday}"
        );
    }
}

#[test]
fn recorded_weekday_is_used_by_default() {
    // Dated Monday whose recorded weekday is (wrongly) Tuesday.
    let mut stale = dated(1, date(2026, 3, 2), "09:00", "10:00");
    stale.weekday = Weekday::Tue;
    let existing = vec![stale];

    let tuesday_slot = Candidate::recurring(Weekday::Tue, hm("09:00"), hm("10:00"));
    let monday_slot = Candidate::recurring(Weekday::Mon, hm("09:00"), hm("10:00"));

    assert!(find_conflict(&tuesday_slot, &existing, None, DayMatch::Recorded).is_some());
    assert!(find_conflict(&monday_slot, &existing, None, DayMatch::Recorded).is_none());
}

#[test]
fn resolved_policy_reads_weekday_from_date() {
    let mut stale = dated(1, date(2026, 3, 2), "09:00", "10:00");
    stale.weekday = Weekday::Tue;
    let existing = vec![stale];

    let tuesday_slot = Candidate::recurring(Weekday::Tue, hm("09:00"), hm("10:00"));
    let monday_slot = Candidate::recurring(Weekday::Mon, hm("09:00"), hm("10:00"));

    assert!(find_conflict(&tuesday_slot, &existing, None, DayMatch::Resolved).is_none());
    assert!(find_conflict(&monday_slot, &existing, None, DayMatch::Resolved).is_some());
}

#[test]
fn check_reports_the_first_clash() {
    let existing = vec![
        recurring(1, Weekday::Thu, "08:00", "09:00"),
        recurring(2, Weekday::Thu, "10:00", "12:00"),
        recurring(3, Weekday::Thu, "11:00", "13:00"),
    ];
    let candidate = Candidate::recurring(Weekday::Thu, hm("11:30"), hm("12:30"));

    let clash = check(&candidate, &existing, None, DayMatch::Recorded).unwrap_err();
    assert_eq!(clash.conflicting_id, EventId(2));
    assert_eq!(clash.existing_start, "10:00");
    assert_eq!(clash.existing_end, "12:00");
    assert_eq!(clash.overlap_minutes, 30);
}

#[test]
fn clash_serializes_for_the_frontend() {
    let existing = vec![recurring(7, Weekday::Tue, "17:00", "18:30")];
    let candidate = Candidate::recurring(Weekday::Tue, hm("18:00"), hm("19:00"));

    let clash = check(&candidate, &existing, None, DayMatch::Recorded).unwrap_err();
    assert_eq!(
        serde_json::to_value(&clash).unwrap(),
        serde_json::json!({
            "conflicting_id": 7,
            "existing_start": "17:00",
            "existing_end": "18:30",
            "overlap_minutes": 30
        })
    );

    let free = check(&candidate, &[], None, DayMatch::Recorded).err();
    assert_eq!(serde_json::to_value(free).unwrap(), serde_json::Value::Null);
}

#[test]
fn empty_schedule_never_conflicts() {
    let candidate = Candidate::recurring(Weekday::Mon, hm("10:00"), hm("11:00"));
    assert!(!has_conflict(&candidate, &[], None));
    assert!(check(&candidate, &[], None, DayMatch::Recorded).is_ok());
}

#[test]
fn inverted_candidate_overlaps_nothing() {
    let existing = vec![recurring(1, Weekday::Mon, "10:00", "11:00")];
    let inverted = Candidate::recurring(Weekday::Mon, hm("10:45"), hm("10:15"));

    // start < existing.end holds, end > existing.start holds: the raw rule
    // still reports it; drafts reject inverted ranges before this point.
    assert!(has_conflict(&inverted, &existing, None));
    let outside = Candidate::recurring(Weekday::Mon, hm("12:00"), hm("11:30"));
    assert!(!has_conflict(&outside, &existing, None));
}

#[test]
fn overlap_minutes_of_ranges() {
    assert_eq!(overlap_minutes((600, 690), (660, 720)), 30);
    assert_eq!(overlap_minutes((600, 660), (660, 720)), 0);
    assert_eq!(overlap_minutes((540, 720), (600, 660)), 60);
    assert_eq!(overlap_minutes((800, 900), (600, 660)), 0);
}
