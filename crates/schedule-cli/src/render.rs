//! Text and JSON renderings of the schedule view.

use schedule_engine::agenda::AgendaDay;
use schedule_engine::day::to_sunday_index;
use schedule_engine::time::{format_clock_time, format_local_date};
use schedule_engine::{GridConfig, Placement, ScheduleView, ScheduledEvent};
use serde::Serialize;

#[derive(Serialize)]
struct WeekDto<'a> {
    week_start: String,
    week_end: String,
    label: String,
    grid: &'a GridConfig,
    hour_labels: Vec<u32>,
    total_height_px: f64,
    days: Vec<DayDto<'a>>,
}

#[derive(Serialize)]
struct DayDto<'a> {
    column: usize,
    date: String,
    label: String,
    events: Vec<PlacedDto<'a>>,
}

#[derive(Serialize)]
struct PlacedDto<'a> {
    event: &'a ScheduledEvent,
    /// `None` when the event lies outside the visible hours.
    placement: Option<Placement>,
}

/// One line describing an event: time range, id, team, place and trainer.
pub fn event_line(event: &ScheduledEvent) -> String {
    let team = event
        .team_name
        .clone()
        .unwrap_or_else(|| format!("team {}", event.team_id));
    let mut line = format!(
        "{}-{}  #{}  {}  @ {}",
        format_clock_time(event.start_time),
        format_clock_time(event.end_time),
        event.id,
        team,
        event.place
    );
    match (&event.trainer_name, event.trainer_id) {
        (Some(name), _) => line.push_str(&format!("  ({name})")),
        (None, Some(id)) => line.push_str(&format!("  (trainer {})", id.0)),
        (None, None) => {}
    }
    if !event.active {
        line.push_str("  [inactive]");
    }
    line
}

fn when(event: &ScheduledEvent) -> String {
    match event.date {
        Some(date) => format_local_date(date),
        None => format!("every {}", event.weekday),
    }
}

pub fn week_text(view: &ScheduleView) -> String {
    let mut out = format!("Week {}\n", view.week_label());
    for header in view.day_headers() {
        out.push_str(&format!("\n{}\n", header.label));
        let events = view.buckets().get(header.column);
        if events.is_empty() {
            out.push_str("  (no sessions)\n");
            continue;
        }
        for event in events {
            let position = match view.layout_for(event) {
                Some(p) => format!("top {:.0}px, height {:.0}px", p.top_px, p.height_px),
                None => "outside grid".to_string(),
            };
            out.push_str(&format!("  {}  [{}]\n", event_line(event), position));
        }
    }
    out
}

pub fn week_json(view: &ScheduleView) -> serde_json::Result<String> {
    let week = view.week();
    let dto = WeekDto {
        week_start: format_local_date(week.start()),
        week_end: format_local_date(week.end()),
        label: view.week_label(),
        grid: view.grid(),
        hour_labels: view.grid().hour_labels(),
        total_height_px: view.grid().total_height_px(),
        days: view
            .day_headers()
            .into_iter()
            .map(|header| DayDto {
                column: header.column,
                date: format_local_date(header.date),
                label: header.label,
                events: view
                    .buckets()
                    .get(header.column)
                    .iter()
                    .map(|event| PlacedDto {
                        event,
                        placement: view.layout_for(event),
                    })
                    .collect(),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&dto)
}

pub fn list_text(events: &[ScheduledEvent]) -> String {
    if events.is_empty() {
        return "No sessions scheduled.\n".to_string();
    }
    events
        .iter()
        .map(|e| format!("{:<16} {}\n", when(e), event_line(e)))
        .collect()
}

pub fn list_json(events: &[ScheduledEvent]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(events)
}

pub fn agenda_text(label: &str, days: &[AgendaDay]) -> String {
    let mut out = format!("Week {label}\n");
    if days.is_empty() {
        out.push_str("\nNo sessions this week.\n");
        return out;
    }
    for day in days {
        out.push_str(&format!("\n{} ({})\n", day.label, format_local_date(day.date)));
        for event in &day.events {
            let kind = if event.is_recurring() {
                format!("weekly, day {}", to_sunday_index(event.weekday))
            } else {
                "one-off".to_string()
            };
            out.push_str(&format!("  {}  [{}]\n", event_line(event), kind));
        }
    }
    out
}
