//! WASM bindings for schedule-engine.
//!
//! Exposes week bucketing, clash detection and hour-grid layout to the
//! browser frontend via `wasm-bindgen`. Events cross the boundary as JSON
//! strings in the backend's wire format (`equipo`, `dia_semana`,
//! `hora_inicio`, ...), so API responses can be passed through unchanged.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p schedule-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/schedule_engine_wasm.wasm
//! ```

use schedule_engine::time::format_local_date;
use schedule_engine::week::DayHeader;
use schedule_engine::{
    Candidate, DayMatch, EventId, GridConfig, Placement, ScheduledEvent, WeekWindow,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct WeekDto {
    week_start: String,
    week_end: String,
    label: String,
    headers: Vec<DayHeader>,
    /// Seven arrays, Monday first.
    columns: Vec<Vec<ScheduledEvent>>,
}

/// A slot to check, as sent by the event form.
#[derive(Deserialize)]
struct CandidateInput {
    #[serde(default, rename = "dia_semana")]
    weekday: Option<i64>,
    #[serde(default, rename = "fecha")]
    date: Option<String>,
    #[serde(rename = "hora_inicio")]
    start: String,
    #[serde(rename = "hora_termino")]
    end: String,
}

impl CandidateInput {
    fn into_candidate(self) -> Result<Candidate, JsValue> {
        Candidate::parse(self.weekday, self.date.as_deref(), &self.start, &self.end).map_err(js_err)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_events_json(json: &str) -> Result<Vec<ScheduledEvent>, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid events JSON: {}", e)))
}

fn parse_candidate_json(json: &str) -> Result<Candidate, JsValue> {
    let input: CandidateInput = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid candidate JSON: {}", e)))?;
    input.into_candidate()
}

fn parse_date(s: &str) -> Result<chrono::NaiveDate, JsValue> {
    schedule_engine::parse_local_date(s).map_err(js_err)
}

fn parse_grid_json(json: Option<String>) -> Result<GridConfig, JsValue> {
    let grid: GridConfig = match json {
        Some(raw) => serde_json::from_str(&raw)
            .map_err(|e| JsValue::from_str(&format!("Invalid grid JSON: {}", e)))?,
        None => GridConfig::default(),
    };
    grid.validate().map_err(js_err)?;
    Ok(grid)
}

fn to_json(value: &impl Serialize) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Split events into the seven day columns of the week containing `anchor`.
///
/// `anchor` is a local date (`YYYY-MM-DD`); any day of the week works.
/// Returns `{week_start, week_end, label, headers, columns}` where `columns`
/// holds seven event arrays, Monday first.
#[wasm_bindgen(js_name = "bucketizeWeek")]
pub fn bucketize_week(events_json: &str, anchor: &str) -> Result<String, JsValue> {
    let events = parse_events_json(events_json)?;
    let week = WeekWindow::containing(parse_date(anchor)?);
    let buckets = schedule_engine::bucketize(&events, &week);

    let dto = WeekDto {
        week_start: format_local_date(week.start()),
        week_end: format_local_date(week.end()),
        label: week.label(),
        headers: week.day_headers(),
        columns: buckets.iter().map(|(_, column)| column.to_vec()).collect(),
    };
    to_json(&dto)
}

/// Whether a candidate slot clashes with any existing event.
///
/// `candidate_json` is `{dia_semana?, fecha?, hora_inicio, hora_termino}`;
/// `ignore_id` names the event being edited.
#[wasm_bindgen(js_name = "hasConflict")]
pub fn has_conflict(
    candidate_json: &str,
    events_json: &str,
    ignore_id: Option<u64>,
) -> Result<bool, JsValue> {
    let candidate = parse_candidate_json(candidate_json)?;
    let events = parse_events_json(events_json)?;
    Ok(schedule_engine::has_conflict(
        &candidate,
        &events,
        ignore_id.map(EventId),
    ))
}

/// Describe the first clash of a candidate slot.
///
/// Returns `null` when the slot is free, otherwise
/// `{conflicting_id, existing_start, existing_end, overlap_minutes}` for the
/// clashing event. Pass
/// `resolve_weekdays = true` to read a dated event's weekday from its date.
#[wasm_bindgen(js_name = "findConflict")]
pub fn find_conflict(
    candidate_json: &str,
    events_json: &str,
    ignore_id: Option<u64>,
    resolve_weekdays: Option<bool>,
) -> Result<String, JsValue> {
    let candidate = parse_candidate_json(candidate_json)?;
    let events = parse_events_json(events_json)?;
    let policy = if resolve_weekdays.unwrap_or(false) {
        DayMatch::Resolved
    } else {
        DayMatch::Recorded
    };

    let clash =
        schedule_engine::conflict::check(&candidate, &events, ignore_id.map(EventId), policy).err();
    to_json(&clash)
}

/// Pixel placement of one event on the hour grid.
///
/// `grid_json` is `{start_hour, end_hour, px_per_hour}` (defaults 8, 23,
/// 60). Returns `null` when the event lies outside the visible hours,
/// otherwise `{top_px, height_px, duration_minutes}`.
#[wasm_bindgen(js_name = "layoutEvent")]
pub fn layout_event(event_json: &str, grid_json: Option<String>) -> Result<String, JsValue> {
    let event: ScheduledEvent = serde_json::from_str(event_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid event JSON: {}", e)))?;
    let grid = parse_grid_json(grid_json)?;

    let placement: Option<Placement> = schedule_engine::layout::is_visible(&event, &grid)
        .then(|| schedule_engine::layout(&event, &grid));
    to_json(&placement)
}

/// The Monday starting the week that contains `date` (`YYYY-MM-DD`).
#[wasm_bindgen(js_name = "mondayOf")]
pub fn monday_of(date: &str) -> Result<String, JsValue> {
    Ok(format_local_date(schedule_engine::monday_of(parse_date(date)?)))
}
