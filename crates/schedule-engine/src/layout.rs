//! Vertical placement of events on an hour grid.
//!
//! The grid shows `start_hour..end_hour` with a fixed number of pixels per
//! hour. Events are clamped to the visible range and never drawn shorter
//! than [`MIN_DURATION_MINUTES`] so they stay clickable.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::event::ScheduledEvent;

/// Shortest duration an event is drawn with.
pub const MIN_DURATION_MINUTES: u32 = 30;

/// Visible hour range and scale of the week grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub start_hour: u32,
    pub end_hour: u32,
    pub px_per_hour: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            start_hour: 8,
            end_hour: 23,
            px_per_hour: 60.0,
        }
    }
}

impl GridConfig {
    /// A validated grid.
    pub fn new(start_hour: u32, end_hour: u32, px_per_hour: f64) -> Result<Self> {
        let grid = Self {
            start_hour,
            end_hour,
            px_per_hour,
        };
        grid.validate()?;
        Ok(grid)
    }

    pub fn validate(&self) -> Result<()> {
        if self.end_hour > 24 {
            return Err(ScheduleError::InvalidGrid(format!(
                "end hour {} is past midnight",
                self.end_hour
            )));
        }
        if self.start_hour >= self.end_hour {
            return Err(ScheduleError::InvalidGrid(format!(
                "start hour {} must be before end hour {}",
                self.start_hour, self.end_hour
            )));
        }
        if !self.px_per_hour.is_finite() || self.px_per_hour <= 0.0 {
            return Err(ScheduleError::InvalidGrid(format!(
                "pixels per hour must be positive, got {}",
                self.px_per_hour
            )));
        }
        Ok(())
    }

    fn start_minutes(&self) -> u32 {
        self.start_hour * 60
    }

    fn end_minutes(&self) -> u32 {
        self.end_hour * 60
    }

    /// Hour labels drawn down the left edge, both ends included.
    pub fn hour_labels(&self) -> Vec<u32> {
        (self.start_hour..=self.end_hour).collect()
    }

    /// Height of a day column: one row per hour label.
    pub fn total_height_px(&self) -> f64 {
        self.hour_labels().len() as f64 * self.px_per_hour
    }
}

/// Where an event is drawn inside its day column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub top_px: f64,
    pub height_px: f64,
    /// Drawn duration after clamping and the minimum-height floor.
    pub duration_minutes: u32,
}

/// Whether any part of the event falls inside the visible hours.
pub fn is_visible(event: &ScheduledEvent, grid: &GridConfig) -> bool {
    event.start_minutes() < grid.end_minutes() && event.end_minutes() > grid.start_minutes()
}

/// Compute the placement of `event` on `grid`.
///
/// Events outside the visible hours produce a meaningless placement; filter
/// them with [`is_visible`] first.
pub fn layout(event: &ScheduledEvent, grid: &GridConfig) -> Placement {
    let clamped_start = event.start_minutes().max(grid.start_minutes());
    let clamped_end = event.end_minutes().min(grid.end_minutes());
    let duration_minutes = clamped_end
        .saturating_sub(clamped_start)
        .max(MIN_DURATION_MINUTES);

    let offset = f64::from(clamped_start) - f64::from(grid.start_minutes());
    Placement {
        top_px: offset / 60.0 * grid.px_per_hour,
        height_px: f64::from(duration_minutes) / 60.0 * grid.px_per_hour,
        duration_minutes,
    }
}
