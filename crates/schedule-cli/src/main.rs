//! `schedule` CLI — view and edit a weekly team training schedule.
//!
//! Events live in a JSON file (`--events`, default `events.json`) using the
//! club backend's wire format.
//!
//! ## Usage
//!
//! ```sh
//! # Show the current week with hour-grid placements
//! schedule week
//!
//! # Show next week for one team, as JSON
//! schedule week --offset 1 --team 3 --json
//!
//! # Sorted list of every session
//! schedule list
//!
//! # Sessions grouped per day of the week containing a date
//! schedule agenda --date 2026-03-04
//!
//! # Would a Monday 18:00-19:00 session clash? (exit code 1 if it does)
//! schedule check --weekday 1 --start 18:00 --end 19:00
//!
//! # Create, edit and remove sessions (clash-checked before writing)
//! schedule add --team 3 --place "Court 1" --date 2026-03-04 --start 17:00 --end 19:00
//! schedule edit 4 --end 19:30
//! schedule edit 1 --once
//! schedule remove 4
//! ```

mod file_store;
mod render;

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use schedule_engine::day::from_sunday_index;
use schedule_engine::time::{next_occurrence, parse_clock_time, parse_local_date};
use schedule_engine::{
    Candidate, DayMatch, EventDraft, EventId, GridConfig, ScheduleView, SubmitError, TeamId,
    TrainerId,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::file_store::JsonFileStore;

#[derive(Parser)]
#[command(name = "schedule", version, about = "Weekly team training schedule")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file holding the events
    #[arg(short, long, global = true, default_value = "events.json")]
    events: PathBuf,

    /// IANA timezone used to determine today's date (defaults to system local time)
    #[arg(long, global = true)]
    tz: Option<String>,

    /// Use this date (YYYY-MM-DD) as today
    #[arg(long, global = true)]
    today: Option<String>,

    /// Read a dated event's weekday from its date instead of the stored weekday
    #[arg(long, global = true)]
    resolve_weekdays: bool,

    /// Log engine activity to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one week, column by column, with grid placements
    Week {
        #[command(flatten)]
        week: WeekArgs,
        /// Visible hour grid
        #[command(flatten)]
        grid: GridArgs,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List every session: dated ones by date, then weekly ones by weekday
    List {
        /// Only this team's sessions
        #[arg(long)]
        team: Option<u64>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Sessions of one week grouped per day, empty days omitted
    Agenda {
        #[command(flatten)]
        week: WeekArgs,
    },
    /// Check whether a slot clashes with the schedule (exit code 1 if it does)
    Check {
        #[command(flatten)]
        slot: SlotArgs,
        /// Event being edited, excluded from the check
        #[arg(long)]
        ignore: Option<u64>,
    },
    /// Create a session after checking it for clashes
    Add {
        #[command(flatten)]
        slot: SlotArgs,
        /// Team the session belongs to
        #[arg(long)]
        team: u64,
        /// Location label
        #[arg(long)]
        place: String,
        /// Trainer user id
        #[arg(long)]
        trainer: Option<u64>,
        /// Display colour
        #[arg(long)]
        color: Option<String>,
    },
    /// Change fields of an existing session after checking it for clashes
    Edit {
        /// Id of the session
        id: u64,
        #[arg(long)]
        team: Option<u64>,
        #[arg(long)]
        place: Option<String>,
        #[arg(long)]
        trainer: Option<u64>,
        #[arg(long)]
        color: Option<String>,
        /// Pin the session to a date (YYYY-MM-DD)
        #[arg(long, conflicts_with = "weekday")]
        date: Option<String>,
        /// Make the session weekly on this day (0 = Sunday .. 6 = Saturday)
        #[arg(long)]
        weekday: Option<i64>,
        /// Turn a weekly session into a one-off on its next occurrence
        #[arg(long, conflicts_with_all = ["date", "weekday"])]
        once: bool,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        /// Mark the session inactive
        #[arg(long)]
        inactive: bool,
    },
    /// Delete a session
    Remove {
        /// Id of the session
        id: u64,
    },
}

#[derive(Args)]
struct WeekArgs {
    /// Show the week containing this date (defaults to today)
    #[arg(long)]
    date: Option<String>,
    /// Move this many weeks forward (negative: backward)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    offset: i64,
    /// Only this team's sessions
    #[arg(long)]
    team: Option<u64>,
}

#[derive(Args)]
struct GridArgs {
    /// First visible hour
    #[arg(long, default_value_t = 8)]
    start_hour: u32,
    /// Last visible hour
    #[arg(long, default_value_t = 23)]
    end_hour: u32,
    /// Pixels per hour
    #[arg(long, default_value_t = 60.0)]
    px_per_hour: f64,
}

#[derive(Args)]
struct SlotArgs {
    /// Date of a one-off session (YYYY-MM-DD)
    #[arg(long, required_unless_present = "weekday", conflicts_with = "weekday")]
    date: Option<String>,
    /// Weekday of a weekly session (0 = Sunday .. 6 = Saturday)
    #[arg(long)]
    weekday: Option<i64>,
    /// Start time (HH:MM)
    #[arg(long)]
    start: String,
    /// End time (HH:MM)
    #[arg(long)]
    end: String,
}

impl SlotArgs {
    fn candidate(&self) -> Result<Candidate> {
        Candidate::parse(self.weekday, self.date.as_deref(), &self.start, &self.end)
            .context("Invalid session slot")
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let today = resolve_today(cli.today.as_deref(), cli.tz.as_deref())?;
    debug!(%today, events = %cli.events.display(), "starting");

    let mut store = JsonFileStore::open(&cli.events)
        .with_context(|| format!("Failed to load events from {}", cli.events.display()))?;
    let day_match = if cli.resolve_weekdays {
        DayMatch::Resolved
    } else {
        DayMatch::Recorded
    };
    let mut view = ScheduleView::new(today).with_day_match(day_match);
    view.refresh(&store).context("Failed to read events")?;

    match cli.command {
        Commands::Week { week, grid, json } => {
            let grid = GridConfig::new(grid.start_hour, grid.end_hour, grid.px_per_hour)
                .context("Invalid grid")?;
            let mut view = view.with_grid(grid)?;
            select_week(&mut view, &week)?;
            if json {
                println!("{}", render::week_json(&view)?);
            } else {
                print!("{}", render::week_text(&view));
            }
        }
        Commands::List { team, json } => {
            view.set_team_filter(team.map(TeamId));
            let events = view.displayed_events();
            if json {
                println!("{}", render::list_json(&events)?);
            } else {
                print!("{}", render::list_text(&events));
            }
        }
        Commands::Agenda { week } => {
            select_week(&mut view, &week)?;
            print!("{}", render::agenda_text(&view.week_label(), &view.agenda()));
        }
        Commands::Check { slot, ignore } => {
            let candidate = slot.candidate()?;
            match view.validate_new_event(&candidate, ignore.map(EventId)) {
                Ok(()) => println!("No clash: slot is free."),
                Err(clash) => {
                    eprintln!("Schedule clash: {}", clash);
                    process::exit(1);
                }
            }
        }
        Commands::Add {
            slot,
            team,
            place,
            trainer,
            color,
        } => {
            let candidate = slot.candidate()?;
            let mut draft = EventDraft::new(
                TeamId(team),
                place,
                candidate.weekday,
                candidate.start_time,
                candidate.end_time,
            );
            draft.date = candidate.date;
            draft.trainer_id = trainer.map(TrainerId);
            if let Some(color) = color {
                draft.color = color;
            }
            let created = view
                .create_event(&mut store, draft)
                .map_err(submit_error)
                .context("Could not create session")?;
            println!("Created session #{}: {}", created.id, render::event_line(&created));
        }
        Commands::Edit {
            id,
            team,
            place,
            trainer,
            color,
            date,
            weekday,
            once,
            start,
            end,
            inactive,
        } => {
            let id = EventId(id);
            let existing = view
                .events()
                .iter()
                .find(|e| e.id == id)
                .with_context(|| format!("No session with id {}", id))?;
            let mut draft = existing.to_draft();
            if let Some(team) = team {
                draft.team_id = TeamId(team);
            }
            if let Some(place) = place {
                draft.place = place;
            }
            if let Some(trainer) = trainer {
                draft.trainer_id = Some(TrainerId(trainer));
            }
            if let Some(color) = color {
                draft.color = color;
            }
            if let Some(raw) = date {
                draft = draft.on(parse_local_date(&raw).context("Invalid --date")?);
            }
            if let Some(index) = weekday {
                draft.weekday = from_sunday_index(index)?;
                draft.date = None;
            }
            if once && draft.date.is_none() {
                let weekday = draft.weekday;
                draft = draft.on(next_occurrence(weekday, today));
            }
            if let Some(raw) = start {
                draft.start_time = parse_clock_time(&raw)?;
            }
            if let Some(raw) = end {
                draft.end_time = parse_clock_time(&raw)?;
            }
            if inactive {
                draft.active = false;
            }
            let updated = view
                .update_event(&mut store, id, draft)
                .map_err(submit_error)
                .context("Could not update session")?;
            println!("Updated session #{}: {}", updated.id, render::event_line(&updated));
        }
        Commands::Remove { id } => {
            view.delete_event(&mut store, EventId(id))
                .context("Could not remove session")?;
            println!("Removed session #{}", id);
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Today's date from `--today`, else from `--tz`, else the system clock.
fn resolve_today(today: Option<&str>, tz: Option<&str>) -> Result<NaiveDate> {
    if let Some(raw) = today {
        return parse_local_date(raw).context("Invalid --today");
    }
    match tz {
        Some(name) => {
            let zone: chrono_tz::Tz = name
                .parse()
                .map_err(|_| anyhow::anyhow!("Unknown timezone: '{}'", name))?;
            Ok(Utc::now().with_timezone(&zone).date_naive())
        }
        None => Ok(Local::now().date_naive()),
    }
}

fn select_week(view: &mut ScheduleView, args: &WeekArgs) -> Result<()> {
    if let Some(raw) = &args.date {
        view.go_to_week_of(parse_local_date(raw).context("Invalid --date")?);
    }
    view.go_to_week_offset(args.offset)
        .with_context(|| format!("Cannot move {} weeks", args.offset))?;
    view.set_team_filter(args.team.map(TeamId));
    Ok(())
}

fn submit_error(err: SubmitError) -> anyhow::Error {
    match err {
        SubmitError::Conflict(clash) => anyhow::anyhow!("Schedule clash: {}", clash),
        other => other.into(),
    }
}
